/*!
access.rs - the operand handle an instruction reads and writes through.

`MemoryAccess` wraps a resolved `Operand`. The first `read` of a memory operand goes
to the bus and the value is kept; later reads reuse it, so an instruction never
triggers a register's read side effect twice. `write` always goes to the bus and
drops the kept value, so a read after a write observes the bus again.

Read-modify-write handlers follow read -> compute -> write, one of each.
*/

use crate::bus::Bus;
use crate::cpu::state::CpuState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Implied,
    Accumulator,
    Immediate(u8),
    Address(u16),
}

#[derive(Debug)]
pub struct MemoryAccess {
    operand: Operand,
    cached: Option<u8>,
}

impl MemoryAccess {
    pub fn new(operand: Operand) -> Self {
        Self {
            operand,
            cached: None,
        }
    }

    pub fn operand(&self) -> Operand {
        self.operand
    }

    /// Effective address, for memory operands.
    pub fn address(&self) -> Option<u16> {
        match self.operand {
            Operand::Address(a) => Some(a),
            _ => None,
        }
    }

    pub fn read(&mut self, cpu: &CpuState, bus: &mut Bus) -> u8 {
        match self.operand {
            Operand::Accumulator => cpu.a,
            Operand::Immediate(v) => v,
            Operand::Implied => 0,
            Operand::Address(addr) => *self.cached.get_or_insert_with(|| bus.read_byte(addr)),
        }
    }

    pub fn write(&mut self, cpu: &mut CpuState, bus: &mut Bus, value: u8) {
        match self.operand {
            Operand::Accumulator => cpu.a = value,
            Operand::Address(addr) => {
                self.cached = None;
                bus.write_byte(addr, value);
            }
            Operand::Immediate(_) | Operand::Implied => {}
        }
    }
}
