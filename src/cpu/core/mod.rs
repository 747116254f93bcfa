/*!
core::Cpu - the 6502 execution engine.

`Cpu` owns the architectural state, the pending-interrupt latch and a running cycle
count. One `step` is one instruction boundary:

1. If an NMI is latched: push PCH, PCL and P (BREAK set), set I, load PC from $FFFA.
   This adds 7 cycles and clears the latch.
2. Fetch the opcode at PC and advance PC.
3. Look the opcode up in `OPCODE_TABLE`; an opcode that is not emulated stops the
   run with `NesError::UnimplementedOpcode`.
4. Resolve the addressing mode into a `MemoryAccess`, execute, and report the
   nominal cycle count from the table.

With `RUST_LOG=trace` every instruction is logged as a disassembly line.
*/

use log::{Level, debug, log_enabled, trace};

use crate::bus::Bus;
use crate::cpu::access::MemoryAccess;
use crate::cpu::addressing::{self, AddressingMode};
use crate::cpu::execute;
use crate::cpu::opcodes::{self, Opcode};
use crate::cpu::state::{CpuState, IRQ_DISABLE};
use crate::error::NesError;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const INTERRUPT_CYCLES: u32 = 7;

/// Interrupt request latched for the next instruction boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interrupt {
    #[default]
    None,
    Nmi,
}

#[derive(Debug, Clone, Default)]
pub struct Cpu {
    state: CpuState,
    pending: Interrupt,
    cycles: u64,
}

impl Cpu {
    /// CPU with power-on registers; PC is loaded by `reset`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Power-on registers, PC from the reset vector, latch and cycle count cleared.
    pub fn reset(&mut self, bus: &mut Bus) {
        self.state.reset(bus);
        self.pending = Interrupt::None;
        self.cycles = 0;
    }

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    /// Latch an NMI; it is taken at the start of the next `step`.
    pub fn request_nmi(&mut self) {
        self.pending = Interrupt::Nmi;
    }

    pub fn pending_interrupt(&self) -> Interrupt {
        self.pending
    }

    /// Total cycles reported by `step` since reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Execute one instruction (servicing a latched NMI first) and return its cycles.
    pub fn step(&mut self, bus: &mut Bus) -> Result<u32, NesError> {
        let mut cycles = 0;
        if self.pending == Interrupt::Nmi {
            self.pending = Interrupt::None;
            self.service_nmi(bus);
            cycles += INTERRUPT_CYCLES;
        }

        let pc = self.state.pc;
        let code = self.state.fetch_u8(bus);
        let Some(op) = opcodes::decode(code) else {
            return Err(NesError::UnimplementedOpcode { opcode: code, pc });
        };
        if log_enabled!(Level::Trace) {
            self.trace(bus, pc, op);
        }

        let operand = addressing::resolve(op.mode, &mut self.state, bus);
        let mut access = MemoryAccess::new(operand);
        execute::execute(op.instruction, &mut access, &mut self.state, bus);

        cycles += op.cycles as u32;
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    fn service_nmi(&mut self, bus: &mut Bus) {
        debug!("NMI at ${:04X}", self.state.pc);
        let pc = self.state.pc;
        self.state.push_u16(bus, pc);
        let p = self.state.compose_status_for_push(true);
        self.state.push_u8(bus, p);
        self.state.set_flag(IRQ_DISABLE, true);
        self.state.pc = bus.read_word(NMI_VECTOR);
    }

    fn trace(&self, bus: &mut Bus, pc: u16, op: Opcode) {
        let len = op.mode.operand_len();
        let mut bytes = [0u8; 2];
        for (i, b) in bytes.iter_mut().enumerate().take(len as usize) {
            *b = bus.read_byte(pc.wrapping_add(1 + i as u16));
        }
        let next_pc = pc.wrapping_add(instruction_len(op.mode));
        let operand = opcodes::format_operand(op.mode, bytes, next_pc);
        let s = &self.state;
        trace!(
            "{:04X}  {:02X}  {} {:<10} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc,
            op.code,
            opcodes::mnemonic(op.code),
            operand,
            s.a,
            s.x,
            s.y,
            s.status,
            s.sp,
            self.cycles
        );
    }

    // ---------------------------------------------------------------------
    // Register accessors
    // ---------------------------------------------------------------------
    pub fn a(&self) -> u8 {
        self.state.a
    }
    pub fn x(&self) -> u8 {
        self.state.x
    }
    pub fn y(&self) -> u8 {
        self.state.y
    }
    pub fn sp(&self) -> u8 {
        self.state.sp
    }
    pub fn pc(&self) -> u16 {
        self.state.pc
    }
    pub fn status(&self) -> u8 {
        self.state.status
    }

    pub fn set_a(&mut self, v: u8) {
        self.state.a = v;
    }
    pub fn set_x(&mut self, v: u8) {
        self.state.x = v;
    }
    pub fn set_y(&mut self, v: u8) {
        self.state.y = v;
    }
    pub fn set_sp(&mut self, v: u8) {
        self.state.sp = v;
    }
    pub fn set_pc(&mut self, v: u16) {
        self.state.pc = v;
    }
    pub fn set_status(&mut self, v: u8) {
        self.state.status = v;
    }

    pub fn get_flag(&self, mask: u8) -> bool {
        self.state.get_flag(mask)
    }

    pub fn set_flag(&mut self, mask: u8, on: bool) {
        self.state.set_flag(mask, on);
    }
}

/// Bytes an instruction occupies, opcode included.
pub fn instruction_len(mode: AddressingMode) -> u16 {
    1 + mode.operand_len()
}
