/*!
addressing.rs - 6502 addressing modes and operand resolution.

`resolve` turns a mode tag into an `Operand`, consuming the operand bytes that follow
the opcode (PC must already point past the opcode byte):

| mode        | bytes | operand |
|-------------|-------|---------|
| Implied     | 0     | none |
| Accumulator | 0     | register A |
| Immediate   | 1     | the byte itself |
| ZeroPage    | 1     | `$00nn` |
| ZeroPageX/Y | 1     | `(nn + X/Y) & $FF` |
| Absolute    | 2     | `$hhll` |
| AbsoluteX/Y | 2     | `$hhll + X/Y` (may cross a page) |
| Indirect    | 2     | word at `$hhll` (JMP only, page-wrap bug) |
| IndirectX   | 1     | word at `(nn + X) & $FF` |
| IndirectY   | 1     | word at `nn`, then `+ Y` |
| Relative    | 1     | PC after operand + signed offset |

Zero-page pointer reads wrap within page 0 ($FF's high byte comes from $00), and
JMP ($xxFF) takes its high byte from $xx00. Both differ on purpose from `Bus::read_word`,
which always reads `addr + 1`.
No page-cross cycle penalties are reported; instruction timing is nominal.
*/

use crate::bus::Bus;
use crate::cpu::access::Operand;
use crate::cpu::state::CpuState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u16 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
            _ => 1,
        }
    }
}

/// Resolve the operand for `mode`, advancing PC past its bytes.
pub fn resolve(mode: AddressingMode, cpu: &mut CpuState, bus: &mut Bus) -> Operand {
    use AddressingMode::*;
    match mode {
        Implied => Operand::Implied,
        Accumulator => Operand::Accumulator,
        Immediate => Operand::Immediate(cpu.fetch_u8(bus)),
        ZeroPage => Operand::Address(cpu.fetch_u8(bus) as u16),
        ZeroPageX => Operand::Address(cpu.fetch_u8(bus).wrapping_add(cpu.x) as u16),
        ZeroPageY => Operand::Address(cpu.fetch_u8(bus).wrapping_add(cpu.y) as u16),
        Absolute => Operand::Address(cpu.fetch_u16(bus)),
        AbsoluteX => Operand::Address(cpu.fetch_u16(bus).wrapping_add(cpu.x as u16)),
        AbsoluteY => Operand::Address(cpu.fetch_u16(bus).wrapping_add(cpu.y as u16)),
        Indirect => {
            let ptr = cpu.fetch_u16(bus);
            Operand::Address(read_word_indirect_bug(bus, ptr))
        }
        IndirectX => {
            let zp = cpu.fetch_u8(bus).wrapping_add(cpu.x);
            Operand::Address(read_word_zp(bus, zp))
        }
        IndirectY => {
            let zp = cpu.fetch_u8(bus);
            Operand::Address(read_word_zp(bus, zp).wrapping_add(cpu.y as u16))
        }
        Relative => {
            let offset = cpu.fetch_u8(bus) as i8;
            Operand::Address(cpu.pc.wrapping_add(offset as u16))
        }
    }
}

/// Little-endian pointer from zero page; the high byte wraps to $00 after $FF.
#[inline]
pub(crate) fn read_word_zp(bus: &mut Bus, base: u8) -> u16 {
    let lo = bus.read_byte(base as u16) as u16;
    let hi = bus.read_byte(base.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

/// JMP ($xxFF) reads its high byte from $xx00, not the next page.
#[inline]
pub(crate) fn read_word_indirect_bug(bus: &mut Bus, addr: u16) -> u16 {
    let lo = bus.read_byte(addr) as u16;
    let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let hi = bus.read_byte(hi_addr) as u16;
    (hi << 8) | lo
}
