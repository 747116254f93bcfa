/*!
opcodes.rs - 256-entry opcode metadata.

- `OPCODE_TABLE`: opcode byte -> `Opcode { instruction, mode, cycles }`, `None` for
  codes that are not emulated (KIL and the unstable undocumented group).
- `CYCLES`: nominal cycle count per opcode. Page-cross and branch-taken extras are
  not added.
- `MNEMONICS`: a name for every byte, including undocumented ones, for trace output
  and diagnostics.

The table is built at compile time from the `DEFINITIONS` list.
*/

use crate::cpu::addressing::AddressingMode::{self, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    // Undocumented
    Lax, Sax, Dcp, Isc, Slo, Rla, Sre, Rra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub code: u8,
    pub instruction: Instruction,
    pub mode: AddressingMode,
    pub cycles: u8,
}

#[rustfmt::skip]
pub const CYCLES: [u8; 256] = [
    7,6,2,8,3,3,5,5,3,2,2,2,4,4,6,6,
    2,5,2,8,4,4,6,6,2,4,2,7,4,4,7,7,
    6,6,2,8,3,3,5,5,4,2,2,2,4,4,6,6,
    2,5,2,8,4,4,6,6,2,4,2,7,4,4,7,7,
    6,6,2,8,3,3,5,5,3,2,2,2,3,4,6,6,
    2,5,2,8,4,4,6,6,2,4,2,7,4,4,7,7,
    6,6,2,8,3,3,5,5,4,2,2,2,5,4,6,6,
    2,5,2,8,4,4,6,6,2,4,2,7,4,4,7,7,
    2,6,2,6,3,3,3,3,2,2,2,2,4,4,4,4,
    2,6,2,6,4,4,4,4,2,5,2,5,5,5,5,5,
    2,6,2,6,3,3,3,3,2,2,2,2,4,4,4,4,
    2,5,2,5,4,4,4,4,2,4,2,4,4,4,4,4,
    2,6,2,8,3,3,5,5,2,2,2,2,4,4,6,6,
    2,5,2,8,4,4,6,6,2,4,2,7,4,4,7,7,
    2,6,2,8,3,3,5,5,2,2,2,2,4,4,6,6,
    2,5,2,8,4,4,6,6,2,4,2,7,4,4,7,7,
];

#[rustfmt::skip]
pub const MNEMONICS: [&str; 256] = [
    "BRK","ORA","KIL","SLO","NOP","ORA","ASL","SLO","PHP","ORA","ASL","ANC","NOP","ORA","ASL","SLO",
    "BPL","ORA","KIL","SLO","NOP","ORA","ASL","SLO","CLC","ORA","NOP","SLO","NOP","ORA","ASL","SLO",
    "JSR","AND","KIL","RLA","BIT","AND","ROL","RLA","PLP","AND","ROL","ANC","BIT","AND","ROL","RLA",
    "BMI","AND","KIL","RLA","NOP","AND","ROL","RLA","SEC","AND","NOP","RLA","NOP","AND","ROL","RLA",
    "RTI","EOR","KIL","SRE","NOP","EOR","LSR","SRE","PHA","EOR","LSR","ALR","JMP","EOR","LSR","SRE",
    "BVC","EOR","KIL","SRE","NOP","EOR","LSR","SRE","CLI","EOR","NOP","SRE","NOP","EOR","LSR","SRE",
    "RTS","ADC","KIL","RRA","NOP","ADC","ROR","RRA","PLA","ADC","ROR","ARR","JMP","ADC","ROR","RRA",
    "BVS","ADC","KIL","RRA","NOP","ADC","ROR","RRA","SEI","ADC","NOP","RRA","NOP","ADC","ROR","RRA",
    "NOP","STA","NOP","SAX","STY","STA","STX","SAX","DEY","NOP","TXA","XAA","STY","STA","STX","SAX",
    "BCC","STA","KIL","AHX","STY","STA","STX","SAX","TYA","STA","TXS","TAS","SHY","STA","SHX","AHX",
    "LDY","LDA","LDX","LAX","LDY","LDA","LDX","LAX","TAY","LDA","TAX","LAX","LDY","LDA","LDX","LAX",
    "BCS","LDA","KIL","LAX","LDY","LDA","LDX","LAX","CLV","LDA","TSX","LAS","LDY","LDA","LDX","LAX",
    "CPY","CMP","NOP","DCP","CPY","CMP","DEC","DCP","INY","CMP","DEX","AXS","CPY","CMP","DEC","DCP",
    "BNE","CMP","KIL","DCP","NOP","CMP","DEC","DCP","CLD","CMP","NOP","DCP","NOP","CMP","DEC","DCP",
    "CPX","SBC","NOP","ISC","CPX","SBC","INC","ISC","INX","SBC","NOP","SBC","CPX","SBC","INC","ISC",
    "BEQ","SBC","KIL","ISC","NOP","SBC","INC","ISC","SED","SBC","NOP","ISC","NOP","SBC","INC","ISC",
];

use Instruction::*;

/// Every emulated opcode.
#[rustfmt::skip]
const DEFINITIONS: &[(u8, Instruction, AddressingMode)] = &[
    // Loads / stores
    (0xA9, Lda, Immediate), (0xA5, Lda, ZeroPage), (0xB5, Lda, ZeroPageX), (0xAD, Lda, Absolute),
    (0xBD, Lda, AbsoluteX), (0xB9, Lda, AbsoluteY), (0xA1, Lda, IndirectX), (0xB1, Lda, IndirectY),
    (0xA2, Ldx, Immediate), (0xA6, Ldx, ZeroPage), (0xB6, Ldx, ZeroPageY), (0xAE, Ldx, Absolute),
    (0xBE, Ldx, AbsoluteY),
    (0xA0, Ldy, Immediate), (0xA4, Ldy, ZeroPage), (0xB4, Ldy, ZeroPageX), (0xAC, Ldy, Absolute),
    (0xBC, Ldy, AbsoluteX),
    (0x85, Sta, ZeroPage), (0x95, Sta, ZeroPageX), (0x8D, Sta, Absolute), (0x9D, Sta, AbsoluteX),
    (0x99, Sta, AbsoluteY), (0x81, Sta, IndirectX), (0x91, Sta, IndirectY),
    (0x86, Stx, ZeroPage), (0x96, Stx, ZeroPageY), (0x8E, Stx, Absolute),
    (0x84, Sty, ZeroPage), (0x94, Sty, ZeroPageX), (0x8C, Sty, Absolute),

    // Transfers and stack
    (0xAA, Tax, Implied), (0xA8, Tay, Implied), (0xBA, Tsx, Implied), (0x8A, Txa, Implied),
    (0x9A, Txs, Implied), (0x98, Tya, Implied),
    (0x48, Pha, Implied), (0x08, Php, Implied), (0x68, Pla, Implied), (0x28, Plp, Implied),

    // Arithmetic
    (0x69, Adc, Immediate), (0x65, Adc, ZeroPage), (0x75, Adc, ZeroPageX), (0x6D, Adc, Absolute),
    (0x7D, Adc, AbsoluteX), (0x79, Adc, AbsoluteY), (0x61, Adc, IndirectX), (0x71, Adc, IndirectY),
    (0xE9, Sbc, Immediate), (0xE5, Sbc, ZeroPage), (0xF5, Sbc, ZeroPageX), (0xED, Sbc, Absolute),
    (0xFD, Sbc, AbsoluteX), (0xF9, Sbc, AbsoluteY), (0xE1, Sbc, IndirectX), (0xF1, Sbc, IndirectY),
    (0xEB, Sbc, Immediate),
    (0xC9, Cmp, Immediate), (0xC5, Cmp, ZeroPage), (0xD5, Cmp, ZeroPageX), (0xCD, Cmp, Absolute),
    (0xDD, Cmp, AbsoluteX), (0xD9, Cmp, AbsoluteY), (0xC1, Cmp, IndirectX), (0xD1, Cmp, IndirectY),
    (0xE0, Cpx, Immediate), (0xE4, Cpx, ZeroPage), (0xEC, Cpx, Absolute),
    (0xC0, Cpy, Immediate), (0xC4, Cpy, ZeroPage), (0xCC, Cpy, Absolute),

    // Logical
    (0x29, And, Immediate), (0x25, And, ZeroPage), (0x35, And, ZeroPageX), (0x2D, And, Absolute),
    (0x3D, And, AbsoluteX), (0x39, And, AbsoluteY), (0x21, And, IndirectX), (0x31, And, IndirectY),
    (0x09, Ora, Immediate), (0x05, Ora, ZeroPage), (0x15, Ora, ZeroPageX), (0x0D, Ora, Absolute),
    (0x1D, Ora, AbsoluteX), (0x19, Ora, AbsoluteY), (0x01, Ora, IndirectX), (0x11, Ora, IndirectY),
    (0x49, Eor, Immediate), (0x45, Eor, ZeroPage), (0x55, Eor, ZeroPageX), (0x4D, Eor, Absolute),
    (0x5D, Eor, AbsoluteX), (0x59, Eor, AbsoluteY), (0x41, Eor, IndirectX), (0x51, Eor, IndirectY),
    (0x24, Bit, ZeroPage), (0x2C, Bit, Absolute),

    // Read-modify-write
    (0x0A, Asl, Accumulator), (0x06, Asl, ZeroPage), (0x16, Asl, ZeroPageX), (0x0E, Asl, Absolute),
    (0x1E, Asl, AbsoluteX),
    (0x4A, Lsr, Accumulator), (0x46, Lsr, ZeroPage), (0x56, Lsr, ZeroPageX), (0x4E, Lsr, Absolute),
    (0x5E, Lsr, AbsoluteX),
    (0x2A, Rol, Accumulator), (0x26, Rol, ZeroPage), (0x36, Rol, ZeroPageX), (0x2E, Rol, Absolute),
    (0x3E, Rol, AbsoluteX),
    (0x6A, Ror, Accumulator), (0x66, Ror, ZeroPage), (0x76, Ror, ZeroPageX), (0x6E, Ror, Absolute),
    (0x7E, Ror, AbsoluteX),
    (0xE6, Inc, ZeroPage), (0xF6, Inc, ZeroPageX), (0xEE, Inc, Absolute), (0xFE, Inc, AbsoluteX),
    (0xC6, Dec, ZeroPage), (0xD6, Dec, ZeroPageX), (0xCE, Dec, Absolute), (0xDE, Dec, AbsoluteX),
    (0xE8, Inx, Implied), (0xC8, Iny, Implied), (0xCA, Dex, Implied), (0x88, Dey, Implied),

    // Control flow
    (0x4C, Jmp, Absolute), (0x6C, Jmp, Indirect), (0x20, Jsr, Absolute), (0x60, Rts, Implied),
    (0x00, Brk, Implied), (0x40, Rti, Implied),
    (0x90, Bcc, Relative), (0xB0, Bcs, Relative), (0xF0, Beq, Relative), (0x30, Bmi, Relative),
    (0xD0, Bne, Relative), (0x10, Bpl, Relative), (0x50, Bvc, Relative), (0x70, Bvs, Relative),

    // Flags
    (0x18, Clc, Implied), (0x38, Sec, Implied), (0x58, Cli, Implied), (0x78, Sei, Implied),
    (0xB8, Clv, Implied), (0xD8, Cld, Implied), (0xF8, Sed, Implied),

    // NOPs, documented and not
    (0xEA, Nop, Implied),
    (0x1A, Nop, Implied), (0x3A, Nop, Implied), (0x5A, Nop, Implied), (0x7A, Nop, Implied),
    (0xDA, Nop, Implied), (0xFA, Nop, Implied),
    (0x80, Nop, Immediate), (0x82, Nop, Immediate), (0x89, Nop, Immediate), (0xC2, Nop, Immediate),
    (0xE2, Nop, Immediate),
    (0x04, Nop, ZeroPage), (0x44, Nop, ZeroPage), (0x64, Nop, ZeroPage),
    (0x14, Nop, ZeroPageX), (0x34, Nop, ZeroPageX), (0x54, Nop, ZeroPageX), (0x74, Nop, ZeroPageX),
    (0xD4, Nop, ZeroPageX), (0xF4, Nop, ZeroPageX),
    (0x0C, Nop, Absolute),
    (0x1C, Nop, AbsoluteX), (0x3C, Nop, AbsoluteX), (0x5C, Nop, AbsoluteX), (0x7C, Nop, AbsoluteX),
    (0xDC, Nop, AbsoluteX), (0xFC, Nop, AbsoluteX),

    // Undocumented combined operations
    (0xA7, Lax, ZeroPage), (0xB7, Lax, ZeroPageY), (0xAF, Lax, Absolute), (0xBF, Lax, AbsoluteY),
    (0xA3, Lax, IndirectX), (0xB3, Lax, IndirectY),
    (0x87, Sax, ZeroPage), (0x97, Sax, ZeroPageY), (0x8F, Sax, Absolute), (0x83, Sax, IndirectX),
    (0xC7, Dcp, ZeroPage), (0xD7, Dcp, ZeroPageX), (0xCF, Dcp, Absolute), (0xDF, Dcp, AbsoluteX),
    (0xDB, Dcp, AbsoluteY), (0xC3, Dcp, IndirectX), (0xD3, Dcp, IndirectY),
    (0xE7, Isc, ZeroPage), (0xF7, Isc, ZeroPageX), (0xEF, Isc, Absolute), (0xFF, Isc, AbsoluteX),
    (0xFB, Isc, AbsoluteY), (0xE3, Isc, IndirectX), (0xF3, Isc, IndirectY),
    (0x07, Slo, ZeroPage), (0x17, Slo, ZeroPageX), (0x0F, Slo, Absolute), (0x1F, Slo, AbsoluteX),
    (0x1B, Slo, AbsoluteY), (0x03, Slo, IndirectX), (0x13, Slo, IndirectY),
    (0x27, Rla, ZeroPage), (0x37, Rla, ZeroPageX), (0x2F, Rla, Absolute), (0x3F, Rla, AbsoluteX),
    (0x3B, Rla, AbsoluteY), (0x23, Rla, IndirectX), (0x33, Rla, IndirectY),
    (0x47, Sre, ZeroPage), (0x57, Sre, ZeroPageX), (0x4F, Sre, Absolute), (0x5F, Sre, AbsoluteX),
    (0x5B, Sre, AbsoluteY), (0x43, Sre, IndirectX), (0x53, Sre, IndirectY),
    (0x67, Rra, ZeroPage), (0x77, Rra, ZeroPageX), (0x6F, Rra, Absolute), (0x7F, Rra, AbsoluteX),
    (0x7B, Rra, AbsoluteY), (0x63, Rra, IndirectX), (0x73, Rra, IndirectY),
];

const fn build_table() -> [Option<Opcode>; 256] {
    let mut table: [Option<Opcode>; 256] = [None; 256];
    let mut i = 0;
    while i < DEFINITIONS.len() {
        let (code, instruction, mode) = DEFINITIONS[i];
        table[code as usize] = Some(Opcode {
            code,
            instruction,
            mode,
            cycles: CYCLES[code as usize],
        });
        i += 1;
    }
    table
}

pub static OPCODE_TABLE: [Option<Opcode>; 256] = build_table();

#[inline]
pub fn decode(code: u8) -> Option<Opcode> {
    OPCODE_TABLE[code as usize]
}

#[inline]
pub fn mnemonic(code: u8) -> &'static str {
    MNEMONICS[code as usize]
}

/// Operand text for a trace line, e.g. `#$42`, `$0200,X`, `($10),Y`.
///
/// `bytes` are the operand bytes after the opcode; `next_pc` is the address of the
/// following instruction (for branch targets).
pub fn format_operand(mode: AddressingMode, bytes: [u8; 2], next_pc: u16) -> String {
    let lo = bytes[0];
    let word = u16::from_le_bytes(bytes);
    match mode {
        Implied => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${lo:02X}"),
        ZeroPage => format!("${lo:02X}"),
        ZeroPageX => format!("${lo:02X},X"),
        ZeroPageY => format!("${lo:02X},Y"),
        Absolute => format!("${word:04X}"),
        AbsoluteX => format!("${word:04X},X"),
        AbsoluteY => format!("${word:04X},Y"),
        Indirect => format!("(${word:04X})"),
        IndirectX => format!("(${lo:02X},X)"),
        IndirectY => format!("(${lo:02X}),Y"),
        Relative => format!("${:04X}", next_pc.wrapping_add(lo as i8 as u16)),
    }
}
