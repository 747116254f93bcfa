//! Whole-range properties: ADC arithmetic, operand byte consumption per opcode,
//! PPUADDR/PPUDATA increments, PPUSTATUS toggle reset and nametable mirroring.

mod common;

use common::{ines, nes_with};
use nescore::cpu::opcodes::OPCODE_TABLE;
use nescore::cpu::{CARRY, DECIMAL, Instruction, OVERFLOW};
use nescore::ppu::Ppu;
use nescore::{Cartridge, Mirroring, Nes};

#[test]
fn binary_adc_matches_wide_arithmetic() {
    // ADC $10
    let mut nes = nes_with(&[0x65, 0x10]);
    for a in 0..=255u8 {
        for b in 0..=255u8 {
            for c in [false, true] {
                nes.cpu_mut().set_pc(0x8000);
                nes.cpu_mut().set_a(a);
                nes.cpu_mut().set_flag(CARRY, c);
                nes.cpu_mut().set_flag(DECIMAL, false);
                nes.bus_mut().write_byte(0x0010, b);
                nes.step().expect("adc");

                let wide = a as u16 + b as u16 + c as u16;
                let r = wide as u8;
                let cpu = nes.cpu();
                assert_eq!(cpu.a(), r, "{a:02X}+{b:02X}+{c}");
                assert_eq!(cpu.get_flag(CARRY), wide > 0xFF, "{a:02X}+{b:02X}+{c}");
                let overflow = (!(a ^ b) & (a ^ r) & 0x80) != 0;
                assert_eq!(cpu.get_flag(OVERFLOW), overflow, "{a:02X}+{b:02X}+{c}");
            }
        }
    }
}

#[test]
fn pc_advances_past_operand_bytes() {
    use Instruction::*;
    for op in OPCODE_TABLE.iter().flatten() {
        if matches!(op.instruction, Jmp | Jsr | Rts | Rti | Brk) {
            continue;
        }
        // Zero operands: branches land on the next instruction either way.
        let mut nes = nes_with(&[op.code, 0x00, 0x00]);
        nes.step().expect("emulated opcode");
        assert_eq!(
            nes.cpu().pc(),
            0x8001 + op.mode.operand_len(),
            "opcode ${:02X} ({:?})",
            op.code,
            op.mode
        );
    }
}

fn data_port_run(ctrl: u8, count: u16) -> u16 {
    let mut nes = nes_with(&[0xEA]);
    let bus = nes.bus_mut();
    bus.write_byte(0x2000, ctrl);
    bus.write_byte(0x2006, 0x20);
    bus.write_byte(0x2006, 0x00);
    for i in 0..count {
        bus.write_byte(0x2007, i as u8);
    }
    bus.ppu().vram_addr()
}

#[test]
fn data_port_increments_by_one_or_thirty_two() {
    for n in [0u16, 1, 5, 17] {
        assert_eq!(data_port_run(0x00, n), 0x2000 + n);
        assert_eq!(data_port_run(0x04, n), 0x2000 + n * 32);
    }
}

#[test]
fn status_reads_reset_the_toggle_once() {
    let mut nes = nes_with(&[0xEA]);
    let bus = nes.bus_mut();
    bus.write_byte(0x2006, 0x21);
    assert!(bus.ppu().write_toggle());
    bus.read_byte(0x2002);
    assert!(!bus.ppu().write_toggle());
    bus.read_byte(0x2002);
    assert!(!bus.ppu().write_toggle());

    // The next PPUADDR write is a high byte again.
    bus.write_byte(0x2006, 0x23);
    bus.write_byte(0x2006, 0x45);
    assert_eq!(bus.ppu().vram_addr(), 0x2345);
}

#[test]
fn nametable_mirroring_pairs() {
    let v = Ppu::new(Mirroring::Vertical);
    assert_eq!(v.nametable_index(0x2000), v.nametable_index(0x2800));
    assert_eq!(v.nametable_index(0x2400), v.nametable_index(0x2C00));
    assert_ne!(v.nametable_index(0x2000), v.nametable_index(0x2400));

    let h = Ppu::new(Mirroring::Horizontal);
    assert_eq!(h.nametable_index(0x2000), h.nametable_index(0x2400));
    assert_eq!(h.nametable_index(0x2800), h.nametable_index(0x2C00));
    assert_ne!(h.nametable_index(0x2000), h.nametable_index(0x2800));
}

#[test]
fn header_mirroring_reaches_the_ppu() {
    for (flags6, expect) in [(0x00, Mirroring::Horizontal), (0x01, Mirroring::Vertical)] {
        let cart = Cartridge::from_ines_bytes(&ines(1, 1, flags6, &[0xEA], (0x8000, 0x8000, 0x8000)))
            .expect("image");
        assert_eq!(cart.mirroring(), expect);
        let mut nes = Nes::new(cart).expect("nes");
        let bus = nes.bus_mut();
        // Write through $2000 and read back through the mirrored table.
        bus.write_byte(0x2006, 0x20);
        bus.write_byte(0x2006, 0x05);
        bus.write_byte(0x2007, 0x5A);
        let alias: u16 = if expect == Mirroring::Vertical { 0x2805 } else { 0x2405 };
        bus.write_byte(0x2006, (alias >> 8) as u8);
        bus.write_byte(0x2006, alias as u8);
        bus.read_byte(0x2007);
        assert_eq!(bus.read_byte(0x2007), 0x5A, "flags6 {flags6:#04X}");
    }
}
