//! iNES images for the integration tests.

#![allow(dead_code)]

use nescore::{Cartridge, Nes};

/// iNES v1 image: header, zero-filled PRG/CHR, `prg` copied to the start of PRG and
/// the NMI/RESET/IRQ vectors written at the end of the last bank.
pub fn ines(prg_pages: u8, chr_pages: u8, flags6: u8, prg: &[u8], vectors: (u16, u16, u16)) -> Vec<u8> {
    let prg_len = prg_pages as usize * 0x4000;
    let mut rom = Vec::new();
    rom.extend_from_slice(b"NES\x1A");
    rom.extend_from_slice(&[prg_pages, chr_pages, flags6, 0]);
    rom.extend_from_slice(&[0; 8]);

    let mut bank = vec![0u8; prg_len];
    bank[..prg.len()].copy_from_slice(prg);
    let (reset, nmi, irq) = vectors;
    for (i, v) in [nmi, reset, irq].into_iter().enumerate() {
        bank[prg_len - 6 + i * 2..prg_len - 4 + i * 2].copy_from_slice(&v.to_le_bytes());
    }
    rom.extend_from_slice(&bank);
    rom.resize(rom.len() + chr_pages as usize * 0x2000, 0);
    rom
}

/// Powered-on console running `prg` from $8000 on a 16 KiB NROM board.
pub fn nes_with(prg: &[u8]) -> Nes {
    nes_with_vectors(prg, (0x8000, 0x8000, 0x8000))
}

pub fn nes_with_vectors(prg: &[u8], vectors: (u16, u16, u16)) -> Nes {
    let cart = Cartridge::from_ines_bytes(&ines(1, 1, 0, prg, vectors)).expect("valid image");
    Nes::new(cart).expect("NROM board")
}
