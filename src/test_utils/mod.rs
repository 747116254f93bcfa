/*!
Shared test utilities: iNES image builders and a bare pattern-table backend.

Builders:
- `build_ines(prg_16k, chr_8k, flags6, flags7, trainer)`: header + zero-filled PRG/CHR.
- `build_nrom_with_prg(prg, chr_8k, vectors)`: 16 KiB NROM image with `prg` at $8000 and
  the NMI/RESET/IRQ vectors written at the end of the bank (defaults: all $8000).
- `set_vectors_in_prg(prg, reset, nmi, irq)`: vector placement for 16 KiB or 32 KiB PRG.
- `nrom_bus(prg, vectors)`: a `Bus` over `build_nrom_with_prg(prg, 1, vectors)`.

`ChrRam` implements `PpuBus` over 8 KiB so PPU tests do not need a cartridge.
*/

use std::rc::Rc;

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::ppu_bus::PpuBus;

/// Build an iNES v1 image with zero-filled PRG and CHR.
pub fn build_ines(
    prg_16k: u8,
    chr_8k: u8,
    flags6: u8,
    flags7: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    let mut rom = Vec::with_capacity(16 + prg_16k as usize * 0x4000 + chr_8k as usize * 0x2000);
    rom.extend_from_slice(b"NES\x1A");
    rom.push(prg_16k);
    rom.push(chr_8k);
    rom.push(flags6);
    rom.push(flags7);
    rom.extend_from_slice(&[0u8; 8]);
    if let Some(t) = trainer {
        rom.extend_from_slice(t);
    }
    rom.resize(rom.len() + prg_16k as usize * 0x4000, 0);
    rom.resize(rom.len() + chr_8k as usize * 0x2000, 0);
    rom
}

/// Write NMI ($FFFA), RESET ($FFFC) and IRQ ($FFFE) vectors into a 16 or 32 KiB PRG buffer.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    let base = prg.len() - 6;
    for (i, v) in [nmi, reset, irq].into_iter().enumerate() {
        prg[base + i * 2] = v as u8;
        prg[base + i * 2 + 1] = (v >> 8) as u8;
    }
}

/// 16 KiB NROM image with `prg` at $8000; `vectors` is (reset, nmi, irq).
pub fn build_nrom_with_prg(prg: &[u8], chr_8k: u8, vectors: Option<(u16, u16, u16)>) -> Vec<u8> {
    let mut bank = vec![0u8; 0x4000];
    bank[..prg.len()].copy_from_slice(prg);
    let (reset, nmi, irq) = vectors.unwrap_or((0x8000, 0x8000, 0x8000));
    set_vectors_in_prg(&mut bank, reset, nmi, irq);

    let mut rom = build_ines(1, chr_8k, 0, 0, None);
    rom[16..16 + 0x4000].copy_from_slice(&bank);
    rom
}

/// Bus over a 16 KiB NROM cartridge holding `prg` at $8000.
pub fn nrom_bus(prg: &[u8], vectors: Option<(u16, u16, u16)>) -> Bus {
    let rom = build_nrom_with_prg(prg, 1, vectors);
    let cart = Cartridge::from_ines_bytes(&rom).expect("test image parses");
    Bus::new(Rc::new(cart)).expect("NROM is supported")
}

/// 8 KiB writable pattern memory.
pub struct ChrRam(pub Vec<u8>);

impl Default for ChrRam {
    fn default() -> Self {
        Self(vec![0; 0x2000])
    }
}

impl PpuBus for ChrRam {
    fn ppu_read(&self, addr: u16) -> u8 {
        self.0[addr as usize & 0x1FFF]
    }

    fn ppu_write(&mut self, addr: u16, value: u8) {
        self.0[addr as usize & 0x1FFF] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_basic_ines() {
        let rom = build_ines(2, 1, 0x01, 0x00, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(rom[4], 2);
        assert_eq!(rom[5], 1);
        assert_eq!(rom[6], 0x01);
        assert_eq!(rom.len(), 16 + 2 * 0x4000 + 0x2000);
    }

    #[test]
    fn writes_vectors_for_16k_and_32k() {
        let mut prg = vec![0u8; 0x4000];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(&prg[0x3FFA..], &[0x56, 0x84, 0x23, 0x81, 0xBC, 0x8A]);

        let mut prg = vec![0u8; 0x8000];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(&prg[0x7FFA..], &[0x56, 0x84, 0x23, 0x81, 0xBC, 0x8A]);
    }

    #[test]
    fn nrom_image_carries_program_and_reset_vector() {
        let rom = build_nrom_with_prg(&[0xA9, 0x01], 1, Some((0x8000, 0x9000, 0xA000)));
        assert_eq!(rom[16], 0xA9);
        assert_eq!(rom[16 + 0x3FFC], 0x00);
        assert_eq!(rom[16 + 0x3FFD], 0x80);
        assert_eq!(rom[16 + 0x3FFB], 0x90);
    }
}
