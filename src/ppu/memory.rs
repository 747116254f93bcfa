#![doc = r#"
PPU memory submodule

Responsibilities
- PPU address space reads/writes (14-bit, everything above $3FFF mirrors down):
  * $0000-$1FFF: pattern tables, delegated to the mapper through `PpuBus`
  * $2000-$3EFF: nametable RAM after mirroring translation ($3000-$3EFF mirrors $2000-$2EFF)
  * $3F00-$3FFF: 32-byte palette RAM; $3F10/$14/$18/$1C alias $3F00/$04/$08/$0C
- Nametable mirroring lookup (two physical 1 KiB banks, four logical tables)
- Attribute-table lookup for a background tile
- OAM DMA copy
"#]

use super::Ppu;
use crate::cartridge::Mirroring;
use crate::ppu_bus::PpuBus;

/// Physical bank for logical tables 0..=3, per mirroring mode.
const VERTICAL_BANKS: [usize; 4] = [0, 1, 0, 1];
const HORIZONTAL_BANKS: [usize; 4] = [0, 0, 1, 1];

/// Palette RAM index (0..=31) for an address in $3F00-$3FFF.
#[inline]
pub(crate) fn palette_index(addr: u16) -> usize {
    let idx = (addr as usize) & 0x1F;
    if idx >= 0x10 && (idx & 0x03) == 0 {
        idx - 0x10
    } else {
        idx
    }
}

/// Byte offset inside the 64-byte attribute region and the bit shift (0, 2, 4 or 6) that
/// select the palette of the tile at (`row`, `col`) in a 32x30 nametable.
#[inline]
pub fn attribute_location(row: usize, col: usize) -> (usize, u8) {
    let offset = (row / 4) * 8 + (col / 4);
    let shift = ((row % 4) / 2) * 4 + ((col % 4) / 2) * 2;
    (offset, shift as u8)
}

impl Ppu {
    /// Physical nametable RAM index (0..2048) for an address in $2000-$3EFF.
    pub fn nametable_index(&self, addr: u16) -> usize {
        let a = (addr.wrapping_sub(0x2000) % 0x1000) as usize;
        let table = a / 0x0400;
        let offset = a % 0x0400;
        let banks = match self.mirroring {
            Mirroring::Horizontal => &HORIZONTAL_BANKS,
            Mirroring::Vertical | Mirroring::FourScreen => &VERTICAL_BANKS,
        };
        (banks[table] * 0x0400 + offset) % 0x0800
    }

    /// Read from PPU address space.
    pub fn read_byte<B: PpuBus + ?Sized>(&self, addr: u16, bus: &B) -> u8 {
        let a = addr & 0x3FFF;
        match a {
            0x0000..=0x1FFF => bus.ppu_read(a),
            0x2000..=0x3EFF => self.nametable[self.nametable_index(a)],
            _ => self.palette[palette_index(a)],
        }
    }

    /// Write to PPU address space.
    pub fn write_byte<B: PpuBus + ?Sized>(&mut self, addr: u16, value: u8, bus: &mut B) {
        let a = addr & 0x3FFF;
        match a {
            0x0000..=0x1FFF => bus.ppu_write(a, value),
            0x2000..=0x3EFF => {
                let idx = self.nametable_index(a);
                self.nametable[idx] = value;
            }
            _ => self.palette[palette_index(a)] = value,
        }
    }

    /// Palette group (0..=3) of the tile at (`row`, `col`) of logical nametable `table`.
    pub fn attribute_palette(&self, table: u8, row: usize, col: usize) -> u8 {
        let (offset, shift) = attribute_location(row, col);
        let addr = 0x2000 + 0x0400 * (table as u16 & 0x03) + 0x03C0 + offset as u16;
        let byte = self.nametable[self.nametable_index(addr)];
        (byte >> shift) & 0x03
    }

    /// Raw palette RAM (32 bytes, post-aliasing).
    pub fn palette_ram(&self) -> &[u8; 32] {
        &self.palette
    }

    /// OAM DMA: copy 256 bytes into OAM starting at OAMADDR, wrapping.
    pub fn write_dma(&mut self, data: &[u8; 256]) {
        let mut ptr = self.oam_addr;
        for &b in data {
            self.oam[ptr as usize] = b;
            ptr = ptr.wrapping_add(1);
        }
    }
}
