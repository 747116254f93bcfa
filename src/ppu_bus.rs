/*!
ppu_bus: capability trait for the PPU's pattern-table window.

The PPU owns nametable and palette RAM itself; only $0000-$1FFF (CHR ROM/RAM) lives on
the cartridge. Register and memory operations on `Ppu` take the cartridge side as a
`PpuBus` argument instead of holding a reference back to the machine, so the bus can
lend its mapper while it holds `&mut Ppu`, and tests can pass a plain 8 KiB array.

Address expectations:
- Callers only pass addresses in 0x0000-0x1FFF.
*/

use crate::mapper::Mapper;

/// Pattern-table access used by the PPU.
pub trait PpuBus {
    fn ppu_read(&self, addr: u16) -> u8;
    fn ppu_write(&mut self, addr: u16, value: u8);
}

impl<M: Mapper + ?Sized> PpuBus for M {
    #[inline]
    fn ppu_read(&self, addr: u16) -> u8 {
        self.read_byte(addr)
    }

    #[inline]
    fn ppu_write(&mut self, addr: u16, value: u8) {
        self.write_byte(addr, value);
    }
}
