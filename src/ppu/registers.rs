#![doc = r#"
PPU registers module

Purpose
- Typed views over PPUCTRL ($2000) and PPUMASK ($2001).
- CPU-visible register protocol for $2000..$2007.

Notes
- Callers pass any address in 0x2000..=0x3FFF; only the low 3 bits select the register.
- $2002 read returns vblank/sprite-0/overflow in bits 7..5, clears vblank and resets the
  shared write toggle.
- $2005 and $2006 share the write toggle: first write = X scroll / address high byte,
  second write = Y scroll / address low byte.
- $2007 accesses the PPU address space at the current VRAM address, then increments it
  by 1 or 32 (PPUCTRL bit 2). Reads below $3F00 are served from the internal read buffer;
  palette reads return directly.
- Writes to read-only registers and reads of write-only registers are harmless (read 0).
"#]

use log::trace;

use super::Ppu;
use crate::ppu_bus::PpuBus;

/// PPUSTATUS bits.
pub const VBLANK: u8 = 0x80;
pub const SPRITE_ZERO_HIT: u8 = 0x40;
pub const SPRITE_OVERFLOW: u8 = 0x20;

/// PPUCTRL ($2000) bitfields.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PpuCtrl(u8);

impl PpuCtrl {
    pub fn from_byte(v: u8) -> Self {
        Self(v)
    }
    pub fn to_byte(self) -> u8 {
        self.0
    }

    /// Base nametable select (bits 0-1).
    #[inline]
    pub fn nametable_select(self) -> u8 {
        self.0 & 0x03
    }
    #[inline]
    pub fn nametable_base(self) -> u16 {
        0x2000 + 0x0400 * self.nametable_select() as u16
    }
    /// VRAM address increment per $2007 access (bit 2).
    #[inline]
    pub fn vram_increment(self) -> u16 {
        if (self.0 & 0x04) != 0 { 32 } else { 1 }
    }
    /// Sprite pattern table for 8x8 sprites (bit 3).
    #[inline]
    pub fn sprite_pattern_base(self) -> u16 {
        if (self.0 & 0x08) != 0 { 0x1000 } else { 0x0000 }
    }
    /// Background pattern table (bit 4).
    #[inline]
    pub fn background_pattern_base(self) -> u16 {
        if (self.0 & 0x10) != 0 { 0x1000 } else { 0x0000 }
    }
    /// 8x16 sprites (bit 5).
    #[inline]
    pub fn tall_sprites(self) -> bool {
        (self.0 & 0x20) != 0
    }
    #[inline]
    pub fn master_slave(self) -> bool {
        (self.0 & 0x40) != 0
    }
    #[inline]
    pub fn nmi_enabled(self) -> bool {
        (self.0 & 0x80) != 0
    }
}

/// PPUMASK ($2001) bitfields.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PpuMask(u8);

impl PpuMask {
    pub fn from_byte(v: u8) -> Self {
        Self(v)
    }
    pub fn to_byte(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn grayscale(self) -> bool {
        (self.0 & 0x01) != 0
    }
    #[inline]
    pub fn show_background_left(self) -> bool {
        (self.0 & 0x02) != 0
    }
    #[inline]
    pub fn show_sprites_left(self) -> bool {
        (self.0 & 0x04) != 0
    }
    #[inline]
    pub fn show_background(self) -> bool {
        (self.0 & 0x08) != 0
    }
    #[inline]
    pub fn show_sprites(self) -> bool {
        (self.0 & 0x10) != 0
    }
    #[inline]
    pub fn emphasize_red(self) -> bool {
        (self.0 & 0x20) != 0
    }
    #[inline]
    pub fn emphasize_green(self) -> bool {
        (self.0 & 0x40) != 0
    }
    #[inline]
    pub fn emphasize_blue(self) -> bool {
        (self.0 & 0x80) != 0
    }
}

impl Ppu {
    /// CPU-visible register read ($2000..$2007 and mirrors).
    pub fn read_register<B: PpuBus + ?Sized>(&mut self, addr: u16, bus: &B) -> u8 {
        match 0x2000 + (addr & 0x7) {
            0x2002 => {
                let v = self.status & (VBLANK | SPRITE_ZERO_HIT | SPRITE_OVERFLOW);
                self.status &= !VBLANK;
                self.write_toggle = false;
                v
            }
            0x2004 => self.oam[self.oam_addr as usize],
            0x2007 => {
                let a = self.vram_addr & 0x3FFF;
                let value = self.read_byte(a, bus);
                let ret = if a < 0x3F00 {
                    std::mem::replace(&mut self.read_buffer, value)
                } else {
                    // Palette reads bypass the buffer; the buffer picks up the nametable byte underneath.
                    self.read_buffer = self.read_byte(a - 0x1000, bus);
                    value
                };
                self.increment_vram_addr();
                ret
            }
            _ => 0,
        }
    }

    /// CPU-visible register write ($2000..$2007 and mirrors).
    pub fn write_register<B: PpuBus + ?Sized>(&mut self, addr: u16, value: u8, bus: &mut B) {
        match 0x2000 + (addr & 0x7) {
            0x2000 => {
                let was_enabled = self.ctrl.nmi_enabled();
                self.ctrl = PpuCtrl::from_byte(value);
                if !was_enabled && self.ctrl.nmi_enabled() && self.vblank() {
                    trace!("NMI enabled during vblank");
                    self.nmi_latch = true;
                }
            }
            0x2001 => self.mask = PpuMask::from_byte(value),
            0x2003 => self.oam_addr = value,
            0x2004 => {
                self.oam[self.oam_addr as usize] = value;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            0x2005 => {
                if !self.write_toggle {
                    self.scroll_x = value;
                } else {
                    self.scroll_y = value;
                }
                self.write_toggle = !self.write_toggle;
            }
            0x2006 => {
                if !self.write_toggle {
                    self.vram_addr = (self.vram_addr & 0x00FF) | ((value as u16) << 8);
                } else {
                    self.vram_addr = (self.vram_addr & 0xFF00) | value as u16;
                }
                self.write_toggle = !self.write_toggle;
            }
            0x2007 => {
                self.write_byte(self.vram_addr, value, bus);
                self.increment_vram_addr();
            }
            _ => { /* $2002 is read-only */ }
        }
    }

    #[inline]
    fn increment_vram_addr(&mut self) {
        self.vram_addr = self.vram_addr.wrapping_add(self.ctrl.vram_increment());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::Mirroring;
    use crate::test_utils::ChrRam;

    fn ppu() -> (Ppu, ChrRam) {
        (Ppu::new(Mirroring::Vertical), ChrRam::default())
    }

    #[test]
    fn ctrl_bitfields() {
        let c = PpuCtrl::from_byte(0b1011_1110);
        assert_eq!(c.nametable_select(), 2);
        assert_eq!(c.nametable_base(), 0x2800);
        assert_eq!(c.vram_increment(), 32);
        assert_eq!(c.sprite_pattern_base(), 0x1000);
        assert_eq!(c.background_pattern_base(), 0x1000);
        assert!(c.tall_sprites());
        assert!(!c.master_slave());
        assert!(c.nmi_enabled());
        assert_eq!(c.to_byte(), 0b1011_1110);
    }

    #[test]
    fn mask_bitfields() {
        let m = PpuMask::from_byte(0b0001_1001);
        assert!(m.grayscale());
        assert!(!m.show_background_left());
        assert!(!m.show_sprites_left());
        assert!(m.show_background());
        assert!(m.show_sprites());
        assert!(!m.emphasize_red());
    }

    #[test]
    fn status_read_clears_vblank_and_write_toggle() {
        let (mut p, mut chr) = ppu();
        p.status |= VBLANK | SPRITE_ZERO_HIT;
        p.write_register(0x2006, 0x21, &mut chr);
        assert!(p.write_toggle());

        let s = p.read_register(0x2002, &chr);
        assert_eq!(s & 0xC0, 0xC0);
        assert!(!p.vblank());
        assert!(p.sprite_zero_hit(), "sprite-0 hit is not cleared by reads");
        assert!(!p.write_toggle());

        let again = p.read_register(0x2002, &chr);
        assert_eq!(again & VBLANK, 0);
        assert!(!p.write_toggle());
    }

    #[test]
    fn address_register_sets_high_then_low() {
        let (mut p, mut chr) = ppu();
        p.write_register(0x2006, 0x23, &mut chr);
        p.write_register(0x2006, 0xC0, &mut chr);
        assert_eq!(p.vram_addr(), 0x23C0);
        assert!(!p.write_toggle());
    }

    #[test]
    fn mirrored_register_addresses_decode() {
        let (mut p, mut chr) = ppu();
        p.write_register(0x3FFE, 0x20, &mut chr); // $2006
        p.write_register(0x200E, 0x05, &mut chr); // $2006
        assert_eq!(p.vram_addr(), 0x2005);
    }

    #[test]
    fn data_writes_increment_by_1_or_32() {
        let (mut p, mut chr) = ppu();
        p.write_register(0x2006, 0x20, &mut chr);
        p.write_register(0x2006, 0x00, &mut chr);
        p.write_register(0x2007, 0xAA, &mut chr);
        assert_eq!(p.vram_addr(), 0x2001);

        p.write_register(0x2000, 0x04, &mut chr);
        p.write_register(0x2007, 0xBB, &mut chr);
        assert_eq!(p.vram_addr(), 0x2021);
        p.write_register(0x2007, 0xCC, &mut chr);
        assert_eq!(p.vram_addr(), 0x2041);
    }

    #[test]
    fn data_reads_are_buffered_below_palette() {
        let (mut p, mut chr) = ppu();
        p.write_register(0x2006, 0x20, &mut chr);
        p.write_register(0x2006, 0x00, &mut chr);
        p.write_register(0x2007, 0x11, &mut chr);
        p.write_register(0x2007, 0x22, &mut chr);

        p.write_register(0x2006, 0x20, &mut chr);
        p.write_register(0x2006, 0x00, &mut chr);
        assert_eq!(p.read_register(0x2007, &chr), 0x00, "stale buffer");
        assert_eq!(p.read_register(0x2007, &chr), 0x11);
        assert_eq!(p.read_register(0x2007, &chr), 0x22);
    }

    #[test]
    fn palette_reads_are_immediate() {
        let (mut p, mut chr) = ppu();
        p.write_register(0x2006, 0x3F, &mut chr);
        p.write_register(0x2006, 0x01, &mut chr);
        p.write_register(0x2007, 0x2C, &mut chr);
        p.write_register(0x2006, 0x3F, &mut chr);
        p.write_register(0x2006, 0x01, &mut chr);
        assert_eq!(p.read_register(0x2007, &chr), 0x2C);
    }

    #[test]
    fn data_port_reaches_pattern_space() {
        let (mut p, mut chr) = ppu();
        p.write_register(0x2006, 0x00, &mut chr);
        p.write_register(0x2006, 0x10, &mut chr);
        p.write_register(0x2007, 0x99, &mut chr);
        assert_eq!(chr.ppu_read(0x0010), 0x99);
    }

    #[test]
    fn scroll_shares_the_toggle() {
        let (mut p, mut chr) = ppu();
        p.write_register(0x2005, 0x08, &mut chr);
        assert!(p.write_toggle());
        p.write_register(0x2005, 0x10, &mut chr);
        assert!(!p.write_toggle());
        assert_eq!(p.scroll(), (0x08, 0x10));
    }

    #[test]
    fn oam_port_auto_increments() {
        let (mut p, mut chr) = ppu();
        p.write_register(0x2003, 0xFE, &mut chr);
        p.write_register(0x2004, 0x01, &mut chr);
        p.write_register(0x2004, 0x02, &mut chr);
        assert_eq!(p.oam()[0xFE], 0x01);
        assert_eq!(p.oam()[0xFF], 0x02);
        assert_eq!(p.oam_addr(), 0x00);
    }

    #[test]
    fn enabling_nmi_inside_vblank_raises_request() {
        let (mut p, mut chr) = ppu();
        p.status |= VBLANK;
        p.write_register(0x2000, 0x80, &mut chr);
        assert!(p.take_nmi_request());
        // Re-writing with NMI still enabled does not raise a second request.
        p.write_register(0x2000, 0x80, &mut chr);
        assert!(!p.take_nmi_request());
    }
}
