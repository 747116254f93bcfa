#![doc = r#"
PPU timing module

Responsibilities
- `Ppu::step`: advance exactly one PPU cycle.
- Wrap cycle at 341 into the next scanline, scanline at 262 into the next frame.
- Side effects keyed to (scanline, cycle):
  * (241, 1): set vblank; latch an NMI request when PPUCTRL bit 7 is set.
  * (261, 1): pre-render line clears vblank, sprite-0 hit and sprite overflow.

Notes
- The orchestrator steps the PPU 3x per CPU cycle and forwards the NMI latch to the CPU
  at the next instruction boundary.
"#]

use log::trace;

use super::{Ppu, SPRITE_OVERFLOW, SPRITE_ZERO_HIT, VBLANK};

pub const CYCLES_PER_SCANLINE: u16 = 341;
pub const SCANLINES_PER_FRAME: u16 = 262;
pub const VBLANK_SCANLINE: u16 = 241;
pub const PRE_RENDER_SCANLINE: u16 = 261;

impl Ppu {
    /// Advance one PPU cycle.
    pub fn step(&mut self) {
        self.cycle += 1;
        if self.cycle >= CYCLES_PER_SCANLINE {
            self.cycle = 0;
            self.scanline += 1;
            if self.scanline >= SCANLINES_PER_FRAME {
                self.scanline = 0;
                self.frame += 1;
            }
        }

        if self.cycle != 1 {
            return;
        }
        match self.scanline {
            VBLANK_SCANLINE => {
                self.status |= VBLANK;
                if self.ctrl.nmi_enabled() {
                    trace!("vblank NMI requested (frame {})", self.frame);
                    self.nmi_latch = true;
                }
            }
            PRE_RENDER_SCANLINE => {
                self.status &= !(VBLANK | SPRITE_ZERO_HIT | SPRITE_OVERFLOW);
            }
            _ => {}
        }
    }
}
