/*!
PPU register/timing model.

Provides:
- CPU-visible register interface ($2000..$2007, mirrored every 8 bytes by the bus)
- PPU address space: pattern tables through the mapper, 2 KiB nametable RAM with
  header mirroring, 32-byte palette RAM with the $3F10/$14/$18/$1C aliases
- Cycle/scanline/frame counters with a latched vblank flag and NMI request
- OAM (256 bytes) and the DMA copy hook
- Debug views of pattern tables, nametables and palette (no screen compositing)

STRUCTURE:
- `registers.rs` - PPUCTRL/PPUMASK accessors and the $2000..$2007 read/write protocol
- `memory.rs`    - PPU address space, nametable mirroring, attribute lookup, OAM DMA
- `timing.rs`    - `step`: one PPU cycle, vblank set/clear, NMI latch
- `debug_view.rs`- ARGB snapshots for tools and the `screenshot` feature

Timing constants: 341 cycles per scanline (0..=340), 262 scanlines per frame (0..=261),
vblank starts at (241, 1), the pre-render line is 261. Power-on position is (261, 0).
*/

use log::warn;

use crate::cartridge::Mirroring;

pub(crate) mod debug_view;
pub(crate) mod memory;
pub(crate) mod registers;
pub(crate) mod timing;

pub use debug_view::{
    NES_PALETTE, PATTERN_VIEW_HEIGHT, PATTERN_VIEW_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH,
    pattern_table_view,
};
#[cfg(feature = "screenshot")]
pub use debug_view::save_png;
pub use memory::attribute_location;
pub use registers::{PpuCtrl, PpuMask, SPRITE_OVERFLOW, SPRITE_ZERO_HIT, VBLANK};
pub use timing::{CYCLES_PER_SCANLINE, PRE_RENDER_SCANLINE, SCANLINES_PER_FRAME, VBLANK_SCANLINE};

pub struct Ppu {
    // CPU-visible register state
    ctrl: PpuCtrl,
    mask: PpuMask,
    status: u8, // bit7=vblank, bit6=sprite0 hit, bit5=sprite overflow
    oam_addr: u8,

    // Shared $2005/$2006 write toggle, scroll latches, current VRAM address
    write_toggle: bool,
    scroll_x: u8,
    scroll_y: u8,
    vram_addr: u16,
    read_buffer: u8,

    // Internal memories
    nametable: [u8; 0x0800],
    palette: [u8; 32],
    oam: [u8; 256],
    mirroring: Mirroring,

    // Timing
    frame: u64,
    scanline: u16,
    cycle: u16,
    nmi_latch: bool,
}

impl Ppu {
    /// Power-on PPU for a cartridge with the given header mirroring.
    pub fn new(mirroring: Mirroring) -> Self {
        if mirroring == Mirroring::FourScreen {
            warn!("four-screen nametables are not emulated; using vertical mirroring");
        }
        Self {
            ctrl: PpuCtrl::default(),
            mask: PpuMask::default(),
            status: 0,
            oam_addr: 0,
            write_toggle: false,
            scroll_x: 0,
            scroll_y: 0,
            vram_addr: 0,
            read_buffer: 0,
            nametable: [0; 0x0800],
            palette: [0; 32],
            oam: [0; 256],
            mirroring,
            frame: 0,
            scanline: PRE_RENDER_SCANLINE,
            cycle: 0,
            nmi_latch: false,
        }
    }

    // Timing queries
    pub fn frame(&self) -> u64 {
        self.frame
    }
    pub fn scanline(&self) -> u16 {
        self.scanline
    }
    pub fn cycle(&self) -> u16 {
        self.cycle
    }

    /// Consume a pending NMI request raised at vblank start.
    pub fn take_nmi_request(&mut self) -> bool {
        std::mem::take(&mut self.nmi_latch)
    }
    pub fn nmi_pending(&self) -> bool {
        self.nmi_latch
    }

    // Flag queries
    pub fn vblank(&self) -> bool {
        (self.status & VBLANK) != 0
    }
    pub fn sprite_zero_hit(&self) -> bool {
        (self.status & SPRITE_ZERO_HIT) != 0
    }
    pub fn sprite_overflow(&self) -> bool {
        (self.status & SPRITE_OVERFLOW) != 0
    }

    // Register state (inspection)
    pub fn ctrl(&self) -> PpuCtrl {
        self.ctrl
    }
    pub fn mask(&self) -> PpuMask {
        self.mask
    }
    pub fn vram_addr(&self) -> u16 {
        self.vram_addr
    }
    pub fn write_toggle(&self) -> bool {
        self.write_toggle
    }
    pub fn scroll(&self) -> (u8, u8) {
        (self.scroll_x, self.scroll_y)
    }
    pub fn oam_addr(&self) -> u8 {
        self.oam_addr
    }
    pub fn oam(&self) -> &[u8; 256] {
        &self.oam
    }
    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
