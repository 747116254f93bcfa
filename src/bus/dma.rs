/*!
OAM DMA ($4014).

A write of page `$XX` copies $XX00-$XXFF into OAM, starting at the PPU's current OAM
address. The copy happens at once on the bus; the timing cost is recorded here and
collected by the orchestrator before the next instruction:

- 513 CPU cycles (one dummy cycle + 256 read/write pairs)
- one more alignment cycle when the transfer starts on an odd CPU cycle

Source reads go through the normal CPU read path, so they observe (and trigger) the same
side effects a CPU read would.
*/

use log::debug;

use super::Bus;

/// Stall of a transfer started on an even CPU cycle.
pub const OAM_DMA_BASE_STALL: u32 = 513;

#[derive(Debug, Default)]
pub struct OamDma {
    pending: bool,
    transfers: u64,
}

impl OamDma {
    fn record(&mut self) {
        self.pending = true;
        self.transfers += 1;
    }

    pub(super) fn take_stall(&mut self, cpu_cycle: u64) -> u32 {
        if !std::mem::take(&mut self.pending) {
            return 0;
        }
        OAM_DMA_BASE_STALL + (cpu_cycle & 1) as u32
    }

    /// Number of transfers started since power-on.
    pub fn transfers(&self) -> u64 {
        self.transfers
    }
}

impl Bus {
    /// Copy CPU page `page` into OAM.
    pub(super) fn oam_dma(&mut self, page: u8) {
        debug!("OAM DMA from ${:02X}00", page);
        let base = (page as u16) << 8;
        let mut data = [0u8; 256];
        for (i, b) in data.iter_mut().enumerate() {
            *b = self.read_byte(base | i as u16);
        }
        self.ppu.write_dma(&data);
        self.dma.record();
    }

    pub fn dma_transfers(&self) -> u64 {
        self.dma.transfers()
    }
}
