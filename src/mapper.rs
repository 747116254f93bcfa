/*!
Mapper subsystem: trait definition, NROM (mapper 0), and the construction factory.

Purpose:
- Decouple CPU/PPU address mapping from the `Cartridge` image so other boards can be added.
- One read/write pair serves both address spaces: addresses below $2000 are the PPU
  pattern-table window (CHR), $4020..=$FFFF is the CPU cartridge window (PRG).

Factory:
- `create` picks the implementation from the header's mapper number. An unknown number
  is a fatal condition reported as `NesError::UnsupportedMapper`.
*/

use std::rc::Rc;

use log::{debug, info};

use crate::cartridge::{CHR_PAGE_LEN, Cartridge};
use crate::error::NesError;

/// Common interface all cartridge mappers implement.
///
/// Semantics:
/// - Addresses are unmasked: `< 0x2000` is CHR space, `>= 0x4020` is CPU cartridge space.
/// - Reads of unmapped addresses return 0; writes to unmapped or read-only space are ignored.
pub trait Mapper {
    /// iNES mapper number (0 for NROM).
    fn number(&self) -> u8;

    fn read_byte(&self, addr: u16) -> u8;

    fn write_byte(&mut self, addr: u16, value: u8);

    /// One-line human readable description of the board configuration.
    fn describe(&self) -> String;

    /// Diagnostic dump of the mapper configuration to the log.
    fn print(&self) {
        info!("{}", self.describe());
    }
}

/// Construct the mapper selected by the cartridge header.
pub fn create(cartridge: Rc<Cartridge>) -> Result<Box<dyn Mapper>, NesError> {
    let number = cartridge.mapper_number();
    let mapper: Box<dyn Mapper> = match number {
        0 => Box::new(Nrom::new(cartridge)),
        _ => return Err(NesError::UnsupportedMapper(number)),
    };
    debug!("mapper {} constructed", number);
    Ok(mapper)
}

/// NROM (mapper 0).
///
/// - PRG: one 16 KiB page (NROM-128, mirrored into $C000..=$FFFF) or two (NROM-256).
/// - CHR: page 0 of the image, or 8 KiB of writable CHR RAM when the image has none.
pub struct Nrom {
    cartridge: Rc<Cartridge>,
    nrom256: bool,
    chr_ram: Option<Vec<u8>>,
}

impl Nrom {
    pub fn new(cartridge: Rc<Cartridge>) -> Self {
        let nrom256 = cartridge.prg_pages() == 2;
        let chr_ram = cartridge.uses_chr_ram().then(|| vec![0; CHR_PAGE_LEN]);
        Self {
            cartridge,
            nrom256,
            chr_ram,
        }
    }

    /// True for the 32 KiB program variant.
    pub fn is_nrom_256(&self) -> bool {
        self.nrom256
    }

    #[inline]
    fn chr_read(&self, addr: u16) -> u8 {
        let idx = addr as usize & (CHR_PAGE_LEN - 1);
        match &self.chr_ram {
            Some(ram) => ram[idx],
            None => self.cartridge.chr_page(0).get(idx).copied().unwrap_or(0),
        }
    }

    #[inline]
    fn prg_read(&self, page: usize, addr: u16) -> u8 {
        let idx = (addr & 0x3FFF) as usize;
        self.cartridge.prg_page(page).get(idx).copied().unwrap_or(0)
    }
}

impl Mapper for Nrom {
    #[inline]
    fn number(&self) -> u8 {
        0
    }

    fn read_byte(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.chr_read(addr),
            0x8000..=0xBFFF => self.prg_read(0, addr),
            0xC000..=0xFFFF => self.prg_read(if self.nrom256 { 1 } else { 0 }, addr),
            _ => 0,
        }
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        // Only CHR RAM is writable; PRG and CHR ROM ignore writes.
        if let (0x0000..=0x1FFF, Some(ram)) = (addr, self.chr_ram.as_mut()) {
            ram[addr as usize] = value;
        }
    }

    fn describe(&self) -> String {
        format!(
            "NROM-{} (mapper 0): {} KiB PRG, {}, {:?} mirroring",
            if self.nrom256 { 256 } else { 128 },
            self.cartridge.prg_pages() * 16,
            if self.chr_ram.is_some() {
                "8 KiB CHR RAM"
            } else {
                "8 KiB CHR ROM"
            },
            self.cartridge.mirroring()
        )
    }
}
