/*!
Cartridge image: iNES (v1) header and page-indexed PRG/CHR access.

Layout:
- 16-byte header: 'N','E','S',0x1A, PRG page count (16 KiB), CHR page count (8 KiB),
  flags6, flags7, 8 reserved bytes.
- Optional 512-byte trainer (flags6 bit 2), skipped.
- `16384 * prg_pages` bytes of program data, then `8192 * chr_pages` bytes of character data.

Derived values:
- mapper number = (flags6 >> 4) | (flags7 & 0xF0)
- mirroring bits = ((flags6 & 0x08) >> 2) | (flags6 & 0x01)
  (0 = horizontal, 1 = vertical, 2/3 = four-screen)

The image is immutable once parsed. Mappers hold it behind an `Rc` and only read from it.
*/

use std::fs;
use std::path::Path;

use crate::error::NesError;

pub const HEADER_LEN: usize = 16;
pub const TRAINER_LEN: usize = 512;
pub const PRG_PAGE_LEN: usize = 16 * 1024;
pub const CHR_PAGE_LEN: usize = 8 * 1024;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

impl Mirroring {
    /// Decode the two mirroring bits derived from flags6.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Mirroring::Horizontal,
            1 => Mirroring::Vertical,
            _ => Mirroring::FourScreen,
        }
    }
}

/// Parsed iNES header fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub prg_pages: u8,
    pub chr_pages: u8,
    pub flags6: u8,
    pub flags7: u8,
}

impl Header {
    pub fn parse(data: &[u8]) -> Result<Self, NesError> {
        if data.len() < HEADER_LEN || &data[0..4] != b"NES\x1A" {
            return Err(NesError::InvalidHeader);
        }
        Ok(Self {
            prg_pages: data[4],
            chr_pages: data[5],
            flags6: data[6],
            flags7: data[7],
        })
    }

    #[inline]
    pub fn mapper_number(&self) -> u8 {
        (self.flags6 >> 4) | (self.flags7 & 0xF0)
    }

    #[inline]
    pub fn mirroring_bits(&self) -> u8 {
        ((self.flags6 & 0x08) >> 2) | (self.flags6 & 0x01)
    }

    #[inline]
    pub fn has_trainer(&self) -> bool {
        (self.flags6 & 0x04) != 0
    }
}

pub struct Cartridge {
    header: Header,
    prg: Vec<u8>,
    chr: Vec<u8>,
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("mapper", &self.mapper_number())
            .field("mirroring", &self.mirroring())
            .field("prg_pages", &self.header.prg_pages)
            .field("chr_pages", &self.header.chr_pages)
            .finish()
    }
}

impl Cartridge {
    /// Parse an iNES image from raw bytes.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, NesError> {
        let header = Header::parse(data)?;

        let mut offset = HEADER_LEN;
        if header.has_trainer() {
            offset += TRAINER_LEN;
        }

        let prg_len = header.prg_pages as usize * PRG_PAGE_LEN;
        let prg = take_section(data, offset, prg_len, "PRG")?;
        offset += prg_len;

        let chr_len = header.chr_pages as usize * CHR_PAGE_LEN;
        let chr = take_section(data, offset, chr_len, "CHR")?;

        Ok(Self { header, prg, chr })
    }

    /// Load an iNES image from a `.nes` file.
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, NesError> {
        let bytes = fs::read(path)?;
        Self::from_ines_bytes(&bytes)
    }

    // -------------- Accessors --------------

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn prg_pages(&self) -> usize {
        self.header.prg_pages as usize
    }

    pub fn chr_pages(&self) -> usize {
        self.header.chr_pages as usize
    }

    /// 16 KiB program page `index`; empty when out of range.
    pub fn prg_page(&self, index: usize) -> &[u8] {
        page(&self.prg, index, PRG_PAGE_LEN)
    }

    /// 8 KiB character page `index`; empty when out of range.
    pub fn chr_page(&self, index: usize) -> &[u8] {
        page(&self.chr, index, CHR_PAGE_LEN)
    }

    pub fn mapper_number(&self) -> u8 {
        self.header.mapper_number()
    }

    pub fn mirroring(&self) -> Mirroring {
        Mirroring::from_bits(self.header.mirroring_bits())
    }

    /// True when the image carries no CHR pages (board provides CHR RAM instead).
    pub fn uses_chr_ram(&self) -> bool {
        self.header.chr_pages == 0
    }
}

fn take_section(
    data: &[u8],
    offset: usize,
    len: usize,
    section: &'static str,
) -> Result<Vec<u8>, NesError> {
    let available = data.len().saturating_sub(offset);
    if available < len {
        return Err(NesError::Truncated {
            section,
            expected: len,
            actual: available,
        });
    }
    Ok(data[offset..offset + len].to_vec())
}

fn page(data: &[u8], index: usize, len: usize) -> &[u8] {
    let start = index * len;
    data.get(start..start + len).unwrap_or(&[])
}
