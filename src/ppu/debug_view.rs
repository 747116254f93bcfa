#![doc = r#"
PPU debug views

Snapshots of PPU-visible memory as 0xAARRGGBB pixels, for tools and tests. These are not
a renderer: no scrolling, sprites or per-dot timing, just the memory contents laid out.

- `pattern_table_view`: both 4 KiB pattern tables side by side, 256x128, grey levels
  (color index * 0x555555), bit 7 of each plane is the leftmost pixel.
- `Ppu::nametable_view`: one logical nametable as 256x240 using the background pattern
  table from PPUCTRL, the attribute table and palette RAM.
- `Ppu::palette_view`: the 32 palette RAM entries through the master palette.
- `save_png` (feature `screenshot`): write any view to disk.
"#]

use super::Ppu;
use crate::ppu_bus::PpuBus;

pub const PATTERN_VIEW_WIDTH: usize = 256;
pub const PATTERN_VIEW_HEIGHT: usize = 128;
pub const SCREEN_WIDTH: usize = 256;
pub const SCREEN_HEIGHT: usize = 240;

const OPAQUE: u32 = 0xFF00_0000;

/// NES master palette (0xRRGGBB).
#[rustfmt::skip]
pub const NES_PALETTE: [u32; 64] = [
    0x757575, 0x271B8F, 0x0000AB, 0x47009F, 0x8F0077, 0xAB0013, 0xA70000, 0x7F0B00,
    0x432F00, 0x004700, 0x005100, 0x003F17, 0x1B3F5F, 0x000000, 0x000000, 0x000000,
    0xBCBCBC, 0x0073EF, 0x233BEF, 0x8300F3, 0xBF00BF, 0xE7005B, 0xDB2B00, 0xCB4F0F,
    0x8B7300, 0x009700, 0x00AB00, 0x00933B, 0x00838B, 0x000000, 0x000000, 0x000000,
    0xFFFFFF, 0x3FBFFF, 0x5F97FF, 0xA78BFD, 0xF77BFF, 0xFF77B7, 0xFF7763, 0xFF9B3B,
    0xF3BF3F, 0x83D313, 0x4FDF4B, 0x58F898, 0x00EBDB, 0x000000, 0x000000, 0x000000,
    0xFFFFFF, 0xABE7FF, 0xC7D7FF, 0xD7CBFF, 0xFFC7FF, 0xFFC7DB, 0xFFBFB3, 0xFFDBAB,
    0xFFE7A3, 0xE3FFA3, 0xABF3BF, 0xB3FFCF, 0x9FFFF3, 0x000000, 0x000000, 0x000000,
];

/// 2-bit color of pixel `column` (0 = leftmost) in one row of a tile.
#[inline]
fn tile_pixel(plane0: u8, plane1: u8, column: usize) -> u8 {
    let shift = 7 - column;
    ((plane0 >> shift) & 1) | (((plane1 >> shift) & 1) << 1)
}

/// Both pattern tables as a 256x128 grey-level image.
pub fn pattern_table_view<B: PpuBus + ?Sized>(bus: &B) -> Vec<u32> {
    let mut pixels = vec![0u32; PATTERN_VIEW_WIDTH * PATTERN_VIEW_HEIGHT];
    for tile in 0..512usize {
        let base = (tile * 16) as u16;
        let table_x = (tile / 256) * 128;
        let x0 = table_x + (tile % 16) * 8;
        let y0 = ((tile % 256) / 16) * 8;
        for row in 0..8 {
            let p0 = bus.ppu_read(base + row as u16);
            let p1 = bus.ppu_read(base + row as u16 + 8);
            for column in 0..8 {
                let color = tile_pixel(p0, p1, column) as u32;
                pixels[(y0 + row) * PATTERN_VIEW_WIDTH + x0 + column] = OPAQUE | color * 0x55_5555;
            }
        }
    }
    pixels
}

impl Ppu {
    /// Palette RAM mapped through the master palette.
    pub fn palette_view(&self) -> [u32; 32] {
        let mut out = [0u32; 32];
        for (dst, &entry) in out.iter_mut().zip(self.palette.iter()) {
            *dst = OPAQUE | NES_PALETTE[(entry & 0x3F) as usize];
        }
        out
    }

    /// Logical nametable `table` (0..=3) as a 256x240 image.
    pub fn nametable_view<B: PpuBus + ?Sized>(&self, table: u8, bus: &B) -> Vec<u32> {
        let mut pixels = vec![0u32; SCREEN_WIDTH * SCREEN_HEIGHT];
        let nt_base = 0x2000 + 0x0400 * (table as u16 & 0x03);
        let pattern_base = self.ctrl.background_pattern_base();
        let palette = self.palette_view();

        for row in 0..30usize {
            for col in 0..32usize {
                let tile = self.nametable[self.nametable_index(nt_base + (row * 32 + col) as u16)];
                let group = self.attribute_palette(table, row, col) as usize;
                let tile_addr = pattern_base + tile as u16 * 16;
                for y in 0..8 {
                    let p0 = bus.ppu_read(tile_addr + y as u16);
                    let p1 = bus.ppu_read(tile_addr + y as u16 + 8);
                    for x in 0..8 {
                        let color = tile_pixel(p0, p1, x) as usize;
                        let argb = if color == 0 {
                            palette[0]
                        } else {
                            palette[group * 4 + color]
                        };
                        pixels[(row * 8 + y) * SCREEN_WIDTH + col * 8 + x] = argb;
                    }
                }
            }
        }
        pixels
    }
}

/// Write an ARGB view to a PNG file.
#[cfg(feature = "screenshot")]
pub fn save_png<P: AsRef<std::path::Path>>(
    path: P,
    width: usize,
    height: usize,
    argb: &[u32],
) -> image::ImageResult<()> {
    let mut img = image::RgbaImage::new(width as u32, height as u32);
    for (i, px) in img.pixels_mut().enumerate() {
        let v = argb.get(i).copied().unwrap_or(0);
        *px = image::Rgba([(v >> 16) as u8, (v >> 8) as u8, v as u8, (v >> 24) as u8]);
    }
    img.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::Mirroring;
    use crate::test_utils::ChrRam;

    #[test]
    fn tile_pixel_msb_is_leftmost() {
        assert_eq!(tile_pixel(0x80, 0x00, 0), 1);
        assert_eq!(tile_pixel(0x00, 0x80, 0), 2);
        assert_eq!(tile_pixel(0x01, 0x01, 7), 3);
        assert_eq!(tile_pixel(0x01, 0x01, 6), 0);
    }

    #[test]
    fn pattern_view_places_tables_side_by_side() {
        let mut chr = ChrRam::default();
        // Tile 1 of table 0, row 0: leftmost pixel color 1.
        chr.ppu_write(0x0010, 0x80);
        // Tile 0 of table 1, row 2: rightmost pixel color 3.
        chr.ppu_write(0x1002, 0x01);
        chr.ppu_write(0x100A, 0x01);
        let view = pattern_table_view(&chr);
        assert_eq!(view.len(), PATTERN_VIEW_WIDTH * PATTERN_VIEW_HEIGHT);
        assert_eq!(view[8], 0xFF55_5555);
        assert_eq!(view[2 * PATTERN_VIEW_WIDTH + 128 + 7], 0xFFFF_FFFF);
        assert_eq!(view[0], 0xFF00_0000);
    }

    #[test]
    fn nametable_view_uses_attribute_palette() {
        let mut p = Ppu::new(Mirroring::Vertical);
        let mut chr = ChrRam::default();
        // Tile 0: all pixels color 1.
        for row in 0..8 {
            chr.ppu_write(row, 0xFF);
        }
        p.write_byte(0x3F00, 0x0F, &mut chr);
        p.write_byte(0x3F01, 0x01, &mut chr);
        p.write_byte(0x3F05, 0x02, &mut chr);
        // Top-right quadrant of the first block uses palette 1.
        p.write_byte(0x23C0, 1 << 2, &mut chr);

        let view = p.nametable_view(0, &chr);
        assert_eq!(view[0], 0xFF00_0000 | NES_PALETTE[0x01]);
        assert_eq!(view[2 * 8], 0xFF00_0000 | NES_PALETTE[0x02]);
    }

    #[test]
    fn palette_view_masks_to_64_colors() {
        let mut p = Ppu::new(Mirroring::Vertical);
        let mut chr = ChrRam::default();
        p.write_byte(0x3F02, 0x41, &mut chr);
        assert_eq!(p.palette_view()[2], 0xFF00_0000 | NES_PALETTE[0x01]);
    }
}
