/*!
CPU interface dispatcher

Every 16-bit address lands in exactly one arm:
- $0000-$1FFF: internal RAM, mirrored every $0800
- $2000-$3FFF: PPU registers $2000-$2007, mirrored every 8 bytes
- $4014: OAM DMA trigger (write); reads as 0
- $4016: controller 1 (read); strobe for both ports (write)
- $4017: controller 2 (read); strobe for both ports (write)
- other $4000-$401F: APU register stub
- $4020-$FFFF: cartridge mapper

`read_word` is two independent byte reads (low at `addr`, high at `addr + 1`), so a word
read across a register with read side effects triggers them once per byte.
*/

use super::Bus;

impl Bus {
    pub fn read_byte(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram.read(addr),
            0x2000..=0x3FFF => {
                let reg = 0x2000 + (addr & 0x0007);
                self.ppu.read_register(reg, &*self.mapper)
            }
            0x4014 => 0,
            0x4016 => self.controllers[0].read(),
            0x4017 => self.controllers[1].read(),
            0x4000..=0x401F => self.apu.read_register(addr),
            _ => self.mapper.read_byte(addr),
        }
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram.write(addr, value),
            0x2000..=0x3FFF => {
                let reg = 0x2000 + (addr & 0x0007);
                self.ppu.write_register(reg, value, &mut *self.mapper);
            }
            0x4014 => self.oam_dma(value),
            0x4016 | 0x4017 => {
                for pad in &mut self.controllers {
                    pad.write(value);
                }
                // $4017 doubles as the APU frame counter.
                if addr == 0x4017 {
                    self.apu.write_register(addr, value);
                }
            }
            0x4000..=0x401F => self.apu.write_register(addr, value),
            _ => self.mapper.write_byte(addr, value),
        }
    }

    /// Little-endian word at `addr`, `addr + 1`.
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read_byte(addr) as u16;
        let hi = self.read_byte(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}
