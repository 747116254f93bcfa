/*!
APU register stub.

Holds the values last written to the channel registers ($4000-$4013), the channel
enable register ($4015) and the frame counter ($4017) so programs that initialise the
sound hardware run unchanged. No audio or frame-sequencer timing is produced.

Reads return 0, except $4015 which reports the enable mask (bits 0-4). $4014 and
$4016 are handled by the bus and never reach this type.
*/

#[derive(Clone, Debug, Default)]
pub struct Apu {
    channels: [u8; 0x14],
    enabled: u8,
    frame_counter: u8,
}

impl Apu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0x4000..=0x4013 => self.channels[(addr - 0x4000) as usize] = value,
            0x4015 => self.enabled = value & 0x1F,
            0x4017 => self.frame_counter = value,
            _ => {}
        }
    }

    pub fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0x4015 => self.enabled,
            _ => 0,
        }
    }

    /// Last value written to a channel register ($4000-$4013).
    pub fn channel_register(&self, addr: u16) -> Option<u8> {
        addr.checked_sub(0x4000)
            .and_then(|i| self.channels.get(i as usize).copied())
    }

    pub fn enabled_mask(&self) -> u8 {
        self.enabled
    }

    /// Bit 7 of $4017: five-step sequence.
    pub fn five_step_mode(&self) -> bool {
        self.frame_counter & 0x80 != 0
    }

    /// Bit 6 of $4017.
    pub fn frame_irq_inhibit(&self) -> bool {
        self.frame_counter & 0x40 != 0
    }
}
