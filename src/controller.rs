/*!
Standard joypad behind $4016/$4017.

A write to $4016 drives the strobe line of both ports (bit 0). While the strobe is high
the pad keeps reloading its shift register and every read reports button A. Once it
drops, reads shift the snapshot out one bit at a time in the order
A, B, Select, Start, Up, Down, Left, Right; the ninth read onwards returns 1.

Only bit 0 of a read is driven here; the bus leaves the remaining bits at 0.
*/

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    /// Bit position in the serial report.
    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

#[derive(Clone, Debug, Default)]
pub struct Controller {
    held: u8,
    shift: u8,
    strobe: bool,
    reads: u8,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.held |= button.bit();
        } else {
            self.held &= !button.bit();
        }
    }

    /// Replace all held buttons at once (bit 0 = A ... bit 7 = Right).
    pub fn set_buttons(&mut self, mask: u8) {
        self.held = mask;
    }

    pub fn buttons(&self) -> u8 {
        self.held
    }

    /// CPU write to $4016.
    pub fn write(&mut self, value: u8) {
        self.strobe = value & 1 != 0;
        if self.strobe {
            self.reload();
        }
    }

    /// CPU read from this port.
    pub fn read(&mut self) -> u8 {
        if self.strobe {
            self.reload();
            return self.shift & 1;
        }
        if self.reads >= 8 {
            return 1;
        }
        let bit = (self.shift >> self.reads) & 1;
        self.reads += 1;
        bit
    }

    #[inline]
    fn reload(&mut self) {
        self.shift = self.held;
        self.reads = 0;
    }
}
