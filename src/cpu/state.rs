/*!
state.rs - 6502 architectural state (registers + flags) and stack/fetch helpers.

`CpuState` holds everything a program can observe: A, X, Y, S, PC and P. Decode,
timing and interrupt latching live in `core`; instruction semantics in `execute`.

6502 Status Register Bit Layout
===============================
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C

Power-on values: A = X = Y = 0, S = $FD, P = $34 (I, B and bit 5 set), PC from the
reset vector.

Stack: page $01. Push writes `$0100 | S` then decrements S; pull increments S then
reads. S wraps silently in both directions.
*/

use crate::bus::Bus;

/// Processor status flag bit masks.
pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000;
pub const BREAK: u8 = 0b0001_0000;
pub const UNUSED: u8 = 0b0010_0000;
pub const OVERFLOW: u8 = 0b0100_0000;
pub const NEGATIVE: u8 = 0b1000_0000;

pub const STACK_PAGE: u16 = 0x0100;
pub const POWER_ON_SP: u8 = 0xFD;
pub const POWER_ON_STATUS: u8 = IRQ_DISABLE | BREAK | UNUSED;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: POWER_ON_SP,
            pc: 0x0000,
            status: POWER_ON_STATUS,
        }
    }
}

impl CpuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Power-on registers, PC from $FFFC/$FFFD.
    pub fn reset(&mut self, bus: &mut Bus) {
        *self = Self::default();
        self.pc = bus.read_word(0xFFFC);
    }

    // ---------------------------------------------------------------------
    // Instruction stream
    // ---------------------------------------------------------------------

    #[inline]
    pub fn fetch_u8(&mut self, bus: &mut Bus) -> u8 {
        let b = bus.read_byte(self.pc);
        self.pc = self.pc.wrapping_add(1);
        b
    }

    #[inline]
    pub fn fetch_u16(&mut self, bus: &mut Bus) -> u16 {
        let lo = self.fetch_u8(bus) as u16;
        let hi = self.fetch_u8(bus) as u16;
        (hi << 8) | lo
    }

    // ---------------------------------------------------------------------
    // Flags
    // ---------------------------------------------------------------------

    #[inline]
    pub fn get_flag(&self, mask: u8) -> bool {
        (self.status & mask) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, mask: u8, on: bool) {
        if on {
            self.status |= mask;
        } else {
            self.status &= !mask;
        }
    }

    /// ZERO and NEGATIVE from a result byte.
    #[inline]
    pub fn update_zn(&mut self, result: u8) {
        self.set_flag(ZERO, result == 0);
        self.set_flag(NEGATIVE, result & 0x80 != 0);
    }

    /// P as pushed by PHP/BRK (`with_break`) or NMI; bit 5 is always set.
    pub fn compose_status_for_push(&self, with_break: bool) -> u8 {
        let v = self.status | UNUSED;
        if with_break { v | BREAK } else { v & !BREAK }
    }

    /// P as restored by PLP/RTI: bit 5 forced on, BREAK dropped.
    #[inline]
    pub fn restore_status(&mut self, pulled: u8) {
        self.status = (pulled | UNUSED) & !BREAK;
    }

    // ---------------------------------------------------------------------
    // Stack
    // ---------------------------------------------------------------------

    #[inline]
    pub fn push_u8(&mut self, bus: &mut Bus, value: u8) {
        bus.write_byte(STACK_PAGE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    #[inline]
    pub fn pop_u8(&mut self, bus: &mut Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read_byte(STACK_PAGE | self.sp as u16)
    }

    /// Push high byte then low byte, the order JSR and interrupts use.
    #[inline]
    pub fn push_u16(&mut self, bus: &mut Bus, value: u16) {
        self.push_u8(bus, (value >> 8) as u8);
        self.push_u8(bus, value as u8);
    }

    #[inline]
    pub fn pop_u16(&mut self, bus: &mut Bus) -> u16 {
        let lo = self.pop_u8(bus) as u16;
        let hi = self.pop_u8(bus) as u16;
        (hi << 8) | lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::nrom_bus;

    #[test]
    fn power_on_values() {
        let s = CpuState::new();
        assert_eq!((s.a, s.x, s.y), (0, 0, 0));
        assert_eq!(s.sp, 0xFD);
        assert_eq!(s.status, 0x34);
    }

    #[test]
    fn reset_loads_pc_from_vector() {
        let mut bus = nrom_bus(&[0xEA], Some((0xC123, 0x8000, 0x8000)));
        let mut s = CpuState::new();
        s.a = 0x55;
        s.reset(&mut bus);
        assert_eq!(s.pc, 0xC123);
        assert_eq!(s.a, 0);
    }

    #[test]
    fn update_zn_behavior() {
        let mut s = CpuState::new();
        s.update_zn(0x00);
        assert!(s.get_flag(ZERO));
        assert!(!s.get_flag(NEGATIVE));
        s.update_zn(0x80);
        assert!(!s.get_flag(ZERO));
        assert!(s.get_flag(NEGATIVE));
    }

    #[test]
    fn stack_lives_in_page_one_and_wraps() {
        let mut bus = nrom_bus(&[0xEA], None);
        let mut s = CpuState::new();
        s.push_u8(&mut bus, 0xAB);
        assert_eq!(bus.read_byte(0x01FD), 0xAB);
        assert_eq!(s.sp, 0xFC);
        assert_eq!(s.pop_u8(&mut bus), 0xAB);

        s.sp = 0x00;
        s.push_u8(&mut bus, 0x11);
        assert_eq!(s.sp, 0xFF);
        assert_eq!(bus.read_byte(0x0100), 0x11);
        assert_eq!(s.pop_u8(&mut bus), 0x11);
        assert_eq!(s.sp, 0x00);
    }

    #[test]
    fn word_push_is_high_then_low() {
        let mut bus = nrom_bus(&[0xEA], None);
        let mut s = CpuState::new();
        s.push_u16(&mut bus, 0x1234);
        assert_eq!(bus.read_byte(0x01FD), 0x12);
        assert_eq!(bus.read_byte(0x01FC), 0x34);
        assert_eq!(s.pop_u16(&mut bus), 0x1234);
    }

    #[test]
    fn status_push_and_restore_masks() {
        let mut s = CpuState::new();
        s.status = CARRY;
        assert_eq!(s.compose_status_for_push(true), CARRY | BREAK | UNUSED);
        assert_eq!(s.compose_status_for_push(false), CARRY | UNUSED);
        s.restore_status(0xFF);
        assert_eq!(s.status, 0xEF);
    }
}
