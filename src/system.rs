/*!
system.rs - the `Nes` orchestrator.

Order of operations for one `Nes::step`:
1. `Cpu::step` runs one instruction (servicing a latched NMI first) and reports cycles.
2. A pending OAM DMA stall is added to that count. The transfer begins after the
   $4014 write, the last cycle of the instruction, so the stall parity uses the cycle
   count at the end of the instruction.
3. For every CPU cycle the PPU advances three cycles. When the PPU latches an NMI
   it is forwarded to the CPU, which takes it at the next instruction boundary.

The PPU therefore runs after the instruction that produced its cycles; register
accesses inside an instruction see the PPU position of the instruction start.
*/

use std::rc::Rc;

use log::debug;

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::error::NesError;

pub const PPU_CYCLES_PER_CPU_CYCLE: u32 = 3;

pub struct Nes {
    cpu: Cpu,
    bus: Bus,
    cycles: u64,
}

impl Nes {
    /// Power on a console with `cartridge` inserted and run the reset sequence.
    pub fn new(cartridge: Cartridge) -> Result<Self, NesError> {
        let mut bus = Bus::new(Rc::new(cartridge))?;
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        debug!("reset: PC=${:04X}", cpu.pc());
        Ok(Self {
            cpu,
            bus,
            cycles: 0,
        })
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// CPU cycles elapsed, DMA stalls included.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// One instruction plus the PPU work for its cycles. Returns the CPU cycles consumed.
    pub fn step(&mut self) -> Result<u32, NesError> {
        let mut cycles = self.cpu.step(&mut self.bus)?;
        cycles += self.bus.take_dma_stall(self.cycles + cycles as u64);

        for _ in 0..cycles * PPU_CYCLES_PER_CPU_CYCLE {
            let ppu = self.bus.ppu_mut();
            ppu.step();
            if ppu.take_nmi_request() {
                self.cpu.request_nmi();
            }
        }
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    /// Run until the PPU frame counter advances. Returns the CPU cycles consumed.
    pub fn step_frame(&mut self) -> Result<u64, NesError> {
        let frame = self.bus.ppu().frame();
        let mut total = 0u64;
        while self.bus.ppu().frame() == frame {
            total += self.step()? as u64;
        }
        Ok(total)
    }

    /// Power-cycle: RAM and devices keep their contents, CPU registers reload.
    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
        self.cycles = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::Interrupt;
    use crate::ppu::{CYCLES_PER_SCANLINE, SCANLINES_PER_FRAME};
    use crate::test_utils::build_nrom_with_prg;

    fn nes(prg: &[u8], vectors: Option<(u16, u16, u16)>) -> Nes {
        let rom = build_nrom_with_prg(prg, 1, vectors);
        Nes::new(Cartridge::from_ines_bytes(&rom).expect("parse")).expect("nes")
    }

    #[test]
    fn reset_loads_vector() {
        let n = nes(&[0xEA], Some((0x8123, 0x8000, 0x8000)));
        assert_eq!(n.cpu().pc(), 0x8123);
        assert_eq!(n.cycles(), 0);
    }

    #[test]
    fn ppu_runs_three_cycles_per_cpu_cycle() {
        let mut n = nes(&[0xEA, 0xEA], None);
        let before = (n.bus().ppu().scanline(), n.bus().ppu().cycle());
        assert_eq!(before, (261, 0));
        assert_eq!(n.step().expect("nop"), 2);
        assert_eq!(n.bus().ppu().cycle(), 6);
    }

    #[test]
    fn frame_takes_one_frame_of_ppu_cycles() {
        // JMP $8000
        let mut n = nes(&[0x4C, 0x00, 0x80], None);
        // Power-on sits on the pre-render line, so the first frame is one scanline.
        let short = n.step_frame().expect("first frame");
        assert_eq!(n.bus().ppu().frame(), 1);
        assert!(short <= CYCLES_PER_SCANLINE as u64 / 3 + 3);

        let full = n.step_frame().expect("second frame");
        assert_eq!(n.bus().ppu().frame(), 2);
        let frame_cpu = (CYCLES_PER_SCANLINE as u64 * SCANLINES_PER_FRAME as u64) / 3;
        // Whole instructions only, so either end may be off by one JMP.
        assert!(full + 3 >= frame_cpu && full <= frame_cpu + 3);
    }

    #[test]
    fn vblank_nmi_reaches_the_cpu() {
        let mut prg = vec![0u8; 0x1001];
        // LDA #$80 ; STA $2000 ; JMP $8005
        prg[..8].copy_from_slice(&[0xA9, 0x80, 0x8D, 0x00, 0x20, 0x4C, 0x05, 0x80]);
        // Handler at $9000: INC $10 ; RTI
        prg[0x1000] = 0xE6;
        prg.extend_from_slice(&[0x10, 0x40]);
        let mut n = nes(&prg, Some((0x8000, 0x9000, 0x8000)));

        let mut serviced = false;
        for _ in 0..40_000 {
            n.step().expect("step");
            if n.cpu().pending_interrupt() == Interrupt::Nmi {
                n.step().expect("nmi");
                assert_eq!(n.cpu().pc(), 0x9002);
                serviced = true;
                break;
            }
        }
        assert!(serviced);
        n.step().expect("rti");
        assert_eq!(n.cpu().pc(), 0x8005);
        assert_eq!(n.bus_mut().read_byte(0x0010), 1);
    }

    #[test]
    fn oam_dma_stall_is_accounted() {
        // LDA #$02 ; STA $4014
        let mut n = nes(&[0xA9, 0x02, 0x8D, 0x14, 0x40], None);
        n.step().expect("lda");
        let cycles = n.step().expect("sta");
        // STA abs is 4; the write ends on cycle 6, which is even.
        assert_eq!(cycles, 4 + 513);
        assert_eq!(n.cycles(), 2 + 4 + 513);
    }

    #[test]
    fn oam_dma_ending_on_odd_cycle_adds_alignment() {
        // LDX #$14 ; LDA #$02 ; STA $4000,X
        let mut n = nes(&[0xA2, 0x14, 0xA9, 0x02, 0x9D, 0x00, 0x40], None);
        n.step().expect("ldx");
        n.step().expect("lda");
        let cycles = n.step().expect("sta");
        // The 5-cycle store starts on cycle 4 and its write ends on cycle 9.
        assert_eq!(cycles, 5 + 514);
        assert_eq!(n.cycles(), 4 + 5 + 514);
        assert_eq!(n.bus().dma_transfers(), 1);
    }

    #[test]
    fn unimplemented_opcode_stops_the_run() {
        let mut n = nes(&[0x02], None);
        assert!(matches!(
            n.step(),
            Err(NesError::UnimplementedOpcode { opcode: 0x02, pc: 0x8000 })
        ));
    }
}
