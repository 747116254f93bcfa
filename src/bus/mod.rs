#![doc = r#"
Bus module: CPU-visible memory map and the devices behind it.

Overview
- `Bus` owns the 2 KiB work RAM, the PPU, the APU register stub, both controller ports
  and the active mapper. The CPU receives `&mut Bus` for every access; nothing holds a
  reference back to the bus.

Modules and responsibilities
- cpu_interface: address decoding for `read_byte` / `write_byte` / `read_word`.
- ram: 2 KiB internal RAM with 2 KiB mirroring up to $1FFF.
- dma: OAM DMA ($4014) copy and the CPU stall it produces.

Decode summary
- $0000-$1FFF: RAM (`addr & 0x07FF`)
- $2000-$3FFF: PPU registers (`0x2000 + (addr & 7)`)
- $4000-$401F: $4014 OAM DMA, $4016/$4017 controllers, the rest to the APU stub
- $4020-$FFFF: mapper
"#]

use std::rc::Rc;

use crate::apu::Apu;
use crate::cartridge::Cartridge;
use crate::controller::Controller;
use crate::error::NesError;
use crate::mapper::{self, Mapper};
use crate::ppu::Ppu;

pub mod cpu_interface;
pub mod dma;
pub mod ram;

pub use dma::{OAM_DMA_BASE_STALL, OamDma};
pub use ram::{CPU_RAM_SIZE, Ram};

pub struct Bus {
    ram: Ram,
    ppu: Ppu,
    apu: Apu,
    controllers: [Controller; 2],
    mapper: Box<dyn Mapper>,
    cartridge: Rc<Cartridge>,
    dma: OamDma,
}

impl Bus {
    /// Build the bus around a cartridge; fails on an unsupported mapper number.
    pub fn new(cartridge: Rc<Cartridge>) -> Result<Self, NesError> {
        let mapper = mapper::create(Rc::clone(&cartridge))?;
        Ok(Self {
            ram: Ram::new(),
            ppu: Ppu::new(cartridge.mirroring()),
            apu: Apu::new(),
            controllers: [Controller::new(), Controller::new()],
            mapper,
            cartridge,
            dma: OamDma::default(),
        })
    }

    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    pub fn apu(&self) -> &Apu {
        &self.apu
    }

    /// Controller on port 0 ($4016) or 1 ($4017).
    pub fn controller_mut(&mut self, port: usize) -> Option<&mut Controller> {
        self.controllers.get_mut(port)
    }

    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    /// CPU stall owed for an OAM DMA started since the last call.
    ///
    /// `cpu_cycle` is the CPU cycle count at which the transfer began; odd cycles cost one
    /// extra alignment cycle.
    pub fn take_dma_stall(&mut self, cpu_cycle: u64) -> u32 {
        self.dma.take_stall(cpu_cycle)
    }
}
