#![doc = r#"
nescore library crate.

NES core: 6502 CPU, PPU timing/register machine, CPU bus and the NROM cartridge mapper.

Modules:
- apu: APU register stub (stores writes, $4015 status; no audio)
- bus: CPU address decoding over RAM, PPU registers, OAM DMA, controllers, APU, mapper
- cartridge: iNES v1 loader and header metadata
- controller: standard controller shift register
- cpu: 6502 core (state, opcode table, addressing, execution, `Cpu::step`)
- error: `NesError`, the crate-wide error type
- mapper: `Mapper` trait, NROM (mapper 0) and the `create` factory
- ppu: PPU registers, address space, timing with vblank/NMI, debug views
- ppu_bus: trait for PPU pattern-table access (decouples the PPU from the mapper type)
- system: `Nes`, which interleaves CPU and PPU 1:3

In tests, shared iNES builders are available under `crate::test_utils`.
"#]

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod error;
pub mod mapper;
pub mod ppu;
pub mod ppu_bus;
pub mod system;

pub use bus::Bus;
pub use cartridge::{Cartridge, Mirroring};
pub use cpu::Cpu;
pub use error::NesError;
pub use system::Nes;

#[cfg(test)]
pub mod test_utils;
