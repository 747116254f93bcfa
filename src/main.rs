use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use nescore::{Cartridge, Nes};

/// Run an NROM cartridge headless for a number of frames.
#[derive(Parser, Debug)]
#[command(name = "nescore")]
#[command(about = "Headless NES core runner", long_about = None)]
struct Args {
    /// Path to the iNES ROM file
    #[arg(short, long)]
    rom: PathBuf,

    /// Number of frames to run
    #[arg(short, long, default_value = "60")]
    frames: u64,

    /// Dump CPU state after execution
    #[arg(short = 'c', long)]
    dump_cpu: bool,

    /// Dump PPU state after execution
    #[arg(short = 'p', long)]
    dump_ppu: bool,

    /// Write the pattern-table view to a PNG file
    #[cfg(feature = "screenshot")]
    #[arg(long)]
    pattern_png: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cart = Cartridge::from_ines_file(&args.rom)
        .with_context(|| format!("loading {}", args.rom.display()))?;
    info!(
        "cartridge: {} x 16KB PRG, {} x 8KB CHR{}, mapper {}, {:?} mirroring",
        cart.prg_pages(),
        cart.chr_pages(),
        if cart.uses_chr_ram() { " (RAM)" } else { "" },
        cart.mapper_number(),
        cart.mirroring()
    );

    let mut nes = Nes::new(cart).context("powering on")?;
    nes.bus().mapper().print();

    for frame in 0..args.frames {
        nes.step_frame()
            .with_context(|| format!("frame {frame}"))?;
    }
    println!(
        "Completed {} frames ({} CPU cycles).",
        nes.bus().ppu().frame(),
        nes.cycles()
    );

    if args.dump_cpu {
        dump_cpu_state(&nes);
    }
    if args.dump_ppu {
        dump_ppu_state(&nes);
    }

    #[cfg(feature = "screenshot")]
    if let Some(path) = &args.pattern_png {
        let view = nescore::ppu::pattern_table_view(nes.bus().mapper());
        nescore::ppu::save_png(
            path,
            nescore::ppu::PATTERN_VIEW_WIDTH,
            nescore::ppu::PATTERN_VIEW_HEIGHT,
            &view,
        )
        .with_context(|| format!("writing {}", path.display()))?;
        println!("Pattern tables written to {}", path.display());
    }

    Ok(())
}

fn dump_cpu_state(nes: &Nes) {
    let cpu = nes.cpu();
    println!("\nCPU State:");
    println!("  A:    ${:02X}", cpu.a());
    println!("  X:    ${:02X}", cpu.x());
    println!("  Y:    ${:02X}", cpu.y());
    println!("  PC:   ${:04X}", cpu.pc());
    println!("  SP:   ${:02X}", cpu.sp());
    println!("  P:    {:08b}", cpu.status());
    println!("  Cycles: {}", cpu.cycles());
}

fn dump_ppu_state(nes: &Nes) {
    let ppu = nes.bus().ppu();
    println!("\nPPU State:");
    println!("  Frame:    {}", ppu.frame());
    println!("  Scanline: {}", ppu.scanline());
    println!("  Cycle:    {}", ppu.cycle());
    println!("  VBLANK:   {}", ppu.vblank());
    println!("  CTRL:     ${:02X}", ppu.ctrl().to_byte());
    println!("  MASK:     ${:02X}", ppu.mask().to_byte());
    println!("  VRAM:     ${:04X}", ppu.vram_addr());
}
