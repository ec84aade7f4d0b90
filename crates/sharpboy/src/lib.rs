use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use sharpboy_gb::{CpuConfig, GameBoy, IllegalOpcodePolicy};
use typed_builder::TypedBuilder;

pub const USAGE: &str = "\
usage: sharpboy <rom> [--frames N] [--disasm N] [--regs] [--lock-on-illegal] [--no-halt-bug]

  --frames N          run N frames headless (default 60)
  --disasm N          print N instructions disassembled from 0x0100 first
  --regs              print the CPU registers after running
  --lock-on-illegal   lock the CPU on undefined opcodes instead of skipping them
  --no-halt-bug       do not reproduce the DMG HALT bug";

/// Entry point of the cartridge after the boot ROM.
const ENTRY_POINT: u16 = 0x0100;

#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct RunOptions {
    #[builder(setter(into))]
    pub rom: PathBuf,
    #[builder(default = 60)]
    pub frames: u32,
    #[builder(default)]
    pub disasm: usize,
    #[builder(default)]
    pub regs: bool,
    #[builder(default)]
    pub cpu: CpuConfig,
}

impl RunOptions {
    /// Parse command-line arguments (without the program name).
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut rom = None;
        let mut frames = 60;
        let mut disasm = 0;
        let mut regs = false;
        let mut cpu = CpuConfig::default();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--frames" => frames = number(&arg, args.next())?,
                "--disasm" => disasm = number(&arg, args.next())?,
                "--regs" => regs = true,
                "--lock-on-illegal" => cpu.illegal_opcode = IllegalOpcodePolicy::Lock,
                "--no-halt-bug" => cpu.halt_bug = false,
                flag if flag.starts_with("--") => bail!("unknown option '{flag}'\n\n{USAGE}"),
                path => {
                    if rom.replace(PathBuf::from(path)).is_some() {
                        bail!("more than one ROM path given\n\n{USAGE}");
                    }
                }
            }
        }

        let Some(rom) = rom else {
            bail!("no ROM path provided\n\n{USAGE}");
        };
        Ok(Self::builder()
            .rom(rom)
            .frames(frames)
            .disasm(disasm)
            .regs(regs)
            .cpu(cpu)
            .build())
    }
}

fn number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T> {
    let value = value.with_context(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .ok()
        .with_context(|| format!("{flag}: '{value}' is not a valid number"))
}

/// Read the ROM named in `options` and run it, writing the report to `out`.
pub fn run(options: &RunOptions, out: &mut impl Write) -> Result<()> {
    log::info!("Playing ROM path: '{}'", options.rom.display());
    let rom = std::fs::read(&options.rom)
        .with_context(|| format!("failed to read ROM file '{}'", options.rom.display()))?;
    run_rom(&rom, options, out)
}

/// Run an in-memory ROM image.
pub fn run_rom(rom: &[u8], options: &RunOptions, out: &mut impl Write) -> Result<()> {
    let mut gb = GameBoy::with_config(rom, options.cpu).context("failed to load cartridge")?;
    writeln!(out, "{}", gb.header())?;

    if options.disasm > 0 {
        writeln!(out)?;
        let mut address = ENTRY_POINT;
        for _ in 0..options.disasm {
            let line = gb.disassemble(address);
            writeln!(out, "{line}")?;
            address = line.next_address();
        }
    }

    let mut cycles = 0u64;
    for _ in 0..options.frames {
        cycles += u64::from(gb.step_frame());
    }
    log::info!("ran {} frames ({cycles} cycles)", options.frames);
    if gb.cpu.is_locked() {
        log::warn!("CPU is locked at PC=0x{:04X}", gb.cpu.regs.pc);
    }

    if options.regs {
        writeln!(out)?;
        writeln!(out, "{}", gb.cpu.regs)?;
        writeln!(
            out,
            "IME={} state={:?} cycles={}",
            u8::from(gb.cpu.ime()),
            gb.cpu.state(),
            gb.cpu.total_cycles()
        )?;
    }
    Ok(())
}
