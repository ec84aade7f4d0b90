use crate::cartridge::{CartridgeError, CartridgeHeader};
use crate::cpu::{disassemble, Cpu, CpuConfig, Disassembly};
use crate::mmu::Mmu;
use crate::CYCLES_PER_FRAME;

/// High-level Game Boy machine: the CPU core plus the memory map it runs
/// against.
pub struct GameBoy {
    pub cpu: Cpu,
    mmu: Mmu,
}

impl GameBoy {
    pub fn from_rom(rom: &[u8]) -> Result<Self, CartridgeError> {
        Self::with_config(rom, CpuConfig::default())
    }

    pub fn with_config(rom: &[u8], config: CpuConfig) -> Result<Self, CartridgeError> {
        let mmu = Mmu::from_rom(rom)?;
        let header = mmu.header();
        log::info!(
            "loaded \"{}\": {} cartridge, {} bytes",
            header.title,
            header.cartridge_type_name(),
            rom.len()
        );
        Ok(Self {
            cpu: Cpu::new(config),
            mmu,
        })
    }

    /// Header of the loaded cartridge, kept for diagnostics.
    pub fn header(&self) -> &CartridgeHeader {
        self.mmu.header()
    }

    pub fn mmu(&self) -> &Mmu {
        &self.mmu
    }

    pub fn mmu_mut(&mut self) -> &mut Mmu {
        &mut self.mmu
    }

    /// Run one CPU step and advance the rest of the hardware by its cost.
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.step(&mut self.mmu);
        self.mmu.tick(cycles);
        cycles
    }

    /// Step until at least one frame's worth of cycles has elapsed.
    /// Returns the cycles actually run.
    pub fn step_frame(&mut self) -> u32 {
        let mut elapsed = 0;
        while elapsed < CYCLES_PER_FRAME {
            elapsed += self.step();
        }
        elapsed
    }

    /// Decode the instruction at `address` without executing it.
    pub fn disassemble(&mut self, address: u16) -> Disassembly {
        disassemble(&mut self.mmu, address)
    }
}
