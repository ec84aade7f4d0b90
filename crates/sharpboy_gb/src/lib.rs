pub mod cartridge;
pub mod cpu;
pub mod lcd;
pub mod machine;
pub mod memory;
pub mod mmu;
pub mod timer;

pub use cartridge::{CartridgeError, CartridgeHeader, CartridgeKind};
pub use cpu::{Cpu, CpuConfig, IllegalOpcodePolicy, Interrupt, RunState};
pub use machine::GameBoy;
pub use memory::{FlatMemory, Memory};
pub use mmu::Mmu;

/// T-cycles in one DMG video frame (154 scanlines of 456 dots).
pub const CYCLES_PER_FRAME: u32 = 70_224;
