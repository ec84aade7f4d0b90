mod alu;
mod cb;
mod config;
mod disasm;
mod exec;
mod helpers;
mod interrupts;
mod operand;
mod regs;
mod step;
mod table;

#[cfg(test)]
mod tests;

pub use config::{CpuConfig, IllegalOpcodePolicy};
pub use disasm::{disassemble, Disassembly};
pub use interrupts::Interrupt;
pub use regs::{Flags, Reg16, Reg8, Registers};
pub use table::{lookup, lookup_extended, Handler, Opcode, OpcodeKind, EXTENDED, PRIMARY};

/// Execution state of the step driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Running,
    /// Entered by HALT; only interrupt servicing happens until an
    /// interrupt becomes pending.
    Halted,
    /// Entered by STOP; resumes on a joypad interrupt request.
    Stopped,
    /// An illegal opcode hard-locked the CPU (`IllegalOpcodePolicy::Lock`).
    Locked,
}

/// Sharp LR35902 CPU core.
///
/// The CPU does not own its memory. Every call to [`Cpu::step`] borrows a
/// [`Memory`](crate::memory::Memory) implementation for the duration of one
/// instruction.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    config: CpuConfig,
    state: RunState,
    /// Interrupt master enable. Owned here; collaborators go through
    /// `ime()` / `set_ime()`.
    ime: bool,
    ei_pending: bool,
    ei_armed: bool,
    halt_bug: bool,
    /// Primary opcode byte of the instruction currently executing.
    opcode: u8,
    last_cycles: u32,
    total_cycles: u64,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(CpuConfig::default())
    }
}

impl Cpu {
    pub fn new(config: CpuConfig) -> Self {
        Self {
            regs: Registers::post_boot(),
            config,
            state: RunState::Running,
            ime: false,
            ei_pending: false,
            ei_armed: false,
            halt_bug: false,
            opcode: 0,
            last_cycles: 0,
            total_cycles: 0,
        }
    }

    /// Return to the post-boot state, keeping the configuration.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == RunState::Halted
    }

    pub fn is_stopped(&self) -> bool {
        self.state == RunState::Stopped
    }

    pub fn is_locked(&self) -> bool {
        self.state == RunState::Locked
    }

    pub fn ime(&self) -> bool {
        self.ime
    }

    /// Set IME directly, discarding any EI that has not taken effect yet.
    pub fn set_ime(&mut self, enabled: bool) {
        self.ime = enabled;
        self.ei_pending = false;
        self.ei_armed = false;
    }

    /// Cycles consumed by the most recent `step`.
    pub fn last_cycles(&self) -> u32 {
        self.last_cycles
    }

    /// Cycles consumed since construction or the last reset.
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    #[inline]
    pub fn flag(&self, flag: Flags) -> bool {
        self.regs.flag(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, on: bool) {
        self.regs.set_flag(flag, on);
    }
}
