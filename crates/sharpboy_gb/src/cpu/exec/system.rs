use crate::cpu::table::lookup_extended;
use crate::cpu::{Cpu, IllegalOpcodePolicy, RunState};
use crate::memory::Memory;

impl Cpu {
    pub(crate) fn nop(&mut self, _mem: &mut dyn Memory) -> u32 {
        4
    }

    /// HALT. With IME clear and an interrupt already pending the CPU does
    /// not halt; on hardware the following opcode byte is then read twice.
    pub(crate) fn halt(&mut self, mem: &mut dyn Memory) -> u32 {
        if self.ime || self.pending_interrupts(mem) == 0 {
            self.state = RunState::Halted;
        } else if self.config.halt_bug {
            log::debug!("HALT bug triggered at PC=0x{:04X}", self.regs.pc);
            self.halt_bug = true;
        }
        4
    }

    /// STOP is encoded with a padding byte, which is skipped.
    pub(crate) fn stop(&mut self, mem: &mut dyn Memory) -> u32 {
        self.fetch8(mem);
        self.state = RunState::Stopped;
        4
    }

    /// DI takes effect at once and cancels an EI still in flight.
    pub(crate) fn di(&mut self, _mem: &mut dyn Memory) -> u32 {
        self.set_ime(false);
        4
    }

    /// EI sets IME after the instruction that follows it.
    pub(crate) fn ei(&mut self, _mem: &mut dyn Memory) -> u32 {
        if !self.ime {
            self.ei_pending = true;
        }
        4
    }

    /// 0xCB: fetch the second byte and run it from the extended table.
    pub(crate) fn prefix_cb(&mut self, mem: &mut dyn Memory) -> u32 {
        let opcode = self.fetch8(mem);
        4 + lookup_extended(opcode).execute(self, mem)
    }

    pub(crate) fn illegal(&mut self, _mem: &mut dyn Memory) -> u32 {
        let opcode = self.opcode;
        let pc = self.regs.pc.wrapping_sub(1);
        match self.config.illegal_opcode {
            IllegalOpcodePolicy::Nop => {
                log::warn!("illegal opcode 0x{opcode:02X} at PC=0x{pc:04X}, treated as NOP");
            }
            IllegalOpcodePolicy::Lock => {
                log::error!(
                    "GB CPU locked: illegal opcode 0x{opcode:02X} at PC=0x{pc:04X} ({})",
                    self.regs
                );
                self.state = RunState::Locked;
            }
        }
        4
    }
}
