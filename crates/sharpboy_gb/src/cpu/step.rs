use super::table::lookup;
use super::{Cpu, RunState};
use crate::memory::Memory;

/// Cost reported while the CPU is halted, stopped or locked.
const IDLE_CYCLES: u32 = 4;

impl Cpu {
    /// Execute one instruction (or service one interrupt) and return the
    /// T-cycles it took. Never fails: illegal opcodes are handled by the
    /// configured policy.
    pub fn step<M: Memory>(&mut self, mem: &mut M) -> u32 {
        let cycles = self.execute(mem);
        self.last_cycles = cycles;
        self.total_cycles += u64::from(cycles);
        cycles
    }

    fn execute(&mut self, mem: &mut dyn Memory) -> u32 {
        if self.state == RunState::Locked {
            return IDLE_CYCLES;
        }
        if let Some(cycles) = self.service_interrupts(mem) {
            return cycles;
        }
        if self.state != RunState::Running {
            return IDLE_CYCLES;
        }

        let pc = self.regs.pc;
        let opcode = mem.read_byte(pc);
        if self.halt_bug {
            self.halt_bug = false;
        } else {
            self.regs.pc = pc.wrapping_add(1);
        }
        self.opcode = opcode;

        let entry = lookup(opcode);
        log::trace!("{pc:04X}  {opcode:02X}  {:<14} {}", entry.mnemonic(), self.regs);
        let cycles = entry.execute(self, mem);

        self.apply_ei_delay();
        cycles
    }
}
