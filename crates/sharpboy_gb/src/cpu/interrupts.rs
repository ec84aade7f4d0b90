//! Interrupt sources, servicing and the delayed effect of EI.

use super::{Cpu, RunState};
use crate::memory::{Memory, IE_ADDR, IF_ADDR};

/// Cycles taken to dispatch an interrupt to its vector.
const SERVICE_CYCLES: u32 = 20;

/// The five interrupt sources, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    /// Bit index in IE and IF.
    pub fn bit(self) -> u8 {
        self as u8
    }

    pub fn mask(self) -> u8 {
        1 << self.bit()
    }

    pub fn vector(self) -> u16 {
        0x0040 + 8 * u16::from(self.bit())
    }

    /// Highest priority source set in `pending`.
    pub fn highest(pending: u8) -> Option<Interrupt> {
        Self::ALL.into_iter().find(|irq| pending & irq.mask() != 0)
    }
}

impl Cpu {
    /// Requested and enabled interrupts (`IE & IF`, five bits).
    pub(super) fn pending_interrupts(&self, mem: &mut dyn Memory) -> u8 {
        mem.read_byte(IE_ADDR) & mem.read_byte(IF_ADDR) & 0x1F
    }

    /// Wake from HALT/STOP and dispatch the highest priority pending
    /// interrupt if IME allows it. Returns the cost when one was serviced.
    pub(super) fn service_interrupts(&mut self, mem: &mut dyn Memory) -> Option<u32> {
        let pending = self.pending_interrupts(mem);
        if pending == 0 {
            return None;
        }

        match self.state {
            RunState::Halted => self.state = RunState::Running,
            RunState::Stopped if pending & Interrupt::Joypad.mask() != 0 => {
                self.state = RunState::Running;
            }
            RunState::Stopped | RunState::Locked => return None,
            RunState::Running => {}
        }

        if !self.ime {
            return None;
        }
        let irq = Interrupt::highest(pending)?;

        self.set_ime(false);
        if self.halt_bug {
            // EI; HALT with a request already raised: return to the HALT.
            self.halt_bug = false;
            self.regs.pc = self.regs.pc.wrapping_sub(1);
        }
        let requested = mem.read_byte(IF_ADDR);
        mem.write_byte(IF_ADDR, requested & !irq.mask());
        log::debug!(
            "servicing {irq:?} interrupt: PC=0x{:04X} -> 0x{:04X}",
            self.regs.pc,
            irq.vector()
        );
        self.call_to(mem, irq.vector());
        Some(SERVICE_CYCLES)
    }

    /// Advance the EI delay by one instruction boundary.
    pub(super) fn apply_ei_delay(&mut self) {
        if self.ei_armed {
            self.ei_armed = false;
            self.ime = true;
        } else if self.ei_pending {
            self.ei_pending = false;
            self.ei_armed = true;
        }
    }
}
