//! Extended (0xCB-prefixed) handlers.
//!
//! Costs returned here exclude the 4 cycles of the prefix itself.

use super::operand::R_HL;
use super::Cpu;
use crate::memory::Memory;

impl Cpu {
    /// Read the operand, transform it, write it back.
    #[inline]
    fn read_modify_write<const R: u8>(
        &mut self,
        mem: &mut dyn Memory,
        op: impl FnOnce(&mut Self, u8) -> u8,
    ) -> u32 {
        let value = self.read_operand(mem, R);
        let result = op(self, value);
        self.write_operand(mem, R, result);
        if R == R_HL { 12 } else { 4 }
    }

    pub(crate) fn cb_rlc<const R: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        self.read_modify_write::<R>(mem, Cpu::rlc)
    }

    pub(crate) fn cb_rrc<const R: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        self.read_modify_write::<R>(mem, Cpu::rrc)
    }

    pub(crate) fn cb_rl<const R: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        self.read_modify_write::<R>(mem, Cpu::rl)
    }

    pub(crate) fn cb_rr<const R: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        self.read_modify_write::<R>(mem, Cpu::rr)
    }

    pub(crate) fn cb_sla<const R: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        self.read_modify_write::<R>(mem, Cpu::sla)
    }

    pub(crate) fn cb_sra<const R: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        self.read_modify_write::<R>(mem, Cpu::sra)
    }

    pub(crate) fn cb_swap<const R: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        self.read_modify_write::<R>(mem, Cpu::swap)
    }

    pub(crate) fn cb_srl<const R: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        self.read_modify_write::<R>(mem, Cpu::srl)
    }

    /// BIT only reads, so (HL) costs less than the other (HL) forms.
    pub(crate) fn cb_bit<const BIT: u8, const R: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let value = self.read_operand(mem, R);
        self.test_bit(BIT, value);
        if R == R_HL { 8 } else { 4 }
    }

    pub(crate) fn cb_res<const BIT: u8, const R: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        self.read_modify_write::<R>(mem, |_, value| value & !(1 << BIT))
    }

    pub(crate) fn cb_set<const BIT: u8, const R: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        self.read_modify_write::<R>(mem, |_, value| value | (1 << BIT))
    }
}
