use crate::cpu::operand::R_HL;
use crate::cpu::{Cpu, Flags};
use crate::memory::Memory;

impl Cpu {
    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,r (0x80-0xBF).
    pub(crate) fn alu_r<const OP: u8, const SRC: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let value = self.read_operand(mem, SRC);
        self.alu(OP, value);
        if SRC == R_HL { 8 } else { 4 }
    }

    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,d8.
    pub(crate) fn alu_d8<const OP: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let value = self.fetch8(mem);
        self.alu(OP, value);
        8
    }

    pub(crate) fn add_hl_rr<const PAIR: u8>(&mut self, _mem: &mut dyn Memory) -> u32 {
        let value = self.pair(PAIR);
        self.add16_hl(value);
        8
    }

    pub(crate) fn add_sp_r8(&mut self, mem: &mut dyn Memory) -> u32 {
        let offset = self.fetch8(mem);
        self.regs.sp = self.add_sp_offset(offset);
        16
    }

    // The accumulator rotates share the CB implementations but always
    // leave Z clear.

    pub(crate) fn rlca(&mut self, _mem: &mut dyn Memory) -> u32 {
        self.regs.a = self.rlc(self.regs.a);
        self.regs.clear_flag(Flags::ZERO);
        4
    }

    pub(crate) fn rrca(&mut self, _mem: &mut dyn Memory) -> u32 {
        self.regs.a = self.rrc(self.regs.a);
        self.regs.clear_flag(Flags::ZERO);
        4
    }

    pub(crate) fn rla(&mut self, _mem: &mut dyn Memory) -> u32 {
        self.regs.a = self.rl(self.regs.a);
        self.regs.clear_flag(Flags::ZERO);
        4
    }

    pub(crate) fn rra(&mut self, _mem: &mut dyn Memory) -> u32 {
        self.regs.a = self.rr(self.regs.a);
        self.regs.clear_flag(Flags::ZERO);
        4
    }

    pub(crate) fn daa_a(&mut self, _mem: &mut dyn Memory) -> u32 {
        self.daa();
        4
    }

    pub(crate) fn cpl(&mut self, _mem: &mut dyn Memory) -> u32 {
        self.regs.a = !self.regs.a;
        self.regs.f.insert(Flags::SUBTRACT | Flags::HALF_CARRY);
        4
    }

    pub(crate) fn scf(&mut self, _mem: &mut dyn Memory) -> u32 {
        self.regs.f.remove(Flags::SUBTRACT | Flags::HALF_CARRY);
        self.regs.f.insert(Flags::CARRY);
        4
    }

    pub(crate) fn ccf(&mut self, _mem: &mut dyn Memory) -> u32 {
        self.regs.f.remove(Flags::SUBTRACT | Flags::HALF_CARRY);
        self.regs.f.toggle(Flags::CARRY);
        4
    }
}
