use crate::cpu::Cpu;
use crate::memory::Memory;

impl Cpu {
    /// Apply a JR displacement, relative to the address after the operand.
    #[inline]
    fn jump_relative(&mut self, offset: u8) {
        self.regs.pc = self.regs.pc.wrapping_add(offset as i8 as u16);
    }

    pub(crate) fn jr_r8(&mut self, mem: &mut dyn Memory) -> u32 {
        let offset = self.fetch8(mem);
        self.jump_relative(offset);
        12
    }

    pub(crate) fn jr_cc<const CC: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let offset = self.fetch8(mem);
        if !self.condition(CC) {
            return 8;
        }
        self.jump_relative(offset);
        12
    }

    pub(crate) fn jp_a16(&mut self, mem: &mut dyn Memory) -> u32 {
        self.regs.pc = self.fetch16(mem);
        16
    }

    pub(crate) fn jp_cc<const CC: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let target = self.fetch16(mem);
        if !self.condition(CC) {
            return 12;
        }
        self.regs.pc = target;
        16
    }

    pub(crate) fn jp_hl(&mut self, _mem: &mut dyn Memory) -> u32 {
        self.regs.pc = self.regs.hl();
        4
    }

    pub(crate) fn call_a16(&mut self, mem: &mut dyn Memory) -> u32 {
        let target = self.fetch16(mem);
        self.call_to(mem, target);
        24
    }

    pub(crate) fn call_cc<const CC: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let target = self.fetch16(mem);
        if !self.condition(CC) {
            return 12;
        }
        self.call_to(mem, target);
        24
    }

    pub(crate) fn ret(&mut self, mem: &mut dyn Memory) -> u32 {
        self.regs.pc = self.pop(mem);
        16
    }

    /// RET cc pays for the condition check on top of the return itself.
    pub(crate) fn ret_cc<const CC: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        if !self.condition(CC) {
            return 8;
        }
        self.regs.pc = self.pop(mem);
        20
    }

    /// RETI enables IME immediately, unlike EI.
    pub(crate) fn reti(&mut self, mem: &mut dyn Memory) -> u32 {
        self.regs.pc = self.pop(mem);
        self.set_ime(true);
        16
    }

    pub(crate) fn rst<const VECTOR: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        self.call_to(mem, u16::from(VECTOR));
        16
    }
}
