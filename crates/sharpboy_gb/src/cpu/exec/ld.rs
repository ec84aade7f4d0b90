use crate::cpu::operand::{IND_BC, IND_DE, IND_HLD, IND_HLI, R_HL};
use crate::cpu::Cpu;
use crate::memory::Memory;

/// Base of the high page used by LDH and LD (C).
const HIGH_PAGE: u16 = 0xFF00;

impl Cpu {
    /// LD r,r' including the (HL) forms. 0x76 is HALT, never routed here.
    pub(crate) fn ld_r_r<const DST: u8, const SRC: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let value = self.read_operand(mem, SRC);
        self.write_operand(mem, DST, value);
        if DST == R_HL || SRC == R_HL { 8 } else { 4 }
    }

    pub(crate) fn ld_r_d8<const DST: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let value = self.fetch8(mem);
        self.write_operand(mem, DST, value);
        if DST == R_HL { 12 } else { 8 }
    }

    pub(crate) fn ld_rr_d16<const PAIR: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let value = self.fetch16(mem);
        self.set_pair(PAIR, value);
        12
    }

    /// Resolve (BC), (DE), (HL+) or (HL-), applying the HL post-step.
    fn indirect_address<const IND: u8>(&mut self) -> u16 {
        match IND {
            IND_BC => self.regs.bc(),
            IND_DE => self.regs.de(),
            IND_HLI => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            IND_HLD => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
            _ => unreachable!("indirect encoding {IND}"),
        }
    }

    pub(crate) fn ld_ind_a<const IND: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let addr = self.indirect_address::<IND>();
        mem.write_byte(addr, self.regs.a);
        8
    }

    pub(crate) fn ld_a_ind<const IND: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let addr = self.indirect_address::<IND>();
        self.regs.a = mem.read_byte(addr);
        8
    }

    pub(crate) fn ld_a16_sp(&mut self, mem: &mut dyn Memory) -> u32 {
        let addr = self.fetch16(mem);
        mem.write_word(addr, self.regs.sp);
        20
    }

    pub(crate) fn ldh_a8_a(&mut self, mem: &mut dyn Memory) -> u32 {
        let addr = HIGH_PAGE | u16::from(self.fetch8(mem));
        mem.write_byte(addr, self.regs.a);
        12
    }

    pub(crate) fn ldh_a_a8(&mut self, mem: &mut dyn Memory) -> u32 {
        let addr = HIGH_PAGE | u16::from(self.fetch8(mem));
        self.regs.a = mem.read_byte(addr);
        12
    }

    pub(crate) fn ld_c_a(&mut self, mem: &mut dyn Memory) -> u32 {
        mem.write_byte(HIGH_PAGE | u16::from(self.regs.c), self.regs.a);
        8
    }

    pub(crate) fn ld_a_c(&mut self, mem: &mut dyn Memory) -> u32 {
        self.regs.a = mem.read_byte(HIGH_PAGE | u16::from(self.regs.c));
        8
    }

    pub(crate) fn ld_a16_a(&mut self, mem: &mut dyn Memory) -> u32 {
        let addr = self.fetch16(mem);
        mem.write_byte(addr, self.regs.a);
        16
    }

    pub(crate) fn ld_a_a16(&mut self, mem: &mut dyn Memory) -> u32 {
        let addr = self.fetch16(mem);
        self.regs.a = mem.read_byte(addr);
        16
    }

    pub(crate) fn ld_sp_hl(&mut self, _mem: &mut dyn Memory) -> u32 {
        self.regs.sp = self.regs.hl();
        8
    }

    pub(crate) fn ld_hl_sp_r8(&mut self, mem: &mut dyn Memory) -> u32 {
        let offset = self.fetch8(mem);
        let value = self.add_sp_offset(offset);
        self.regs.set_hl(value);
        12
    }
}
