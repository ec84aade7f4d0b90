use super::operand::{CC_C, CC_NC, CC_NZ, CC_Z, P_BC, P_DE, P_HL, P_SP};
use super::{Cpu, Flags};
use crate::memory::Memory;

impl Cpu {
    /// Read an 8-bit operand by its opcode encoding
    /// (0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A).
    #[inline]
    pub(super) fn read_operand(&mut self, mem: &mut dyn Memory, operand: u8) -> u8 {
        match operand {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => self.regs.h,
            5 => self.regs.l,
            6 => mem.read_byte(self.regs.hl()),
            _ => self.regs.a,
        }
    }

    #[inline]
    pub(super) fn write_operand(&mut self, mem: &mut dyn Memory, operand: u8, value: u8) {
        match operand {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => self.regs.h = value,
            5 => self.regs.l = value,
            6 => mem.write_byte(self.regs.hl(), value),
            _ => self.regs.a = value,
        }
    }

    /// 16-bit pair by encoding, with SP in slot 3.
    #[inline]
    pub(super) fn pair(&self, pair: u8) -> u16 {
        match pair {
            P_BC => self.regs.bc(),
            P_DE => self.regs.de(),
            P_HL => self.regs.hl(),
            _ => self.regs.sp,
        }
    }

    #[inline]
    pub(super) fn set_pair(&mut self, pair: u8, value: u16) {
        match pair {
            P_BC => self.regs.set_bc(value),
            P_DE => self.regs.set_de(value),
            P_HL => self.regs.set_hl(value),
            P_SP => self.regs.sp = value,
            _ => unreachable!("pair encoding {pair}"),
        }
    }

    #[inline]
    pub(super) fn condition(&self, cc: u8) -> bool {
        match cc {
            CC_NZ => !self.flag(Flags::ZERO),
            CC_Z => self.flag(Flags::ZERO),
            CC_NC => !self.flag(Flags::CARRY),
            CC_C => self.flag(Flags::CARRY),
            _ => unreachable!("condition encoding {cc}"),
        }
    }

    /// Fetch the byte at PC and advance PC.
    #[inline]
    pub(super) fn fetch8(&mut self, mem: &mut dyn Memory) -> u8 {
        let value = mem.read_byte(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Fetch a little-endian immediate word and advance PC past it.
    #[inline]
    pub(super) fn fetch16(&mut self, mem: &mut dyn Memory) -> u16 {
        let value = mem.read_word(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(2);
        value
    }

    #[inline]
    pub(super) fn push(&mut self, mem: &mut dyn Memory, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        mem.write_word(self.regs.sp, value);
    }

    #[inline]
    pub(super) fn pop(&mut self, mem: &mut dyn Memory) -> u16 {
        let value = mem.read_word(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    /// Push the current PC and continue at `target`. Shared by CALL, RST and
    /// interrupt dispatch.
    #[inline]
    pub(super) fn call_to(&mut self, mem: &mut dyn Memory, target: u16) {
        let ret = self.regs.pc;
        self.push(mem, ret);
        self.regs.pc = target;
    }
}
