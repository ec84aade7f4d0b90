use super::operand::{ALU_ADC, ALU_ADD, ALU_AND, ALU_CP, ALU_OR, ALU_SBC, ALU_SUB, ALU_XOR};
use super::{Cpu, Flags};

/// Assemble a flag set from the four individual outcomes.
#[inline]
fn flags(z: bool, n: bool, h: bool, c: bool) -> Flags {
    let mut f = Flags::empty();
    f.set(Flags::ZERO, z);
    f.set(Flags::SUBTRACT, n);
    f.set(Flags::HALF_CARRY, h);
    f.set(Flags::CARRY, c);
    f
}

impl Cpu {
    /// Run one of the eight accumulator operations selected by `op`
    /// (ADD, ADC, SUB, SBC, AND, XOR, OR, CP).
    pub(super) fn alu(&mut self, op: u8, value: u8) {
        match op {
            ALU_ADD => self.regs.a = self.add8(value, false),
            ALU_ADC => self.regs.a = self.add8(value, true),
            ALU_SUB => self.regs.a = self.sub8(value, false),
            ALU_SBC => self.regs.a = self.sub8(value, true),
            ALU_AND => {
                self.regs.a &= value;
                self.regs.f = flags(self.regs.a == 0, false, true, false);
            }
            ALU_XOR => {
                self.regs.a ^= value;
                self.regs.f = flags(self.regs.a == 0, false, false, false);
            }
            ALU_OR => {
                self.regs.a |= value;
                self.regs.f = flags(self.regs.a == 0, false, false, false);
            }
            // CP sets flags like SUB and throws the difference away.
            ALU_CP => {
                self.sub8(value, false);
            }
            _ => unreachable!("alu operation {op}"),
        }
    }

    /// A + value (+ carry). Returns the sum and sets all four flags.
    fn add8(&mut self, value: u8, with_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry = u8::from(with_carry && self.flag(Flags::CARRY));
        let wide = u16::from(a) + u16::from(value) + u16::from(carry);
        let result = wide as u8;
        let half = (a & 0x0F) + (value & 0x0F) + carry > 0x0F;
        self.regs.f = flags(result == 0, false, half, wide > 0xFF);
        result
    }

    /// A - value (- carry). Returns the difference and sets all four flags.
    fn sub8(&mut self, value: u8, with_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry = u8::from(with_carry && self.flag(Flags::CARRY));
        let result = a.wrapping_sub(value).wrapping_sub(carry);
        let half = (a & 0x0F) < (value & 0x0F) + carry;
        let borrow = u16::from(a) < u16::from(value) + u16::from(carry);
        self.regs.f = flags(result == 0, true, half, borrow);
        result
    }

    /// INC on an 8-bit value. Carry is left alone.
    pub(super) fn inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        let carry = self.flag(Flags::CARRY);
        self.regs.f = flags(result == 0, false, value & 0x0F == 0x0F, carry);
        result
    }

    /// DEC on an 8-bit value. Carry is left alone.
    pub(super) fn dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        let carry = self.flag(Flags::CARRY);
        self.regs.f = flags(result == 0, true, value & 0x0F == 0x00, carry);
        result
    }

    /// ADD HL,rr.
    ///
    /// Zero is untouched. Half-carry is the carry out of bit 11 and carry is
    /// detected by the wrapped sum falling below the original HL.
    pub(super) fn add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let result = hl.wrapping_add(value);
        let zero = self.flag(Flags::ZERO);
        let half = (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF;
        self.regs.f = flags(zero, false, half, result < hl);
        self.regs.set_hl(result);
    }

    /// SP plus a signed displacement, as used by ADD SP,r8 and
    /// LD HL,SP+r8. Flags come from the unsigned add of the low byte.
    pub(super) fn add_sp_offset(&mut self, offset: u8) -> u16 {
        let sp = self.regs.sp;
        let delta = offset as i8 as i16 as u16;
        let half = (sp & 0x000F) + (delta & 0x000F) > 0x000F;
        let carry = (sp & 0x00FF) + (delta & 0x00FF) > 0x00FF;
        self.regs.f = flags(false, false, half, carry);
        sp.wrapping_add(delta)
    }

    /// Decimal adjust A after a BCD addition or subtraction.
    ///
    /// N is preserved, H is cleared, C is set when the adjustment carried
    /// into (or borrowed from) the upper digit.
    pub(super) fn daa(&mut self) {
        let mut a = self.regs.a;
        let subtract = self.flag(Flags::SUBTRACT);
        let half = self.flag(Flags::HALF_CARRY);
        let mut carry = self.flag(Flags::CARRY);

        if subtract {
            if carry {
                a = a.wrapping_sub(0x60);
            }
            if half {
                a = a.wrapping_sub(0x06);
            }
        } else {
            if carry || a > 0x99 {
                a = a.wrapping_add(0x60);
                carry = true;
            }
            if half || a & 0x0F > 0x09 {
                a = a.wrapping_add(0x06);
            }
        }

        self.regs.a = a;
        self.regs.f = flags(a == 0, subtract, false, carry);
    }

    // Rotates and shifts. Each returns the new value and sets Z from it;
    // the accumulator-only forms clear Z afterwards.

    pub(super) fn rlc(&mut self, value: u8) -> u8 {
        let result = value.rotate_left(1);
        self.regs.f = flags(result == 0, false, false, value & 0x80 != 0);
        result
    }

    pub(super) fn rrc(&mut self, value: u8) -> u8 {
        let result = value.rotate_right(1);
        self.regs.f = flags(result == 0, false, false, value & 0x01 != 0);
        result
    }

    pub(super) fn rl(&mut self, value: u8) -> u8 {
        let result = (value << 1) | u8::from(self.flag(Flags::CARRY));
        self.regs.f = flags(result == 0, false, false, value & 0x80 != 0);
        result
    }

    pub(super) fn rr(&mut self, value: u8) -> u8 {
        let result = (value >> 1) | (u8::from(self.flag(Flags::CARRY)) << 7);
        self.regs.f = flags(result == 0, false, false, value & 0x01 != 0);
        result
    }

    pub(super) fn sla(&mut self, value: u8) -> u8 {
        let result = value << 1;
        self.regs.f = flags(result == 0, false, false, value & 0x80 != 0);
        result
    }

    pub(super) fn sra(&mut self, value: u8) -> u8 {
        let result = (value >> 1) | (value & 0x80);
        self.regs.f = flags(result == 0, false, false, value & 0x01 != 0);
        result
    }

    pub(super) fn swap(&mut self, value: u8) -> u8 {
        let result = value.rotate_left(4);
        self.regs.f = flags(result == 0, false, false, false);
        result
    }

    pub(super) fn srl(&mut self, value: u8) -> u8 {
        let result = value >> 1;
        self.regs.f = flags(result == 0, false, false, value & 0x01 != 0);
        result
    }

    /// BIT n: Z reports a clear bit, H is set, C is kept.
    pub(super) fn test_bit(&mut self, bit: u8, value: u8) {
        let carry = self.flag(Flags::CARRY);
        self.regs.f = flags(value & (1 << bit) == 0, false, true, carry);
    }
}
