use crate::cpu::operand::R_HL;
use crate::cpu::Cpu;
use crate::memory::Memory;

impl Cpu {
    pub(crate) fn inc_r<const R: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let value = self.read_operand(mem, R);
        let result = self.inc8(value);
        self.write_operand(mem, R, result);
        if R == R_HL { 12 } else { 4 }
    }

    pub(crate) fn dec_r<const R: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let value = self.read_operand(mem, R);
        let result = self.dec8(value);
        self.write_operand(mem, R, result);
        if R == R_HL { 12 } else { 4 }
    }

    pub(crate) fn inc_rr<const PAIR: u8>(&mut self, _mem: &mut dyn Memory) -> u32 {
        let value = self.pair(PAIR).wrapping_add(1);
        self.set_pair(PAIR, value);
        8
    }

    pub(crate) fn dec_rr<const PAIR: u8>(&mut self, _mem: &mut dyn Memory) -> u32 {
        let value = self.pair(PAIR).wrapping_sub(1);
        self.set_pair(PAIR, value);
        8
    }
}
