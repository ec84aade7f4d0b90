use crate::cpu::operand::P_AF;
use crate::cpu::Cpu;
use crate::memory::Memory;

impl Cpu {
    /// PUSH BC/DE/HL/AF. Slot 3 is AF here, not SP.
    pub(crate) fn push_rr<const PAIR: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let value = if PAIR == P_AF {
            self.regs.af()
        } else {
            self.pair(PAIR)
        };
        self.push(mem, value);
        16
    }

    /// POP BC/DE/HL/AF. Popping AF drops the low nibble of F.
    pub(crate) fn pop_rr<const PAIR: u8>(&mut self, mem: &mut dyn Memory) -> u32 {
        let value = self.pop(mem);
        if PAIR == P_AF {
            self.regs.set_af(value);
        } else {
            self.set_pair(PAIR, value);
        }
        12
    }
}
