use super::{RAM_BANK_SIZE, ROM_BANK_SIZE};

/// MBC1 controller state.
///
/// 0000-1FFF enables external RAM (0x0A in the low nibble), 2000-3FFF holds
/// the 5-bit ROM bank, 4000-5FFF the 2-bit upper register and 6000-7FFF the
/// banking mode. In mode 1 the upper register also selects the RAM bank and
/// the bank mapped at 0000-3FFF.
pub(crate) struct Mbc1Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    rom_banks: usize,
    ram_banks: usize,
    rom_bank_low5: u8,
    bank_high2: u8,
    ram_enable: bool,
    advanced_mode: bool,
}

impl Mbc1Cartridge {
    pub(crate) fn new(rom: &[u8], ram_banks: usize) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: vec![0xFF; ram_banks * RAM_BANK_SIZE],
            rom_banks: (rom.len() / ROM_BANK_SIZE).max(1),
            ram_banks,
            rom_bank_low5: 1,
            bank_high2: 0,
            ram_enable: false,
            advanced_mode: false,
        }
    }

    fn rom_bank(&self, addr: u16) -> usize {
        let high = usize::from(self.bank_high2) << 5;
        let bank = if addr < 0x4000 {
            if self.advanced_mode {
                high
            } else {
                0
            }
        } else {
            high | usize::from(self.rom_bank_low5)
        };
        bank % self.rom_banks
    }

    fn ram_offset(&self, addr: u16) -> Option<usize> {
        if !self.ram_enable || self.ram_banks == 0 {
            return None;
        }
        let bank = if self.advanced_mode {
            usize::from(self.bank_high2) % self.ram_banks
        } else {
            0
        };
        Some(bank * RAM_BANK_SIZE + usize::from(addr.wrapping_sub(0xA000)) % RAM_BANK_SIZE)
    }

    pub(crate) fn rom_read(&self, addr: u16) -> u8 {
        let index = self.rom_bank(addr) * ROM_BANK_SIZE + usize::from(addr) % ROM_BANK_SIZE;
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    pub(crate) fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                // Bank 0 cannot be selected here; it reads as bank 1.
                self.rom_bank_low5 = (value & 0x1F).max(1);
                log::debug!("MBC1 ROM bank low bits = {}", self.rom_bank_low5);
            }
            0x4000..=0x5FFF => {
                self.bank_high2 = value & 0x03;
                log::debug!("MBC1 upper bank bits = {}", self.bank_high2);
            }
            0x6000..=0x7FFF => self.advanced_mode = value & 0x01 != 0,
            _ => {}
        }
    }

    pub(crate) fn ram_read(&self, addr: u16) -> u8 {
        self.ram_offset(addr)
            .and_then(|offset| self.ram.get(offset).copied())
            .unwrap_or(0xFF)
    }

    pub(crate) fn ram_write(&mut self, addr: u16, value: u8) {
        if let Some(slot) = self.ram_offset(addr).and_then(|offset| self.ram.get_mut(offset)) {
            *slot = value;
        }
    }
}
