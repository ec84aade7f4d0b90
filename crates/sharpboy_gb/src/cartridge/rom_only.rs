use super::RAM_BANK_SIZE;

/// Up to 32 KiB of ROM mapped straight in, with an optional 8 KiB RAM chip.
pub(crate) struct RomOnlyCartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
}

impl RomOnlyCartridge {
    pub(crate) fn new(rom: &[u8], ram_banks: usize) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: vec![0xFF; ram_banks.min(1) * RAM_BANK_SIZE],
        }
    }

    pub(crate) fn rom_read(&self, addr: u16) -> u8 {
        self.rom.get(usize::from(addr)).copied().unwrap_or(0xFF)
    }

    pub(crate) fn ram_read(&self, addr: u16) -> u8 {
        let offset = usize::from(addr.wrapping_sub(0xA000));
        self.ram.get(offset).copied().unwrap_or(0xFF)
    }

    pub(crate) fn ram_write(&mut self, addr: u16, value: u8) {
        let offset = usize::from(addr.wrapping_sub(0xA000));
        if let Some(slot) = self.ram.get_mut(offset) {
            *slot = value;
        }
    }
}
