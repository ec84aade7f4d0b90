mod header;
mod mbc1;
mod rom_only;

use thiserror::Error;

pub use header::{CartridgeHeader, CartridgeKind};
use mbc1::Mbc1Cartridge;
use rom_only::RomOnlyCartridge;

/// Size of one switchable ROM bank.
pub(crate) const ROM_BANK_SIZE: usize = 0x4000;
/// Size of one external RAM bank.
pub(crate) const RAM_BANK_SIZE: usize = 0x2000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartridgeError {
    #[error("ROM image is {len} bytes, too small to contain a cartridge header")]
    TooSmall { len: usize },
    #[error("unsupported cartridge type 0x{0:02X}")]
    UnsupportedType(u8),
}

/// Wrapper enum for the supported memory bank controllers.
pub(crate) enum Cartridge {
    RomOnly(RomOnlyCartridge),
    Mbc1(Mbc1Cartridge),
}

impl Cartridge {
    pub(crate) fn new(rom: &[u8], header: &CartridgeHeader) -> Result<Self, CartridgeError> {
        match header.kind() {
            Some(CartridgeKind::RomOnly) => {
                Ok(Self::RomOnly(RomOnlyCartridge::new(rom, header.ram_banks())))
            }
            Some(CartridgeKind::Mbc1) => Ok(Self::Mbc1(Mbc1Cartridge::new(rom, header.ram_banks()))),
            None => Err(CartridgeError::UnsupportedType(header.cartridge_type)),
        }
    }

    pub(crate) fn rom_read(&self, addr: u16) -> u8 {
        match self {
            Cartridge::RomOnly(c) => c.rom_read(addr),
            Cartridge::Mbc1(c) => c.rom_read(addr),
        }
    }

    /// Writes into the ROM area program the controller.
    pub(crate) fn rom_write(&mut self, addr: u16, value: u8) {
        match self {
            Cartridge::RomOnly(_) => {}
            Cartridge::Mbc1(c) => c.rom_write(addr, value),
        }
    }

    pub(crate) fn ram_read(&self, addr: u16) -> u8 {
        match self {
            Cartridge::RomOnly(c) => c.ram_read(addr),
            Cartridge::Mbc1(c) => c.ram_read(addr),
        }
    }

    pub(crate) fn ram_write(&mut self, addr: u16, value: u8) {
        match self {
            Cartridge::RomOnly(c) => c.ram_write(addr, value),
            Cartridge::Mbc1(c) => c.ram_write(addr, value),
        }
    }
}

/// Build a header-valid ROM image for tests. Every ROM bank starts with its
/// own bank number so banking can be observed at 0x4000.
#[cfg(test)]
pub(crate) fn test_rom(title: &str, cartridge_type: u8, rom_size: u8, ram_size: u8) -> Vec<u8> {
    let banks = 2usize << rom_size;
    let mut rom = vec![0u8; banks * ROM_BANK_SIZE];
    for bank in 1..banks {
        rom[bank * ROM_BANK_SIZE] = bank as u8;
    }
    let title = title.as_bytes();
    let len = title.len().min(16);
    rom[0x134..0x134 + len].copy_from_slice(&title[..len]);
    rom[0x147] = cartridge_type;
    rom[0x148] = rom_size;
    rom[0x149] = ram_size;
    rom[0x14A] = 0x01;
    rom[0x14D] = header::header_checksum(&rom);
    rom
}
