use std::fmt;

use super::CartridgeError;

const TITLE: std::ops::Range<usize> = 0x0134..0x0144;
const CGB_FLAG: usize = 0x0143;
const SGB_FLAG: usize = 0x0146;
const CARTRIDGE_TYPE: usize = 0x0147;
const ROM_SIZE: usize = 0x0148;
const RAM_SIZE: usize = 0x0149;
const DESTINATION: usize = 0x014A;
const HEADER_CHECKSUM: usize = 0x014D;
/// First byte past the header.
const HEADER_END: usize = 0x0150;

/// Memory bank controller families this crate can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartridgeKind {
    RomOnly,
    Mbc1,
}

/// Fields of the cartridge header at 0x0134-0x014F.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cgb_flag: u8,
    pub sgb_flag: u8,
    pub cartridge_type: u8,
    pub rom_size: u8,
    pub ram_size: u8,
    pub destination: u8,
    pub header_checksum: u8,
    /// Whether `header_checksum` matches the bytes it covers.
    pub checksum_valid: bool,
}

/// The boot ROM's header checksum over 0x0134-0x014C.
pub(crate) fn header_checksum(rom: &[u8]) -> u8 {
    rom[0x0134..=0x014C]
        .iter()
        .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1))
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self, CartridgeError> {
        if rom.len() < HEADER_END {
            return Err(CartridgeError::TooSmall { len: rom.len() });
        }

        let cgb_flag = rom[CGB_FLAG];
        // On colour-aware carts the last title byte is the CGB flag.
        let title_bytes = if cgb_flag & 0x80 != 0 {
            &rom[TITLE.start..CGB_FLAG]
        } else {
            &rom[TITLE]
        };
        let title = title_bytes
            .iter()
            .take_while(|&&b| b != 0)
            .filter(|b| b.is_ascii_graphic() || **b == b' ')
            .map(|&b| char::from(b))
            .collect::<String>()
            .trim_end()
            .to_string();

        let stored = rom[HEADER_CHECKSUM];
        let computed = header_checksum(rom);
        let checksum_valid = stored == computed;
        if !checksum_valid {
            log::warn!(
                "cartridge header checksum mismatch: stored 0x{stored:02X}, computed 0x{computed:02X}"
            );
        }

        Ok(Self {
            title,
            cgb_flag,
            sgb_flag: rom[SGB_FLAG],
            cartridge_type: rom[CARTRIDGE_TYPE],
            rom_size: rom[ROM_SIZE],
            ram_size: rom[RAM_SIZE],
            destination: rom[DESTINATION],
            header_checksum: stored,
            checksum_valid,
        })
    }

    pub fn is_cgb(&self) -> bool {
        self.cgb_flag & 0x80 != 0
    }

    pub fn is_sgb(&self) -> bool {
        self.sgb_flag == 0x03
    }

    pub fn is_japanese(&self) -> bool {
        self.destination == 0x00
    }

    pub fn kind(&self) -> Option<CartridgeKind> {
        match self.cartridge_type {
            0x00 | 0x08 | 0x09 => Some(CartridgeKind::RomOnly),
            0x01..=0x03 => Some(CartridgeKind::Mbc1),
            _ => None,
        }
    }

    pub fn cartridge_type_name(&self) -> &'static str {
        match self.cartridge_type {
            0x00 => "ROM only",
            0x01 => "MBC1",
            0x02 => "MBC1+RAM",
            0x03 => "MBC1+RAM+BATTERY",
            0x05 => "MBC2",
            0x06 => "MBC2+BATTERY",
            0x08 => "ROM+RAM",
            0x09 => "ROM+RAM+BATTERY",
            0x0F..=0x13 => "MBC3",
            0x19..=0x1E => "MBC5",
            _ => "unknown",
        }
    }

    /// Number of 16 KiB ROM banks, if the size code is known.
    pub fn rom_banks(&self) -> Option<usize> {
        (self.rom_size <= 0x08).then(|| 2usize << self.rom_size)
    }

    /// Number of 8 KiB RAM banks. A 2 KiB chip counts as one bank.
    pub fn ram_banks(&self) -> usize {
        match self.ram_size {
            0x01 | 0x02 => 1,
            0x03 => 4,
            0x04 => 16,
            0x05 => 8,
            _ => 0,
        }
    }
}

impl fmt::Display for CartridgeHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        if self.is_cgb() {
            writeln!(f, "Game Boy Color game")?;
        }
        if self.is_sgb() {
            writeln!(f, "Super Game Boy game")?;
        } else {
            writeln!(f, "Original Game Boy game")?;
        }
        writeln!(
            f,
            "Cartridge type: {} (0x{:02X})",
            self.cartridge_type_name(),
            self.cartridge_type
        )?;
        match self.rom_banks() {
            Some(banks) => writeln!(f, "ROM size: {} KiB; {banks} banks", banks * 16)?,
            None => writeln!(f, "ROM size: unknown (0x{:02X})", self.rom_size)?,
        }
        match (self.ram_size, self.ram_banks()) {
            (_, 0) => writeln!(f, "RAM size: none")?,
            (0x01, _) => writeln!(f, "RAM size: 2 KiB; 1 bank")?,
            (_, banks) => writeln!(f, "RAM size: {} KiB; {banks} banks", banks * 8)?,
        }
        let destination = if self.is_japanese() {
            "Japanese"
        } else {
            "non-Japanese"
        };
        write!(f, "Destination: {destination}")
    }
}
