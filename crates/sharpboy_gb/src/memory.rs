/// Address of the interrupt flag register (IF).
pub const IF_ADDR: u16 = 0xFF0F;
/// Address of the interrupt enable register (IE).
pub const IE_ADDR: u16 = 0xFFFF;

/// Memory interface consumed by the CPU core.
///
/// Reads take `&mut self` because I/O registers may have side effects on
/// access. Word accessors are little-endian: the low byte lives at `addr`
/// and the high byte at `addr + 1`, wrapping at the top of the address
/// space.
pub trait Memory {
    fn read_byte(&mut self, addr: u16) -> u8;
    fn write_byte(&mut self, addr: u16, value: u8);

    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read_byte(addr);
        let hi = self.read_byte(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write_byte(addr, lo);
        self.write_byte(addr.wrapping_add(1), hi);
    }
}

/// A flat 64 KiB RAM with no mapping or side effects.
///
/// Useful for driving the CPU in isolation (tests, tooling) without a
/// cartridge or I/O model behind it.
#[derive(Clone)]
pub struct FlatMemory {
    bytes: Vec<u8>,
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl FlatMemory {
    pub fn new() -> Self {
        Self {
            bytes: vec![0; 0x10000],
        }
    }

    /// Copy `data` into memory starting at `addr`, wrapping at 0xFFFF.
    pub fn load(&mut self, addr: u16, data: &[u8]) {
        let mut at = addr;
        for &byte in data {
            self.bytes[at as usize] = byte;
            at = at.wrapping_add(1);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory")
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Memory for FlatMemory {
    fn read_byte(&mut self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }
}
