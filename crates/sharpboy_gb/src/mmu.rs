//! Game Boy memory map.
//!
//! | Range     | Region                                  |
//! |-----------|-----------------------------------------|
//! | 0000-3FFF | cartridge ROM bank 0                    |
//! | 4000-7FFF | cartridge ROM, switchable bank          |
//! | 8000-9FFF | video RAM                               |
//! | A000-BFFF | cartridge RAM (gated by the controller) |
//! | C000-DFFF | work RAM                                |
//! | E000-FDFF | echo of C000-DDFF                       |
//! | FE00-FE9F | OAM                                     |
//! | FEA0-FEFF | unusable, reads 0xFF                    |
//! | FF00-FF7F | I/O registers                           |
//! | FF80-FFFE | high RAM                                |
//! | FFFF      | interrupt enable                        |

use crate::cartridge::{Cartridge, CartridgeError, CartridgeHeader};
use crate::cpu::Interrupt;
use crate::lcd::{Lcd, LY, STAT};
use crate::memory::Memory;
use crate::timer::{Timer, DIV, TAC};

const P1: usize = 0x00;
const IF: usize = 0x0F;
const DMA: usize = 0x46;

/// Register values left behind by the DMG boot ROM.
const POST_BOOT_IO: [(usize, u8); 25] = [
    (P1, 0xCF),
    (IF, 0x01),
    (0x10, 0x80),
    (0x11, 0xBF),
    (0x12, 0xF3),
    (0x14, 0xBF),
    (0x16, 0x3F),
    (0x19, 0xBF),
    (0x1A, 0x7F),
    (0x1B, 0xFF),
    (0x1C, 0x9F),
    (0x1E, 0xBF),
    (0x20, 0xFF),
    (0x23, 0xBF),
    (0x24, 0x77),
    (0x25, 0xF3),
    (0x26, 0xF1),
    (0x40, 0x91),
    (STAT, 0x85),
    (0x42, 0x00),
    (0x43, 0x00),
    (0x45, 0x00),
    (0x47, 0xFC),
    (0x48, 0xFF),
    (0x49, 0xFF),
];

pub struct Mmu {
    header: CartridgeHeader,
    cartridge: Cartridge,
    vram: Vec<u8>,
    wram: Vec<u8>,
    oam: [u8; 0xA0],
    io: [u8; 0x80],
    hram: [u8; 0x7F],
    ie: u8,
    lcd: Lcd,
    timer: Timer,
}

impl Mmu {
    /// Parse the header and map the cartridge.
    pub fn from_rom(rom: &[u8]) -> Result<Self, CartridgeError> {
        let header = CartridgeHeader::parse(rom)?;
        let cartridge = Cartridge::new(rom, &header)?;

        let mut io = [0u8; 0x80];
        for (offset, value) in POST_BOOT_IO {
            io[offset] = value;
        }

        Ok(Self {
            header,
            cartridge,
            vram: vec![0; 0x2000],
            wram: vec![0; 0x2000],
            oam: [0; 0xA0],
            io,
            hram: [0; 0x7F],
            ie: 0,
            lcd: Lcd::default(),
            timer: Timer::default(),
        })
    }

    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub fn lcd(&self) -> &Lcd {
        &self.lcd
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn request_interrupt(&mut self, interrupt: Interrupt) {
        self.io[IF] |= interrupt.mask();
    }

    /// Advance the memory-mapped hardware by the cycles of one CPU step.
    pub fn tick(&mut self, cycles: u32) {
        let requests = self.lcd.tick(cycles, &mut self.io) | self.timer.tick(cycles);
        self.io[IF] |= requests;
    }

    fn read_io(&self, offset: usize) -> u8 {
        match offset {
            // Nothing is ever pressed: both key groups read high.
            P1 => 0xC0 | (self.io[P1] & 0x30) | 0x0F,
            DIV..=TAC => self.timer.read(offset),
            IF => 0xE0 | self.io[IF],
            STAT => 0x80 | self.io[STAT],
            _ => self.io[offset],
        }
    }

    fn write_io(&mut self, offset: usize, value: u8) {
        match offset {
            P1 => self.io[P1] = value & 0x30,
            DIV..=TAC => self.io[IF] |= self.timer.write(offset, value),
            IF => self.io[IF] = value & 0x1F,
            // Mode and coincidence bits belong to the LCD.
            STAT => self.io[STAT] = (value & 0x78) | (self.io[STAT] & 0x07),
            LY => {}
            DMA => {
                self.io[DMA] = value;
                self.oam_dma(value);
            }
            _ => self.io[offset] = value,
        }
    }

    /// Copy 0xA0 bytes from `page << 8` into OAM at once.
    fn oam_dma(&mut self, page: u8) {
        let base = u16::from(page) << 8;
        for i in 0..self.oam.len() {
            let byte = self.read_byte(base.wrapping_add(i as u16));
            self.oam[i] = byte;
        }
    }
}

impl Memory for Mmu {
    fn read_byte(&mut self, addr: u16) -> u8 {
        let a = usize::from(addr);
        match addr {
            0x0000..=0x7FFF => self.cartridge.rom_read(addr),
            0x8000..=0x9FFF => self.vram[a - 0x8000],
            0xA000..=0xBFFF => self.cartridge.ram_read(addr),
            0xC000..=0xDFFF => self.wram[a - 0xC000],
            0xE000..=0xFDFF => self.wram[a - 0xE000],
            0xFE00..=0xFE9F => self.oam[a - 0xFE00],
            0xFEA0..=0xFEFF => 0xFF,
            0xFF00..=0xFF7F => self.read_io(a - 0xFF00),
            0xFF80..=0xFFFE => self.hram[a - 0xFF80],
            0xFFFF => self.ie,
        }
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        let a = usize::from(addr);
        match addr {
            0x0000..=0x7FFF => self.cartridge.rom_write(addr, value),
            0x8000..=0x9FFF => self.vram[a - 0x8000] = value,
            0xA000..=0xBFFF => self.cartridge.ram_write(addr, value),
            0xC000..=0xDFFF => self.wram[a - 0xC000] = value,
            0xE000..=0xFDFF => self.wram[a - 0xE000] = value,
            0xFE00..=0xFE9F => self.oam[a - 0xFE00] = value,
            0xFEA0..=0xFEFF => {}
            0xFF00..=0xFF7F => self.write_io(a - 0xFF00, value),
            0xFF80..=0xFFFE => self.hram[a - 0xFF80] = value,
            0xFFFF => self.ie = value,
        }
    }
}
