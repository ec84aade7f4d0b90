//! LCD mode counter.
//!
//! Only the timing side of the display is modelled: the current scanline,
//! the STAT mode and the interrupts they raise. Nothing is rendered.

use crate::cpu::Interrupt;

pub const OAM_SCAN_DOTS: u32 = 80;
pub const TRANSFER_DOTS: u32 = 172;
pub const HBLANK_DOTS: u32 = 204;
pub const DOTS_PER_LINE: u32 = OAM_SCAN_DOTS + TRANSFER_DOTS + HBLANK_DOTS;
pub const VISIBLE_LINES: u8 = 144;
pub const LINES_PER_FRAME: u8 = 154;

// Offsets into the I/O page (0xFF00).
pub(crate) const LCDC: usize = 0x40;
pub(crate) const STAT: usize = 0x41;
pub(crate) const LY: usize = 0x44;
pub(crate) const LYC: usize = 0x45;

const LCDC_ENABLE: u8 = 0x80;
const STAT_COINCIDENCE: u8 = 0x04;
const STAT_HBLANK_IRQ: u8 = 0x08;
const STAT_VBLANK_IRQ: u8 = 0x10;
const STAT_OAM_IRQ: u8 = 0x20;
const STAT_LYC_IRQ: u8 = 0x40;

/// STAT mode bits 0-1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LcdMode {
    #[default]
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

#[derive(Clone, Debug, Default)]
pub struct Lcd {
    /// Dot position within the current line.
    dot: u32,
    line: u8,
    mode: LcdMode,
    /// OR of the enabled STAT sources after the last tick. The STAT
    /// interrupt fires on its rising edge.
    stat_line: bool,
}

impl Lcd {
    pub fn line(&self) -> u8 {
        self.line
    }

    pub fn mode(&self) -> LcdMode {
        self.mode
    }

    pub fn dot(&self) -> u32 {
        self.dot
    }

    /// Advance by `cycles` T-cycles, updating LY and STAT in `io`.
    /// Returns the IF bits to request.
    pub fn tick(&mut self, cycles: u32, io: &mut [u8; 0x80]) -> u8 {
        if io[LCDC] & LCDC_ENABLE == 0 {
            // A disabled LCD parks at line 0 in H-blank.
            *self = Self::default();
            io[LY] = 0;
            io[STAT] &= !0x03;
            return 0;
        }

        let mut requests = 0;
        self.dot += cycles;
        while self.dot >= DOTS_PER_LINE {
            self.dot -= DOTS_PER_LINE;
            self.line = (self.line + 1) % LINES_PER_FRAME;
            if self.line == VISIBLE_LINES {
                requests |= Interrupt::VBlank.mask();
            }
        }

        self.mode = if self.line >= VISIBLE_LINES {
            LcdMode::VBlank
        } else if self.dot < OAM_SCAN_DOTS {
            LcdMode::OamScan
        } else if self.dot < OAM_SCAN_DOTS + TRANSFER_DOTS {
            LcdMode::Transfer
        } else {
            LcdMode::HBlank
        };

        io[LY] = self.line;
        let coincidence = io[LY] == io[LYC];
        let stat = io[STAT];
        let coincidence_bit = if coincidence { STAT_COINCIDENCE } else { 0 };
        io[STAT] = (stat & 0xF8) | coincidence_bit | self.mode as u8;

        let stat_line = (stat & STAT_HBLANK_IRQ != 0 && self.mode == LcdMode::HBlank)
            || (stat & STAT_VBLANK_IRQ != 0 && self.mode == LcdMode::VBlank)
            || (stat & STAT_OAM_IRQ != 0 && self.mode == LcdMode::OamScan)
            || (stat & STAT_LYC_IRQ != 0 && coincidence);
        if stat_line && !self.stat_line {
            requests |= Interrupt::LcdStat.mask();
        }
        self.stat_line = stat_line;

        requests
    }
}
