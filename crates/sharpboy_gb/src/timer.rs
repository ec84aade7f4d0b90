//! Divider and timer (DIV, TIMA, TMA, TAC).
//!
//! DIV is the upper byte of a free-running 16-bit counter that advances once
//! per T-cycle. TIMA counts falling edges of one counter bit, chosen by TAC,
//! while the timer is enabled. On overflow TIMA reloads from TMA and the
//! timer interrupt is requested.

use crate::cpu::Interrupt;

// Offsets into the I/O page (0xFF00).
pub(crate) const DIV: usize = 0x04;
pub(crate) const TIMA: usize = 0x05;
pub(crate) const TMA: usize = 0x06;
pub(crate) const TAC: usize = 0x07;

const TAC_ENABLE: u8 = 0x04;

/// Internal counter left behind by the DMG boot ROM (DIV reads 0xAB).
const POST_BOOT_COUNTER: u16 = 0xABCC;

#[derive(Clone, Debug)]
pub struct Timer {
    counter: u16,
    tima: u8,
    tma: u8,
    /// Lower three bits only.
    tac: u8,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            counter: POST_BOOT_COUNTER,
            tima: 0,
            tma: 0,
            tac: 0,
        }
    }
}

impl Timer {
    pub fn div(&self) -> u8 {
        (self.counter >> 8) as u8
    }

    pub fn tima(&self) -> u8 {
        self.tima
    }

    pub fn enabled(&self) -> bool {
        self.tac & TAC_ENABLE != 0
    }

    /// Counter bit whose falling edge clocks TIMA:
    /// 4096 Hz, 262144 Hz, 65536 Hz, 16384 Hz.
    fn input_mask(&self) -> u16 {
        match self.tac & 0x03 {
            0b00 => 1 << 9,
            0b01 => 1 << 3,
            0b10 => 1 << 5,
            _ => 1 << 7,
        }
    }

    /// The signal TIMA counts: the selected bit gated by the enable flag.
    fn input(&self) -> bool {
        self.enabled() && self.counter & self.input_mask() != 0
    }

    /// Count one TIMA tick. Returns the IF bits to request.
    fn increment_tima(&mut self) -> u8 {
        let (next, overflow) = self.tima.overflowing_add(1);
        if overflow {
            log::trace!("TIMA overflow, reload 0x{:02X}", self.tma);
            self.tima = self.tma;
            Interrupt::Timer.mask()
        } else {
            self.tima = next;
            0
        }
    }

    /// Apply a change of counter or TAC, clocking TIMA on a falling edge.
    fn update(&mut self, change: impl FnOnce(&mut Self)) -> u8 {
        let before = self.input();
        change(self);
        if before && !self.input() {
            self.increment_tima()
        } else {
            0
        }
    }

    /// Advance by `cycles` T-cycles. Returns the IF bits to request.
    pub fn tick(&mut self, cycles: u32) -> u8 {
        let mut requests = 0;
        for _ in 0..cycles {
            requests |= self.update(|timer| timer.counter = timer.counter.wrapping_add(1));
        }
        requests
    }

    pub(crate) fn read(&self, offset: usize) -> u8 {
        match offset {
            DIV => self.div(),
            TIMA => self.tima,
            TMA => self.tma,
            TAC => 0xF8 | self.tac,
            _ => 0xFF,
        }
    }

    /// Register write. Resetting DIV or changing TAC can clock TIMA once.
    /// Returns the IF bits to request.
    pub(crate) fn write(&mut self, offset: usize, value: u8) -> u8 {
        match offset {
            DIV => self.update(|timer| timer.counter = 0),
            TIMA => {
                self.tima = value;
                0
            }
            TMA => {
                self.tma = value;
                0
            }
            TAC => self.update(|timer| timer.tac = value & 0x07),
            _ => 0,
        }
    }
}
