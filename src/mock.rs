//! Test doubles for the pieces `embedded-hal-mock` doesn't cover.

use crate::bus::{mode_number, ModeSelect};
use core::cell::Cell;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::spi::{Transfer, Write};
use embedded_hal::spi::Mode;
use embedded_hal_mock::{
    spi::{Mock as SpiMock, Transaction as SpiTransaction},
    MockError,
};
use embedded_time::{clock, fraction::Fraction, Clock, Instant};

/// SPI mock that also records every mode selected on it and can fail
/// the next transfer or write.
pub struct Bus {
    pub spi: SpiMock,
    pub modes: Vec<u8>,
    pub fail_next: Option<MockError>,
}

impl Bus {
    pub fn new(expectations: &[SpiTransaction]) -> Self {
        Self {
            spi: SpiMock::new(expectations),
            modes: Vec::new(),
            fail_next: None,
        }
    }

    pub fn done(&mut self) {
        self.spi.done();
    }
}

impl Transfer<u8> for Bus {
    type Error = MockError;

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], Self::Error> {
        if let Some(error) = self.fail_next.take() {
            return Err(error);
        }
        self.spi.transfer(words)
    }
}

impl Write<u8> for Bus {
    type Error = MockError;

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        if let Some(error) = self.fail_next.take() {
            return Err(error);
        }
        self.spi.write(words)
    }
}

impl ModeSelect for Bus {
    type Error = MockError;

    fn select_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
        self.modes.push(mode_number(mode));
        Ok(())
    }
}

/// Millisecond clock that only moves when told to.
#[derive(Debug, Default)]
pub struct FakeClock {
    now: Cell<u32>,
}

impl FakeClock {
    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }
}

impl Clock for FakeClock {
    type T = u32;

    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000);

    fn try_now(&self) -> Result<Instant<Self>, clock::Error> {
        Ok(Instant::new(self.now.get()))
    }
}

/// Delay that returns immediately and sums what it was asked to wait.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub total_ms: u32,
    pub calls: usize,
}

impl DelayMs<u8> for RecordingDelay {
    fn delay_ms(&mut self, ms: u8) {
        self.total_ms += u32::from(ms);
        self.calls += 1;
    }
}
