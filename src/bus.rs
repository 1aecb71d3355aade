use embedded_hal::spi::{Mode, Phase, Polarity};

/// A SPI bus that can change clock polarity and phase between
/// transactions.
///
/// The ADS1118 and the LCD share one bus but need different modes, so
/// each driver selects its mode before every transaction.
pub trait ModeSelect {
    type Error;

    fn select_mode(&mut self, mode: Mode) -> Result<(), Self::Error>;
}

/// Errors from the drivers in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<SpiE, PinE> {
    /// The SPI bus failed to transfer or switch modes.
    Spi(SpiE),
    /// A chip-select, register-select or reset pin could not be driven.
    Pin(PinE),
    /// The time source could not be read.
    Clock,
}

/// Returns the conventional mode number (0-3) for `mode`.
pub fn mode_number(mode: Mode) -> u8 {
    match (mode.polarity, mode.phase) {
        (Polarity::IdleLow, Phase::CaptureOnFirstTransition) => 0,
        (Polarity::IdleLow, Phase::CaptureOnSecondTransition) => 1,
        (Polarity::IdleHigh, Phase::CaptureOnFirstTransition) => 2,
        (Polarity::IdleHigh, Phase::CaptureOnSecondTransition) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::spi::{MODE_0, MODE_1, MODE_2, MODE_3};

    #[test]
    fn mode_numbers() {
        assert_eq!(mode_number(MODE_0), 0);
        assert_eq!(mode_number(MODE_1), 1);
        assert_eq!(mode_number(MODE_2), 2);
        assert_eq!(mode_number(MODE_3), 3);
    }
}
