//! Drivers for the ADS1118 thermocouple BoosterPack: the ADS1118 ADC with
//! type K thermocouple linearization, and the ST7032 SPI character LCD.
//!
//! Both devices share one SPI bus in different modes. Neither driver owns
//! the bus; every operation borrows it, and the bus must implement
//! [`ModeSelect`] so each driver can switch to its own mode first.
//!
//! ```ignore
//! let mut ads = Ads1118::new(ads_cs, &clock, ads1118::Config::default());
//! let mut lcd = Lcd::new(lcd_cs, lcd_rs, lcd_rst, delay, lcd::Config::default());
//!
//! ads.begin(&mut spi)?;
//! lcd.init(&mut spi)?;
//!
//! loop {
//!     let celsius = ads.read_celsius(&mut spi)?;
//!     lcd.set_pointer(&mut spi, 0, 0)?;
//!     lcd.display_number(&mut spi, celsius, 10)?;
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod ads1118;
mod bus;
pub mod interpolate;
pub mod lcd;
#[cfg(test)]
mod mock;
pub mod number;
pub mod thermocouple;

pub use crate::ads1118::Ads1118;
pub use crate::bus::{mode_number, Error, ModeSelect};
pub use crate::lcd::Lcd;
