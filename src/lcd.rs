//! ST7032 2-line character LCD on the ADS1118 BoosterPack, driven over SPI
//! with separate chip-select, register-select and reset lines.
//!
//! The controller's busy flag can't be read over SPI, so every byte is
//! followed by a fixed delay instead.

use crate::bus::{mode_number, Error, ModeSelect};
use crate::number::format_scaled;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::spi::Write;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::spi::{Mode, MODE_0};

/// SPI mode used by the LCD.
pub const MODE: Mode = MODE_0;

pub const CLEAR: u8 = 0b0000_0001;
pub const CURSOR_HOME: u8 = 0b0000_0010;
pub const ENTRY_MODE: u8 = 0b0000_0110;
pub const DISPLAY_ON: u8 = 0b0000_1100;
/// 8-bit bus, 2 lines, extended instruction table.
pub const FUNCTION_SET: u8 = 0b0011_1001;
pub const POWER_CONTROL: u8 = 0b0101_0110;
pub const FOLLOWER_CONTROL: u8 = 0b0110_1101;
pub const CONTRAST: u8 = 0b0111_0000;

/// DDRAM address of the first column of each line.
const LINE_ADDRESS: [u8; 2] = [0x80, 0xC0];

/// Settings for an [`Lcd`].
///
/// - `contrast`: low contrast bits sent with the contrast command
/// - `write_delay_ms`: wait after every byte (ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub contrast: u8,
    pub write_delay_ms: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contrast: 0,
            write_delay_ms: 1,
        }
    }
}

type Result<T, SpiE, PinE> = core::result::Result<T, Error<SpiE, PinE>>;

pub struct Lcd<CS, RS, RST, D> {
    cs: CS,
    rs: RS,
    rst: RST,
    delay: D,
    config: Config,
}

impl<CS, RS, RST, D, PinE> Lcd<CS, RS, RST, D>
where
    CS: OutputPin<Error = PinE>,
    RS: OutputPin<Error = PinE>,
    RST: OutputPin<Error = PinE>,
    D: DelayMs<u8>,
{
    pub fn new(cs: CS, rs: RS, rst: RST, delay: D, config: Config) -> Self {
        Self {
            cs,
            rs,
            rst,
            delay,
            config,
        }
    }

    /// Destroys the driver and returns the pins and delay.
    pub fn free(self) -> (CS, RS, RST, D) {
        (self.cs, self.rs, self.rst, self.delay)
    }

    /// Resets the controller and configures it for two lines, display
    /// on, cursor off, incrementing entry mode.
    pub fn init<SPI, SpiE>(&mut self, spi: &mut SPI) -> Result<(), SpiE, PinE>
    where
        SPI: Write<u8, Error = SpiE> + ModeSelect<Error = SpiE>,
    {
        // power-on
        self.delay.delay_ms(4);
        self.cs.set_high().map_err(Error::Pin)?;
        self.rs.set_high().map_err(Error::Pin)?;

        self.rst.set_low().map_err(Error::Pin)?;
        self.delay.delay_ms(2);
        self.rst.set_high().map_err(Error::Pin)?;
        self.delay.delay_ms(1);

        let contrast = CONTRAST | (self.config.contrast & 0x0F);
        for command in [
            FUNCTION_SET,
            POWER_CONTROL,
            FOLLOWER_CONTROL,
            contrast,
            DISPLAY_ON,
            ENTRY_MODE,
        ] {
            self.write_command(spi, command)?;
        }

        log::debug!("LCD initialized");
        Ok(())
    }

    /// Clears the display and returns the cursor to the first column of
    /// the first line.
    pub fn clear<SPI, SpiE>(&mut self, spi: &mut SPI) -> Result<(), SpiE, PinE>
    where
        SPI: Write<u8, Error = SpiE> + ModeSelect<Error = SpiE>,
    {
        self.write_command(spi, CLEAR)?;
        self.write_command(spi, CURSOR_HOME)
    }

    /// Moves the cursor to `position` on `line`. Line 0 is the top line;
    /// any other value selects the bottom one.
    pub fn set_pointer<SPI, SpiE>(
        &mut self,
        spi: &mut SPI,
        line: u8,
        position: u8,
    ) -> Result<(), SpiE, PinE>
    where
        SPI: Write<u8, Error = SpiE> + ModeSelect<Error = SpiE>,
    {
        let base = if line == 0 { LINE_ADDRESS[0] } else { LINE_ADDRESS[1] };
        self.write_command(spi, base.wrapping_add(position))?;
        self.delay.delay_ms(1);
        Ok(())
    }

    /// Writes `text` at the cursor, up to the first NUL byte if any.
    pub fn display_string<SPI, SpiE>(&mut self, spi: &mut SPI, text: &str) -> Result<(), SpiE, PinE>
    where
        SPI: Write<u8, Error = SpiE> + ModeSelect<Error = SpiE>,
    {
        for byte in text.bytes().take_while(|&byte| byte != 0) {
            self.write_data(spi, byte)?;
        }
        Ok(())
    }

    /// Writes `value` scaled by `scale` at the cursor, e.g. 235 with a
    /// scale of 10 as `23.5`. See [`format_scaled`].
    pub fn display_number<SPI, SpiE>(
        &mut self,
        spi: &mut SPI,
        value: i32,
        scale: i32,
    ) -> Result<(), SpiE, PinE>
    where
        SPI: Write<u8, Error = SpiE> + ModeSelect<Error = SpiE>,
    {
        let formatted = format_scaled(value, scale);
        self.display_string(spi, &formatted)
    }

    /// Sends one character code.
    pub fn write_data<SPI, SpiE>(&mut self, spi: &mut SPI, byte: u8) -> Result<(), SpiE, PinE>
    where
        SPI: Write<u8, Error = SpiE> + ModeSelect<Error = SpiE>,
    {
        self.write(spi, true, byte)
    }

    /// Sends one instruction.
    pub fn write_command<SPI, SpiE>(&mut self, spi: &mut SPI, command: u8) -> Result<(), SpiE, PinE>
    where
        SPI: Write<u8, Error = SpiE> + ModeSelect<Error = SpiE>,
    {
        self.write(spi, false, command)
    }

    fn write<SPI, SpiE>(&mut self, spi: &mut SPI, data: bool, byte: u8) -> Result<(), SpiE, PinE>
    where
        SPI: Write<u8, Error = SpiE> + ModeSelect<Error = SpiE>,
    {
        spi.select_mode(MODE).map_err(Error::Spi)?;

        self.cs.set_low().map_err(Error::Pin)?;
        if data {
            self.rs.set_high().map_err(Error::Pin)?;
        } else {
            self.rs.set_low().map_err(Error::Pin)?;
        }
        let written = spi.write(&[byte]);
        self.cs.set_high().map_err(Error::Pin)?;
        written.map_err(Error::Spi)?;

        log::trace!(
            "LCD mode {} {} {:#04x}",
            mode_number(MODE),
            if data { "data" } else { "command" },
            byte
        );
        self.delay.delay_ms(self.config.write_delay_ms);
        Ok(())
    }
}
