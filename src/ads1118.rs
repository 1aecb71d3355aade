use crate::bus::{mode_number, Error, ModeSelect};
use crate::thermocouple::{compensate, linearize};
use embedded_hal::blocking::spi::Transfer;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::spi::{Mode, MODE_1};
use embedded_time::{duration::Milliseconds, Clock, Instant};

/// SPI mode used by the ADS1118.
pub const MODE: Mode = MODE_1;

/// AIN0/AIN1, FS = ±0.256 V, single-shot, 128 SPS, pull-up on DOUT.
pub const CONFIG_AIN0_AIN1: u16 = 0x8B8A;
/// AIN2/AIN3 with otherwise the same settings. The BoosterPack only wires
/// a thermocouple to AIN0/AIN1.
pub const CONFIG_AIN2_AIN3: u16 = 0xBB8A;
/// Selects the internal temperature sensor instead of the inputs.
pub const TEMPERATURE_SENSOR: u16 = 0x0010;
/// Starts a single-shot conversion.
const SINGLE_SHOT: u16 = 0x8000;

/// Settings for an [`Ads1118`].
///
/// - `read_interval_ms`: minimum time between two conversions (ms)
/// - `input`: configuration word for the thermocouple input, without the
///   temperature sensor bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub read_interval_ms: u32,
    pub input: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_interval_ms: 50,
            input: CONFIG_AIN0_AIN1,
        }
    }
}

/// Which reading the next eligible [`Ads1118::read_celsius`] refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// The thermocouple across the configured input pair.
    Far,
    /// The internal sensor, used as the cold junction temperature.
    Local,
}

type Result<T, SpiE, PinE> = core::result::Result<T, Error<SpiE, PinE>>;

/// ADS1118 thermocouple front end.
///
/// The ADS1118 returns the previous conversion while it latches the
/// configuration for the next one, so the driver alternates: reading
/// the thermocouple result starts an internal sensor conversion, and
/// reading the internal sensor starts a thermocouple conversion. Only
/// one of the two readings is refreshed per call; the other is the
/// value from the call before.
pub struct Ads1118<'clock, CS, C>
where
    C: Clock,
{
    cs: CS,
    clock: &'clock C,
    config: Config,
    far: i16,
    local: i16,
    next: Channel,
    last_read: Option<Instant<C>>,
}

impl<'clock, CS, C, PinE> Ads1118<'clock, CS, C>
where
    CS: OutputPin<Error = PinE>,
    C: Clock,
    u32: TryFrom<C::T>,
{
    /// Returns a driver using `cs` as its chip-select pin and `clock` to
    /// space conversions. Call [`begin`](Ads1118::begin) before reading.
    pub fn new(cs: CS, clock: &'clock C, config: Config) -> Self {
        Self {
            cs,
            clock,
            config,
            far: 0,
            local: 0,
            next: Channel::Far,
            last_read: None,
        }
    }

    /// Destroys the driver and returns the chip-select pin.
    pub fn free(self) -> CS {
        self.cs
    }

    /// Parks chip-select high and primes the internal sensor reading.
    pub fn begin<SPI, SpiE>(&mut self, spi: &mut SPI) -> Result<(), SpiE, PinE>
    where
        SPI: Transfer<u8, Error = SpiE> + ModeSelect<Error = SpiE>,
    {
        self.cs.set_high().map_err(Error::Pin)?;

        self.command(spi, self.config.input | TEMPERATURE_SENSOR)?;
        self.local = self.command(spi, self.config.input)?;

        self.next = Channel::Far;
        self.last_read = None;

        log::debug!("ADS1118 ready, local code {}", self.local);
        Ok(())
    }

    /// Returns the thermocouple temperature in °C × 10 (235 is 23.5 °C).
    ///
    /// Refreshes one of the two readings if at least
    /// `read_interval_ms` passed since the last refresh; otherwise no
    /// SPI transaction is made.
    pub fn read_celsius<SPI, SpiE>(&mut self, spi: &mut SPI) -> Result<i32, SpiE, PinE>
    where
        SPI: Transfer<u8, Error = SpiE> + ModeSelect<Error = SpiE>,
    {
        let now = self.clock.try_now().map_err(|_| Error::Clock)?;

        if self.interval_elapsed(&now) {
            match self.next {
                Channel::Far => {
                    self.far = self.command(spi, self.config.input | TEMPERATURE_SENSOR)?;
                    self.next = Channel::Local;
                }
                Channel::Local => {
                    self.local = self.command(spi, self.config.input)?;
                    self.next = Channel::Far;
                }
            }
            self.last_read = Some(now);
        }

        Ok(self.temperature())
    }

    /// Returns [`read_celsius`](Ads1118::read_celsius) as `c * 9 / 5 + 32`.
    ///
    /// The 32 is added to the ×10 value unscaled, so the result is not
    /// °F × 10. Kept as-is to match existing devices.
    pub fn read_fahrenheit<SPI, SpiE>(&mut self, spi: &mut SPI) -> Result<i32, SpiE, PinE>
    where
        SPI: Transfer<u8, Error = SpiE> + ModeSelect<Error = SpiE>,
    {
        Ok(celsius_to_fahrenheit(self.read_celsius(spi)?))
    }

    /// The latest `(far, local)` codes.
    pub fn samples(&self) -> (i16, i16) {
        (self.far, self.local)
    }

    pub fn next_channel(&self) -> Channel {
        self.next
    }

    fn temperature(&self) -> i32 {
        linearize(i32::from(self.far) + compensate(self.local))
    }

    fn interval_elapsed(&self, now: &Instant<C>) -> bool {
        let last_read = match &self.last_read {
            Some(last_read) => last_read,
            None => return true,
        };

        // A clock that went backwards or an interval too long to
        // represent counts as elapsed.
        now.checked_duration_since(last_read)
            .and_then(|elapsed| Milliseconds::<u32>::try_from(elapsed).ok())
            .map_or(true, |elapsed| elapsed.0 >= self.config.read_interval_ms)
    }

    /// Sends `config` twice in one transaction and returns the result of
    /// the previous conversion.
    fn command<SPI, SpiE>(&mut self, spi: &mut SPI, config: u16) -> Result<i16, SpiE, PinE>
    where
        SPI: Transfer<u8, Error = SpiE> + ModeSelect<Error = SpiE>,
    {
        let [msb, lsb] = (config | SINGLE_SHOT).to_be_bytes();
        let mut buffer = [msb, lsb, msb, lsb];

        spi.select_mode(MODE).map_err(Error::Spi)?;
        self.cs.set_low().map_err(Error::Pin)?;
        let transferred = spi.transfer(&mut buffer).map(|received| [received[0], received[1]]);
        self.cs.set_high().map_err(Error::Pin)?;

        let code = i16::from_be_bytes(transferred.map_err(Error::Spi)?);
        log::trace!(
            "ADS1118 mode {} sent {:#06x}, got {}",
            mode_number(MODE),
            config | SINGLE_SHOT,
            code
        );
        Ok(code)
    }
}

/// `celsius * 9 / 5 + 32`, with `celsius` in °C × 10.
pub fn celsius_to_fahrenheit(celsius: i32) -> i32 {
    celsius * 9 / 5 + 32
}
