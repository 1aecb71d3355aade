//! Cold-junction compensation and thermocouple linearization for the
//! ADS1118 BoosterPack's type K thermocouple.
//!
//! Both conversions are piecewise-linear [`Table`]s. The thermocouple
//! table maps ADC codes (PGA ±0.256 V) to °C × 10. The cold-junction
//! table maps the ADS1118's internal temperature sensor to the
//! thermocouple code that the same temperature would produce, so the
//! two can simply be added before linearizing.

use crate::interpolate::{Segment, Table};

/// Returned by [`linearize`] for codes outside the thermocouple table.
pub const OUT_OF_RANGE: i32 = 10 * 0xA5A5;

/// Internal temperature sensor codes per °C once the two padding bits
/// are dropped.
const SENSOR_CODES_PER_DEGREE: i32 = 32;

const fn cold_junction(low: i32, high: i32, rise: i32, offset: i32) -> Segment {
    Segment {
        low: low * SENSOR_CODES_PER_DEGREE,
        high: high * SENSOR_CODES_PER_DEGREE,
        rise,
        run: (high - low) * SENSOR_CODES_PER_DEGREE,
        origin: low * SENSOR_CODES_PER_DEGREE,
        offset,
    }
}

const fn thermocouple(low: i32, high: i32, degrees: i32, run: i32, origin: i32, base: i32) -> Segment {
    Segment {
        low,
        high,
        rise: 10 * degrees,
        run,
        origin,
        offset: 10 * base,
    }
}

const COLD_JUNCTION_SEGMENTS: [Segment; 9] = [
    Segment {
        low: -1,
        ..cold_junction(0, 5, 0x0019, 0)
    },
    cold_junction(5, 10, 0x001A, 0x0019),
    cold_junction(10, 20, 0x0033, 0x0033),
    cold_junction(20, 30, 0x0034, 0x0066),
    cold_junction(30, 40, 0x0034, 0x009A),
    cold_junction(40, 50, 0x0035, 0x00CE),
    cold_junction(50, 60, 0x0035, 0x0103),
    cold_junction(60, 80, 0x006A, 0x0138),
    cold_junction(80, 125, 0x00EE, 0x01A2),
];

/// Cold-junction temperature in 1/32 °C to equivalent thermocouple code,
/// 0 °C to 125 °C. The first segment also accepts exactly 0 °C.
pub const COLD_JUNCTION: Table = Table::new(&COLD_JUNCTION_SEGMENTS);

const THERMOCOUPLE_SEGMENTS: [Segment; 21] = [
    thermocouple(-0x0094, -0x004B, 15, 0x0049, -0x0094, -30),
    thermocouple(-0x004B, -0x0001, 15, 0x004B, -0x004B, -15),
    thermocouple(-0x0001, 0x0019, 5, 0x0019, 0x0000, 0),
    thermocouple(0x0019, 0x0033, 5, 0x001A, 0x0019, 5),
    thermocouple(0x0033, 0x0066, 10, 0x0033, 0x0033, 10),
    thermocouple(0x0066, 0x009A, 10, 0x0034, 0x0066, 20),
    thermocouple(0x009A, 0x00CE, 10, 0x0034, 0x009A, 30),
    thermocouple(0x00CE, 0x0103, 10, 0x0035, 0x00CE, 40),
    thermocouple(0x0103, 0x0138, 10, 0x0035, 0x0103, 50),
    thermocouple(0x0138, 0x01A2, 20, 0x006A, 0x0138, 60),
    thermocouple(0x01A2, 0x020C, 20, 0x006A, 0x01A2, 80),
    thermocouple(0x020C, 0x02DE, 40, 0x00D2, 0x020C, 100),
    thermocouple(0x02DE, 0x03AC, 40, 0x00CE, 0x02DE, 140),
    // calibrated from 0x03AB, one code below the segment start
    thermocouple(0x03AC, 0x0478, 40, 0x00CD, 0x03AB, 180),
    thermocouple(0x0478, 0x0548, 40, 0x00D0, 0x0478, 220),
    thermocouple(0x0548, 0x061B, 40, 0x00D3, 0x0548, 260),
    thermocouple(0x061B, 0x06F2, 40, 0x00D7, 0x061B, 300),
    thermocouple(0x06F2, 0x07C7, 40, 0x00D5, 0x06F2, 340),
    thermocouple(0x07C7, 0x089F, 40, 0x00D8, 0x07C7, 380),
    thermocouple(0x089F, 0x0978, 40, 0x00D9, 0x089F, 420),
    thermocouple(0x0978, 0x0A52, 40, 0x00DA, 0x0978, 460),
];

/// Thermocouple code to °C × 10, -30 °C to 500 °C.
pub const THERMOCOUPLE: Table = Table::new(&THERMOCOUPLE_SEGMENTS);

/// Converts an internal temperature sensor code to the thermocouple code
/// of the same temperature. Returns 0 below 0 °C or above 125 °C.
///
/// # Examples
///
/// ```
/// use ads1118_lcd::thermocouple::compensate;
///
/// // 25 °C: (25 * 32) << 2
/// assert_eq!(compensate(3200), 128);
/// assert_eq!(compensate(-4), 0);
/// ```
pub fn compensate(code: i16) -> i32 {
    // 14-bit left-justified result
    let reading = i32::from(code) / 4;
    COLD_JUNCTION.lookup(reading).unwrap_or(0)
}

/// Converts a compensated thermocouple code to °C × 10, or `None` if the
/// code is outside the table.
pub fn try_linearize(code: i32) -> Option<i32> {
    THERMOCOUPLE.lookup(code)
}

/// Converts a compensated thermocouple code to °C × 10. Codes outside the
/// table give [`OUT_OF_RANGE`].
///
/// # Examples
///
/// ```
/// use ads1118_lcd::thermocouple::{linearize, OUT_OF_RANGE};
///
/// assert_eq!(linearize(128), 250);
/// assert_eq!(linearize(0x0A53), OUT_OF_RANGE);
/// ```
pub fn linearize(code: i32) -> i32 {
    try_linearize(code).unwrap_or_else(|| {
        log::warn!("thermocouple code {} out of range", code);
        OUT_OF_RANGE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor_code(degrees_32nds: i32) -> i16 {
        (degrees_32nds * 4) as i16
    }

    #[test]
    fn compensates_at_breakpoints() {
        let expected = [
            (0, 0x0000),
            (5, 0x0019),
            (10, 0x0033),
            (20, 0x0066),
            (30, 0x009A),
            (40, 0x00CE),
            (50, 0x0103),
            (60, 0x0138),
            (80, 0x01A2),
            (125, 0x0290),
        ];

        for (degrees, code) in expected {
            assert_eq!(compensate(sensor_code(degrees * 32)), code, "{} °C", degrees);
        }
    }

    #[test]
    fn compensates_at_midpoints() {
        // 2.5 °C: 0x19 * 2.5 / 5 = 12.5
        assert_eq!(compensate(sensor_code(80)), 12);
        // 25 °C: 0x34 * 5 / 10 + 0x66
        assert_eq!(compensate(sensor_code(25 * 32)), 128);
        // 70 °C: 0x6A * 10 / 20 + 0x138
        assert_eq!(compensate(sensor_code(70 * 32)), 365);
        // 102.5 °C: 0xEE * 22.5 / 45 + 0x1A2
        assert_eq!(compensate(sensor_code(3280)), 537);
    }

    #[test]
    fn compensation_is_linear_within_segment() {
        // 20 °C..30 °C, 0x34 codes per 10 °C
        for reading in (20 * 32 + 1)..=(30 * 32) {
            let expected = (0x34 * (reading - 20 * 32) + 0x66 * 320) / 320;
            assert_eq!(compensate(sensor_code(reading)), expected);
        }
    }

    #[test]
    fn compensation_drops_padding_bits() {
        assert_eq!(compensate(3200), compensate(3203));
        // -3 / 4 truncates to 0 °C
        assert_eq!(compensate(-3), 0);
    }

    #[test]
    fn compensation_out_of_range() {
        assert_eq!(compensate(-4), 0);
        assert_eq!(compensate(i16::MIN), 0);
        assert_eq!(compensate(sensor_code(125 * 32 + 1)), 0);
        assert_eq!(compensate(i16::MAX), 0);
    }

    #[test]
    fn linearizes_at_breakpoints() {
        assert_eq!(linearize(-0x004B), -150);
        assert_eq!(linearize(0), 0);
        assert_eq!(linearize(0x0019), 50);
        assert_eq!(linearize(0x0066), 200);
        assert_eq!(linearize(0x020C), 1000);
        assert_eq!(linearize(0x0478), 2200);
        assert_eq!(linearize(0x0A52), 5000);
    }

    #[test]
    fn linearizes_negative_codes() {
        // 10 * (15 * 1 / 73 - 30) = -297.9
        assert_eq!(linearize(-0x0093), -297);
        assert_eq!(linearize(-0x0001), -2);
    }

    #[test]
    fn linearization_is_continuous() {
        let segments = THERMOCOUPLE.segments();
        for pair in segments.windows(2) {
            let boundary = pair[0].high;
            let below = pair[0].eval(boundary);
            let above = pair[1].eval(boundary);
            assert!(
                (below - above).abs() <= 1,
                "discontinuity at {:#x}: {} vs {}",
                boundary,
                below,
                above
            );
        }
    }

    #[test]
    fn offset_origin_segment() {
        assert_eq!(linearize(0x03AC), 1800);
        assert_eq!(linearize(0x03AD), 1803);
    }

    #[test]
    fn linearization_out_of_range() {
        assert_eq!(linearize(0x0A53), OUT_OF_RANGE);
        assert_eq!(linearize(-0x0094), OUT_OF_RANGE);
        assert_eq!(linearize(i32::MIN), OUT_OF_RANGE);
        assert_eq!(try_linearize(0x0A53), None);
        assert_eq!(try_linearize(0x0A52), Some(5000));
    }

    #[test]
    fn tables_cover_documented_domains() {
        assert_eq!(COLD_JUNCTION.low(), -1);
        assert_eq!(COLD_JUNCTION.high(), 125 * 32);
        assert_eq!(THERMOCOUPLE.low(), -0x0094);
        assert_eq!(THERMOCOUPLE.high(), 0x0A52);
        assert_eq!(THERMOCOUPLE.segments().len(), 21);
    }
}
