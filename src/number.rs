use heapless::String;

/// Longest output of [`format_scaled`]: sign, `"0."`, ten digits and a
/// spare byte.
pub const MAX_LEN: usize = 16;

/// Formats `value`, scaled by the power of ten `scale`, as a decimal.
///
/// A `scale` of 1 or less means `value` is a whole number and no decimal
/// point is printed. Zero is always printed as `"0.0"`.
///
/// # Examples
///
/// ```
/// use ads1118_lcd::number::format_scaled;
///
/// assert_eq!(format_scaled(123, 0), "123");
/// assert_eq!(format_scaled(123, 1), "123");
/// assert_eq!(format_scaled(123, 10), "12.3");
/// assert_eq!(format_scaled(123, 100), "1.23");
/// assert_eq!(format_scaled(123, 1000), "0.123");
/// assert_eq!(format_scaled(123, 10000), "0.0123");
/// ```
pub fn format_scaled(value: i32, scale: i32) -> String<MAX_LEN> {
    let mut out = String::new();

    if value == 0 {
        push_str(&mut out, "0.0");
        return out;
    }
    if value < 0 {
        push(&mut out, '-');
    }

    let number = u64::from(value.unsigned_abs());
    let mut point = if scale > 1 { scale as u64 } else { 0 };

    if number < point {
        push_str(&mut out, "0.");

        point /= 10;
        while number < point {
            push(&mut out, '0');
            point /= 10;
        }

        // the point is already placed
        point = 0;
    }

    let mut power = 1u64;
    while power <= number {
        power *= 10;
    }
    power /= 10;

    while power >= 1 {
        let digit = ((number / power) % 10) as u8;
        push(&mut out, char::from(b'0' + digit));

        if power == point {
            push(&mut out, '.');
        }

        power /= 10;
    }

    out
}

fn push(out: &mut String<MAX_LEN>, c: char) {
    let pushed = out.push(c);
    debug_assert!(pushed.is_ok(), "formatted number exceeds {} bytes", MAX_LEN);
}

fn push_str(out: &mut String<MAX_LEN>, s: &str) {
    let pushed = out.push_str(s);
    debug_assert!(pushed.is_ok(), "formatted number exceeds {} bytes", MAX_LEN);
}
