//! Calendar conversions used by the instant and duration renderers.
//!
//! Instants travel as serial day numbers: day 1 is 0000-01-01 in the
//! proleptic Gregorian calendar, so the Unix epoch is day 719529 and the
//! fractional part is the time of day. Durations travel as
//! `[-]hh:mm:ss.SSS` text with unbounded hours.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, TimeDelta};

/// Serial day of 1970-01-01T00:00:00.
pub const UNIX_EPOCH_SERIAL_DAY: f64 = 719_529.0;

const MS_PER_DAY: f64 = 86_400_000.0;
const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Serial day number of an instant, at millisecond resolution.
///
/// ```rust
/// use chrono::NaiveDate;
/// use litexpr::calendar::to_serial_day;
///
/// let noon = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// assert_eq!(to_serial_day(&noon), 719529.5);
/// ```
#[must_use]
pub fn to_serial_day(instant: &NaiveDateTime) -> f64 {
    UNIX_EPOCH_SERIAL_DAY + instant.and_utc().timestamp_millis() as f64 / MS_PER_DAY
}

/// Instant for a serial day number, rounded to the nearest millisecond.
///
/// # Errors
///
/// Returns [`Error::Custom`] for non-finite numbers and days outside the
/// representable calendar range.
pub fn from_serial_day(day: f64) -> Result<NaiveDateTime> {
    let ms = ((day - UNIX_EPOCH_SERIAL_DAY) * MS_PER_DAY).round();
    if !ms.is_finite() || ms.abs() >= i64::MAX as f64 {
        return Err(Error::custom(format!("serial day {} is out of range", day)));
    }
    DateTime::from_timestamp_millis(ms as i64)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| Error::custom(format!("serial day {} is out of range", day)))
}

/// Writes a duration as `[-]hh:mm:ss.SSS`, truncating sub-millisecond parts
/// toward zero.
///
/// ```rust
/// use chrono::TimeDelta;
/// use litexpr::calendar::format_duration;
///
/// assert_eq!(format_duration(&TimeDelta::milliseconds(90_061_001)), "25:01:01.001");
/// assert_eq!(format_duration(&TimeDelta::seconds(-5)), "-00:00:05.000");
/// ```
#[must_use]
pub fn format_duration(duration: &TimeDelta) -> String {
    let ms = duration.num_milliseconds();
    let sign = if ms < 0 { "-" } else { "" };
    let ms = ms.unsigned_abs();
    format!(
        "{}{:02}:{:02}:{:02}.{:03}",
        sign,
        ms / MS_PER_HOUR,
        ms / MS_PER_MINUTE % 60,
        ms / MS_PER_SECOND % 60,
        ms % MS_PER_SECOND
    )
}

/// Parses `[-]hh:mm:ss[.SSS]` text back into a duration.
///
/// # Errors
///
/// Returns [`Error::Custom`] when the text is not in that form or the
/// duration overflows.
pub fn parse_duration(text: &str) -> Result<TimeDelta> {
    let invalid = || Error::custom(format!("invalid duration `{}`", text));

    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let mut parts = body.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let (whole, fraction) = match seconds.split_once('.') {
        Some((_, "")) => return Err(invalid()),
        Some((whole, fraction)) => (whole, fraction),
        None => (seconds, ""),
    };

    let hours = parse_digits(hours).ok_or_else(invalid)?;
    let minutes = parse_digits(minutes).filter(|m| *m < 60).ok_or_else(invalid)?;
    let whole = parse_digits(whole).filter(|s| *s < 60).ok_or_else(invalid)?;
    if fraction.len() > 3 {
        return Err(invalid());
    }
    let millis = if fraction.is_empty() {
        0
    } else {
        // "5" is 500 ms, "05" is 50 ms
        parse_digits(fraction).ok_or_else(invalid)? * 10u64.pow(3 - fraction.len() as u32)
    };

    let total = hours
        .checked_mul(MS_PER_HOUR)
        .and_then(|ms| ms.checked_add(minutes * MS_PER_MINUTE + whole * MS_PER_SECOND + millis))
        .and_then(|ms| i64::try_from(ms).ok())
        .ok_or_else(invalid)?;
    let total = if negative { -total } else { total };

    TimeDelta::try_milliseconds(total).ok_or_else(invalid)
}

fn parse_digits(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, ms)
            .unwrap()
    }

    #[test]
    fn test_epoch_serial_day() {
        assert_eq!(to_serial_day(&instant(1970, 1, 1, 0, 0, 0, 0)), 719529.0);
        assert_eq!(to_serial_day(&instant(1970, 1, 2, 6, 0, 0, 0)), 719530.25);
        assert_eq!(to_serial_day(&instant(0, 1, 1, 0, 0, 0, 0)), 1.0);
    }

    #[test]
    fn test_serial_day_round_trip_to_milliseconds() {
        for t in [
            instant(2024, 2, 29, 23, 59, 59, 999),
            instant(1969, 12, 31, 0, 0, 0, 1),
            instant(1, 6, 15, 8, 30, 0, 250),
            instant(9999, 12, 31, 12, 0, 0, 0),
        ] {
            assert_eq!(from_serial_day(to_serial_day(&t)).unwrap(), t);
        }
    }

    #[test]
    fn test_serial_day_rejects_non_finite() {
        assert!(from_serial_day(f64::NAN).is_err());
        assert!(from_serial_day(f64::INFINITY).is_err());
    }

    #[test]
    fn test_duration_text() {
        assert_eq!(format_duration(&TimeDelta::zero()), "00:00:00.000");
        assert_eq!(format_duration(&TimeDelta::hours(123)), "123:00:00.000");
        assert_eq!(format_duration(&TimeDelta::microseconds(-1_500)), "-00:00:00.001");
        assert_eq!(format_duration(&TimeDelta::microseconds(999)), "00:00:00.000");
    }

    #[test]
    fn test_duration_parse() {
        assert_eq!(parse_duration("01:02:03.456").unwrap(), TimeDelta::milliseconds(3_723_456));
        assert_eq!(parse_duration("-00:00:01.5").unwrap(), TimeDelta::milliseconds(-1_500));
        assert_eq!(parse_duration("100:00:00").unwrap(), TimeDelta::hours(100));
        for bad in ["", "1:2", "00:60:00", "aa:00:00", "00:00:00.1234", "00:00:00."] {
            assert!(parse_duration(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_duration_round_trip() {
        for ms in [0i64, 1, -1, 59_999, 86_400_000 * 3 + 7, -123_456_789] {
            let d = TimeDelta::milliseconds(ms);
            assert_eq!(parse_duration(&format_duration(&d)).unwrap(), d);
        }
    }
}
