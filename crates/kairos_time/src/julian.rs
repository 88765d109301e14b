//! Julian Day conversions.
//!
//! Calendar conversion follows the standard Gregorian algorithm (Meeus,
//! Astronomical Algorithms, ch. 7). UTC conversion goes through the Unix
//! epoch, which sits at JD 2440587.5.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::TimeError;

/// Julian Day of the J2000.0 epoch (2000-01-01T12:00:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Day of the Unix epoch (1970-01-01T00:00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Days in a Julian year.
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Days in a Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Convert a Gregorian calendar date to a Julian Day.
///
/// `day` may carry a fractional part for the time of day
/// (`calendar_to_jd(2000, 1, 1.5) == 2451545.0`).
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Convert a Julian Day to a Gregorian calendar date `(year, month, day)`,
/// with the time of day carried in the fractional part of `day`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let f = shifted - z;
    let a = if z < 2_299_161.0 {
        z
    } else {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Elapsed Julian years from `jd_from` to `jd_to` (negative if `jd_to` is earlier).
pub fn years_between(jd_from: f64, jd_to: f64) -> f64 {
    (jd_to - jd_from) / DAYS_PER_JULIAN_YEAR
}

/// Convert a Julian Day to a UTC timestamp, rounded to the millisecond.
///
/// The Julian Day is interpreted on the UTC time scale; the engine does not
/// distinguish UT from TT at the precision of its searches.
pub fn jd_to_utc(jd: f64) -> Result<DateTime<Utc>, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::OutOfRange(jd));
    }
    let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round();
    if millis.abs() >= i64::MAX as f64 {
        return Err(TimeError::OutOfRange(jd));
    }
    Utc.timestamp_millis_opt(millis as i64)
        .single()
        .ok_or(TimeError::OutOfRange(jd))
}

/// Convert a UTC timestamp to a Julian Day.
pub fn utc_to_jd(utc: &DateTime<Utc>) -> f64 {
    utc.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}
