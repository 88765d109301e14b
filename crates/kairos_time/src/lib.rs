//! Julian Day arithmetic and UTC conversions.
//!
//! This crate provides:
//! - Gregorian calendar ↔ Julian Day conversion
//! - Julian Day ↔ `chrono::DateTime<Utc>` conversion
//! - Year/day constants shared by the search crates

pub mod error;
pub mod julian;

pub use error::TimeError;
pub use julian::{
    DAYS_PER_JULIAN_CENTURY, DAYS_PER_JULIAN_YEAR, J2000_JD, UNIX_EPOCH_JD, calendar_to_jd,
    jd_to_calendar, jd_to_utc, julian_centuries_since_j2000, utc_to_jd, years_between,
};
