//! Error types for Julian Day conversions.

use thiserror::Error;

/// Errors from Julian Day ↔ UTC conversion.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Julian Day is NaN/infinite or outside the range chrono can represent.
    #[error("julian day {0} cannot be represented as a UTC timestamp")]
    OutOfRange(f64),
}
