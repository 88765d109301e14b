//! Error types for the search engines.

use kairos_base::BaseError;
use kairos_core::EphemerisError;
use kairos_time::TimeError;
use thiserror::Error;

/// Hard failures of a search. Iteration-cap exhaustion is not an error:
/// searches report it through their precision field instead.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// The ephemeris port failed.
    #[error("ephemeris error: {0}")]
    Ephemeris(#[from] EphemerisError),
    /// Invalid chart input (longitude, cusps).
    #[error(transparent)]
    Base(#[from] BaseError),
    /// Invalid search configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// A planet the search needs is absent from the input.
    #[error("missing required planet: {0}")]
    MissingRequiredPlanet(&'static str),
    /// The chart carries no birth Julian Day.
    #[error("chart has no birth moment")]
    MissingBirthTime,
    /// A found Julian Day cannot be represented as a UTC timestamp.
    #[error("julian day {0} outside the representable date range")]
    DateOutOfRange(f64),
}

impl From<TimeError> for SearchError {
    fn from(e: TimeError) -> Self {
        match e {
            TimeError::OutOfRange(jd) => Self::DateOutOfRange(jd),
            _ => Self::DateOutOfRange(f64::NAN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ephemeris_error_converts() {
        let e: SearchError = EphemerisError::Unavailable("disk".into()).into();
        assert!(matches!(e, SearchError::Ephemeris(_)));
        assert!(e.to_string().contains("disk"));
    }

    #[test]
    fn time_error_converts() {
        let e: SearchError = TimeError::OutOfRange(1e30).into();
        assert_eq!(e, SearchError::DateOutOfRange(1e30));
    }

    #[test]
    fn invalid_config_display() {
        let e = SearchError::InvalidConfig("step must be positive");
        assert_eq!(e.to_string(), "invalid config: step must be positive");
    }
}
