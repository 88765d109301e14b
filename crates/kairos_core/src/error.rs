//! Ephemeris port errors.

use thiserror::Error;

use crate::Body;

/// Errors returned by an [`Ephemeris`](crate::Ephemeris) implementation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EphemerisError {
    /// The underlying provider failed; not recoverable inside the engine.
    #[error("ephemeris unavailable: {0}")]
    Unavailable(String),
    /// The provider has no data for this body.
    #[error("ephemeris has no data for {}", .0.name())]
    UnsupportedBody(Body),
    /// Julian Day outside the provider's validity span.
    #[error("julian day {0} outside ephemeris range")]
    OutOfRange(f64),
}
