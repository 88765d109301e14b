//! Error types for chart primitives.

use thiserror::Error;

/// Errors from table lookups and chart-input validation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum BaseError {
    /// Longitude outside [0, 360) or not finite.
    #[error("invalid longitude {0}: expected a value in [0, 360)")]
    InvalidLongitude(f64),
    /// Degree within a sign outside [0, 30) or not finite.
    #[error("invalid degree in sign {0}: expected a value in [0, 30)")]
    InvalidDegree(f64),
    /// Planet name not recognized.
    #[error("unknown planet: {0}")]
    UnknownPlanet(String),
    /// Sign name not recognized.
    #[error("unknown sign: {0}")]
    UnknownSign(String),
    /// House cusp list is not a ring of 12 numbered cusps.
    #[error("invalid house cusps: {0}")]
    InvalidHouseCusps(&'static str),
    /// A planet the calculation needs is absent from the chart.
    #[error("missing required planet: {0}")]
    MissingRequiredPlanet(&'static str),
}
