//! Error types for the longevity selectors.

use kairos_base::BaseError;
use thiserror::Error;

/// Hard failures of the selectors.
///
/// "No Hyleg" and "no Alcochoden" are outcomes, not errors: they are
/// variants of the result types.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum LongevityError {
    /// Invalid chart input.
    #[error(transparent)]
    Base(BaseError),
    /// A planet the selectors need is absent from the chart.
    #[error("missing required planet: {0}")]
    MissingRequiredPlanet(&'static str),
    /// Invalid selector configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

impl From<BaseError> for LongevityError {
    fn from(e: BaseError) -> Self {
        match e {
            BaseError::MissingRequiredPlanet(name) => Self::MissingRequiredPlanet(name),
            other => Self::Base(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_planet_lifted() {
        let e: LongevityError = BaseError::MissingRequiredPlanet("Moon").into();
        assert_eq!(e, LongevityError::MissingRequiredPlanet("Moon"));
        assert_eq!(e.to_string(), "missing required planet: Moon");
    }

    #[test]
    fn other_base_errors_wrapped() {
        let e: LongevityError = BaseError::InvalidLongitude(400.0).into();
        assert!(matches!(e, LongevityError::Base(BaseError::InvalidLongitude(_))));
        assert!(e.to_string().contains("400"));
    }
}
