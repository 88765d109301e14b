//! Ephemeris port consumed by every calculator in the workspace.
//!
//! The engine never computes planetary positions itself: searches ask an
//! [`Ephemeris`] implementation for the ecliptic longitude, latitude and
//! longitude speed of a [`Body`] at a Julian Day. Production callers wrap
//! their astronomical library of choice; [`AnalyticEphemeris`] is a
//! self-contained low-precision provider for the CLI and tests.

pub mod analytic;
pub mod angle;
pub mod error;

use serde::{Deserialize, Serialize};

pub use analytic::AnalyticEphemeris;
pub use error::EphemerisError;

/// Bodies the ephemeris port can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// All bodies in traditional order followed by the modern planets.
pub const ALL_BODIES: [Body; 10] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

impl Body {
    /// English name of the body.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
        }
    }
}

/// Geocentric ecliptic position of a body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees [0, 360), equinox of date.
    pub longitude_deg: f64,
    /// Ecliptic latitude in degrees.
    pub latitude_deg: f64,
    /// Longitude speed in degrees per day; negative while retrograde.
    pub speed_deg_per_day: f64,
}

impl BodyPosition {
    /// Whether the body is moving backwards along the ecliptic.
    pub fn is_retrograde(&self) -> bool {
        self.speed_deg_per_day < 0.0
    }
}

/// The ephemeris port.
///
/// Implementations must be deterministic: the same `(jd, body)` always
/// yields the same position. Provider failures surface as
/// [`EphemerisError::Unavailable`] and abort the calling calculation.
pub trait Ephemeris {
    /// Position of `body` at Julian Day `jd` (UT).
    fn position(&self, jd: f64, body: Body) -> Result<BodyPosition, EphemerisError>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn position(&self, jd: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
        (**self).position(jd, body)
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for Box<E> {
    fn position(&self, jd: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
        (**self).position(jd, body)
    }
}
