//! Planets and their sign rulerships.
//!
//! Traditional rulership uses the seven visible planets only. The modern
//! planets and the lunar nodes are accepted in chart input but hold no
//! domicile, exaltation, triplicity, term or face.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use kairos_core::Body;
use serde::{Deserialize, Serialize};

use crate::error::BaseError;
use crate::zodiac::Sign;

/// Planets and nodes that can appear in a chart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Planet {
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
    NorthNode,
    SouthNode,
}

/// All chart planets in traditional order followed by modern planets and nodes.
pub const ALL_PLANETS: [Planet; 12] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mercury,
    Planet::Venus,
    Planet::Mars,
    Planet::Jupiter,
    Planet::Saturn,
    Planet::Uranus,
    Planet::Neptune,
    Planet::Pluto,
    Planet::NorthNode,
    Planet::SouthNode,
];

/// The seven traditional planets.
pub const TRADITIONAL_PLANETS: [Planet; 7] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mercury,
    Planet::Venus,
    Planet::Mars,
    Planet::Jupiter,
    Planet::Saturn,
];

impl Planet {
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
            Self::NorthNode => "North Node",
            Self::SouthNode => "South Node",
        }
    }

    /// One of the seven visible planets.
    pub const fn is_traditional(self) -> bool {
        matches!(
            self,
            Self::Sun
                | Self::Moon
                | Self::Mercury
                | Self::Venus
                | Self::Mars
                | Self::Jupiter
                | Self::Saturn
        )
    }

    pub const fn is_luminary(self) -> bool {
        matches!(self, Self::Sun | Self::Moon)
    }

    /// Jupiter and Venus.
    pub const fn is_benefic(self) -> bool {
        matches!(self, Self::Jupiter | Self::Venus)
    }

    /// Mars and Saturn.
    pub const fn is_malefic(self) -> bool {
        matches!(self, Self::Mars | Self::Saturn)
    }

    /// Ephemeris body for this planet. None for the nodes.
    pub const fn body(self) -> Option<Body> {
        match self {
            Self::Sun => Some(Body::Sun),
            Self::Moon => Some(Body::Moon),
            Self::Mercury => Some(Body::Mercury),
            Self::Venus => Some(Body::Venus),
            Self::Mars => Some(Body::Mars),
            Self::Jupiter => Some(Body::Jupiter),
            Self::Saturn => Some(Body::Saturn),
            Self::Uranus => Some(Body::Uranus),
            Self::Neptune => Some(Body::Neptune),
            Self::Pluto => Some(Body::Pluto),
            Self::NorthNode | Self::SouthNode => None,
        }
    }
}

impl Display for Planet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Planet {
    type Err = BaseError;

    /// Case-insensitive; spaces, underscores and hyphens are ignored
    /// ("north_node", "North Node" and "northnode" all parse).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let planet = match key.as_str() {
            "sun" => Self::Sun,
            "moon" => Self::Moon,
            "mercury" => Self::Mercury,
            "venus" => Self::Venus,
            "mars" => Self::Mars,
            "jupiter" => Self::Jupiter,
            "saturn" => Self::Saturn,
            "uranus" => Self::Uranus,
            "neptune" => Self::Neptune,
            "pluto" => Self::Pluto,
            "northnode" | "truenode" | "meannode" => Self::NorthNode,
            "southnode" => Self::SouthNode,
            _ => return Err(BaseError::UnknownPlanet(s.to_string())),
        };
        Ok(planet)
    }
}

impl TryFrom<String> for Planet {
    type Error = BaseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Planet> for String {
    fn from(planet: Planet) -> Self {
        planet.name().to_string()
    }
}

/// Domicile signs of a planet. Empty for modern planets and nodes.
///
/// Sun [Leo], Moon [Cancer], Mercury [Gemini, Virgo], Venus [Taurus, Libra],
/// Mars [Aries, Scorpio], Jupiter [Sagittarius, Pisces],
/// Saturn [Capricorn, Aquarius].
pub fn domicile_signs(planet: Planet) -> &'static [Sign] {
    match planet {
        Planet::Sun => &[Sign::Leo],
        Planet::Moon => &[Sign::Cancer],
        Planet::Mercury => &[Sign::Gemini, Sign::Virgo],
        Planet::Venus => &[Sign::Taurus, Sign::Libra],
        Planet::Mars => &[Sign::Aries, Sign::Scorpio],
        Planet::Jupiter => &[Sign::Sagittarius, Sign::Pisces],
        Planet::Saturn => &[Sign::Capricorn, Sign::Aquarius],
        _ => &[],
    }
}

/// Traditional domicile lord of a sign.
pub const fn domicile_lord(sign: Sign) -> Planet {
    match sign {
        Sign::Aries | Sign::Scorpio => Planet::Mars,
        Sign::Taurus | Sign::Libra => Planet::Venus,
        Sign::Gemini | Sign::Virgo => Planet::Mercury,
        Sign::Cancer => Planet::Moon,
        Sign::Leo => Planet::Sun,
        Sign::Sagittarius | Sign::Pisces => Planet::Jupiter,
        Sign::Capricorn | Sign::Aquarius => Planet::Saturn,
    }
}

/// Exaltation sign of a planet. None for modern planets and nodes.
pub const fn exaltation_sign(planet: Planet) -> Option<Sign> {
    match planet {
        Planet::Sun => Some(Sign::Aries),
        Planet::Moon => Some(Sign::Taurus),
        Planet::Mercury => Some(Sign::Virgo),
        Planet::Venus => Some(Sign::Pisces),
        Planet::Mars => Some(Sign::Capricorn),
        Planet::Jupiter => Some(Sign::Cancer),
        Planet::Saturn => Some(Sign::Libra),
        _ => None,
    }
}
