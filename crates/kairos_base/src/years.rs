//! Planetary years.
//!
//! Each traditional planet grants a minor, middle and major number of
//! years. The minor years are the planet's period of return to the same
//! place with the Sun; the major years are the sum of its terms across the
//! zodiac; the middle years are the mean of the two.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::planet::Planet;

/// Which of the three year counts applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearType {
    Minor,
    Middle,
    Major,
}

impl YearType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Middle => "middle",
            Self::Major => "major",
        }
    }
}

impl Display for YearType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Minor, middle and major years of one planet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetaryYears {
    pub minor: f64,
    pub middle: f64,
    pub major: f64,
}

impl PlanetaryYears {
    pub const fn get(&self, year_type: YearType) -> f64 {
        match year_type {
            YearType::Minor => self.minor,
            YearType::Middle => self.middle,
            YearType::Major => self.major,
        }
    }
}

const fn years(minor: f64, middle: f64, major: f64) -> Option<PlanetaryYears> {
    Some(PlanetaryYears {
        minor,
        middle,
        major,
    })
}

/// Years of a traditional planet. None for modern planets and the nodes.
pub const fn planetary_years(planet: Planet) -> Option<PlanetaryYears> {
    match planet {
        Planet::Saturn => years(30.0, 43.5, 57.0),
        Planet::Jupiter => years(12.0, 45.5, 79.0),
        Planet::Mars => years(15.0, 40.5, 66.0),
        Planet::Sun => years(19.0, 69.5, 120.0),
        Planet::Venus => years(8.0, 45.0, 82.0),
        Planet::Mercury => years(20.0, 48.0, 76.0),
        Planet::Moon => years(25.0, 66.5, 108.0),
        _ => None,
    }
}
