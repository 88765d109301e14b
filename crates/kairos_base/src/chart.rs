//! Chart snapshot consumed by the selectors.
//!
//! Positions, cusps and aspects are computed upstream and stored with the
//! chart. The snapshot is read-only here; every derived value (sect, house,
//! dignity) is recomputed from it on demand.

use serde::{Deserialize, Serialize};

use crate::aspect::{AspectEdge, AspectSet};
use crate::error::BaseError;
use crate::house::{HouseCusp, HouseCusps};
use crate::planet::Planet;
use crate::sect::{Sect, sect_from_house, sect_from_longitudes};
use crate::util::normalize_360;
use crate::zodiac::{Sign, ZodiacPosition, position_from_longitude};

/// Position of one planet in the stored chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    pub name: Planet,
    /// Ecliptic longitude in [0, 360).
    pub longitude: f64,
    #[serde(default)]
    pub latitude: f64,
    /// Longitude speed in degrees/day; negative while retrograde.
    #[serde(default)]
    pub speed: f64,
    /// House as stored upstream; derived from the cusps when absent.
    #[serde(default)]
    pub house: Option<u8>,
}

impl PlanetPosition {
    pub fn new(name: Planet, longitude: f64, speed: f64) -> Self {
        Self {
            name,
            longitude,
            latitude: 0.0,
            speed,
            house: None,
        }
    }

    pub fn with_house(mut self, house: u8) -> Self {
        self.house = Some(house);
        self
    }

    pub fn is_retrograde(&self) -> bool {
        self.speed < 0.0
    }

    pub fn zodiac(&self) -> ZodiacPosition {
        position_from_longitude(self.longitude)
    }

    pub fn sign(&self) -> Sign {
        self.zodiac().sign
    }

    pub fn degree_in_sign(&self) -> f64 {
        self.zodiac().degree_in_sign
    }
}

/// Everything the longevity selectors read from a stored chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSnapshot {
    pub planets: Vec<PlanetPosition>,
    pub houses: Vec<HouseCusp>,
    #[serde(default)]
    pub aspects: Vec<AspectEdge>,
    /// Ascendant longitude; cusp 1 when absent.
    #[serde(default)]
    pub ascendant: Option<f64>,
    /// Stored sect; derived from the Sun's house when absent.
    #[serde(default)]
    pub sect: Option<Sect>,
    /// Birth moment as a Julian Day (UT).
    #[serde(default)]
    pub birth_jd: Option<f64>,
}

impl ChartSnapshot {
    /// Check every planet longitude lies in [0, 360) and the cusps form a ring.
    pub fn validate(&self) -> Result<(), BaseError> {
        for p in &self.planets {
            if !p.longitude.is_finite() || !(0.0..360.0).contains(&p.longitude) {
                return Err(BaseError::InvalidLongitude(p.longitude));
            }
        }
        if let Some(asc) = self.ascendant {
            if !asc.is_finite() || !(0.0..360.0).contains(&asc) {
                return Err(BaseError::InvalidLongitude(asc));
            }
        }
        self.cusps().map(|_| ())
    }

    pub fn planet(&self, planet: Planet) -> Option<&PlanetPosition> {
        self.planets.iter().find(|p| p.name == planet)
    }

    /// Like [`planet`](Self::planet) but fails with `MissingRequiredPlanet`.
    pub fn require_planet(&self, planet: Planet) -> Result<&PlanetPosition, BaseError> {
        self.planet(planet)
            .ok_or(BaseError::MissingRequiredPlanet(planet.name()))
    }

    pub fn cusps(&self) -> Result<HouseCusps, BaseError> {
        HouseCusps::new(&self.houses)
    }

    pub fn ascendant(&self) -> Result<f64, BaseError> {
        match self.ascendant {
            Some(asc) => Ok(normalize_360(asc)),
            None => Ok(self.cusps()?.ascendant()),
        }
    }

    /// Stored sect, or sect from the Sun's house among the stored cusps.
    ///
    /// A Sun exactly on the first cusp is diurnal. A chart without cusps
    /// falls back to its stored Ascendant.
    pub fn sect(&self) -> Result<Sect, BaseError> {
        if let Some(sect) = self.sect {
            return Ok(sect);
        }
        let sun = self.require_planet(Planet::Sun)?.longitude;
        if self.houses.is_empty() {
            return Ok(sect_from_longitudes(self.ascendant()?, sun));
        }
        let cusps = self.cusps()?;
        if normalize_360(sun - cusps.ascendant()) == 0.0 {
            return Ok(Sect::Diurnal);
        }
        Ok(sect_from_house(cusps.house_of(sun)))
    }

    /// House of a planet: stored value if valid, else cusp containment.
    pub fn house_of(&self, position: &PlanetPosition, cusps: &HouseCusps) -> u8 {
        match position.house {
            Some(h) if (1..=12).contains(&h) => h,
            _ => cusps.house_of(position.longitude),
        }
    }

    pub fn aspect_set(&self) -> AspectSet<'_> {
        AspectSet::new(&self.aspects)
    }
}
