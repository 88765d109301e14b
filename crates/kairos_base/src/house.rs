//! House cusps and house membership.
//!
//! Cusps are produced upstream; this module only validates them and answers
//! containment queries. A longitude belongs to house N when it lies on the
//! arc from cusp N (inclusive) to cusp N+1 (exclusive), wrapping through 0°
//! Aries and from house 12 back to house 1.

use serde::{Deserialize, Serialize};

use crate::error::BaseError;
use crate::util::normalize_360;

/// Number of houses.
pub const HOUSE_COUNT: usize = 12;

/// One house cusp as supplied by the house-system provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// House number 1..=12.
    pub number: u8,
    /// Cusp longitude in degrees.
    pub longitude: f64,
}

/// A validated ring of 12 cusps, indexed by house number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HouseCusp>", into = "Vec<HouseCusp>")]
pub struct HouseCusps {
    longitudes: [f64; HOUSE_COUNT],
}

impl HouseCusps {
    /// Validate a cusp list. Order of the input does not matter; every house
    /// 1..=12 must appear exactly once with a finite longitude.
    pub fn new(cusps: &[HouseCusp]) -> Result<Self, BaseError> {
        if cusps.len() != HOUSE_COUNT {
            return Err(BaseError::InvalidHouseCusps("expected exactly 12 cusps"));
        }
        let mut longitudes = [f64::NAN; HOUSE_COUNT];
        for cusp in cusps {
            if !(1..=HOUSE_COUNT as u8).contains(&cusp.number) {
                return Err(BaseError::InvalidHouseCusps("cusp number outside 1..=12"));
            }
            if !cusp.longitude.is_finite() {
                return Err(BaseError::InvalidHouseCusps("cusp longitude is not finite"));
            }
            let slot = &mut longitudes[cusp.number as usize - 1];
            if !slot.is_nan() {
                return Err(BaseError::InvalidHouseCusps("duplicate cusp number"));
            }
            *slot = normalize_360(cusp.longitude);
        }
        Ok(Self { longitudes })
    }

    /// Cusps from longitudes in house order (index 0 = house 1).
    pub fn from_longitudes(longitudes: [f64; HOUSE_COUNT]) -> Result<Self, BaseError> {
        let cusps: Vec<HouseCusp> = longitudes
            .iter()
            .enumerate()
            .map(|(i, &longitude)| HouseCusp {
                number: i as u8 + 1,
                longitude,
            })
            .collect();
        Self::new(&cusps)
    }

    /// Equal houses of 30° starting from the Ascendant.
    pub fn equal(ascendant_deg: f64) -> Result<Self, BaseError> {
        let mut longitudes = [0.0; HOUSE_COUNT];
        for (i, lon) in longitudes.iter_mut().enumerate() {
            *lon = ascendant_deg + i as f64 * 30.0;
        }
        Self::from_longitudes(longitudes)
    }

    /// Longitude of the cusp of `house` (1..=12). Out-of-range numbers wrap.
    pub fn cusp(&self, house: u8) -> f64 {
        let idx = (house as usize + HOUSE_COUNT - 1) % HOUSE_COUNT;
        self.longitudes[idx]
    }

    /// Cusp of house 1.
    pub fn ascendant(&self) -> f64 {
        self.longitudes[0]
    }

    /// House (1..=12) containing `longitude`.
    ///
    /// For a degenerate ring in which no arc contains the longitude, the
    /// house whose cusp was most recently passed is returned.
    pub fn house_of(&self, longitude: f64) -> u8 {
        let lon = normalize_360(longitude);
        for i in 0..HOUSE_COUNT {
            let start = self.longitudes[i];
            let end = self.longitudes[(i + 1) % HOUSE_COUNT];
            let span = normalize_360(end - start);
            if normalize_360(lon - start) < span {
                return i as u8 + 1;
            }
        }
        let mut best = 0;
        let mut best_offset = f64::INFINITY;
        for (i, &start) in self.longitudes.iter().enumerate() {
            let offset = normalize_360(lon - start);
            if offset < best_offset {
                best_offset = offset;
                best = i;
            }
        }
        best as u8 + 1
    }

    pub fn iter(&self) -> impl Iterator<Item = HouseCusp> + '_ {
        self.longitudes
            .iter()
            .enumerate()
            .map(|(i, &longitude)| HouseCusp {
                number: i as u8 + 1,
                longitude,
            })
    }
}

impl TryFrom<Vec<HouseCusp>> for HouseCusps {
    type Error = BaseError;

    fn try_from(value: Vec<HouseCusp>) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<HouseCusps> for Vec<HouseCusp> {
    fn from(cusps: HouseCusps) -> Self {
        cusps.iter().collect()
    }
}

/// Angular, succedent or cadent placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Angularity {
    Angular,
    Succedent,
    Cadent,
}

/// Houses 1/4/7/10 angular, 2/5/8/11 succedent, 3/6/9/12 cadent.
/// Out-of-range numbers wrap modulo 12.
pub const fn angularity(house: u8) -> Angularity {
    match house % 3 {
        1 => Angularity::Angular,
        2 => Angularity::Succedent,
        _ => Angularity::Cadent,
    }
}
