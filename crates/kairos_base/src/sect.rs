//! Chart sect (diurnal/nocturnal).
//!
//! A chart is diurnal when the Sun is above the horizon, in houses 7–12.
//! Houses run with the zodiac from the Ascendant, so the upper half of the
//! chart is the semicircle from the Descendant forward to the Ascendant:
//! the Sun lies there when it is at most 180° *behind* the Ascendant.
//!
//! Boundary policy: a Sun exactly on the Ascendant or the Descendant is
//! diurnal. This is a convention of the engine, not a rule of the tradition.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::util::normalize_360;

/// Day or night chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sect {
    Diurnal,
    Nocturnal,
}

impl Sect {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Diurnal => "Diurnal",
            Self::Nocturnal => "Nocturnal",
        }
    }

    pub const fn is_diurnal(self) -> bool {
        matches!(self, Self::Diurnal)
    }
}

impl Display for Sect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sect from Ascendant and Sun longitudes. Total: never fails.
///
/// Ascendant 0°, Sun 270° (tenth house) → Diurnal; Ascendant 0°, Sun 90°
/// (fourth house) → Nocturnal.
pub fn sect_from_longitudes(ascendant_deg: f64, sun_deg: f64) -> Sect {
    let behind_asc = normalize_360(ascendant_deg - sun_deg);
    if behind_asc <= 180.0 {
        Sect::Diurnal
    } else {
        Sect::Nocturnal
    }
}

/// Sect from the Sun's house. Houses 7–12 are above the horizon.
pub const fn sect_from_house(sun_house: u8) -> Sect {
    if matches!(sun_house, 7..=12) {
        Sect::Diurnal
    } else {
        Sect::Nocturnal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_on_tenth_cusp_is_diurnal() {
        assert_eq!(sect_from_longitudes(0.0, 270.0), Sect::Diurnal);
        assert_eq!(sect_from_longitudes(220.0, 130.0), Sect::Diurnal);
    }

    #[test]
    fn sun_on_fourth_cusp_is_nocturnal() {
        assert_eq!(sect_from_longitudes(0.0, 90.0), Sect::Nocturnal);
        assert_eq!(sect_from_longitudes(100.0, 190.0), Sect::Nocturnal);
    }

    #[test]
    fn sun_on_ascendant_is_diurnal() {
        assert_eq!(sect_from_longitudes(123.4, 123.4), Sect::Diurnal);
    }

    #[test]
    fn sun_on_descendant_is_diurnal() {
        assert_eq!(sect_from_longitudes(123.4, 303.4), Sect::Diurnal);
    }

    #[test]
    fn wraps_through_aries() {
        assert_eq!(sect_from_longitudes(30.0, 300.0), Sect::Diurnal);
        assert_eq!(sect_from_longitudes(300.0, 30.0), Sect::Nocturnal);
    }

    #[test]
    fn house_rule() {
        for h in 1..=6 {
            assert_eq!(sect_from_house(h), Sect::Nocturnal, "house {h}");
        }
        for h in 7..=12 {
            assert_eq!(sect_from_house(h), Sect::Diurnal, "house {h}");
        }
    }

    #[test]
    fn longitudes_agree_with_equal_houses() {
        use crate::house::HouseCusps;
        for asc in (0..360).step_by(15) {
            let cusps = HouseCusps::equal(asc as f64).unwrap();
            for sun in (0..360).step_by(7) {
                let sun = sun as f64 + 0.5;
                assert_eq!(
                    sect_from_longitudes(asc as f64, sun),
                    sect_from_house(cusps.house_of(sun)),
                    "asc {asc}, sun {sun}"
                );
            }
        }
    }
}
