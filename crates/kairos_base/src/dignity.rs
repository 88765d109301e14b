//! Essential dignity scoring.
//!
//! A planet at a sign-degree collects points for every dignity it holds
//! there and loses points for every debility:
//!
//! | Dignity | Points |
//! |---|---|
//! | Domicile | +5 |
//! | Exaltation | +4 |
//! | Triplicity (ruler for the chart's sect) | +3 |
//! | Term | +2 |
//! | Face | +1 |
//! | Detriment (sign opposite a domicile) | −5 |
//! | Fall (sign opposite the exaltation) | −4 |
//!
//! The classification is the single held dignity with the highest points,
//! or Peregrine when nothing applies. Modern planets and the nodes have no
//! table entries and are always Peregrine with zero points.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::BaseError;
use crate::face::face_ruler;
use crate::planet::{Planet, domicile_signs, exaltation_sign};
use crate::sect::Sect;
use crate::terms::{TermSystem, term_for};
use crate::zodiac::{Element, Sign, position_from_longitude};

/// Kinds of essential dignity and debility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DignityType {
    Domicile,
    Exaltation,
    Triplicity,
    Term,
    Face,
    Peregrine,
    Detriment,
    Fall,
}

impl DignityType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Domicile => "Domicile",
            Self::Exaltation => "Exaltation",
            Self::Triplicity => "Triplicity",
            Self::Term => "Term",
            Self::Face => "Face",
            Self::Peregrine => "Peregrine",
            Self::Detriment => "Detriment",
            Self::Fall => "Fall",
        }
    }

    /// Fixed point value of this dignity.
    pub const fn points(self) -> i32 {
        match self {
            Self::Domicile => 5,
            Self::Exaltation => 4,
            Self::Triplicity => 3,
            Self::Term => 2,
            Self::Face => 1,
            Self::Peregrine => 0,
            Self::Detriment => -5,
            Self::Fall => -4,
        }
    }

    /// Domicile or exaltation.
    pub const fn is_major(self) -> bool {
        matches!(self, Self::Domicile | Self::Exaltation)
    }

    /// Detriment or fall.
    pub const fn is_debility(self) -> bool {
        matches!(self, Self::Detriment | Self::Fall)
    }
}

impl Display for DignityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One dignity contributing to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dignity {
    #[serde(rename = "type")]
    pub dignity_type: DignityType,
    pub points: i32,
}

impl Dignity {
    pub const fn new(dignity_type: DignityType) -> Self {
        Self {
            dignity_type,
            points: dignity_type.points(),
        }
    }
}

/// Result of dignity evaluation for one planet at one sign-degree.
///
/// `points` always equals the sum of the constituents' points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DignityScore {
    pub classification: DignityType,
    pub points: i32,
    /// Held dignities in table order: domicile, exaltation, triplicity,
    /// term, face, detriment, fall.
    pub constituent_dignities: Vec<Dignity>,
}

impl DignityScore {
    /// Score with no dignities.
    pub fn peregrine() -> Self {
        Self {
            classification: DignityType::Peregrine,
            points: 0,
            constituent_dignities: Vec::new(),
        }
    }

    fn from_constituents(constituent_dignities: Vec<Dignity>) -> Self {
        let points = constituent_dignities.iter().map(|d| d.points).sum();
        let classification = constituent_dignities
            .iter()
            .max_by_key(|d| d.points)
            .map_or(DignityType::Peregrine, |d| d.dignity_type);
        Self {
            classification,
            points,
            constituent_dignities,
        }
    }

    /// Whether the given dignity is among the constituents.
    pub fn holds(&self, dignity_type: DignityType) -> bool {
        self.constituent_dignities
            .iter()
            .any(|d| d.dignity_type == dignity_type)
    }
}

/// Triplicity rulers of an element (Dorothean scheme).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriplicityRulers {
    pub day: Planet,
    pub night: Planet,
    pub participating: Planet,
}

impl TriplicityRulers {
    /// Ruler in charge for the given sect.
    pub const fn for_sect(&self, sect: Sect) -> Planet {
        match sect {
            Sect::Diurnal => self.day,
            Sect::Nocturnal => self.night,
        }
    }
}

/// Day, night and participating triplicity rulers of an element.
pub const fn triplicity_rulers(element: Element) -> TriplicityRulers {
    let (day, night, participating) = match element {
        Element::Fire => (Planet::Sun, Planet::Jupiter, Planet::Saturn),
        Element::Earth => (Planet::Venus, Planet::Moon, Planet::Mars),
        Element::Air => (Planet::Saturn, Planet::Mercury, Planet::Jupiter),
        Element::Water => (Planet::Venus, Planet::Mars, Planet::Moon),
    };
    TriplicityRulers {
        day,
        night,
        participating,
    }
}

/// Configuration for dignity evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DignityConfig {
    /// Term table used for the term dignity.
    pub term_system: TermSystem,
}

impl DignityConfig {
    pub fn with_term_system(term_system: TermSystem) -> Self {
        Self { term_system }
    }
}

/// Essential dignity of `planet` at `degree_in_sign` of `sign`.
///
/// Only the triplicity ruler in charge for `sect` scores; the participating
/// ruler is reported by [`triplicity_rulers`] but earns no points.
pub fn evaluate_dignity(
    planet: Planet,
    sign: Sign,
    degree_in_sign: f64,
    sect: Sect,
    config: &DignityConfig,
) -> Result<DignityScore, BaseError> {
    let term = term_for(sign, degree_in_sign, config.term_system)?;
    let face = face_ruler(sign, degree_in_sign)?;
    if !planet.is_traditional() {
        return Ok(DignityScore::peregrine());
    }

    let domiciles = domicile_signs(planet);
    let exaltation = exaltation_sign(planet);
    let mut held = Vec::with_capacity(4);

    if domiciles.contains(&sign) {
        held.push(Dignity::new(DignityType::Domicile));
    }
    if exaltation == Some(sign) {
        held.push(Dignity::new(DignityType::Exaltation));
    }
    if triplicity_rulers(sign.element()).for_sect(sect) == planet {
        held.push(Dignity::new(DignityType::Triplicity));
    }
    if term.ruler == planet {
        held.push(Dignity::new(DignityType::Term));
    }
    if face == planet {
        held.push(Dignity::new(DignityType::Face));
    }
    if domiciles.iter().any(|d| d.opposite() == sign) {
        held.push(Dignity::new(DignityType::Detriment));
    }
    if exaltation.map(Sign::opposite) == Some(sign) {
        held.push(Dignity::new(DignityType::Fall));
    }

    Ok(DignityScore::from_constituents(held))
}

/// Essential dignity of `planet` at an ecliptic longitude.
///
/// Fails with `InvalidLongitude` outside [0, 360).
pub fn dignity_at_longitude(
    planet: Planet,
    longitude: f64,
    sect: Sect,
    config: &DignityConfig,
) -> Result<DignityScore, BaseError> {
    if !longitude.is_finite() || !(0.0..360.0).contains(&longitude) {
        return Err(BaseError::InvalidLongitude(longitude));
    }
    let pos = position_from_longitude(longitude);
    evaluate_dignity(planet, pos.sign, pos.degree_in_sign, sect, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planet::TRADITIONAL_PLANETS;
    use crate::zodiac::ALL_SIGNS;

    fn egyptian() -> DignityConfig {
        DignityConfig::default()
    }

    #[test]
    fn sun_in_leo_by_day() {
        // Leo 2°: domicile, fire day ruler; term Jupiter, face Saturn.
        let s = evaluate_dignity(Planet::Sun, Sign::Leo, 2.0, Sect::Diurnal, &egyptian()).unwrap();
        assert_eq!(s.classification, DignityType::Domicile);
        assert_eq!(s.points, 8);
        assert!(s.holds(DignityType::Domicile));
        assert!(s.holds(DignityType::Triplicity));
        assert!(!s.holds(DignityType::Term));
    }

    #[test]
    fn sun_in_leo_by_night_loses_triplicity() {
        let s = evaluate_dignity(Planet::Sun, Sign::Leo, 2.0, Sect::Nocturnal, &egyptian()).unwrap();
        assert_eq!(s.points, 5);
        assert!(!s.holds(DignityType::Triplicity));
    }

    #[test]
    fn saturn_in_aries_is_in_fall() {
        // Aries 27°: Egyptian term of Saturn, face of Venus.
        let s = evaluate_dignity(Planet::Saturn, Sign::Aries, 27.0, Sect::Diurnal, &egyptian()).unwrap();
        assert!(s.holds(DignityType::Fall));
        assert!(s.holds(DignityType::Term));
        assert_eq!(s.points, -4 + 2);
        assert_eq!(s.classification, DignityType::Term);
    }

    #[test]
    fn venus_in_aries_detriment_only() {
        // Aries 1°: term Jupiter, face Mars. Venus rules Libra.
        let s = evaluate_dignity(Planet::Venus, Sign::Aries, 1.0, Sect::Nocturnal, &egyptian()).unwrap();
        assert_eq!(s.classification, DignityType::Detriment);
        assert_eq!(s.points, -5);
    }

    #[test]
    fn mercury_in_pisces_detriment_and_fall() {
        // Pisces 13°: term Jupiter, face Jupiter.
        let s = evaluate_dignity(Planet::Mercury, Sign::Pisces, 13.0, Sect::Diurnal, &egyptian()).unwrap();
        assert!(s.holds(DignityType::Detriment));
        assert!(s.holds(DignityType::Fall));
        assert_eq!(s.points, -9);
        assert_eq!(s.classification, DignityType::Fall);
    }

    #[test]
    fn peregrine_when_nothing_applies() {
        // Mars in Gemini 8°: term Jupiter, face Jupiter, air rulers Saturn/Mercury.
        let s = evaluate_dignity(Planet::Mars, Sign::Gemini, 8.0, Sect::Diurnal, &egyptian()).unwrap();
        assert_eq!(s, DignityScore::peregrine());
    }

    #[test]
    fn outer_planets_are_peregrine() {
        let s = evaluate_dignity(Planet::Pluto, Sign::Scorpio, 10.0, Sect::Diurnal, &egyptian()).unwrap();
        assert_eq!(s.classification, DignityType::Peregrine);
        assert_eq!(s.points, 0);
    }

    #[test]
    fn points_are_sum_of_constituents() {
        for planet in TRADITIONAL_PLANETS {
            for sign in ALL_SIGNS {
                for deg in [0.0, 7.5, 14.0, 22.2, 29.9] {
                    for sect in [Sect::Diurnal, Sect::Nocturnal] {
                        let s = evaluate_dignity(planet, sign, deg, sect, &egyptian()).unwrap();
                        let sum: i32 = s.constituent_dignities.iter().map(|d| d.points).sum();
                        assert_eq!(s.points, sum);
                        let major = s.holds(DignityType::Domicile) || s.holds(DignityType::Exaltation);
                        let debil = s.holds(DignityType::Detriment) || s.holds(DignityType::Fall);
                        assert!(!(major && debil), "{planet} {sign}");
                    }
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        let a = evaluate_dignity(Planet::Jupiter, Sign::Cancer, 20.0, Sect::Nocturnal, &egyptian()).unwrap();
        let b = evaluate_dignity(Planet::Jupiter, Sign::Cancer, 20.0, Sect::Nocturnal, &egyptian()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn term_system_changes_score() {
        // Leo 2°: Egyptian term Jupiter, Ptolemaic term Saturn.
        let ptolemaic = DignityConfig::with_term_system(TermSystem::Ptolemaic);
        let e = evaluate_dignity(Planet::Saturn, Sign::Leo, 2.0, Sect::Diurnal, &egyptian()).unwrap();
        let p = evaluate_dignity(Planet::Saturn, Sign::Leo, 2.0, Sect::Diurnal, &ptolemaic).unwrap();
        assert!(!e.holds(DignityType::Term));
        assert!(p.holds(DignityType::Term));
        assert_eq!(p.points - e.points, 2);
    }

    #[test]
    fn longitude_entry_point() {
        let s = dignity_at_longitude(Planet::Sun, 122.0, Sect::Diurnal, &egyptian()).unwrap();
        assert_eq!(s.classification, DignityType::Domicile);
        assert!(matches!(
            dignity_at_longitude(Planet::Sun, 360.0, Sect::Diurnal, &egyptian()),
            Err(BaseError::InvalidLongitude(_))
        ));
    }

    #[test]
    fn triplicity_table() {
        let fire = triplicity_rulers(Element::Fire);
        assert_eq!(fire.for_sect(Sect::Diurnal), Planet::Sun);
        assert_eq!(fire.for_sect(Sect::Nocturnal), Planet::Jupiter);
        assert_eq!(triplicity_rulers(Element::Water).participating, Planet::Moon);
    }

    #[test]
    fn serializes_constituent_type_field() {
        let s = evaluate_dignity(Planet::Sun, Sign::Leo, 2.0, Sect::Nocturnal, &egyptian()).unwrap();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["classification"], "Domicile");
        assert_eq!(json["constituentDignities"][0]["type"], "Domicile");
    }
}
