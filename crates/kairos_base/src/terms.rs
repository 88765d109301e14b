//! Term (bound) tables.
//!
//! Each sign is divided into five unequal, contiguous ranges, each ruled by
//! one of the five non-luminary planets. Four traditional systems are
//! supported. Tables store the exclusive end degree of each term; the start
//! of a term is the end of the previous one.
//!
//! Dorotheus transmits the Egyptian bounds, so the Dorothean table repeats
//! the Egyptian one under its own name.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BaseError;
use crate::planet::Planet;
use crate::planet::Planet::{Jupiter as JU, Mars as MA, Mercury as ME, Saturn as SA, Venus as VE};
use crate::zodiac::{Element, Sign, position_from_longitude};

/// Term (bound) system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermSystem {
    #[default]
    Egyptian,
    Ptolemaic,
    Chaldean,
    Dorothean,
}

/// All supported systems.
pub const ALL_TERM_SYSTEMS: [TermSystem; 4] = [
    TermSystem::Egyptian,
    TermSystem::Ptolemaic,
    TermSystem::Chaldean,
    TermSystem::Dorothean,
];

impl TermSystem {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Egyptian => "Egyptian",
            Self::Ptolemaic => "Ptolemaic",
            Self::Chaldean => "Chaldean",
            Self::Dorothean => "Dorothean",
        }
    }
}

impl Display for TermSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TermSystem {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_TERM_SYSTEMS
            .iter()
            .copied()
            .find(|sys| sys.name().eq_ignore_ascii_case(wanted))
            .ok_or("unknown term system (expected egyptian, ptolemaic, chaldean or dorothean)")
    }
}

/// One term within a sign: `[start_deg, end_deg)` ruled by `ruler`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermEntry {
    pub ruler: Planet,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl TermEntry {
    pub fn width(&self) -> f64 {
        self.end_deg - self.start_deg
    }

    pub fn contains(&self, degree_in_sign: f64) -> bool {
        degree_in_sign >= self.start_deg && degree_in_sign < self.end_deg
    }
}

type SignTerms = [(Planet, u8); 5];

const EGYPTIAN: [SignTerms; 12] = [
    [(JU, 6), (VE, 12), (ME, 20), (MA, 25), (SA, 30)], // Aries
    [(VE, 8), (ME, 14), (JU, 22), (SA, 27), (MA, 30)], // Taurus
    [(ME, 6), (JU, 12), (VE, 17), (MA, 24), (SA, 30)], // Gemini
    [(MA, 7), (VE, 13), (ME, 19), (JU, 26), (SA, 30)], // Cancer
    [(JU, 6), (VE, 11), (SA, 18), (ME, 24), (MA, 30)], // Leo
    [(ME, 7), (VE, 17), (JU, 21), (MA, 28), (SA, 30)], // Virgo
    [(SA, 6), (ME, 14), (JU, 21), (VE, 28), (MA, 30)], // Libra
    [(MA, 7), (VE, 11), (ME, 19), (JU, 24), (SA, 30)], // Scorpio
    [(JU, 12), (VE, 17), (ME, 21), (SA, 26), (MA, 30)], // Sagittarius
    [(ME, 7), (JU, 14), (VE, 22), (SA, 26), (MA, 30)], // Capricorn
    [(ME, 7), (VE, 13), (JU, 20), (MA, 25), (SA, 30)], // Aquarius
    [(VE, 12), (JU, 16), (ME, 19), (MA, 28), (SA, 30)], // Pisces
];

// Ptolemy's bounds as tabulated by Lilly.
const PTOLEMAIC: [SignTerms; 12] = [
    [(JU, 6), (VE, 14), (ME, 21), (MA, 26), (SA, 30)],
    [(VE, 8), (ME, 15), (JU, 22), (SA, 26), (MA, 30)],
    [(ME, 7), (JU, 14), (VE, 21), (SA, 25), (MA, 30)],
    [(MA, 6), (JU, 13), (ME, 20), (VE, 27), (SA, 30)],
    [(SA, 6), (ME, 13), (VE, 19), (JU, 25), (MA, 30)],
    [(ME, 7), (VE, 13), (JU, 18), (SA, 24), (MA, 30)],
    [(SA, 6), (VE, 11), (JU, 19), (ME, 24), (MA, 30)],
    [(MA, 6), (JU, 14), (VE, 21), (ME, 27), (SA, 30)],
    [(JU, 8), (VE, 14), (ME, 19), (SA, 25), (MA, 30)],
    [(VE, 6), (ME, 12), (JU, 19), (MA, 25), (SA, 30)],
    [(SA, 6), (ME, 12), (VE, 20), (JU, 25), (MA, 30)],
    [(VE, 8), (JU, 14), (ME, 20), (MA, 26), (SA, 30)],
];

// Chaldean bounds depend only on the triplicity: widths 8, 7, 6, 5, 4.
const CHALDEAN_FIRE: SignTerms = [(JU, 8), (VE, 15), (SA, 21), (ME, 26), (MA, 30)];
const CHALDEAN_EARTH: SignTerms = [(VE, 8), (SA, 15), (JU, 21), (ME, 26), (MA, 30)];
const CHALDEAN_AIR: SignTerms = [(SA, 8), (JU, 15), (ME, 21), (VE, 26), (MA, 30)];
const CHALDEAN_WATER: SignTerms = [(MA, 8), (JU, 15), (VE, 21), (ME, 26), (SA, 30)];

fn raw_terms(sign: Sign, system: TermSystem) -> &'static SignTerms {
    let idx = sign.index() as usize;
    match system {
        TermSystem::Egyptian | TermSystem::Dorothean => &EGYPTIAN[idx],
        TermSystem::Ptolemaic => &PTOLEMAIC[idx],
        TermSystem::Chaldean => match sign.element() {
            Element::Fire => &CHALDEAN_FIRE,
            Element::Earth => &CHALDEAN_EARTH,
            Element::Air => &CHALDEAN_AIR,
            Element::Water => &CHALDEAN_WATER,
        },
    }
}

/// The five terms of a sign in degree order.
pub fn terms_of(sign: Sign, system: TermSystem) -> [TermEntry; 5] {
    let raw = raw_terms(sign, system);
    let mut out = [TermEntry {
        ruler: raw[0].0,
        start_deg: 0.0,
        end_deg: 0.0,
    }; 5];
    let mut start = 0u8;
    for (slot, &(ruler, end)) in out.iter_mut().zip(raw.iter()) {
        *slot = TermEntry {
            ruler,
            start_deg: start as f64,
            end_deg: end as f64,
        };
        start = end;
    }
    out
}

/// Term holding `degree_in_sign` within `sign`.
///
/// Fails with `InvalidDegree` outside [0, 30) or for non-finite input.
pub fn term_for(sign: Sign, degree_in_sign: f64, system: TermSystem) -> Result<TermEntry, BaseError> {
    if !degree_in_sign.is_finite() || !(0.0..30.0).contains(&degree_in_sign) {
        return Err(BaseError::InvalidDegree(degree_in_sign));
    }
    terms_of(sign, system)
        .into_iter()
        .find(|t| t.contains(degree_in_sign))
        .ok_or(BaseError::InvalidDegree(degree_in_sign))
}

/// Term ruler at an ecliptic longitude.
///
/// Fails with `InvalidLongitude` outside [0, 360) or for non-finite input.
pub fn term_ruler(longitude: f64, system: TermSystem) -> Result<Planet, BaseError> {
    if !longitude.is_finite() || !(0.0..360.0).contains(&longitude) {
        return Err(BaseError::InvalidLongitude(longitude));
    }
    let pos = position_from_longitude(longitude);
    Ok(term_for(pos.sign, pos.degree_in_sign, system)?.ruler)
}
