//! Types for Hyleg selection.

use std::fmt::{Display, Formatter};

use kairos_base::{DignityConfig, DignityScore, Planet, PointAspect, Sign, TermSystem};
use serde::{Deserialize, Serialize};

/// Houses in which a Hyleg candidate may qualify.
pub const HYLEGICAL_HOUSES: [u8; 5] = [1, 7, 9, 10, 11];

pub const fn is_hylegical_house(house: u8) -> bool {
    matches!(house, 1 | 7 | 9 | 10 | 11)
}

/// The five points that can become Hyleg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HylegPoint {
    Sun,
    Moon,
    Ascendant,
    PartOfFortune,
    PrenatalSyzygy,
}

impl HylegPoint {
    /// Display name, also the endpoint name looked up in the aspect list.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Ascendant => "Ascendant",
            Self::PartOfFortune => "Part of Fortune",
            Self::PrenatalSyzygy => "Prenatal Syzygy",
        }
    }

    /// The planet behind a luminary candidate.
    pub const fn planet(self) -> Option<Planet> {
        match self {
            Self::Sun => Some(Planet::Sun),
            Self::Moon => Some(Planet::Moon),
            _ => None,
        }
    }

    /// Calculated points have no essential dignity of their own.
    pub const fn is_point(self) -> bool {
        self.planet().is_none()
    }
}

impl Display for HylegPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One evaluated Hyleg candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HylegCandidate {
    pub name: HylegPoint,
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub house: u8,
    pub in_hylegical_place: bool,
    /// Planets in Ptolemaic aspect with the candidate, in aspect-list order.
    pub aspecting_planets: Vec<Planet>,
    pub is_qualified: bool,
    pub qualification_reason: String,
}

/// The selected Hyleg and everything re-derived for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HylegData {
    pub hyleg: HylegCandidate,
    /// Essential dignity of a luminary Hyleg at its own position; None for
    /// calculated points.
    pub dignity: Option<DignityScore>,
    /// Domicile lord of the Hyleg's sign.
    pub domicile_lord: Planet,
    /// Every aspect to the Hyleg from the supplied aspect list.
    pub aspects: Vec<PointAspect>,
    /// Candidates evaluated up to and including the winner.
    pub candidates: Vec<HylegCandidate>,
}

/// Outcome of Hyleg selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum HylegResult {
    Found(HylegData),
    #[serde(rename_all = "camelCase")]
    NotFound {
        candidates: Vec<HylegCandidate>,
        reason: String,
    },
}

impl HylegResult {
    pub fn hyleg(&self) -> Option<&HylegData> {
        match self {
            Self::Found(data) => Some(data),
            Self::NotFound { .. } => None,
        }
    }

    pub fn candidates(&self) -> &[HylegCandidate] {
        match self {
            Self::Found(data) => &data.candidates,
            Self::NotFound { candidates, .. } => candidates,
        }
    }
}

/// Configuration for Hyleg selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HylegConfig {
    /// Term system used for dignity at candidate positions.
    pub term_system: TermSystem,
}

impl HylegConfig {
    pub(crate) fn dignity(&self) -> DignityConfig {
        DignityConfig::with_term_system(self.term_system)
    }
}
