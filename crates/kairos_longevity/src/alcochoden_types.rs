//! Types for Alcochoden selection and the years it grants.

use kairos_base::{
    AspectKind, DEFAULT_COMBUSTION_ORB_DEG, DignityConfig, DignityScore, Planet, PlanetaryYears,
    TermSystem, YearType,
};
use serde::{Deserialize, Serialize};

/// One planet evaluated as Alcochoden.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlcochodenCandidate {
    pub planet: Planet,
    /// Essential dignity of the planet at the Hyleg's degree.
    pub dignity_at_hyleg_degree: DignityScore,
    pub aspects_hyleg: bool,
    /// Ptolemaic aspect to the Hyleg; Conjunction when the planet is the Hyleg.
    pub aspect_type: Option<AspectKind>,
    /// |orb| of that aspect; 0 when the planet is the Hyleg.
    pub orb: Option<f64>,
    pub is_qualified: bool,
}

/// Category of a year adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModificationKind {
    Angularity,
    Retrograde,
    Combustion,
    Aspect,
}

/// One signed adjustment to the base years.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearModification {
    pub reason: String,
    pub adjustment_years: f64,
    pub kind: ModificationKind,
}

/// The selected Alcochoden and the years it grants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlcochodenData {
    pub planet: Planet,
    pub candidate: AlcochodenCandidate,
    /// Essential dignity at the planet's own position; selects the year type.
    pub own_dignity: DignityScore,
    pub house: u8,
    pub is_retrograde: bool,
    pub is_combust: bool,
    pub planetary_years: PlanetaryYears,
    pub year_type: YearType,
    pub base_years: f64,
    /// Applied in order: angularity, retrograde, combustion, aspects.
    pub modifications: Vec<YearModification>,
    pub final_years: f64,
    /// Every evaluated planet.
    pub candidates: Vec<AlcochodenCandidate>,
}

/// Outcome of Alcochoden selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AlcochodenResult {
    Found(AlcochodenData),
    #[serde(rename_all = "camelCase")]
    NoCandidate {
        candidates: Vec<AlcochodenCandidate>,
        reason: String,
    },
    NoHyleg {
        reason: String,
    },
}

impl AlcochodenResult {
    pub fn alcochoden(&self) -> Option<&AlcochodenData> {
        match self {
            Self::Found(data) => Some(data),
            _ => None,
        }
    }

    pub fn candidates(&self) -> &[AlcochodenCandidate] {
        match self {
            Self::Found(data) => &data.candidates,
            Self::NoCandidate { candidates, .. } => candidates,
            Self::NoHyleg { .. } => &[],
        }
    }
}

/// Configuration for Alcochoden selection and year modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlcochodenConfig {
    pub term_system: TermSystem,
    /// A planet strictly closer than this to the Sun is combust (default 8°).
    pub combustion_orb_deg: f64,
    /// Added when the Alcochoden is angular (default 5).
    pub angular_bonus_years: f64,
    /// Subtracted when the Alcochoden is cadent (default 5).
    pub cadent_penalty_years: f64,
    /// Subtracted when the Alcochoden is retrograde (default 5).
    pub retrograde_penalty_years: f64,
    /// Subtracted when the Alcochoden is combust (default 5).
    pub combustion_penalty_years: f64,
    /// Final years never drop below this (default 1).
    pub min_years: f64,
}

impl Default for AlcochodenConfig {
    fn default() -> Self {
        Self {
            term_system: TermSystem::default(),
            combustion_orb_deg: DEFAULT_COMBUSTION_ORB_DEG,
            angular_bonus_years: 5.0,
            cadent_penalty_years: 5.0,
            retrograde_penalty_years: 5.0,
            combustion_penalty_years: 5.0,
            min_years: 1.0,
        }
    }
}

impl AlcochodenConfig {
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.combustion_orb_deg.is_finite()
            || self.combustion_orb_deg <= 0.0
            || self.combustion_orb_deg > 30.0
        {
            return Err("combustion_orb_deg must be in (0, 30]");
        }
        let magnitudes = [
            self.angular_bonus_years,
            self.cadent_penalty_years,
            self.retrograde_penalty_years,
            self.combustion_penalty_years,
        ];
        if magnitudes.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err("year adjustments must be finite and non-negative");
        }
        if !self.min_years.is_finite() || self.min_years < 0.0 {
            return Err("min_years must be non-negative");
        }
        Ok(())
    }

    pub(crate) fn dignity(&self) -> DignityConfig {
        DignityConfig::with_term_system(self.term_system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let c = AlcochodenConfig::default();
        assert!(c.validate().is_ok());
        assert!((c.combustion_orb_deg - 8.0).abs() < 1e-12);
    }

    #[test]
    fn negative_penalty_rejected() {
        let c = AlcochodenConfig {
            retrograde_penalty_years: -5.0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let c: AlcochodenConfig =
            serde_json::from_str(r#"{"term_system": "ptolemaic", "min_years": 0.5}"#).unwrap();
        assert_eq!(c.term_system, TermSystem::Ptolemaic);
        assert!((c.min_years - 0.5).abs() < 1e-12);
        assert!((c.angular_bonus_years - 5.0).abs() < 1e-12);
    }

    #[test]
    fn no_hyleg_has_no_candidates() {
        let r = AlcochodenResult::NoHyleg {
            reason: "no hyleg".into(),
        };
        assert!(r.candidates().is_empty());
        assert!(r.alcochoden().is_none());
    }
}
