//! Types for the longevity summary.

use serde::{Deserialize, Serialize};

use crate::alcochoden_types::{AlcochodenConfig, AlcochodenResult};
use crate::hyleg_types::{HylegConfig, HylegResult};

/// Attached to every summary.
pub const DISCLAIMER: &str = "Traditional longevity techniques are presented for historical and \
educational purposes only. They are not medical advice and do not predict the length of a life.";

/// Qualitative strength of the Hyleg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalForce {
    Strong,
    Moderate,
    Weak,
    Undetermined,
}

impl VitalForce {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
            Self::Undetermined => "undetermined",
        }
    }
}

/// Confidence in the years granted by the Alcochoden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearsConfidence {
    High,
    Moderate,
    Low,
    Undetermined,
}

impl YearsConfidence {
    pub const fn name(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
            Self::Undetermined => "undetermined",
        }
    }
}

/// Hyleg, Alcochoden and their qualitative reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LongevitySummary {
    pub hyleg: HylegResult,
    pub alcochoden: AlcochodenResult,
    pub vital_force: VitalForce,
    pub years_confidence: YearsConfidence,
    /// Final years of the Alcochoden, when one was found.
    pub estimated_years: Option<f64>,
    pub disclaimer: &'static str,
}

/// Configuration for the whole longevity pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LongevityConfig {
    pub hyleg: HylegConfig,
    pub alcochoden: AlcochodenConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kairos_base::TermSystem;

    #[test]
    fn toml_style_sections_default() {
        let c: LongevityConfig =
            serde_json::from_str(r#"{"alcochoden": {"min_years": 2.0}}"#).unwrap();
        assert_eq!(c.hyleg.term_system, TermSystem::Egyptian);
        assert!((c.alcochoden.min_years - 2.0).abs() < 1e-12);
    }

    #[test]
    fn names_match_serde() {
        assert_eq!(
            serde_json::to_value(VitalForce::Undetermined).unwrap(),
            VitalForce::Undetermined.name()
        );
        assert_eq!(
            serde_json::to_value(YearsConfidence::High).unwrap(),
            YearsConfidence::High.name()
        );
    }
}
