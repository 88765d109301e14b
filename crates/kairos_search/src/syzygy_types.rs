//! Types for the prenatal syzygy search.

use chrono::{DateTime, Utc};
use kairos_base::{Sign, ZodiacPosition};
use serde::{Deserialize, Serialize};

use crate::root::{Precision, RootConfig};

/// New Moon (conjunction) or Full Moon (opposition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyzygyType {
    NewMoon,
    FullMoon,
}

impl SyzygyType {
    /// Moon − Sun elongation at the exact syzygy.
    pub const fn target_elongation_deg(self) -> f64 {
        match self {
            Self::NewMoon => 0.0,
            Self::FullMoon => 180.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::FullMoon => "Full Moon",
        }
    }
}

/// The last New or Full Moon before birth.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyzygyResult {
    #[serde(rename = "type")]
    pub syzygy_type: SyzygyType,
    pub julian_day: f64,
    pub date_utc: DateTime<Utc>,
    /// Sun longitude for a New Moon, Moon longitude for a Full Moon.
    pub longitude: f64,
    pub sign: Sign,
    pub degree: u8,
    pub minute: u8,
    pub house: u8,
    /// Moon − Sun elongation at `julian_day`, in [0, 360).
    pub elongation_deg: f64,
    /// |elongation − target| at `julian_day`.
    pub residual_deg: f64,
    pub precision: Precision,
}

impl SyzygyResult {
    pub fn position(&self) -> ZodiacPosition {
        kairos_base::position_from_longitude(self.longitude)
    }
}

/// Configuration for the prenatal syzygy search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyzygyConfig {
    /// Backward scan step in days (default 0.5).
    pub coarse_step_days: f64,
    /// Maximum backward steps (default 60, about 30 days).
    pub max_coarse_steps: usize,
    /// Maximum bisection iterations (default 100).
    pub max_refine_iterations: u32,
    /// Accepted |elongation − target| in degrees (default 0.1).
    pub tolerance_deg: f64,
    /// Bisection stops below this bracket width in days (default 1e-7).
    pub convergence_days: f64,
}

impl Default for SyzygyConfig {
    fn default() -> Self {
        Self {
            coarse_step_days: 0.5,
            max_coarse_steps: 60,
            max_refine_iterations: 100,
            tolerance_deg: 0.1,
            convergence_days: 1e-7,
        }
    }
}

impl SyzygyConfig {
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.coarse_step_days.is_finite() || self.coarse_step_days <= 0.0 {
            return Err("coarse_step_days must be positive");
        }
        if self.max_coarse_steps == 0 {
            return Err("max_coarse_steps must be > 0");
        }
        if self.max_refine_iterations == 0 {
            return Err("max_refine_iterations must be > 0");
        }
        if !self.tolerance_deg.is_finite() || self.tolerance_deg <= 0.0 {
            return Err("tolerance_deg must be positive");
        }
        if !self.convergence_days.is_finite() || self.convergence_days <= 0.0 {
            return Err("convergence_days must be positive");
        }
        Ok(())
    }

    pub(crate) fn root_config(&self) -> RootConfig {
        RootConfig {
            max_iterations: self.max_refine_iterations,
            convergence_days: self.convergence_days,
            tolerance_deg: self.tolerance_deg,
        }
    }
}
