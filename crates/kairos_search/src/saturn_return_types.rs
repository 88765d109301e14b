//! Types for the Saturn return search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::root::{Precision, RootConfig};

/// Mean sidereal period of Saturn in days (~29.457 years).
pub const SATURN_MEAN_PERIOD_DAYS: f64 = 10_759.22;

/// One crossing of transiting Saturn over the natal degree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaturnReturnPass {
    /// 1-based, chronological within the return.
    pub pass_number: u8,
    pub julian_day: f64,
    pub date_utc: DateTime<Utc>,
    pub longitude: f64,
    pub speed_deg_per_day: f64,
    pub is_retrograde: bool,
    pub precision: Precision,
}

/// Position of a return relative to the `as_of` moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnStatus {
    Past,
    Current,
    Future,
}

/// One Saturn return: one to three passes over the natal degree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaturnReturn {
    /// 1-based return count from birth.
    pub return_number: u8,
    pub passes: Vec<SaturnReturnPass>,
    /// Age in Julian years at the first pass.
    pub age_at_return: f64,
    pub status: ReturnStatus,
}

impl SaturnReturn {
    /// Julian Day of the first pass.
    pub fn start_jd(&self) -> f64 {
        self.passes.first().map_or(f64::NAN, |p| p.julian_day)
    }

    /// Julian Day of the last pass.
    pub fn end_jd(&self) -> f64 {
        self.passes.last().map_or(f64::NAN, |p| p.julian_day)
    }
}

/// Saturn return cycle analysis for one natal chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaturnReturnAnalysis {
    pub natal_longitude: f64,
    pub birth_jd: f64,
    pub as_of_jd: f64,
    /// Every return within the age horizon, chronological.
    pub returns: Vec<SaturnReturn>,
    /// Return in progress at `as_of`; None when between returns.
    pub current_return: Option<SaturnReturn>,
    /// First return starting after `as_of`; None past the horizon.
    pub next_return: Option<SaturnReturn>,
    /// Days from `as_of` to the next return's first pass.
    pub days_until_next_return: Option<f64>,
    /// Progress through the current cycle, in [0, 100].
    pub cycle_progress_percent: f64,
}

/// Configuration for the Saturn return search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturnReturnConfig {
    /// Returns are searched up to this age (default 90).
    pub max_age_years: f64,
    /// Half-width of the scan window around each mean-period estimate (default 400 days).
    pub search_window_days: f64,
    /// Coarse scan step in days (default 4).
    pub step_size_days: f64,
    /// Maximum bisection iterations per pass (default 50).
    pub max_iterations: u32,
    /// Bisection stops below this bracket width in days (default 1e-7).
    pub convergence_days: f64,
    /// Accepted |longitude − natal| at a pass in degrees (default 0.1).
    pub tolerance_deg: f64,
    /// A return counts as current within this many days of its first and
    /// last pass (default 365.25).
    pub current_window_days: f64,
}

impl Default for SaturnReturnConfig {
    fn default() -> Self {
        Self {
            max_age_years: 90.0,
            search_window_days: 400.0,
            step_size_days: 4.0,
            max_iterations: 50,
            convergence_days: 1e-7,
            tolerance_deg: 0.1,
            current_window_days: 365.25,
        }
    }
}

impl SaturnReturnConfig {
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.max_age_years.is_finite() || self.max_age_years <= 0.0 || self.max_age_years > 200.0 {
            return Err("max_age_years must be in (0, 200]");
        }
        if !self.search_window_days.is_finite()
            || self.search_window_days <= 0.0
            || self.search_window_days >= SATURN_MEAN_PERIOD_DAYS / 2.0
        {
            return Err("search_window_days must be positive and under half a Saturn period");
        }
        if !self.step_size_days.is_finite()
            || self.step_size_days <= 0.0
            || self.step_size_days > self.search_window_days
        {
            return Err("step_size_days must be positive and within the search window");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.convergence_days.is_finite() || self.convergence_days <= 0.0 {
            return Err("convergence_days must be positive");
        }
        if !self.tolerance_deg.is_finite() || self.tolerance_deg <= 0.0 {
            return Err("tolerance_deg must be positive");
        }
        if !self.current_window_days.is_finite() || self.current_window_days < 0.0 {
            return Err("current_window_days must be non-negative");
        }
        Ok(())
    }

    pub(crate) fn root_config(&self) -> RootConfig {
        RootConfig {
            max_iterations: self.max_iterations,
            convergence_days: self.convergence_days,
            tolerance_deg: self.tolerance_deg,
        }
    }
}
