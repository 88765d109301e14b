//! Time searches over the ephemeris port.
//!
//! This crate provides:
//! - A shared coarse-scan plus bisection root finder for angular targets
//! - The prenatal syzygy: last New or Full Moon before birth
//! - Saturn returns: every crossing of transiting Saturn over its natal
//!   degree up to an age horizon, with status relative to a reference date
//!
//! Ephemeris failures abort a search. Iteration caps do not: results carry
//! a [`Precision`] marker instead.

pub mod error;
pub mod root;
pub mod saturn_return;
pub mod saturn_return_types;
pub mod syzygy;
pub mod syzygy_types;

pub use error::SearchError;
pub use root::{
    Bracket, Precision, Root, RootConfig, RootError, Sample, Scan, SearchExhausted, fail_soft,
    find_root, is_genuine_crossing, scan_all_brackets, scan_for_bracket,
};
pub use saturn_return::{saturn_longitude_at, saturn_returns, saturn_returns_for_chart};
pub use saturn_return_types::{
    ReturnStatus, SATURN_MEAN_PERIOD_DAYS, SaturnReturn, SaturnReturnAnalysis, SaturnReturnConfig,
    SaturnReturnPass,
};
pub use syzygy::{elongation_at, prenatal_syzygy, syzygy_type_for};
pub use syzygy_types::{SyzygyConfig, SyzygyResult, SyzygyType};
