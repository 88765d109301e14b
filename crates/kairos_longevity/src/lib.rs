//! Traditional longevity method over a stored natal chart.
//!
//! This crate provides:
//! - A generic evaluate-qualify-select candidate pipeline
//! - Hyleg selection (first qualifying candidate in sect order)
//! - Alcochoden selection (best candidate by dignity, then orb) and the
//!   planetary years it grants, with modifiers
//! - A summary with qualitative vital-force and confidence readings
//!
//! Not finding a Hyleg or an Alcochoden is a normal outcome carried in the
//! result types, never an error.

pub mod alcochoden;
pub mod alcochoden_types;
pub mod error;
pub mod hyleg;
pub mod hyleg_types;
pub mod longevity;
pub mod longevity_types;
pub mod pipeline;

pub use alcochoden::{select_alcochoden, year_type_for};
pub use alcochoden_types::{
    AlcochodenCandidate, AlcochodenConfig, AlcochodenData, AlcochodenResult, ModificationKind,
    YearModification,
};
pub use error::LongevityError;
pub use hyleg::{hyleg_order, part_of_fortune, select_hyleg};
pub use hyleg_types::{
    HYLEGICAL_HOUSES, HylegCandidate, HylegConfig, HylegData, HylegPoint, HylegResult,
    is_hylegical_house,
};
pub use longevity::{classify_vital_force, classify_years_confidence, longevity_summary};
pub use longevity_types::{
    DISCLAIMER, LongevityConfig, LongevitySummary, VitalForce, YearsConfidence,
};
pub use pipeline::{BestBy, FirstMatch, Outcome, SelectionPolicy, evaluate_candidates};
