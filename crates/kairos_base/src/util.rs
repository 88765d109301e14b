//! Angle helpers, re-exported from the ephemeris crate.

pub use kairos_core::angle::{angular_distance, normalize_360, normalize_pm180};
