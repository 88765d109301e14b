//! Traditional (Hellenistic/medieval) chart primitives.
//!
//! This crate provides:
//! - Zodiac signs, elements and sign positions
//! - Planets, domicile/exaltation rulership and benefic/malefic nature
//! - Sect derivation from the Ascendant and Sun
//! - Essential dignity scoring with term (bound) tables for four systems
//!   and Chaldean-order faces
//! - House-cusp containment and angularity
//! - Canonicalized lookup over upstream aspect lists
//! - Combustion, planetary years, and lunar/solar phase buckets
//!
//! All tables are immutable `const` data; every function is pure.

pub mod aspect;
pub mod chart;
pub mod combustion;
pub mod dignity;
pub mod error;
pub mod face;
pub mod house;
pub mod phase;
pub mod planet;
pub mod sect;
pub mod terms;
pub mod util;
pub mod years;
pub mod zodiac;

pub use aspect::{AspectEdge, AspectKind, AspectSet, PointAspect, point_key};
pub use chart::{ChartSnapshot, PlanetPosition};
pub use combustion::{DEFAULT_COMBUSTION_ORB_DEG, is_combust};
pub use dignity::{
    Dignity, DignityConfig, DignityScore, DignityType, TriplicityRulers, dignity_at_longitude,
    evaluate_dignity, triplicity_rulers,
};
pub use error::BaseError;
pub use face::{CHALDEAN_ORDER, face_ruler};
pub use house::{Angularity, HOUSE_COUNT, HouseCusp, HouseCusps, angularity};
pub use phase::{LunarPhase, SolarPhase, lunar_phase, solar_phase};
pub use planet::{ALL_PLANETS, Planet, TRADITIONAL_PLANETS, domicile_lord, domicile_signs, exaltation_sign};
pub use sect::{Sect, sect_from_house, sect_from_longitudes};
pub use terms::{ALL_TERM_SYSTEMS, TermEntry, TermSystem, term_for, term_ruler, terms_of};
pub use util::{angular_distance, normalize_360, normalize_pm180};
pub use years::{PlanetaryYears, YearType, planetary_years};
pub use zodiac::{ALL_SIGNS, Element, Sign, ZodiacPosition, position_from_longitude};
