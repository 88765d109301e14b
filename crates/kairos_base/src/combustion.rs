//! Combustion (being "under the Sun's beams" at close range).

use crate::planet::Planet;
use crate::util::angular_distance;

/// Default combustion orb in degrees.
pub const DEFAULT_COMBUSTION_ORB_DEG: f64 = 8.0;

/// Check if a planet is combust: within `orb_deg` of the Sun.
///
/// A planet at exactly the orb is **not** combust (strict less-than).
/// Returns `false` for the Sun itself, the modern planets and the nodes.
pub fn is_combust(planet: Planet, planet_lon: f64, sun_lon: f64, orb_deg: f64) -> bool {
    if planet == Planet::Sun || !planet.is_traditional() {
        return false;
    }
    angular_distance(planet_lon, sun_lon) < orb_deg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_never_combust() {
        assert!(!is_combust(Planet::Sun, 10.0, 10.0, DEFAULT_COMBUSTION_ORB_DEG));
    }

    #[test]
    fn within_orb() {
        assert!(is_combust(Planet::Mercury, 15.0, 10.0, DEFAULT_COMBUSTION_ORB_DEG));
        assert!(is_combust(Planet::Saturn, 2.0, 358.0, DEFAULT_COMBUSTION_ORB_DEG));
    }

    #[test]
    fn exact_orb_not_combust() {
        assert!(!is_combust(Planet::Venus, 18.0, 10.0, DEFAULT_COMBUSTION_ORB_DEG));
    }

    #[test]
    fn nodes_and_outers_excluded() {
        assert!(!is_combust(Planet::NorthNode, 10.0, 10.5, DEFAULT_COMBUSTION_ORB_DEG));
        assert!(!is_combust(Planet::Uranus, 10.0, 10.5, DEFAULT_COMBUSTION_ORB_DEG));
    }
}
