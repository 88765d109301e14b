//! Faces (decans).
//!
//! Each sign has three 10° faces. Rulers follow the Chaldean planetary
//! order, starting with Mars at the first face of Aries and continuing
//! without a break through Pisces.

use crate::error::BaseError;
use crate::planet::Planet;
use crate::zodiac::Sign;

/// Chaldean order, slowest to fastest.
pub const CHALDEAN_ORDER: [Planet; 7] = [
    Planet::Saturn,
    Planet::Jupiter,
    Planet::Mars,
    Planet::Sun,
    Planet::Venus,
    Planet::Mercury,
    Planet::Moon,
];

// Position of Mars in CHALDEAN_ORDER.
const ARIES_FIRST_FACE: usize = 2;

/// Face ruler at `degree_in_sign` of `sign`.
pub fn face_ruler(sign: Sign, degree_in_sign: f64) -> Result<Planet, BaseError> {
    if !degree_in_sign.is_finite() || !(0.0..30.0).contains(&degree_in_sign) {
        return Err(BaseError::InvalidDegree(degree_in_sign));
    }
    let decan = ((degree_in_sign / 10.0).floor() as usize).min(2);
    let idx = (ARIES_FIRST_FACE + sign.index() as usize * 3 + decan) % CHALDEAN_ORDER.len();
    Ok(CHALDEAN_ORDER[idx])
}
