//! Zodiac signs and sign positions.
//!
//! The ecliptic is divided into 12 equal signs of 30 degrees starting from
//! Aries at 0°. A longitude is expressed as a sign plus the degree and
//! arc-minute within it.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BaseError;
use crate::util::normalize_360;

/// The 12 signs of the tropical zodiac.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in zodiacal order (0 = Aries, 11 = Pisces).
pub const ALL_SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

/// The four classical elements (triplicities).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Sign {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// 0-based index (Aries=0 .. Pisces=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Sign by 0-based index, wrapping modulo 12.
    pub const fn from_index(index: u8) -> Self {
        ALL_SIGNS[(index % 12) as usize]
    }

    /// The sign 180° away.
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 6)
    }

    /// Element cycles Fire, Earth, Air, Water from Aries.
    pub const fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Longitude of 0° of this sign.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * 30.0
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sign {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_SIGNS
            .iter()
            .copied()
            .find(|sign| sign.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BaseError::UnknownSign(s.to_string()))
    }
}

impl TryFrom<String> for Sign {
    type Error = BaseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Sign> for String {
    fn from(sign: Sign) -> Self {
        sign.name().to_string()
    }
}

/// A longitude broken down into sign, degree and arc-minute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZodiacPosition {
    pub sign: Sign,
    /// Decimal degrees within the sign [0, 30).
    pub degree_in_sign: f64,
    /// Whole degrees within the sign (0..29).
    pub degree: u8,
    /// Whole arc-minutes (0..59).
    pub minute: u8,
}

/// Sign position of an ecliptic longitude. Input is normalized first.
pub fn position_from_longitude(longitude: f64) -> ZodiacPosition {
    let lon = normalize_360(longitude);
    // Clamp to 11 in case of floating point edge (exactly 360.0)
    let idx = ((lon / 30.0).floor() as u8).min(11);
    let degree_in_sign = (lon - idx as f64 * 30.0).max(0.0);
    let degree = (degree_in_sign.floor() as u8).min(29);
    let minute = (((degree_in_sign - degree as f64) * 60.0).floor() as u8).min(59);
    ZodiacPosition {
        sign: Sign::from_index(idx),
        degree_in_sign,
        degree,
        minute,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, s) in ALL_SIGNS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
            assert_eq!(Sign::from_index(i as u8), *s);
        }
    }

    #[test]
    fn opposites() {
        assert_eq!(Sign::Aries.opposite(), Sign::Libra);
        assert_eq!(Sign::Leo.opposite(), Sign::Aquarius);
        assert_eq!(Sign::Pisces.opposite(), Sign::Virgo);
    }

    #[test]
    fn elements() {
        assert_eq!(Sign::Aries.element(), Element::Fire);
        assert_eq!(Sign::Virgo.element(), Element::Earth);
        assert_eq!(Sign::Aquarius.element(), Element::Air);
        assert_eq!(Sign::Scorpio.element(), Element::Water);
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!("scorpio".parse::<Sign>().unwrap(), Sign::Scorpio);
        assert_eq!(" Leo ".parse::<Sign>().unwrap(), Sign::Leo);
        assert!(matches!("Ophiuchus".parse::<Sign>(), Err(BaseError::UnknownSign(_))));
    }

    #[test]
    fn position_boundaries() {
        for i in 0..12u8 {
            let p = position_from_longitude(i as f64 * 30.0);
            assert_eq!(p.sign.index(), i);
            assert!(p.degree_in_sign.abs() < 1e-10);
        }
    }

    #[test]
    fn position_degree_minute() {
        // 45.5° → Taurus 15°30'
        let p = position_from_longitude(45.5);
        assert_eq!(p.sign, Sign::Taurus);
        assert_eq!(p.degree, 15);
        assert_eq!(p.minute, 30);
    }

    #[test]
    fn position_wraps() {
        assert_eq!(position_from_longitude(365.0).sign, Sign::Aries);
        assert_eq!(position_from_longitude(-10.0).sign, Sign::Pisces);
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&Sign::Capricorn).unwrap();
        assert_eq!(json, "\"Capricorn\"");
        let back: Sign = serde_json::from_str("\"capricorn\"").unwrap();
        assert_eq!(back, Sign::Capricorn);
    }
}
