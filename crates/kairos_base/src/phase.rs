//! Lunar and solar phase buckets.
//!
//! Lunar phase is one of eight 45° segments of the Moon's elongation from
//! the Sun, starting at the conjunction. Solar phase is the season of the
//! Sun's sign, three signs per season from Aries.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::util::normalize_360;
use crate::zodiac::Sign;

/// Eight-fold lunar phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LunarPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    Disseminating,
    LastQuarter,
    Balsamic,
}

const LUNAR_PHASES: [LunarPhase; 8] = [
    LunarPhase::NewMoon,
    LunarPhase::WaxingCrescent,
    LunarPhase::FirstQuarter,
    LunarPhase::WaxingGibbous,
    LunarPhase::FullMoon,
    LunarPhase::Disseminating,
    LunarPhase::LastQuarter,
    LunarPhase::Balsamic,
];

impl LunarPhase {
    pub const fn name(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::Disseminating => "Disseminating",
            Self::LastQuarter => "Last Quarter",
            Self::Balsamic => "Balsamic",
        }
    }

    /// Waxing from New Moon up to (not including) Full Moon.
    pub const fn is_waxing(self) -> bool {
        (self as u8) < 4
    }
}

impl Display for LunarPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lunar phase from the Moon's elongation east of the Sun (Moon − Sun).
pub fn lunar_phase(elongation_deg: f64) -> LunarPhase {
    let idx = ((normalize_360(elongation_deg) / 45.0).floor() as usize).min(7);
    LUNAR_PHASES[idx]
}

/// Season of the Sun's sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolarPhase {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl SolarPhase {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
        }
    }
}

impl Display for SolarPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Aries–Gemini Spring, Cancer–Virgo Summer, Libra–Sagittarius Autumn,
/// Capricorn–Pisces Winter.
pub const fn solar_phase(sun_sign: Sign) -> SolarPhase {
    match sun_sign.index() / 3 {
        0 => SolarPhase::Spring,
        1 => SolarPhase::Summer,
        2 => SolarPhase::Autumn,
        _ => SolarPhase::Winter,
    }
}
