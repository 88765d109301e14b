//! Low-precision analytic ephemeris.
//!
//! - Sun: low-accuracy solar theory (Meeus ch. 25), apparent longitude of date.
//! - Moon: principal periodic terms of the lunar theory (Meeus ch. 47).
//! - Planets: J2000 Keplerian elements with linear secular rates
//!   (Standish, "Approximate Positions of the Planets", table 1), reduced
//!   from heliocentric to geocentric and precessed to the equinox of date.
//!
//! Longitude errors are around an arc-minute for the Sun and planets and a
//! few hundredths of a degree for the Moon inside the validity span. Speeds
//! come from a central difference over [`SPEED_STEP_DAYS`].

use kairos_time::julian_centuries_since_j2000;

use crate::angle::{normalize_360, normalize_pm180};
use crate::{Body, BodyPosition, Ephemeris, EphemerisError};

/// 1800-01-01T00:00 UTC.
pub const MIN_JD: f64 = 2_378_496.5;
/// 2100-01-01T00:00 UTC.
pub const MAX_JD: f64 = 2_488_069.5;

/// Half-width of the central difference used for speeds, in days.
pub const SPEED_STEP_DAYS: f64 = 0.01;

/// General precession in longitude, degrees per Julian century.
const PRECESSION_DEG_PER_CENTURY: f64 = 1.396_971_3;

const KEPLER_MAX_ITER: usize = 30;
const KEPLER_TOLERANCE_DEG: f64 = 1e-9;

/// Self-contained ephemeris valid from 1800 to 2100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Ecliptic (longitude, latitude) of `body` in degrees, equinox of date.
    pub fn lon_lat(&self, jd: f64, body: Body) -> Result<(f64, f64), EphemerisError> {
        if !jd.is_finite() || !(MIN_JD..=MAX_JD).contains(&jd) {
            return Err(EphemerisError::OutOfRange(jd));
        }
        let t = julian_centuries_since_j2000(jd);
        let (lon, lat) = match body {
            Body::Sun => (sun_longitude(t), 0.0),
            Body::Moon => moon_lon_lat(t),
            planet => {
                let elements = elements_for(planet).ok_or(EphemerisError::UnsupportedBody(planet))?;
                planet_lon_lat(elements, t)
            }
        };
        Ok((normalize_360(lon), lat))
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn position(&self, jd: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
        let (lon, lat) = self.lon_lat(jd, body)?;
        let (before, _) = self.lon_lat((jd - SPEED_STEP_DAYS).max(MIN_JD), body)?;
        let (after, _) = self.lon_lat((jd + SPEED_STEP_DAYS).min(MAX_JD), body)?;
        let span = (jd + SPEED_STEP_DAYS).min(MAX_JD) - (jd - SPEED_STEP_DAYS).max(MIN_JD);
        Ok(BodyPosition {
            longitude_deg: lon,
            latitude_deg: lat,
            speed_deg_per_day: normalize_pm180(after - before) / span,
        })
    }
}

// ---------------------------------------------------------------------------
// Sun
// ---------------------------------------------------------------------------

fn sun_longitude(t: f64) -> f64 {
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1_934.136 * t).to_radians();
    l0 + c - 0.005_69 - 0.004_78 * omega.sin()
}

// ---------------------------------------------------------------------------
// Moon
// ---------------------------------------------------------------------------

/// Longitude terms: multiples of (D, M, M', F) and coefficient in 1e-6 degrees.
const MOON_LON_TERMS: [(i8, i8, i8, i8, f64); 32] = [
    (0, 0, 1, 0, 6_288_774.0),
    (2, 0, -1, 0, 1_274_027.0),
    (2, 0, 0, 0, 658_314.0),
    (0, 0, 2, 0, 213_618.0),
    (0, 1, 0, 0, -185_116.0),
    (0, 0, 0, 2, -114_332.0),
    (2, 0, -2, 0, 58_793.0),
    (2, -1, -1, 0, 57_066.0),
    (2, 0, 1, 0, 53_322.0),
    (2, -1, 0, 0, 45_758.0),
    (0, 1, -1, 0, -40_923.0),
    (1, 0, 0, 0, -34_720.0),
    (0, 1, 1, 0, -30_383.0),
    (2, 0, 0, -2, 15_327.0),
    (0, 0, 1, 2, -12_528.0),
    (0, 0, 1, -2, 10_980.0),
    (4, 0, -1, 0, 10_675.0),
    (0, 0, 3, 0, 10_034.0),
    (4, 0, -2, 0, 8_548.0),
    (2, 1, -1, 0, -7_888.0),
    (2, 1, 0, 0, -6_766.0),
    (1, 0, -1, 0, -5_163.0),
    (1, 1, 0, 0, 4_987.0),
    (2, -1, 1, 0, 4_036.0),
    (2, 0, 2, 0, 3_994.0),
    (4, 0, 0, 0, 3_861.0),
    (2, 0, -3, 0, 3_665.0),
    (0, 1, -2, 0, -2_689.0),
    (2, 0, -1, 2, -2_602.0),
    (2, -1, -2, 0, 2_390.0),
    (1, 0, 1, 0, -2_348.0),
    (2, -2, 0, 0, 2_236.0),
];

/// Latitude terms: multiples of (D, M, M', F) and coefficient in 1e-6 degrees.
const MOON_LAT_TERMS: [(i8, i8, i8, i8, f64); 10] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
];

fn moon_lon_lat(t: f64) -> (f64, f64) {
    let t2 = t * t;
    let l_prime = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2;
    let d = (297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2).to_radians();
    let m = (357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2).to_radians();
    let m_prime = (134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2).to_radians();
    let f = (93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2).to_radians();
    // Eccentricity correction for terms involving the Sun's anomaly.
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let argument = |cd: i8, cm: i8, cmp: i8, cf: i8| {
        cd as f64 * d + cm as f64 * m + cmp as f64 * m_prime + cf as f64 * f
    };
    let e_factor = |cm: i8| match cm.abs() {
        1 => e,
        2 => e * e,
        _ => 1.0,
    };

    let sigma_l: f64 = MOON_LON_TERMS
        .iter()
        .map(|&(cd, cm, cmp, cf, coeff)| coeff * e_factor(cm) * argument(cd, cm, cmp, cf).sin())
        .sum();
    let sigma_b: f64 = MOON_LAT_TERMS
        .iter()
        .map(|&(cd, cm, cmp, cf, coeff)| coeff * e_factor(cm) * argument(cd, cm, cmp, cf).sin())
        .sum();

    (l_prime + sigma_l / 1e6, sigma_b / 1e6)
}

// ---------------------------------------------------------------------------
// Planets
// ---------------------------------------------------------------------------

/// Keplerian elements at J2000 and their rates per Julian century.
#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    a: (f64, f64),
    e: (f64, f64),
    incl: (f64, f64),
    mean_lon: (f64, f64),
    peri_lon: (f64, f64),
    node_lon: (f64, f64),
}

const EARTH_MOON_BARYCENTER: OrbitalElements = OrbitalElements {
    a: (1.000_002_61, 0.000_005_62),
    e: (0.016_711_23, -0.000_043_92),
    incl: (-0.000_015_31, -0.012_946_68),
    mean_lon: (100.464_571_66, 35_999.372_449_81),
    peri_lon: (102.937_681_93, 0.323_273_64),
    node_lon: (0.0, 0.0),
};

fn elements_for(body: Body) -> Option<OrbitalElements> {
    let el = match body {
        Body::Mercury => OrbitalElements {
            a: (0.387_099_27, 0.000_000_37),
            e: (0.205_635_93, 0.000_019_06),
            incl: (7.004_979_02, -0.005_947_49),
            mean_lon: (252.250_323_50, 149_472.674_111_75),
            peri_lon: (77.457_796_28, 0.160_476_89),
            node_lon: (48.330_765_93, -0.125_340_81),
        },
        Body::Venus => OrbitalElements {
            a: (0.723_335_66, 0.000_003_90),
            e: (0.006_776_72, -0.000_041_07),
            incl: (3.394_676_05, -0.000_788_90),
            mean_lon: (181.979_099_50, 58_517.815_387_29),
            peri_lon: (131.602_467_18, 0.002_683_29),
            node_lon: (76.679_842_55, -0.277_694_18),
        },
        Body::Mars => OrbitalElements {
            a: (1.523_710_34, 0.000_018_47),
            e: (0.093_394_10, 0.000_078_82),
            incl: (1.849_691_42, -0.008_131_31),
            mean_lon: (-4.553_432_05, 19_140.302_684_99),
            peri_lon: (-23.943_629_59, 0.444_410_88),
            node_lon: (49.559_538_91, -0.292_573_43),
        },
        Body::Jupiter => OrbitalElements {
            a: (5.202_887_00, -0.000_116_07),
            e: (0.048_386_24, -0.000_132_53),
            incl: (1.304_396_95, -0.001_837_14),
            mean_lon: (34.396_440_51, 3_034.746_127_75),
            peri_lon: (14.728_479_83, 0.212_526_68),
            node_lon: (100.473_909_09, 0.204_691_06),
        },
        Body::Saturn => OrbitalElements {
            a: (9.536_675_94, -0.001_250_60),
            e: (0.053_861_79, -0.000_509_91),
            incl: (2.485_991_87, 0.001_936_09),
            mean_lon: (49.954_244_23, 1_222.493_622_01),
            peri_lon: (92.598_878_31, -0.418_972_16),
            node_lon: (113.662_424_48, -0.288_677_94),
        },
        Body::Uranus => OrbitalElements {
            a: (19.189_164_64, -0.001_961_76),
            e: (0.047_257_44, -0.000_043_97),
            incl: (0.772_637_83, -0.002_429_39),
            mean_lon: (313.238_104_51, 428.482_027_85),
            peri_lon: (170.954_276_30, 0.408_052_81),
            node_lon: (74.016_925_03, 0.042_405_89),
        },
        Body::Neptune => OrbitalElements {
            a: (30.069_922_76, 0.000_262_91),
            e: (0.008_590_48, 0.000_051_05),
            incl: (1.770_043_47, 0.000_353_72),
            mean_lon: (-55.120_029_69, 218.459_453_25),
            peri_lon: (44.964_762_27, -0.322_414_64),
            node_lon: (131.784_225_74, -0.005_086_64),
        },
        Body::Pluto => OrbitalElements {
            a: (39.482_116_75, -0.000_315_96),
            e: (0.248_827_30, 0.000_051_70),
            incl: (17.140_012_06, 0.000_048_18),
            mean_lon: (238.929_038_33, 145.207_805_15),
            peri_lon: (224.068_916_29, -0.040_629_42),
            node_lon: (110.303_936_84, -0.011_834_82),
        },
        Body::Sun | Body::Moon => return None,
    };
    Some(el)
}

/// Heliocentric ecliptic J2000 position in AU.
fn heliocentric_xyz(el: OrbitalElements, t: f64) -> [f64; 3] {
    let at = |(v0, rate): (f64, f64)| v0 + rate * t;
    let a = at(el.a);
    let e = at(el.e);
    let incl = at(el.incl).to_radians();
    let mean_lon = at(el.mean_lon);
    let peri_lon = at(el.peri_lon);
    let node = at(el.node_lon);

    let arg_peri = (peri_lon - node).to_radians();
    let mean_anomaly = normalize_pm180(mean_lon - peri_lon);
    let ecc_anomaly = solve_kepler(mean_anomaly, e).to_radians();

    let x_orb = a * (ecc_anomaly.cos() - e);
    let y_orb = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

    let (sw, cw) = arg_peri.sin_cos();
    let (so, co) = node.to_radians().sin_cos();
    let (si, ci) = incl.sin_cos();

    [
        (cw * co - sw * so * ci) * x_orb + (-sw * co - cw * so * ci) * y_orb,
        (cw * so + sw * co * ci) * x_orb + (-sw * so + cw * co * ci) * y_orb,
        (sw * si) * x_orb + (cw * si) * y_orb,
    ]
}

/// Solve Kepler's equation `E - e·sin(E) = M` with all angles in degrees.
fn solve_kepler(mean_anomaly_deg: f64, e: f64) -> f64 {
    let e_deg = e.to_degrees();
    let mut ecc = mean_anomaly_deg + e_deg * mean_anomaly_deg.to_radians().sin();
    for _ in 0..KEPLER_MAX_ITER {
        let delta_m = mean_anomaly_deg - (ecc - e_deg * ecc.to_radians().sin());
        let delta_e = delta_m / (1.0 - e * ecc.to_radians().cos());
        ecc += delta_e;
        if delta_e.abs() < KEPLER_TOLERANCE_DEG {
            break;
        }
    }
    ecc
}

fn planet_lon_lat(el: OrbitalElements, t: f64) -> (f64, f64) {
    let planet = heliocentric_xyz(el, t);
    let earth = heliocentric_xyz(EARTH_MOON_BARYCENTER, t);
    let x = planet[0] - earth[0];
    let y = planet[1] - earth[1];
    let z = planet[2] - earth[2];
    let lon = y.atan2(x).to_degrees() + PRECESSION_DEG_PER_CENTURY * t;
    let lat = z.atan2((x * x + y * y).sqrt()).to_degrees();
    (lon, lat)
}
