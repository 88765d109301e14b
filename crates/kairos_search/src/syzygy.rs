//! Prenatal syzygy search.
//!
//! The syzygy type is fixed by the elongation at birth: a waxing Moon
//! (elongation below 180°) was last at a New Moon, a waning Moon at a Full
//! Moon. A backward coarse scan from the birth moment brackets the target
//! elongation and bisection refines it. Exhaustion of either phase is
//! fail-soft: the best estimate is returned marked `Approximate`.

use kairos_base::{HouseCusps, normalize_360, normalize_pm180, position_from_longitude};
use kairos_core::{Body, Ephemeris};
use kairos_time::jd_to_utc;

use crate::error::SearchError;
use crate::root::{Precision, Root, find_root, fail_soft, scan_for_bracket};
use crate::syzygy_types::{SyzygyConfig, SyzygyResult, SyzygyType};

/// Moon − Sun elongation in [0, 360) at `jd`.
pub fn elongation_at<E: Ephemeris + ?Sized>(eph: &E, jd: f64) -> Result<f64, SearchError> {
    let sun = eph.position(jd, Body::Sun)?;
    let moon = eph.position(jd, Body::Moon)?;
    Ok(normalize_360(moon.longitude_deg - sun.longitude_deg))
}

/// Syzygy type implied by the elongation at birth.
pub fn syzygy_type_for(elongation_deg: f64) -> SyzygyType {
    if normalize_360(elongation_deg) < 180.0 {
        SyzygyType::NewMoon
    } else {
        SyzygyType::FullMoon
    }
}

/// Find the last New or Full Moon strictly before `birth_jd`.
///
/// House placement of the syzygy degree uses `cusps`.
pub fn prenatal_syzygy<E: Ephemeris + ?Sized>(
    eph: &E,
    birth_jd: f64,
    cusps: &HouseCusps,
    config: &SyzygyConfig,
) -> Result<SyzygyResult, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;

    let birth_elongation = elongation_at(eph, birth_jd)?;
    let syzygy_type = syzygy_type_for(birth_elongation);
    let target = syzygy_type.target_elongation_deg();
    let offset = |jd: f64| -> Result<f64, SearchError> {
        Ok(normalize_pm180(elongation_at(eph, jd)? - target))
    };

    let scan = scan_for_bracket(
        offset,
        birth_jd,
        -config.coarse_step_days,
        config.max_coarse_steps,
    )?;

    let (root, precision) = match scan.bracket {
        Some(bracket) => {
            log::debug!(
                "syzygy bracket [{:.4}, {:.4}] after {} evaluations",
                bracket.a.jd,
                bracket.b.jd,
                scan.evaluations
            );
            fail_soft(find_root(offset, bracket, &config.root_config()))?
        }
        None => {
            log::warn!(
                "no {} found within {} steps before JD {birth_jd}; using closest sample",
                syzygy_type.name(),
                config.max_coarse_steps
            );
            let root = Root {
                jd: scan.closest.jd,
                residual_deg: scan.closest.value.abs(),
                iterations: 0,
            };
            (root, Precision::Approximate)
        }
    };

    build_result(eph, syzygy_type, root, precision, cusps)
}

fn build_result<E: Ephemeris + ?Sized>(
    eph: &E,
    syzygy_type: SyzygyType,
    root: Root,
    precision: Precision,
    cusps: &HouseCusps,
) -> Result<SyzygyResult, SearchError> {
    let sun = eph.position(root.jd, Body::Sun)?;
    let moon = eph.position(root.jd, Body::Moon)?;
    let longitude = match syzygy_type {
        SyzygyType::NewMoon => sun.longitude_deg,
        SyzygyType::FullMoon => moon.longitude_deg,
    };
    let longitude = normalize_360(longitude);
    let elongation_deg = normalize_360(moon.longitude_deg - sun.longitude_deg);
    let pos = position_from_longitude(longitude);

    Ok(SyzygyResult {
        syzygy_type,
        julian_day: root.jd,
        date_utc: jd_to_utc(root.jd)?,
        longitude,
        sign: pos.sign,
        degree: pos.degree,
        minute: pos.minute,
        house: cusps.house_of(longitude),
        elongation_deg,
        residual_deg: normalize_pm180(elongation_deg - syzygy_type.target_elongation_deg()).abs(),
        precision,
    })
}
