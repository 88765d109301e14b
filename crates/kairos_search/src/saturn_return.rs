//! Saturn return search.
//!
//! For the n-th return the mean-period estimate `birth + n * P` anchors a
//! scan window. Every genuine crossing of
//! `f(t) = normalize_pm180(lon_saturn(t) - natal)` inside the window is a
//! pass; retrograde loops near the natal degree produce three. Each pass is
//! refined by bisection; exhaustion is fail-soft.
//!
//! Saturn's speed is sampled with its longitude. Where it changes sign
//! between two samples the interval is split at the station, so a loop
//! that dips across the natal degree and back within one step still
//! yields both crossings.
//!
//! An ephemeris that runs out of range after both the birth and the
//! `as_of` moment ends the search: the analysis lists the returns found
//! up to the provider's limit.

use kairos_base::{BaseError, ChartSnapshot, Planet, normalize_360, normalize_pm180};
use kairos_core::{Body, Ephemeris, EphemerisError};
use kairos_time::{DAYS_PER_JULIAN_YEAR, jd_to_utc, years_between};

use crate::error::SearchError;
use crate::root::{Bracket, Sample, fail_soft, find_root, push_crossing};
use crate::saturn_return_types::{
    ReturnStatus, SATURN_MEAN_PERIOD_DAYS, SaturnReturn, SaturnReturnAnalysis, SaturnReturnConfig,
    SaturnReturnPass,
};

/// More than three crossings in one window means the window spans
/// unrelated motion; only the first three are kept.
const MAX_PASSES: usize = 3;

/// Station bisection stops below this bracket width, in days.
const STATION_TOLERANCE_DAYS: f64 = 1e-3;

/// Saturn's longitude at `jd` from the ephemeris port.
pub fn saturn_longitude_at<E: Ephemeris + ?Sized>(eph: &E, jd: f64) -> Result<f64, SearchError> {
    Ok(normalize_360(eph.position(jd, Body::Saturn)?.longitude_deg))
}

/// Find every Saturn return from birth to the age horizon and classify
/// them relative to `as_of_jd`.
///
/// When the ephemeris reports `OutOfRange` for a moment later than both
/// `birth_jd` and `as_of_jd`, the search stops there and returns what it
/// found; returns past the provider's range are left out. Earlier range
/// failures are errors.
pub fn saturn_returns<E: Ephemeris + ?Sized>(
    eph: &E,
    natal_longitude: f64,
    birth_jd: f64,
    as_of_jd: f64,
    config: &SaturnReturnConfig,
) -> Result<SaturnReturnAnalysis, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    if !natal_longitude.is_finite() || !(0.0..360.0).contains(&natal_longitude) {
        return Err(BaseError::InvalidLongitude(natal_longitude).into());
    }
    if !birth_jd.is_finite() {
        return Err(SearchError::DateOutOfRange(birth_jd));
    }
    if !as_of_jd.is_finite() {
        return Err(SearchError::DateOutOfRange(as_of_jd));
    }

    let horizon_jd = birth_jd + config.max_age_years * DAYS_PER_JULIAN_YEAR;
    let max_returns =
        (config.max_age_years * DAYS_PER_JULIAN_YEAR / SATURN_MEAN_PERIOD_DAYS).ceil() as u32 + 1;
    let offset = |jd: f64| -> Result<f64, SearchError> {
        Ok(normalize_pm180(saturn_longitude_at(eph, jd)? - natal_longitude))
    };
    let soft_after = birth_jd.max(as_of_jd);

    let mut returns = Vec::new();
    for n in 1..=max_returns {
        let estimate = birth_jd + n as f64 * SATURN_MEAN_PERIOD_DAYS;
        let window_start = estimate - config.search_window_days;
        if window_start > horizon_jd {
            break;
        }
        let window_end = estimate + config.search_window_days;

        let WindowScan { brackets, range_end } = scan_window(
            eph,
            natal_longitude,
            window_start,
            window_end,
            soft_after,
            config.step_size_days,
        )?;
        if brackets.is_empty() {
            match range_end {
                Some(end) => {
                    log::warn!("ephemeris ends at JD {end:.1}; Saturn returns searched up to there");
                    break;
                }
                None => {
                    log::warn!(
                        "no Saturn crossing of {natal_longitude:.4}° within ±{} days of JD {estimate:.1}",
                        config.search_window_days
                    );
                    continue;
                }
            }
        }
        if brackets.len() > MAX_PASSES {
            log::warn!(
                "{} crossings near JD {estimate:.1}; keeping the first {MAX_PASSES}",
                brackets.len()
            );
        }

        let mut passes = Vec::with_capacity(MAX_PASSES);
        for bracket in brackets.into_iter().take(MAX_PASSES) {
            let (root, precision) = fail_soft(find_root(offset, bracket, &config.root_config()))?;
            let pos = eph.position(root.jd, Body::Saturn)?;
            passes.push(SaturnReturnPass {
                pass_number: passes.len() as u8 + 1,
                julian_day: root.jd,
                date_utc: jd_to_utc(root.jd)?,
                longitude: normalize_360(pos.longitude_deg),
                speed_deg_per_day: pos.speed_deg_per_day,
                is_retrograde: pos.is_retrograde(),
                precision,
            });
        }

        let first_jd = passes[0].julian_day;
        if first_jd > horizon_jd {
            break;
        }
        log::debug!("Saturn return {n}: {} pass(es) from JD {first_jd:.4}", passes.len());
        let mut ret = SaturnReturn {
            return_number: returns.len() as u8 + 1,
            age_at_return: years_between(birth_jd, first_jd),
            passes,
            status: ReturnStatus::Future,
        };
        ret.status = classify(&ret, as_of_jd, config.current_window_days);
        returns.push(ret);
        if let Some(end) = range_end {
            log::warn!("ephemeris ends at JD {end:.1}; return {n} may be missing later passes");
            break;
        }
    }

    Ok(analyze(natal_longitude, birth_jd, as_of_jd, returns))
}

/// [`saturn_returns`] with natal Saturn and birth moment taken from a chart.
///
/// Fails with `MissingRequiredPlanet` when the chart has no Saturn, and
/// with `MissingBirthTime` when it has no birth Julian Day.
pub fn saturn_returns_for_chart<E: Ephemeris + ?Sized>(
    eph: &E,
    chart: &ChartSnapshot,
    as_of_jd: f64,
    config: &SaturnReturnConfig,
) -> Result<SaturnReturnAnalysis, SearchError> {
    let saturn = chart
        .planet(Planet::Saturn)
        .ok_or(SearchError::MissingRequiredPlanet(Planet::Saturn.name()))?;
    let birth_jd = chart.birth_jd.ok_or(SearchError::MissingBirthTime)?;
    saturn_returns(eph, saturn.longitude, birth_jd, as_of_jd, config)
}

/// Crossings found in one scan window.
struct WindowScan {
    brackets: Vec<Bracket>,
    /// First Julian Day the ephemeris could not serve; the scan ended there.
    range_end: Option<f64>,
}

/// Offset from the natal degree and speed of Saturn at `jd`.
fn saturn_sample<E: Ephemeris + ?Sized>(
    eph: &E,
    natal: f64,
    jd: f64,
) -> Result<(Sample, f64), EphemerisError> {
    let pos = eph.position(jd, Body::Saturn)?;
    let value = normalize_pm180(pos.longitude_deg - natal);
    Ok((Sample { jd, value }, pos.speed_deg_per_day))
}

/// Every crossing of `natal` on `[from, to]`, sampled at `step_days` and
/// split at stations. `OutOfRange` past `soft_after` ends the scan.
fn scan_window<E: Ephemeris + ?Sized>(
    eph: &E,
    natal: f64,
    from: f64,
    to: f64,
    soft_after: f64,
    step_days: f64,
) -> Result<WindowScan, SearchError> {
    let mut brackets = Vec::new();
    let mut last: Option<(Sample, f64)> = None;
    let steps = ((to - from) / step_days).ceil().max(0.0) as usize;
    for i in 0..=steps {
        let jd = (from + i as f64 * step_days).min(to);
        let curr = match saturn_sample(eph, natal, jd) {
            Ok(s) => s,
            Err(EphemerisError::OutOfRange(end)) if end > soft_after => {
                return Ok(WindowScan {
                    brackets,
                    range_end: Some(end),
                });
            }
            Err(e) => return Err(e.into()),
        };
        if let Some((prev, prev_speed)) = last {
            if prev_speed * curr.1 < 0.0 {
                let station = station_between(eph, natal, prev.jd, jd)?;
                push_crossing(&mut brackets, prev, station);
                push_crossing(&mut brackets, station, curr.0);
            } else {
                push_crossing(&mut brackets, prev, curr.0);
            }
        }
        last = Some(curr);
    }
    Ok(WindowScan {
        brackets,
        range_end: None,
    })
}

/// Bisect on the sign of Saturn's speed between `a` and `b`, which must
/// straddle a station.
fn station_between<E: Ephemeris + ?Sized>(
    eph: &E,
    natal: f64,
    mut a: f64,
    mut b: f64,
) -> Result<Sample, SearchError> {
    let speed_a = eph.position(a, Body::Saturn)?.speed_deg_per_day;
    while b - a > STATION_TOLERANCE_DAYS {
        let mid = 0.5 * (a + b);
        let speed = eph.position(mid, Body::Saturn)?.speed_deg_per_day;
        if speed * speed_a > 0.0 {
            a = mid;
        } else {
            b = mid;
        }
    }
    let (station, _) = saturn_sample(eph, natal, 0.5 * (a + b))?;
    log::trace!("Saturn station at JD {:.3}", station.jd);
    Ok(station)
}

fn classify(ret: &SaturnReturn, as_of_jd: f64, window_days: f64) -> ReturnStatus {
    if as_of_jd < ret.start_jd() - window_days {
        ReturnStatus::Future
    } else if as_of_jd > ret.end_jd() + window_days {
        ReturnStatus::Past
    } else {
        ReturnStatus::Current
    }
}

fn analyze(
    natal_longitude: f64,
    birth_jd: f64,
    as_of_jd: f64,
    returns: Vec<SaturnReturn>,
) -> SaturnReturnAnalysis {
    let current_return = returns
        .iter()
        .find(|r| r.status == ReturnStatus::Current)
        .cloned();
    let next_return = returns.iter().find(|r| r.start_jd() > as_of_jd).cloned();
    let days_until_next_return = next_return.as_ref().map(|r| r.start_jd() - as_of_jd);

    let cycle_start = returns
        .iter()
        .map(SaturnReturn::start_jd)
        .filter(|&jd| jd <= as_of_jd)
        .fold(birth_jd, f64::max);
    let cycle_progress_percent =
        ((as_of_jd - cycle_start) / SATURN_MEAN_PERIOD_DAYS * 100.0).clamp(0.0, 100.0);

    SaturnReturnAnalysis {
        natal_longitude,
        birth_jd,
        as_of_jd,
        returns,
        current_return,
        next_return,
        days_until_next_return,
        cycle_progress_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kairos_core::{BodyPosition, EphemerisError};
    use std::f64::consts::TAU;

    const MEAN_RATE: f64 = 360.0 / SATURN_MEAN_PERIOD_DAYS;
    const SYNODIC_DAYS: f64 = 378.09;

    /// Saturn with mean motion plus an optional epicycle of `amp` degrees.
    struct Synthetic {
        l0: f64,
        amp: f64,
    }

    impl Synthetic {
        fn lon(&self, t: f64) -> f64 {
            self.l0 + MEAN_RATE * t + self.amp * (TAU * t / SYNODIC_DAYS).sin()
        }
    }

    impl Ephemeris for Synthetic {
        fn position(&self, jd: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
            if body != Body::Saturn {
                return Err(EphemerisError::UnsupportedBody(body));
            }
            let speed = MEAN_RATE + self.amp * TAU / SYNODIC_DAYS * (TAU * jd / SYNODIC_DAYS).cos();
            Ok(BodyPosition {
                longitude_deg: normalize_360(self.lon(jd)),
                latitude_deg: 0.0,
                speed_deg_per_day: speed,
            })
        }
    }

    fn linear() -> Synthetic {
        Synthetic { l0: 40.0, amp: 0.0 }
    }

    fn looping() -> Synthetic {
        Synthetic { l0: 40.0, amp: 6.0 }
    }

    #[test]
    fn linear_motion_single_pass_each_period() {
        let eph = linear();
        let natal = eph.lon(0.0);
        let a = saturn_returns(&eph, natal, 0.0, 0.0, &SaturnReturnConfig::default()).unwrap();
        assert_eq!(a.returns.len(), 3);
        for (i, r) in a.returns.iter().enumerate() {
            assert_eq!(r.return_number as usize, i + 1);
            assert_eq!(r.passes.len(), 1);
            assert!(!r.passes[0].is_retrograde);
            let expected = (i + 1) as f64 * SATURN_MEAN_PERIOD_DAYS;
            assert!((r.start_jd() - expected).abs() < 1e-3, "return {} at {}", i + 1, r.start_jd());
        }
    }

    #[test]
    fn mean_interval_between_returns() {
        let eph = linear();
        let a = saturn_returns(&eph, eph.lon(0.0), 0.0, 0.0, &SaturnReturnConfig::default()).unwrap();
        let starts: Vec<f64> = a.returns.iter().map(SaturnReturn::start_jd).collect();
        let mean_days = (starts[starts.len() - 1] - starts[0]) / (starts.len() - 1) as f64;
        let years = mean_days / DAYS_PER_JULIAN_YEAR;
        assert!((29.4..=29.5).contains(&years), "{years}");
    }

    #[test]
    fn retrograde_loop_gives_three_passes() {
        let eph = looping();
        let natal = normalize_360(eph.lon(0.0));
        let a = saturn_returns(&eph, natal, 0.0, 0.0, &SaturnReturnConfig::default()).unwrap();
        let counts: Vec<usize> = a.returns.iter().map(|r| r.passes.len()).collect();
        assert_eq!(counts, vec![3, 1, 3]);

        let first = &a.returns[0];
        assert!(!first.passes[0].is_retrograde);
        assert!(first.passes[1].is_retrograde);
        assert!(!first.passes[2].is_retrograde);
        for pair in first.passes.windows(2) {
            assert!(pair[0].julian_day < pair[1].julian_day);
        }
        for (i, p) in first.passes.iter().enumerate() {
            assert_eq!(p.pass_number as usize, i + 1);
            assert!(normalize_pm180(p.longitude - natal).abs() < 0.1);
        }
    }

    #[test]
    fn pass_counts_always_one_to_three() {
        for birth in [50.0, 150.0, 250.0, 350.0] {
            let eph = looping();
            let natal = normalize_360(eph.lon(birth));
            let a = saturn_returns(&eph, natal, birth, birth, &SaturnReturnConfig::default()).unwrap();
            assert!(!a.returns.is_empty());
            for r in &a.returns {
                assert!((1..=3).contains(&r.passes.len()), "birth {birth}: {}", r.passes.len());
            }
        }
    }

    #[test]
    fn status_and_next_return() {
        let eph = linear();
        let natal = eph.lon(0.0);
        // 40 years after birth: first return past, second future.
        let as_of = 40.0 * DAYS_PER_JULIAN_YEAR;
        let a = saturn_returns(&eph, natal, 0.0, as_of, &SaturnReturnConfig::default()).unwrap();
        assert_eq!(a.returns[0].status, ReturnStatus::Past);
        assert_eq!(a.returns[1].status, ReturnStatus::Future);
        assert!(a.current_return.is_none());
        let next = a.next_return.as_ref().unwrap();
        assert_eq!(next.return_number, 2);
        let days = a.days_until_next_return.unwrap();
        assert!((days - (2.0 * SATURN_MEAN_PERIOD_DAYS - as_of)).abs() < 1e-3);
        let expected = (as_of - SATURN_MEAN_PERIOD_DAYS) / SATURN_MEAN_PERIOD_DAYS * 100.0;
        assert!((a.cycle_progress_percent - expected).abs() < 1e-3);
    }

    #[test]
    fn current_return_within_window() {
        let eph = linear();
        let as_of = SATURN_MEAN_PERIOD_DAYS + 100.0;
        let a = saturn_returns(&eph, eph.lon(0.0), 0.0, as_of, &SaturnReturnConfig::default()).unwrap();
        assert_eq!(a.current_return.as_ref().map(|r| r.return_number), Some(1));
        assert!(a.cycle_progress_percent < 1.0);
    }

    #[test]
    fn no_next_return_past_horizon() {
        let eph = linear();
        let as_of = 95.0 * DAYS_PER_JULIAN_YEAR;
        let a = saturn_returns(&eph, eph.lon(0.0), 0.0, as_of, &SaturnReturnConfig::default()).unwrap();
        assert!(a.next_return.is_none());
        assert!(a.days_until_next_return.is_none());
        assert!((0.0..=100.0).contains(&a.cycle_progress_percent));
    }

    #[test]
    fn progress_zero_at_own_return() {
        let eph = looping();
        let natal = normalize_360(eph.lon(0.0));
        let a = saturn_returns(&eph, natal, 0.0, 0.0, &SaturnReturnConfig::default()).unwrap();
        let pass = &a.returns[0].passes[0];
        let again = saturn_returns(
            &eph,
            pass.longitude,
            pass.julian_day,
            pass.julian_day,
            &SaturnReturnConfig::default(),
        )
        .unwrap();
        assert!(again.cycle_progress_percent.abs() < 1e-9);
    }

    #[test]
    fn station_near_natal_degree_keeps_both_crossings() {
        let eph = looping();
        let w = TAU / SYNODIC_DAYS;
        // Direct-to-retrograde station inside the first return window.
        let station = (28.0 * TAU + (-MEAN_RATE / (eph.amp * w)).acos()) / w;
        assert!(eph.position(station, Body::Saturn).unwrap().speed_deg_per_day.abs() < 1e-9);
        // Saturn dips 0.001° back across the natal degree; both crossings
        // fall between two 4-day samples.
        let natal = normalize_360(eph.lon(station) - 0.001);
        let a = saturn_returns(&eph, natal, 0.0, 0.0, &SaturnReturnConfig::default()).unwrap();
        let first = &a.returns[0];
        assert_eq!(first.passes.len(), 3, "{:?}", first.passes);
        assert!(!first.passes[0].is_retrograde);
        assert!(first.passes[1].is_retrograde);
        assert!(!first.passes[2].is_retrograde);
        assert!((first.passes[0].julian_day - station).abs() < 3.0);
        assert!((first.passes[1].julian_day - station).abs() < 3.0);
        for p in &first.passes {
            assert_eq!(p.precision, crate::root::Precision::Exact);
        }
    }

    /// Synthetic Saturn that has no data after `max_jd`.
    struct Bounded {
        inner: Synthetic,
        max_jd: f64,
    }

    impl Ephemeris for Bounded {
        fn position(&self, jd: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
            if jd > self.max_jd {
                return Err(EphemerisError::OutOfRange(jd));
            }
            self.inner.position(jd, body)
        }
    }

    #[test]
    fn ephemeris_range_end_stops_search() {
        let eph = Bounded {
            inner: linear(),
            max_jd: 2.5 * SATURN_MEAN_PERIOD_DAYS,
        };
        let natal = eph.inner.lon(0.0);
        let a = saturn_returns(&eph, natal, 0.0, 0.0, &SaturnReturnConfig::default()).unwrap();
        assert_eq!(a.returns.len(), 2);
        assert_eq!(a.next_return.as_ref().map(|r| r.return_number), Some(1));
    }

    #[test]
    fn range_end_inside_a_window_keeps_earlier_pass() {
        let eph = Bounded {
            inner: linear(),
            max_jd: SATURN_MEAN_PERIOD_DAYS + 100.0,
        };
        let natal = eph.inner.lon(0.0);
        let a = saturn_returns(&eph, natal, 0.0, 0.0, &SaturnReturnConfig::default()).unwrap();
        assert_eq!(a.returns.len(), 1);
        assert!((a.returns[0].start_jd() - SATURN_MEAN_PERIOD_DAYS).abs() < 1e-3);
    }

    #[test]
    fn range_end_before_as_of_is_an_error() {
        let eph = Bounded {
            inner: linear(),
            max_jd: 0.5 * SATURN_MEAN_PERIOD_DAYS,
        };
        let natal = eph.inner.lon(0.0);
        let as_of = SATURN_MEAN_PERIOD_DAYS;
        let r = saturn_returns(&eph, natal, 0.0, as_of, &SaturnReturnConfig::default());
        assert!(matches!(r, Err(SearchError::Ephemeris(EphemerisError::OutOfRange(_)))));
    }

    #[test]
    fn invalid_natal_longitude() {
        let r = saturn_returns(&linear(), 360.0, 0.0, 0.0, &SaturnReturnConfig::default());
        assert!(matches!(r, Err(SearchError::Base(BaseError::InvalidLongitude(_)))));
    }

    #[test]
    fn chart_without_saturn() {
        let chart = ChartSnapshot {
            birth_jd: Some(0.0),
            ..Default::default()
        };
        let r = saturn_returns_for_chart(&linear(), &chart, 0.0, &SaturnReturnConfig::default());
        assert_eq!(r, Err(SearchError::MissingRequiredPlanet("Saturn")));
    }
}
