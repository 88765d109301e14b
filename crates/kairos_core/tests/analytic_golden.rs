//! Golden checks of the analytic ephemeris against published station dates
//! and positions.

use kairos_core::{AnalyticEphemeris, Body, Ephemeris};
use kairos_time::calendar_to_jd;

fn speed(body: Body, year: i32, month: u32, day: f64) -> f64 {
    AnalyticEphemeris
        .position(calendar_to_jd(year, month, day), body)
        .unwrap()
        .speed_deg_per_day
}

/// Saturn retrograde 2024-Jun-29 .. 2024-Nov-15.
#[test]
fn saturn_retrograde_summer_2024() {
    assert!(speed(Body::Saturn, 2024, 3, 1.0) > 0.0);
    assert!(speed(Body::Saturn, 2024, 8, 15.0) < 0.0);
    assert!(speed(Body::Saturn, 2024, 12, 15.0) > 0.0);
}

/// Mercury retrograde 2024-Apr-01 .. 2024-Apr-25.
#[test]
fn mercury_retrograde_april_2024() {
    assert!(speed(Body::Mercury, 2024, 3, 15.0) > 0.0);
    assert!(speed(Body::Mercury, 2024, 4, 12.0) < 0.0);
    assert!(speed(Body::Mercury, 2024, 5, 10.0) > 0.0);
}

/// Sun enters Aries at the March equinox: 2024-Mar-20 03:06 UTC.
#[test]
fn march_equinox_2024() {
    let jd = calendar_to_jd(2024, 3, 20.0 + (3.0 + 6.0 / 60.0) / 24.0);
    let lon = AnalyticEphemeris.position(jd, Body::Sun).unwrap().longitude_deg;
    let off = if lon > 180.0 { lon - 360.0 } else { lon };
    assert!(off.abs() < 0.02, "sun longitude at equinox = {lon}");
}

/// Jupiter entered Gemini (60°) on 2024-May-25.
#[test]
fn jupiter_in_gemini_mid_2024() {
    let before = AnalyticEphemeris
        .position(calendar_to_jd(2024, 5, 15.0), Body::Jupiter)
        .unwrap()
        .longitude_deg;
    let after = AnalyticEphemeris
        .position(calendar_to_jd(2024, 6, 5.0), Body::Jupiter)
        .unwrap()
        .longitude_deg;
    assert!(before < 60.0 && after > 60.0, "before={before} after={after}");
}
