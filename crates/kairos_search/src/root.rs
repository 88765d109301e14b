//! Shared root finder for angular target searches.
//!
//! Both searches reduce to finding `t` where an angular function
//! `f(t) = normalize_pm180(angle(t) - target)` crosses zero. A coarse scan
//! steps through time until consecutive samples bracket a genuine sign
//! change, then bisection refines the bracket.
//!
//! The normalized function jumps between ±180° once per cycle; such a jump
//! changes sign but is not a root, so [`is_genuine_crossing`] rejects it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SearchError;

/// One evaluation of the target function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub jd: f64,
    pub value: f64,
}

/// Two samples with a genuine zero crossing between them, `t_a < t_b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub a: Sample,
    pub b: Sample,
}

impl Bracket {
    fn ordered(x: Sample, y: Sample) -> Self {
        if x.jd <= y.jd {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    pub fn width_days(&self) -> f64 {
        self.b.jd - self.a.jd
    }
}

/// Outcome of a coarse scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scan {
    /// First bracket met in scan order, if any.
    pub bracket: Option<Bracket>,
    /// Sample with the smallest |value| seen, for fail-soft estimates.
    pub closest: Sample,
    /// Number of function evaluations.
    pub evaluations: usize,
}

/// Whether the finder met its tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Precision {
    /// Bracket narrowed below the convergence threshold with residual
    /// under tolerance.
    Exact,
    /// Best estimate after the iteration cap or without a bracket.
    Approximate,
}

/// Refinement limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootConfig {
    pub max_iterations: u32,
    /// Stop when the bracket is narrower than this many days.
    pub convergence_days: f64,
    /// Largest |f| accepted at the root, in degrees.
    pub tolerance_deg: f64,
}

/// A refined root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub jd: f64,
    /// |f| at `jd`, in degrees.
    pub residual_deg: f64,
    pub iterations: u32,
}

/// The iteration cap was hit or the residual stayed above tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("root search exhausted after {} iterations (residual {:.4}°)", .best.iterations, .best.residual_deg)]
pub struct SearchExhausted {
    /// Best estimate reached.
    pub best: Root,
}

/// Failure modes of [`find_root`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RootError {
    #[error(transparent)]
    Exhausted(SearchExhausted),
    #[error(transparent)]
    Eval(#[from] SearchError),
}

/// Check if a sign change is a genuine zero crossing vs a wrap-around
/// discontinuity. A genuine crossing has both values small in magnitude.
pub fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}

// A sample landing exactly on the target counts as the end of a crossing;
// the sample after it does not start another.
fn crosses(prev: f64, curr: f64) -> bool {
    is_genuine_crossing(prev, curr) || (curr == 0.0 && prev != 0.0 && prev.abs() < 135.0)
}

/// Step from `start` by `step_days` (negative steps scan backward) for at
/// most `max_steps` steps and stop at the first genuine crossing.
pub fn scan_for_bracket<F>(
    mut f: F,
    start: f64,
    step_days: f64,
    max_steps: usize,
) -> Result<Scan, SearchError>
where
    F: FnMut(f64) -> Result<f64, SearchError>,
{
    let mut prev = Sample {
        jd: start,
        value: f(start)?,
    };
    let mut closest = prev;
    let mut evaluations = 1;

    for _ in 0..max_steps {
        let jd = prev.jd + step_days;
        let curr = Sample { jd, value: f(jd)? };
        evaluations += 1;
        if curr.value.abs() < closest.value.abs() {
            closest = curr;
        }
        if crosses(prev.value, curr.value) {
            return Ok(Scan {
                bracket: Some(Bracket::ordered(prev, curr)),
                closest,
                evaluations,
            });
        }
        prev = curr;
    }

    Ok(Scan {
        bracket: None,
        closest,
        evaluations,
    })
}

/// Every genuine crossing on `[jd_from, jd_to]` sampled at `step_days`,
/// in chronological order.
pub fn scan_all_brackets<F>(
    mut f: F,
    jd_from: f64,
    jd_to: f64,
    step_days: f64,
) -> Result<Vec<Bracket>, SearchError>
where
    F: FnMut(f64) -> Result<f64, SearchError>,
{
    let mut out = Vec::new();
    let mut prev = Sample {
        jd: jd_from,
        value: f(jd_from)?,
    };
    let steps = ((jd_to - jd_from) / step_days).ceil().max(0.0) as usize;
    for i in 1..=steps {
        let jd = (jd_from + i as f64 * step_days).min(jd_to);
        let curr = Sample { jd, value: f(jd)? };
        push_crossing(&mut out, prev, curr);
        prev = curr;
    }
    Ok(out)
}

/// Append `[a, b]` to `out` when it holds a genuine crossing.
pub(crate) fn push_crossing(out: &mut Vec<Bracket>, a: Sample, b: Sample) {
    if crosses(a.value, b.value) {
        out.push(Bracket::ordered(a, b));
    }
}

/// Bisect a bracket down to `convergence_days`.
///
/// Succeeds when the bracket converges and |f| at the midpoint is below
/// `tolerance_deg`; otherwise returns [`SearchExhausted`] with the best
/// sample seen.
pub fn find_root<F>(mut f: F, bracket: Bracket, config: &RootConfig) -> Result<Root, RootError>
where
    F: FnMut(f64) -> Result<f64, SearchError>,
{
    let mut t_a = bracket.a.jd;
    let mut f_a = bracket.a.value;
    let mut t_b = bracket.b.jd;
    let mut best = if bracket.a.value.abs() <= bracket.b.value.abs() {
        bracket.a
    } else {
        bracket.b
    };
    let mut converged = false;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        let t_mid = 0.5 * (t_a + t_b);
        let f_mid = f(t_mid)?;
        if f_mid.abs() < best.value.abs() {
            best = Sample {
                jd: t_mid,
                value: f_mid,
            };
        }

        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }

        if (t_b - t_a).abs() < config.convergence_days {
            converged = true;
            break;
        }
    }

    let jd = 0.5 * (t_a + t_b);
    let residual_deg = f(jd)?.abs();
    let root = Root {
        jd,
        residual_deg,
        iterations,
    };

    if converged && residual_deg < config.tolerance_deg {
        Ok(root)
    } else if residual_deg <= best.value.abs() {
        Err(RootError::Exhausted(SearchExhausted { best: root }))
    } else {
        Err(RootError::Exhausted(SearchExhausted {
            best: Root {
                jd: best.jd,
                residual_deg: best.value.abs(),
                iterations,
            },
        }))
    }
}

/// Collapse a root result into a fail-soft estimate: exhaustion yields the
/// best estimate tagged [`Precision::Approximate`]; evaluator errors propagate.
pub fn fail_soft(result: Result<Root, RootError>) -> Result<(Root, Precision), SearchError> {
    match result {
        Ok(root) => Ok((root, Precision::Exact)),
        Err(RootError::Exhausted(e)) => {
            log::warn!("{e}; using best estimate at JD {:.6}", e.best.jd);
            Ok((e.best, Precision::Approximate))
        }
        Err(RootError::Eval(e)) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kairos_base::normalize_pm180;

    fn cfg() -> RootConfig {
        RootConfig {
            max_iterations: 100,
            convergence_days: 1e-9,
            tolerance_deg: 1e-6,
        }
    }

    // Linear angle at 13°/day that hits 0 (mod 360) at t = 7.25.
    fn linear(t: f64) -> Result<f64, SearchError> {
        Ok(normalize_pm180(13.0 * (t - 7.25)))
    }

    #[test]
    fn genuine_crossing_rejects_wrap() {
        assert!(is_genuine_crossing(-5.0, 5.0));
        assert!(!is_genuine_crossing(179.0, -179.0));
        assert!(!is_genuine_crossing(5.0, 6.0));
        assert!(!is_genuine_crossing(0.0, 6.0));
    }

    #[test]
    fn sample_on_target_ends_one_crossing() {
        // Samples land on t = 7.25 exactly.
        let brackets = scan_all_brackets(linear, 6.25, 8.25, 0.5).unwrap();
        assert_eq!(brackets.len(), 1);
        assert!((brackets[0].b.jd - 7.25).abs() < 1e-12);
        let root = find_root(linear, brackets[0], &cfg()).unwrap();
        assert!((root.jd - 7.25).abs() < 1e-8);
    }

    #[test]
    fn scan_forward_finds_bracket() {
        let scan = scan_for_bracket(linear, 0.0, 0.5, 60).unwrap();
        let b = scan.bracket.unwrap();
        assert!(b.a.jd <= 7.25 && 7.25 <= b.b.jd, "{b:?}");
        assert!((b.width_days() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn scan_backward_orders_bracket() {
        let scan = scan_for_bracket(linear, 20.0, -0.5, 60).unwrap();
        let b = scan.bracket.unwrap();
        assert!(b.a.jd < b.b.jd);
        assert!(b.a.jd <= 7.25 && 7.25 <= b.b.jd);
    }

    #[test]
    fn scan_without_crossing_reports_closest() {
        let scan = scan_for_bracket(linear, 8.0, 0.5, 4).unwrap();
        assert!(scan.bracket.is_none());
        assert_eq!(scan.evaluations, 5);
        assert!((scan.closest.jd - 8.0).abs() < 1e-12);
    }

    #[test]
    fn scan_all_finds_each_cycle() {
        // Crossings every 360/13 days: 7.25, 34.94, 62.63.
        let brackets = scan_all_brackets(linear, 0.0, 70.0, 1.0).unwrap();
        assert_eq!(brackets.len(), 3);
        for pair in brackets.windows(2) {
            assert!(pair[0].b.jd <= pair[1].a.jd);
        }
    }

    #[test]
    fn bisection_converges() {
        let scan = scan_for_bracket(linear, 0.0, 0.5, 60).unwrap();
        let root = find_root(linear, scan.bracket.unwrap(), &cfg()).unwrap();
        assert!((root.jd - 7.25).abs() < 1e-8, "jd = {}", root.jd);
        assert!(root.residual_deg < 1e-6);
        assert!(root.iterations <= 40);
    }

    #[test]
    fn iteration_cap_is_fail_soft() {
        let scan = scan_for_bracket(linear, 0.0, 0.5, 60).unwrap();
        let tight = RootConfig {
            max_iterations: 3,
            ..cfg()
        };
        let result = find_root(linear, scan.bracket.unwrap(), &tight);
        assert!(matches!(result, Err(RootError::Exhausted(_))));
        let (root, precision) = fail_soft(result).unwrap();
        assert_eq!(precision, Precision::Approximate);
        assert!((root.jd - 7.25).abs() < 0.1);
    }

    #[test]
    fn evaluator_errors_propagate() {
        let failing = |_t: f64| -> Result<f64, SearchError> {
            Err(SearchError::InvalidConfig("boom"))
        };
        let bracket = Bracket {
            a: Sample { jd: 0.0, value: -1.0 },
            b: Sample { jd: 1.0, value: 1.0 },
        };
        let result = find_root(failing, bracket, &cfg());
        assert!(matches!(fail_soft(result), Err(SearchError::InvalidConfig("boom"))));
    }
}
