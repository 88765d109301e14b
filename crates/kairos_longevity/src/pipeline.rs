//! Evaluate, qualify, select.
//!
//! Both selectors walk an ordered candidate list, evaluate each entry,
//! test it against a qualification predicate and pick a winner among the
//! qualified ones. Only the selection policy differs: the Hyleg takes the
//! first qualifier and stops, the Alcochoden evaluates everyone and keeps
//! the best.

use std::cmp::Ordering;

/// How a winner is chosen among qualified candidates.
pub trait SelectionPolicy<T> {
    /// Stop evaluating as soon as one candidate qualifies.
    fn stops_at_first(&self) -> bool {
        false
    }

    /// Whether `challenger` displaces the current `leader`.
    fn prefers(&self, challenger: &T, leader: &T) -> bool;
}

/// First qualifier in evaluation order wins; later candidates are not
/// evaluated.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatch;

impl<T> SelectionPolicy<T> for FirstMatch {
    fn stops_at_first(&self) -> bool {
        true
    }

    fn prefers(&self, _challenger: &T, _leader: &T) -> bool {
        false
    }
}

/// Greatest qualifier under the comparator wins; ties keep the earlier
/// candidate.
#[derive(Debug, Clone, Copy)]
pub struct BestBy<F>(pub F);

impl<T, F> SelectionPolicy<T> for BestBy<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn prefers(&self, challenger: &T, leader: &T) -> bool {
        (self.0)(challenger, leader) == Ordering::Greater
    }
}

/// Every evaluated candidate plus the index of the winner, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub evaluated: Vec<T>,
    pub selected: Option<usize>,
}

impl<T> Outcome<T> {
    pub fn winner(&self) -> Option<&T> {
        self.selected.and_then(|i| self.evaluated.get(i))
    }
}

/// Run the pipeline over `inputs` in order.
///
/// An evaluation error aborts the whole run.
pub fn evaluate_candidates<S, T, E, I, Ev, Q, P>(
    inputs: I,
    mut evaluate: Ev,
    qualifies: Q,
    policy: &P,
) -> Result<Outcome<T>, E>
where
    I: IntoIterator<Item = S>,
    Ev: FnMut(S) -> Result<T, E>,
    Q: Fn(&T) -> bool,
    P: SelectionPolicy<T>,
{
    let mut evaluated: Vec<T> = Vec::new();
    let mut selected: Option<usize> = None;

    for input in inputs {
        let candidate = evaluate(input)?;
        let qualified = qualifies(&candidate);
        evaluated.push(candidate);
        if !qualified {
            continue;
        }
        let idx = evaluated.len() - 1;
        selected = match selected {
            Some(leader) if !policy.prefers(&evaluated[idx], &evaluated[leader]) => Some(leader),
            _ => Some(idx),
        };
        if policy.stops_at_first() {
            break;
        }
    }

    Ok(Outcome {
        evaluated,
        selected,
    })
}
