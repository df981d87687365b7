//! Majority vote across every detection method.
//!
//! Each method in [`KneeMethod::ALL`] runs on the same canonical series.
//! Failed methods cast no vote. The winning index is the one with the most
//! votes; on a tie the index that was voted for first wins.
use crate::methods::{errors::MethodResult, options::MethodOptions, registry::KneeMethod};
use ndarray::ArrayView1;

/// One method's outcome in a consensus run.
#[derive(Debug, Clone, PartialEq)]
pub struct Ballot {
    pub method: KneeMethod,
    pub outcome: MethodResult<usize>,
}

/// Run every method on a canonical series, in registry order.
pub fn cast_ballots(x: ArrayView1<f64>, y: ArrayView1<f64>, opts: &MethodOptions) -> Vec<Ballot> {
    KneeMethod::ALL
        .into_iter()
        .map(|method| Ballot { method, outcome: method.detect(x, y, opts) })
        .collect()
}

/// Winning `(index, votes)` among successful ballots, or `None` if all failed.
pub fn majority(ballots: &[Ballot]) -> Option<(usize, usize)> {
    // (index, votes) in first-seen order.
    let mut tally: Vec<(usize, usize)> = Vec::new();
    for index in ballots.iter().filter_map(|ballot| ballot.outcome.as_ref().ok()) {
        match tally.iter_mut().find(|(seen, _)| seen == index) {
            Some((_, votes)) => *votes += 1,
            None => tally.push((*index, 1)),
        }
    }
    tally.into_iter().fold(None, |best, (index, votes)| match best {
        Some((_, best_votes)) if best_votes >= votes => best,
        _ => Some((index, votes)),
    })
}
