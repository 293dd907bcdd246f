//! Position weighting: Favor unseen and low-accuracy positions
//!
//! Weights feed weighted random sampling with replacement. Every position
//! keeps a strictly positive weight so nothing becomes unselectable.

use rand::distributions::WeightedIndex;
use rand::prelude::*;

use crate::board::Position;
use crate::stats::PerformanceStore;

/// Weight assigned to any never-attempted position
pub const UNSEEN_WEIGHT: f64 = 5.0;

/// Positive floor so no attempted position's weight reaches zero
const WEIGHT_FLOOR: f64 = 0.05;

/// Sampling weight for a position
///
/// Unseen positions get the fixed `UNSEEN_WEIGHT`. Otherwise the weight is
/// dominated by inaccuracy, with a secondary preference for positions that
/// have seen fewer attempts.
pub fn weight(store: &PerformanceStore, position: Position) -> f64 {
    let (attempts, correct) = store.attempts_correct(position);
    if attempts == 0 {
        return UNSEEN_WEIGHT;
    }
    // counters are clamped at the load boundary, but a malformed store must
    // still never push a weight to zero or below
    let accuracy = f64::from(correct.min(attempts)) / f64::from(attempts);
    ((1.0 - accuracy) + 1.0 / f64::from(attempts + 1) + WEIGHT_FLOOR).max(WEIGHT_FLOOR)
}

/// Weighted random choice over candidate positions (with replacement)
///
/// Returns `None` only for an empty candidate slice; the session's fallback
/// chain guarantees it never passes one.
pub fn choose<R: Rng>(
    store: &PerformanceStore,
    candidates: &[Position],
    rng: &mut R,
) -> Option<Position> {
    if candidates.is_empty() {
        return None;
    }
    let weights: Vec<f64> = candidates.iter().map(|&p| weight(store, p)).collect();
    // weights are strictly positive, so construction cannot fail
    let dist = WeightedIndex::new(&weights).ok()?;
    Some(candidates[dist.sample(rng)])
}
