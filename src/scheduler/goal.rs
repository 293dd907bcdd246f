//! GoalWindow: Rolling time-windowed outcomes for level-up decisions
//!
//! Entries are pruned lazily from the front whenever the window is read or
//! written; no timer is involved. The window is cleared wholesale after each
//! successful level-up so each difficulty step earns its own evidence.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Minimum outcomes inside the window before the goal can be judged
pub const GOAL_MIN_SAMPLES: usize = 10;

/// Insertion-ordered (timestamp, correct) outcomes within a time window
#[derive(Clone, Debug)]
pub struct GoalWindow {
    window: Duration,
    entries: VecDeque<(Instant, bool)>,
}

impl GoalWindow {
    /// Create an empty window covering the given duration
    pub fn new(window: Duration) -> Self {
        GoalWindow {
            window,
            entries: VecDeque::new(),
        }
    }

    /// Append an outcome, pruning anything that has fallen out of the window
    pub fn record(&mut self, now: Instant, correct: bool) {
        self.prune(now);
        self.entries.push_back((now, correct));
    }

    /// Drop entries strictly older than `now - window`
    ///
    /// An entry exactly at the boundary is retained.
    pub fn prune(&mut self, now: Instant) {
        let Some(cutoff) = now.checked_sub(self.window) else {
            return;
        };
        while let Some(&(t, _)) = self.entries.front() {
            if t < cutoff {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }

    /// Number of outcomes currently held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fraction correct over the held outcomes, or `None` when empty
    pub fn accuracy(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let correct = self.entries.iter().filter(|&&(_, c)| c).count();
        Some(correct as f64 / self.entries.len() as f64)
    }

    /// Whether the window holds enough samples at or above the goal accuracy
    pub fn goal_met(&self, goal_accuracy: f64) -> bool {
        self.len() >= GOAL_MIN_SAMPLES
            && self.accuracy().is_some_and(|acc| acc >= goal_accuracy)
    }

    /// Discard all outcomes
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
