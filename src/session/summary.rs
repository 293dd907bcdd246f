//! Session summary: Results and ranked weak areas
//!
//! Weak-area ranking aggregates the store's per-position counters along one
//! axis: per string (summed across frets) and per fret (summed across
//! strings). Unpracticed values rank first, then lowest accuracy, then
//! fewest attempts.

use std::cmp::Ordering;

use crate::board::Board;
use crate::stats::PerformanceStore;

/// How many weak strings/frets a summary reports
const WEAK_AREA_COUNT: usize = 3;

/// One string or fret with its aggregated counters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeakArea {
    /// String index or fret number, depending on the list it appears in
    pub index: usize,
    pub attempts: u32,
    pub correct: u32,
}

impl WeakArea {
    /// Accuracy over the aggregate, or `None` if unpracticed
    pub fn accuracy(&self) -> Option<f64> {
        if self.attempts == 0 {
            None
        } else {
            Some(f64::from(self.correct) / f64::from(self.attempts))
        }
    }
}

/// Results of a finished practice session
#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub duration_secs: u64,
    pub max_fret: usize,
    pub tuning_name: String,

    pub answered: u32,
    pub correct: u32,
    pub accuracy_percent: f64,
    pub avg_time_secs: f64,

    /// Up to three weakest strings, weakest first
    pub weak_strings: Vec<WeakArea>,
    /// Up to three weakest frets, weakest first
    pub weak_frets: Vec<WeakArea>,
}

fn rank(mut areas: Vec<WeakArea>) -> Vec<WeakArea> {
    areas.sort_by(|a, b| {
        let seen_a = u8::from(a.attempts > 0);
        let seen_b = u8::from(b.attempts > 0);
        seen_a
            .cmp(&seen_b)
            .then_with(|| {
                let acc_a = a.accuracy().unwrap_or(0.0);
                let acc_b = b.accuracy().unwrap_or(0.0);
                acc_a.partial_cmp(&acc_b).unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.attempts.cmp(&b.attempts))
    });
    areas.truncate(WEAK_AREA_COUNT);
    areas
}

/// Weakest strings on the board, aggregated across frets
pub fn rank_weak_strings(store: &PerformanceStore, board: Board) -> Vec<WeakArea> {
    let mut areas: Vec<WeakArea> = (0..board.num_strings)
        .map(|s| WeakArea {
            index: s,
            attempts: 0,
            correct: 0,
        })
        .collect();
    for (pos, counter) in store.positions() {
        if pos.string < board.num_strings {
            areas[pos.string].attempts += counter.attempts;
            areas[pos.string].correct += counter.correct;
        }
    }
    rank(areas)
}

/// Weakest frets on the board, aggregated across strings
pub fn rank_weak_frets(store: &PerformanceStore, board: Board) -> Vec<WeakArea> {
    let mut areas: Vec<WeakArea> = (0..=board.max_fret)
        .map(|f| WeakArea {
            index: f,
            attempts: 0,
            correct: 0,
        })
        .collect();
    for (pos, counter) in store.positions() {
        if pos.fret <= board.max_fret {
            areas[pos.fret].attempts += counter.attempts;
            areas[pos.fret].correct += counter.correct;
        }
    }
    rank(areas)
}
