//! PerformanceStore: Per-position, per-note, per-mode attempt counters
//!
//! Every recorded attempt increments the global totals plus exactly one
//! bucket per applicable dimension. Buckets are created lazily on first
//! record and only ever removed by a full reset.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::Position;

/// Session-type tag, one per question style
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionMode {
    /// Shown a position, name the note ("A" in the stats file)
    NoteNaming,
    /// Shown a note, find its positions ("B" in the stats file)
    PositionFinding,
}

impl SessionMode {
    /// Stats-file tag for this mode
    pub fn tag(&self) -> &'static str {
        match self {
            SessionMode::NoteNaming => "A",
            SessionMode::PositionFinding => "B",
        }
    }

    /// Parse a stats-file tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_uppercase().as_str() {
            "A" => Some(SessionMode::NoteNaming),
            "B" => Some(SessionMode::PositionFinding),
            _ => None,
        }
    }
}

/// One attempts/correct bucket
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub correct: u32,
}

impl Counter {
    fn record(&mut self, correct: bool) {
        self.attempts += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Fraction correct, or `None` if never attempted
    pub fn accuracy(&self) -> Option<f64> {
        if self.attempts == 0 {
            None
        } else {
            Some(f64::from(self.correct) / f64::from(self.attempts))
        }
    }
}

/// Display metadata carried next to the counters in the stats file
///
/// Scheduling logic never reads this; it exists so external surfaces can
/// label which instrument/tuning a file belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuning_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_strings: Option<usize>,
}

/// Historical performance counters across all sessions
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerformanceStore {
    total_attempts: u32,
    total_correct: u32,
    by_mode: FxHashMap<SessionMode, Counter>,
    by_note: FxHashMap<String, Counter>,
    by_position: FxHashMap<Position, Counter>,
}

impl PerformanceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attempt against the mode and note dimensions
    pub fn record_attempt(&mut self, mode: SessionMode, correct: bool, note_name: &str) {
        self.total_attempts += 1;
        if correct {
            self.total_correct += 1;
        }
        self.by_mode.entry(mode).or_default().record(correct);
        self.by_note
            .entry(note_name.trim().to_uppercase())
            .or_default()
            .record(correct);
    }

    /// Record an attempt against a specific position (plus mode and note)
    pub fn record_position_attempt(
        &mut self,
        mode: SessionMode,
        correct: bool,
        note_name: &str,
        position: Position,
    ) {
        self.record_attempt(mode, correct, note_name);
        self.by_position.entry(position).or_default().record(correct);
    }

    /// Attempts and corrects at a position (zero if unseen)
    pub fn attempts_correct(&self, position: Position) -> (u32, u32) {
        self.by_position
            .get(&position)
            .map(|c| (c.attempts, c.correct))
            .unwrap_or((0, 0))
    }

    /// Accuracy at a position, or `None` if unseen
    pub fn accuracy_at(&self, position: Position) -> Option<f64> {
        self.by_position.get(&position).and_then(Counter::accuracy)
    }

    /// 1 - accuracy at a position; unseen positions are maximally bad (1.0)
    pub fn badness_at(&self, position: Position) -> f64 {
        self.accuracy_at(position).map_or(1.0, |acc| 1.0 - acc)
    }

    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    pub fn total_correct(&self) -> u32 {
        self.total_correct
    }

    /// Counter for a mode (zero if never used)
    pub fn mode_counter(&self, mode: SessionMode) -> Counter {
        self.by_mode.get(&mode).copied().unwrap_or_default()
    }

    /// Iterate per-note counters
    pub fn notes(&self) -> impl Iterator<Item = (&str, &Counter)> {
        self.by_note.iter().map(|(name, c)| (name.as_str(), c))
    }

    /// Iterate per-position counters
    pub fn positions(&self) -> impl Iterator<Item = (Position, &Counter)> {
        self.by_position.iter().map(|(&pos, c)| (pos, c))
    }

    /// Drop all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn set_totals(&mut self, attempts: u32, correct: u32) {
        self.total_attempts = attempts;
        self.total_correct = correct;
    }

    pub(crate) fn insert_mode(&mut self, mode: SessionMode, counter: Counter) {
        self.by_mode.insert(mode, counter);
    }

    pub(crate) fn insert_note(&mut self, name: String, counter: Counter) {
        self.by_note.insert(name, counter);
    }

    pub(crate) fn insert_position(&mut self, position: Position, counter: Counter) {
        self.by_position.insert(position, counter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_attempt_and_position() {
        let mut store = PerformanceStore::new();

        store.record_position_attempt(SessionMode::NoteNaming, true, "E", Position::new(0, 0));
        store.record_position_attempt(SessionMode::NoteNaming, false, "E", Position::new(0, 0));
        store.record_position_attempt(SessionMode::NoteNaming, true, "F#", Position::new(1, 2));

        assert_eq!(store.total_attempts(), 3);
        assert_eq!(store.total_correct(), 2);

        let mode = store.mode_counter(SessionMode::NoteNaming);
        assert_eq!(mode.attempts, 3);
        assert_eq!(mode.correct, 2);

        assert_eq!(store.attempts_correct(Position::new(0, 0)), (2, 1));
        assert_eq!(store.accuracy_at(Position::new(0, 0)), Some(0.5));
    }

    #[test]
    fn test_every_attempt_hits_each_dimension_once() {
        let mut store = PerformanceStore::new();
        store.record_position_attempt(SessionMode::NoteNaming, true, "A", Position::new(2, 2));
        store.record_position_attempt(SessionMode::PositionFinding, false, "B", Position::new(2, 3));

        let mode_sum = store.mode_counter(SessionMode::NoteNaming).attempts
            + store.mode_counter(SessionMode::PositionFinding).attempts;
        assert_eq!(mode_sum, store.total_attempts());

        let note_sum: u32 = store.notes().map(|(_, c)| c.attempts).sum();
        assert_eq!(note_sum, store.total_attempts());
    }

    #[test]
    fn test_badness() {
        let mut store = PerformanceStore::new();
        assert_eq!(store.badness_at(Position::new(0, 0)), 1.0);

        store.record_position_attempt(SessionMode::NoteNaming, true, "E", Position::new(0, 0));
        store.record_position_attempt(SessionMode::NoteNaming, true, "E", Position::new(0, 0));
        store.record_position_attempt(SessionMode::NoteNaming, false, "E", Position::new(0, 0));
        let badness = store.badness_at(Position::new(0, 0));
        assert!((badness - (1.0 - 2.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_note_names_normalized() {
        let mut store = PerformanceStore::new();
        store.record_attempt(SessionMode::NoteNaming, true, " e ");
        store.record_attempt(SessionMode::NoteNaming, false, "E");
        let e = store
            .notes()
            .find(|(name, _)| *name == "E")
            .map(|(_, c)| *c)
            .unwrap();
        assert_eq!(e.attempts, 2);
    }

    #[test]
    fn test_reset() {
        let mut store = PerformanceStore::new();
        store.record_position_attempt(SessionMode::NoteNaming, true, "E", Position::new(0, 0));
        store.reset();
        assert_eq!(store.total_attempts(), 0);
        assert_eq!(store.attempts_correct(Position::new(0, 0)), (0, 0));
    }

    #[test]
    fn test_mode_tags() {
        assert_eq!(SessionMode::NoteNaming.tag(), "A");
        assert_eq!(SessionMode::from_tag(" b "), Some(SessionMode::PositionFinding));
        assert_eq!(SessionMode::from_tag("C"), None);
    }
}
