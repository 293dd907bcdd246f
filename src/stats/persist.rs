//! Durable storage for the performance stats
//!
//! On-disk format is the historical JSON shape: string keys like "0,0" under
//! `by_position`, mode tags "A"/"B" under `by_mode`, global totals and a
//! `meta` block. In memory everything is typed; the translation lives here.
//!
//! Load tolerates missing or corrupt files by returning an empty store with
//! a warning. Save writes a sibling temp file and renames it into place so a
//! crash mid-write never leaves a truncated file behind.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::Position;
use crate::error::TrainerResult;
use crate::stats::store::{Counter, InstrumentMeta, PerformanceStore, SessionMode};

/// Stable file key for a position: "<string>,<fret>"
fn pos_key(position: Position) -> String {
    format!("{},{}", position.string, position.fret)
}

/// Parse a key produced by `pos_key`
fn parse_pos_key(key: &str) -> Option<Position> {
    let (s, f) = key.split_once(',')?;
    Some(Position::new(
        s.trim().parse().ok()?,
        f.trim().parse().ok()?,
    ))
}

/// Clamp a loaded counter so `correct <= attempts` always holds in memory
///
/// A hand-edited or damaged file can carry an overfull bucket; letting one
/// through would produce a negative sampling weight downstream.
fn sanitize_counter(key: &str, counter: Counter) -> Counter {
    if counter.correct > counter.attempts {
        warn!(
            "clamping overfull counter for {:?} in stats file ({} correct > {} attempts)",
            key, counter.correct, counter.attempts
        );
        Counter {
            attempts: counter.attempts,
            correct: counter.attempts,
        }
    } else {
        counter
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StatsFileSchema {
    #[serde(default)]
    total_attempts: u32,
    #[serde(default)]
    total_correct: u32,
    #[serde(default)]
    by_mode: BTreeMap<String, Counter>,
    #[serde(default)]
    by_note: BTreeMap<String, Counter>,
    #[serde(default)]
    by_position: BTreeMap<String, Counter>,
    #[serde(default)]
    meta: InstrumentMeta,
}

impl StatsFileSchema {
    fn from_store(store: &PerformanceStore, meta: &InstrumentMeta) -> Self {
        let mut schema = StatsFileSchema {
            total_attempts: store.total_attempts(),
            total_correct: store.total_correct(),
            meta: meta.clone(),
            ..Default::default()
        };
        for mode in [SessionMode::NoteNaming, SessionMode::PositionFinding] {
            let counter = store.mode_counter(mode);
            if counter.attempts > 0 {
                schema.by_mode.insert(mode.tag().to_string(), counter);
            }
        }
        for (name, counter) in store.notes() {
            schema.by_note.insert(name.to_string(), *counter);
        }
        for (position, counter) in store.positions() {
            schema.by_position.insert(pos_key(position), *counter);
        }
        schema
    }

    fn into_store(self) -> (PerformanceStore, InstrumentMeta) {
        let mut store = PerformanceStore::new();
        store.set_totals(
            self.total_attempts,
            self.total_correct.min(self.total_attempts),
        );

        for (tag, counter) in self.by_mode {
            match SessionMode::from_tag(&tag) {
                Some(mode) => store.insert_mode(mode, sanitize_counter(&tag, counter)),
                None => warn!("skipping unknown mode tag {:?} in stats file", tag),
            }
        }
        for (name, counter) in self.by_note {
            let counter = sanitize_counter(&name, counter);
            store.insert_note(name, counter);
        }
        for (key, counter) in self.by_position {
            match parse_pos_key(&key) {
                Some(position) => store.insert_position(position, sanitize_counter(&key, counter)),
                None => warn!("skipping unparseable position key {:?} in stats file", key),
            }
        }
        (store, self.meta)
    }
}

/// Load stats from a file, substituting an empty store on any failure
pub fn load_stats(path: &Path) -> (PerformanceStore, InstrumentMeta) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("could not read stats file {}: {}", path.display(), e);
            }
            return (PerformanceStore::new(), InstrumentMeta::default());
        }
    };

    match serde_json::from_str::<StatsFileSchema>(&content) {
        Ok(schema) => schema.into_store(),
        Err(e) => {
            warn!(
                "corrupt stats file {}, starting fresh: {}",
                path.display(),
                e
            );
            (PerformanceStore::new(), InstrumentMeta::default())
        }
    }
}

/// Persist stats atomically: write a temp sibling, then rename over the target
pub fn save_stats(
    path: &Path,
    store: &PerformanceStore,
    meta: &InstrumentMeta,
) -> TrainerResult<()> {
    let schema = StatsFileSchema::from_store(store, meta);
    let json = serde_json::to_string_pretty(&schema)?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_store() -> PerformanceStore {
        let mut store = PerformanceStore::new();
        store.record_position_attempt(SessionMode::NoteNaming, true, "E", Position::new(0, 0));
        store.record_position_attempt(SessionMode::NoteNaming, false, "E", Position::new(0, 0));
        store.record_position_attempt(SessionMode::PositionFinding, true, "F#", Position::new(1, 2));
        store
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let store = sample_store();
        let meta = InstrumentMeta {
            tuning_name: Some("E Standard".to_string()),
            num_strings: Some(6),
        };

        save_stats(&path, &store, &meta).unwrap();
        let (loaded, loaded_meta) = load_stats(&path);

        assert_eq!(loaded, store);
        assert_eq!(loaded_meta, meta);
    }

    #[test]
    fn test_round_trip_empty_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");

        save_stats(&path, &PerformanceStore::new(), &InstrumentMeta::default()).unwrap();
        let (loaded, meta) = load_stats(&path);
        assert_eq!(loaded, PerformanceStore::new());
        assert_eq!(meta, InstrumentMeta::default());
    }

    #[test]
    fn test_missing_file_yields_empty_store() {
        let dir = tempdir().unwrap();
        let (store, meta) = load_stats(&dir.path().join("nope.json"));
        assert_eq!(store.total_attempts(), 0);
        assert_eq!(meta, InstrumentMeta::default());
    }

    #[test]
    fn test_corrupt_file_yields_empty_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "{not json!").unwrap();

        let (store, _) = load_stats(&path);
        assert_eq!(store.total_attempts(), 0);
    }

    #[test]
    fn test_bad_position_keys_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(
            &path,
            r#"{
                "total_attempts": 2,
                "total_correct": 1,
                "by_position": {
                    "0,0": {"attempts": 1, "correct": 1},
                    "garbage": {"attempts": 1, "correct": 0}
                }
            }"#,
        )
        .unwrap();

        let (store, _) = load_stats(&path);
        assert_eq!(store.total_attempts(), 2);
        assert_eq!(store.attempts_correct(Position::new(0, 0)), (1, 1));
        assert_eq!(store.positions().count(), 1);
    }

    #[test]
    fn test_overfull_counters_clamped_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(
            &path,
            r#"{
                "total_attempts": 1,
                "total_correct": 100,
                "by_mode": {"A": {"attempts": 1, "correct": 100}},
                "by_note": {"E": {"attempts": 1, "correct": 100}},
                "by_position": {"3,3": {"attempts": 1, "correct": 100}}
            }"#,
        )
        .unwrap();

        let (store, _) = load_stats(&path);
        assert_eq!(store.total_correct(), store.total_attempts());
        assert_eq!(store.attempts_correct(Position::new(3, 3)), (1, 1));
        assert_eq!(store.mode_counter(SessionMode::NoteNaming).correct, 1);
        assert_eq!(store.accuracy_at(Position::new(3, 3)), Some(1.0));
    }

    #[test]
    fn test_save_overwrites_atomically() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");

        save_stats(&path, &sample_store(), &InstrumentMeta::default()).unwrap();
        let mut store = sample_store();
        store.record_position_attempt(SessionMode::NoteNaming, true, "A", Position::new(2, 0));
        save_stats(&path, &store, &InstrumentMeta::default()).unwrap();

        let (loaded, _) = load_stats(&path);
        assert_eq!(loaded, store);
        // no temp file left behind
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_pos_key_round_trip() {
        let pos = Position::new(5, 12);
        assert_eq!(parse_pos_key(&pos_key(pos)), Some(pos));
        assert_eq!(parse_pos_key("oops"), None);
        assert_eq!(parse_pos_key("1,"), None);
    }
}
