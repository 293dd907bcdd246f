//! Music theory: Note names, tunings, and fretboard mapping
//!
//! # Components
//! - `notes.rs`: Pitch-class indices, sharp/flat display names, alias-tolerant parsing
//! - `tuning.rs`: Named tunings as open-string pitch classes
//! - `mapping.rs`: String/fret ↔ pitch-class lookup and answer checking

pub mod mapping;
pub mod notes;
pub mod tuning;

pub use mapping::{check_note_name_answer, note_index_at, positions_for_note};
pub use notes::{index_to_name, parse_note_name};
pub use tuning::Tuning;
