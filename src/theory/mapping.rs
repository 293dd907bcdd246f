//! Fretboard mapping: Position ↔ pitch class lookups
//!
//! Pure table arithmetic over a tuning; the scheduler treats these as
//! oracles for question/answer content.

use crate::board::Position;
use crate::theory::notes::{normalize_note_index, parse_note_name};
use crate::theory::tuning::Tuning;

/// Pitch class sounding at a position, or `None` if the string is off the tuning
pub fn note_index_at(pos: Position, tuning: &Tuning) -> Option<u8> {
    let open = tuning.open_note(pos.string)?;
    Some(normalize_note_index(open as i32 + pos.fret as i32))
}

/// All positions sounding a pitch class, searching frets 0..=max_fret
///
/// Ordering: string 0..n, fret ascending within each string.
pub fn positions_for_note(note_index: u8, max_fret: usize, tuning: &Tuning) -> Vec<Position> {
    let target = note_index % 12;
    let mut positions = Vec::new();

    for string in 0..tuning.num_strings() {
        for fret in 0..=max_fret {
            let pos = Position::new(string, fret);
            if note_index_at(pos, tuning) == Some(target) {
                positions.push(pos);
            }
        }
    }
    positions
}

/// Check a typed note-name answer against the expected name
///
/// Both sides go through the alias table, so enharmonic spellings match
/// ("Eb" is a correct answer for "D#"). Unparseable input is wrong.
pub fn check_note_name_answer(correct_name: &str, user_answer: &str) -> bool {
    match (parse_note_name(correct_name), parse_note_name(user_answer)) {
        (Some(expected), Some(given)) => expected == given,
        _ => false,
    }
}
