//! Pitch classes: Note names and parsing
//!
//! Handles:
//! - Index (0..11) to display name, sharps or flats
//! - Parsing user input with sharp/flat aliases and unicode accidentals

/// Canonical sharp names for pitch classes 0..11
pub const NOTES_SHARPS: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings for pitch classes 0..11
pub const NOTES_FLATS: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Reduce any integer offset to a pitch class 0..11
pub fn normalize_note_index(x: i32) -> u8 {
    x.rem_euclid(12) as u8
}

/// Convert a pitch class to a display name (sharps by default)
pub fn index_to_name(index: u8, prefer_flats: bool) -> &'static str {
    let i = (index % 12) as usize;
    if prefer_flats {
        NOTES_FLATS[i]
    } else {
        NOTES_SHARPS[i]
    }
}

/// Parse a note name into a pitch class 0..11
///
/// Accepts sharps and flats, any case, surrounding whitespace, and the
/// unicode accidentals ♯/♭. Returns `None` for anything unrecognized.
pub fn parse_note_name(name: &str) -> Option<u8> {
    let s = name.trim().to_uppercase().replace('♯', "#").replace('♭', "B");
    if s.is_empty() {
        return None;
    }

    let index = match s.as_str() {
        "C" | "B#" => 0,
        "C#" | "DB" => 1,
        "D" => 2,
        "D#" | "EB" => 3,
        "E" | "FB" => 4,
        "F" | "E#" => 5,
        "F#" | "GB" => 6,
        "G" => 7,
        "G#" | "AB" => 8,
        "A" => 9,
        "A#" | "BB" => 10,
        "B" | "CB" => 11,
        _ => return None,
    };
    Some(index)
}
