//! Tunings: Open-string pitch classes for an instrument
//!
//! String index 0 is the lowest-pitched string. Pitch classes carry no
//! octave information; the trainer only cares about note identity.

/// An instrument tuning: display name plus one pitch class per string
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tuning {
    name: String,
    /// Open-string pitch classes, lowest string first
    open_notes: Vec<u8>,
}

impl Tuning {
    /// Create a tuning from open-string pitch classes (lowest string first)
    pub fn new<S: Into<String>>(name: S, open_notes: Vec<u8>) -> Self {
        Tuning {
            name: name.into(),
            open_notes: open_notes.into_iter().map(|n| n % 12).collect(),
        }
    }

    /// Standard six-string guitar tuning: E A D G B E
    pub fn standard() -> Self {
        Tuning::new("E Standard", vec![4, 9, 2, 7, 11, 4])
    }

    /// Seven-string standard: B E A D G B E
    pub fn standard_seven() -> Self {
        Tuning::new("B Standard (7)", vec![11, 4, 9, 2, 7, 11, 4])
    }

    /// Display name of the tuning
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of strings
    pub fn num_strings(&self) -> usize {
        self.open_notes.len()
    }

    /// Open-string pitch class for a string index, if in range
    pub fn open_note(&self, string_index: usize) -> Option<u8> {
        self.open_notes.get(string_index).copied()
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tuning() {
        let t = Tuning::standard();
        assert_eq!(t.num_strings(), 6);
        assert_eq!(t.open_note(0), Some(4)); // low E
        assert_eq!(t.open_note(5), Some(4)); // high E
        assert_eq!(t.open_note(6), None);
    }

    #[test]
    fn test_seven_string() {
        let t = Tuning::standard_seven();
        assert_eq!(t.num_strings(), 7);
        assert_eq!(t.open_note(0), Some(11)); // low B
    }

    #[test]
    fn test_pitch_classes_normalized() {
        let t = Tuning::new("weird", vec![16, 13]);
        assert_eq!(t.open_note(0), Some(4));
        assert_eq!(t.open_note(1), Some(1));
    }
}
