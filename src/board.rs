//! Board geometry: Positions and board dimensions
//!
//! A `Position` identifies one drillable cell on the fretboard. It is a plain
//! value type usable as a map key, replacing stringly "s,f" keys everywhere
//! except the on-disk stats format.

use std::fmt;

/// One (string, fret) cell on the fretboard
///
/// `string` is zero-based, 0 = lowest-pitched string. `fret` 0 is the open
/// string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub string: usize,
    pub fret: usize,
}

impl Position {
    /// Create a position
    pub fn new(string: usize, fret: usize) -> Self {
        Position { string, fret }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "string {} fret {}", self.string, self.fret)
    }
}

/// Dimensions of the drillable board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    pub num_strings: usize,
    pub max_fret: usize,
}

impl Board {
    /// Create a board; fails on a zero-string instrument
    pub fn new(num_strings: usize, max_fret: usize) -> Result<Self, crate::TrainerError> {
        if num_strings == 0 {
            return Err(crate::TrainerError::config("num_strings must be >= 1"));
        }
        Ok(Board {
            num_strings,
            max_fret,
        })
    }

    /// Whether a position lies on this board
    pub fn contains(&self, pos: Position) -> bool {
        pos.string < self.num_strings && pos.fret <= self.max_fret
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.num_strings * (self.max_fret + 1)
    }

    /// Iterate every position, string-major with fret ascending
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.num_strings)
            .flat_map(move |s| (0..=self.max_fret).map(move |f| Position::new(s, f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_and_count() {
        let board = Board::new(6, 12).unwrap();
        assert!(board.contains(Position::new(5, 12)));
        assert!(!board.contains(Position::new(6, 0)));
        assert!(!board.contains(Position::new(0, 13)));
        assert_eq!(board.cell_count(), 6 * 13);
    }

    #[test]
    fn test_positions_ordering() {
        let board = Board::new(2, 1).unwrap();
        let all: Vec<Position> = board.positions().collect();
        assert_eq!(
            all,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_zero_strings_rejected() {
        assert!(Board::new(0, 12).is_err());
    }
}
