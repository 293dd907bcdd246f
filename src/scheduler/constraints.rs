//! ConstraintSet: Restrictions on which positions a session may ask about
//!
//! Each axis (strings, frets, explicit positions) is independently either
//! unconstrained (`None`) or a set. An empty set is meaningful: it says no
//! position survives that axis, and callers fall back rather than treating
//! it as "anything goes".

use rustc_hash::FxHashSet;

use crate::board::{Board, Position};

/// Optional restriction to subsets of strings, frets, and/or positions
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    /// Allowed string indices (zero-based), or unconstrained
    pub strings: Option<FxHashSet<usize>>,
    /// Allowed frets, or unconstrained
    pub frets: Option<FxHashSet<usize>>,
    /// Explicitly allowed positions, or unconstrained
    pub positions: Option<FxHashSet<Position>>,
}

impl ConstraintSet {
    /// A set that allows everything
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Constrain only the strings axis
    pub fn for_strings<I: IntoIterator<Item = usize>>(strings: I) -> Self {
        ConstraintSet {
            strings: Some(strings.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Constrain only the frets axis
    pub fn for_frets<I: IntoIterator<Item = usize>>(frets: I) -> Self {
        ConstraintSet {
            frets: Some(frets.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Constrain only the explicit positions axis
    pub fn for_positions<I: IntoIterator<Item = Position>>(positions: I) -> Self {
        ConstraintSet {
            positions: Some(positions.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Whether no axis carries a constraint
    pub fn is_unconstrained(&self) -> bool {
        self.strings.is_none() && self.frets.is_none() && self.positions.is_none()
    }

    /// Whether a position passes the string and fret axes
    ///
    /// The explicit positions axis is deliberately not consulted here; it is
    /// a candidate source, not a filter (see `materialize`).
    pub fn allows_axes(&self, pos: Position) -> bool {
        if let Some(strings) = &self.strings {
            if !strings.contains(&pos.string) {
                return false;
            }
        }
        if let Some(frets) = &self.frets {
            if !frets.contains(&pos.fret) {
                return false;
            }
        }
        true
    }

    /// Per-axis intersection of two constraint sets
    ///
    /// Unconstrained meets X gives X; two constraints intersect as sets. An
    /// empty intersection stays as an explicit empty set so callers can see
    /// that nothing survives the axis.
    pub fn intersect(&self, other: &Self) -> Self {
        fn merge<T: Eq + std::hash::Hash + Clone>(
            a: &Option<FxHashSet<T>>,
            b: &Option<FxHashSet<T>>,
        ) -> Option<FxHashSet<T>> {
            match (a, b) {
                (None, None) => None,
                (Some(x), None) | (None, Some(x)) => Some(x.clone()),
                (Some(x), Some(y)) => Some(x.intersection(y).cloned().collect()),
            }
        }

        ConstraintSet {
            strings: merge(&self.strings, &other.strings),
            frets: merge(&self.frets, &other.frets),
            positions: merge(&self.positions, &other.positions),
        }
    }

    /// Enumerate the positions satisfying this constraint set on a board
    ///
    /// Starts from the explicit position set when present, otherwise from the
    /// cartesian product of the (possibly constrained) string and fret axes.
    /// Output is sorted and may be empty.
    pub fn materialize(&self, board: Board) -> Vec<Position> {
        let mut result: Vec<Position> = match &self.positions {
            Some(positions) => positions
                .iter()
                .copied()
                .filter(|&p| board.contains(p) && self.allows_axes(p))
                .collect(),
            None => board
                .positions()
                .filter(|&p| self.allows_axes(p))
                .collect(),
        };
        result.sort();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_identity_on_unconstrained() {
        let frets = ConstraintSet::for_frets(1..=5);
        let merged = ConstraintSet::unconstrained().intersect(&frets);
        assert_eq!(merged, frets);
        assert!(merged.strings.is_none());
    }

    #[test]
    fn test_intersect_idempotent() {
        let mut cs = ConstraintSet::for_strings([0, 2, 4]);
        cs.frets = Some([3, 4, 5].into_iter().collect());
        assert_eq!(cs.intersect(&cs), cs);

        let un = ConstraintSet::unconstrained();
        assert_eq!(un.intersect(&un), un);
    }

    #[test]
    fn test_intersect_sets() {
        let a = ConstraintSet::for_frets(0..=5);
        let b = ConstraintSet::for_frets(3..=8);
        let merged = a.intersect(&b);
        let frets = merged.frets.unwrap();
        assert_eq!(frets, (3..=5).collect());
    }

    #[test]
    fn test_empty_intersection_stays_explicit() {
        let a = ConstraintSet::for_strings([0, 1]);
        let b = ConstraintSet::for_strings([4, 5]);
        let merged = a.intersect(&b);
        assert_eq!(merged.strings, Some(FxHashSet::default()));
        assert!(!merged.is_unconstrained());
    }

    #[test]
    fn test_materialize_axes() {
        let board = Board::new(6, 12).unwrap();
        let mut cs = ConstraintSet::for_strings([1]);
        cs.frets = Some([0, 1].into_iter().collect());

        let positions = cs.materialize(board);
        assert_eq!(positions, vec![Position::new(1, 0), Position::new(1, 1)]);
    }

    #[test]
    fn test_materialize_from_explicit_positions() {
        let board = Board::new(6, 12).unwrap();
        let mut cs = ConstraintSet::for_positions([
            Position::new(0, 3),
            Position::new(2, 5),
            Position::new(9, 1), // off the board
        ]);
        // fret axis further filters the explicit set
        cs.frets = Some([3].into_iter().collect());

        assert_eq!(cs.materialize(board), vec![Position::new(0, 3)]);
    }

    #[test]
    fn test_materialize_can_be_empty() {
        let board = Board::new(6, 12).unwrap();
        let cs = ConstraintSet::for_positions([]);
        assert!(cs.materialize(board).is_empty());
    }
}
