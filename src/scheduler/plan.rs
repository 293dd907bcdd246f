//! Training plans: Difficulty profiles with a ramping state machine
//!
//! A plan is an immutable, validated config plus a mutable ramp cursor. Each
//! profile turns its cursor into a ConstraintSet and knows how to advance one
//! step on level-up. There is no terminal state; once the cursor hits the
//! configured outer bound, `level_up` keeps returning `false`.
//!
//! String-range plans use player numbering (1 = thinnest string); the
//! conversion to zero-based internal indices happens when constraints are
//! produced.

use std::time::{Duration, Instant};

use crate::board::Board;
use crate::error::{TrainerError, TrainerResult};
use crate::scheduler::constraints::ConstraintSet;
use crate::stats::PerformanceStore;

/// Per-profile ramp parameters
#[derive(Clone, Debug, PartialEq)]
pub enum PlanProfile {
    /// Drill a fret range, widening the ceiling toward the board max
    FretsRange {
        start_fret: usize,
        end_fret: usize,
        ramp_step: usize,
    },
    /// Drill a string range in player numbering (1 = thinnest)
    ///
    /// Level-ups widen the low bound toward 1 first, then the high bound
    /// toward the instrument's string count.
    StringRange {
        low_string: usize,
        high_string: usize,
        ramp_step: usize,
    },
    /// Drill positions whose badness meets a threshold, lowering the
    /// threshold over time so the qualifying set widens
    WeakSpots {
        heat_threshold: f64,
        ramp_step: f64,
    },
}

/// Validated plan configuration: profile plus goal parameters
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingPlanConfig {
    profile: PlanProfile,
    goal_accuracy: f64,
    goal_window: Duration,
}

impl TrainingPlanConfig {
    /// Validate and build a config; out-of-range values fail with a message
    pub fn new(profile: PlanProfile, goal_accuracy: f64, goal_window_secs: u64) -> TrainerResult<Self> {
        if !(0.0..=1.0).contains(&goal_accuracy) {
            return Err(TrainerError::config(format!(
                "goal_accuracy must be between 0 and 1, got {goal_accuracy}"
            )));
        }
        if !(10..=1800).contains(&goal_window_secs) {
            return Err(TrainerError::config(format!(
                "goal_window_secs must be between 10 and 1800, got {goal_window_secs}"
            )));
        }

        match &profile {
            PlanProfile::FretsRange {
                start_fret,
                end_fret,
                ramp_step,
            } => {
                if start_fret > end_fret {
                    return Err(TrainerError::config(format!(
                        "start_fret {start_fret} exceeds end_fret {end_fret}"
                    )));
                }
                if *ramp_step < 1 {
                    return Err(TrainerError::config("ramp_step must be >= 1 fret"));
                }
            }
            PlanProfile::StringRange {
                low_string,
                high_string,
                ramp_step,
            } => {
                if *low_string < 1 {
                    return Err(TrainerError::config("low_string must be >= 1"));
                }
                if low_string > high_string {
                    return Err(TrainerError::config(format!(
                        "low_string {low_string} exceeds high_string {high_string}"
                    )));
                }
                if *ramp_step < 1 {
                    return Err(TrainerError::config("ramp_step must be >= 1 string"));
                }
            }
            PlanProfile::WeakSpots {
                heat_threshold,
                ramp_step,
            } => {
                if !(0.0..=1.0).contains(heat_threshold) {
                    return Err(TrainerError::config(format!(
                        "heat_threshold must be between 0 and 1, got {heat_threshold}"
                    )));
                }
                if !(0.01..=1.0).contains(ramp_step) {
                    return Err(TrainerError::config(format!(
                        "ramp_step must be between 0.01 and 1.0, got {ramp_step}"
                    )));
                }
            }
        }

        Ok(TrainingPlanConfig {
            profile,
            goal_accuracy,
            goal_window: Duration::from_secs(goal_window_secs),
        })
    }

    /// The classic "Frets 1-5" preset, ramping two frets per level
    pub fn frets_1_to_5(goal_accuracy: f64, goal_window_secs: u64) -> TrainerResult<Self> {
        Self::new(
            PlanProfile::FretsRange {
                start_fret: 1,
                end_fret: 5,
                ramp_step: 2,
            },
            goal_accuracy,
            goal_window_secs,
        )
    }

    /// The "Strings 3-6" preset, widening one string per level
    pub fn strings_3_to_6(
        goal_accuracy: f64,
        goal_window_secs: u64,
        num_strings: usize,
    ) -> TrainerResult<Self> {
        Self::new(
            PlanProfile::StringRange {
                low_string: 3,
                high_string: num_strings.max(3),
                ramp_step: 1,
            },
            goal_accuracy,
            goal_window_secs,
        )
    }

    /// The weak-spot heatmap preset, starting at the given threshold
    pub fn weak_spots(
        goal_accuracy: f64,
        goal_window_secs: u64,
        heat_threshold: f64,
    ) -> TrainerResult<Self> {
        Self::new(
            PlanProfile::WeakSpots {
                heat_threshold,
                ramp_step: 0.10,
            },
            goal_accuracy,
            goal_window_secs,
        )
    }

    pub fn profile(&self) -> &PlanProfile {
        &self.profile
    }

    pub fn goal_accuracy(&self) -> f64 {
        self.goal_accuracy
    }

    pub fn goal_window(&self) -> Duration {
        self.goal_window
    }
}

/// Mutable ramp cursor, one variant per profile
#[derive(Clone, Debug, PartialEq)]
enum RampCursor {
    Frets { ceiling: usize },
    Strings { low: usize, high: usize },
    Weak { threshold: f64 },
}

/// A config bound to a board, with live ramp state
#[derive(Clone, Debug)]
pub struct TrainingPlan {
    config: TrainingPlanConfig,
    board: Board,
    cursor: RampCursor,
    last_level_up: Option<Instant>,
}

impl TrainingPlan {
    /// Attach a config to a board, starting the cursor at the profile's
    /// initial difficulty
    pub fn new(config: TrainingPlanConfig, board: Board) -> Self {
        let cursor = match config.profile() {
            PlanProfile::FretsRange { end_fret, .. } => RampCursor::Frets {
                ceiling: (*end_fret).min(board.max_fret),
            },
            PlanProfile::StringRange {
                low_string,
                high_string,
                ..
            } => RampCursor::Strings {
                low: (*low_string).min(board.num_strings),
                high: (*high_string).min(board.num_strings),
            },
            PlanProfile::WeakSpots { heat_threshold, .. } => RampCursor::Weak {
                threshold: *heat_threshold,
            },
        };
        TrainingPlan {
            config,
            board,
            cursor,
            last_level_up: None,
        }
    }

    pub fn config(&self) -> &TrainingPlanConfig {
        &self.config
    }

    /// When the last successful level-up happened, if any
    pub fn last_level_up(&self) -> Option<Instant> {
        self.last_level_up
    }

    /// Current fret ceiling, for display (frets profile only)
    pub fn fret_ceiling(&self) -> Option<usize> {
        match self.cursor {
            RampCursor::Frets { ceiling } => Some(ceiling),
            _ => None,
        }
    }

    /// Current heat threshold, for display (weak-spots profile only)
    pub fn heat_threshold(&self) -> Option<f64> {
        match self.cursor {
            RampCursor::Weak { threshold } => Some(threshold),
            _ => None,
        }
    }

    /// Convert player string numbering (1 = thinnest) to the internal
    /// zero-based index (0 = lowest-pitched)
    fn string_number_to_index(&self, number: usize) -> Option<usize> {
        if number >= 1 && number <= self.board.num_strings {
            Some(self.board.num_strings - number)
        } else {
            None
        }
    }

    /// Constraint set for the current ramp state
    pub fn constraints(&self, store: &PerformanceStore) -> ConstraintSet {
        match (&self.config.profile, &self.cursor) {
            (PlanProfile::FretsRange { start_fret, .. }, RampCursor::Frets { ceiling }) => {
                let hi = (*ceiling).min(self.board.max_fret);
                ConstraintSet::for_frets(*start_fret..=hi)
            }
            (PlanProfile::StringRange { .. }, RampCursor::Strings { low, high }) => {
                ConstraintSet::for_strings(
                    (*low..=*high).filter_map(|n| self.string_number_to_index(n)),
                )
            }
            (PlanProfile::WeakSpots { .. }, RampCursor::Weak { threshold }) => {
                ConstraintSet::for_positions(
                    self.board
                        .positions()
                        .filter(|&p| store.badness_at(p) >= *threshold),
                )
            }
            // cursor variants are created from the profile, so these arms
            // cannot pair up differently
            _ => ConstraintSet::unconstrained(),
        }
    }

    /// Advance one ramp step; returns whether anything changed
    pub fn level_up(&mut self) -> bool {
        let changed = match (&self.config.profile, &mut self.cursor) {
            (PlanProfile::FretsRange { ramp_step, .. }, RampCursor::Frets { ceiling }) => {
                if *ceiling < self.board.max_fret {
                    *ceiling = (*ceiling + ramp_step).min(self.board.max_fret);
                    true
                } else {
                    false
                }
            }
            (PlanProfile::StringRange { ramp_step, .. }, RampCursor::Strings { low, high }) => {
                if *low > 1 {
                    *low = low.saturating_sub(*ramp_step).max(1);
                    true
                } else if *high < self.board.num_strings {
                    *high = (*high + ramp_step).min(self.board.num_strings);
                    true
                } else {
                    false
                }
            }
            (PlanProfile::WeakSpots { ramp_step, .. }, RampCursor::Weak { threshold }) => {
                if *threshold > 0.0 {
                    *threshold = (*threshold - ramp_step).max(0.0);
                    true
                } else {
                    false
                }
            }
            _ => false,
        };

        if changed {
            self.last_level_up = Some(Instant::now());
        }
        changed
    }

    /// Short human-readable description of the current difficulty
    pub fn describe(&self) -> String {
        match (&self.config.profile, &self.cursor) {
            (PlanProfile::FretsRange { start_fret, .. }, RampCursor::Frets { ceiling }) => {
                format!("Frets {start_fret}-{ceiling}")
            }
            (PlanProfile::StringRange { .. }, RampCursor::Strings { low, high }) => {
                format!("Strings {low}-{high}")
            }
            (PlanProfile::WeakSpots { .. }, RampCursor::Weak { threshold }) => {
                format!("Weak spots >= {:.0}%", threshold * 100.0)
            }
            _ => String::new(),
        }
    }
}
