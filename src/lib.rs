//! Fretboard trainer core - adaptive practice-question scheduling
//!
//! Given a learner's per-position history, picks which fretboard cell to ask
//! about next, runs a timed session, and ramps difficulty through training
//! plans as rolling accuracy meets the goal.
//!
//! # Modules
//! - `board`: Position and Board value types
//! - `theory`: Notes, tunings, and position ↔ pitch-class mapping
//! - `stats`: PerformanceStore counters with durable JSON storage
//! - `scheduler`: Weighted selection, constraints, plans, goal window
//! - `session`: PracticeSession orchestration and summaries

pub mod board;
pub mod error;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod theory;

pub use board::{Board, Position};
pub use error::{TrainerError, TrainerResult};
pub use scheduler::{ConstraintSet, GoalWindow, PlanProfile, TrainingPlan, TrainingPlanConfig};
pub use session::{PracticeSession, SessionConfig, SessionSummary};
pub use stats::{load_stats, save_stats, InstrumentMeta, PerformanceStore, SessionMode};
pub use theory::Tuning;
