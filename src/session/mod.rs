//! Practice sessions: Timed question loop and results
//!
//! # Components
//! - `practice.rs`: PracticeSession orchestration (selection, scoring, level-ups)
//! - `summary.rs`: SessionSummary and weak-area ranking

pub mod practice;
pub mod summary;

pub use practice::{AnswerFeedback, CurrentQuestion, PracticeSession, SessionConfig};
pub use summary::{SessionSummary, WeakArea};
