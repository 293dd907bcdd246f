//! Scheduling: Adaptive position selection, constraints, and training plans
//!
//! # Components
//! - `weighting.rs`: Performance-based sampling weights and weighted choice
//! - `constraints.rs`: ConstraintSet with intersection and materialization
//! - `plan.rs`: Training plan profiles and their ramp state machines
//! - `goal.rs`: Rolling time-windowed accuracy for level-up decisions

pub mod constraints;
pub mod goal;
pub mod plan;
pub mod weighting;

pub use constraints::ConstraintSet;
pub use goal::{GoalWindow, GOAL_MIN_SAMPLES};
pub use plan::{PlanProfile, TrainingPlan, TrainingPlanConfig};
pub use weighting::{choose, weight, UNSEEN_WEIGHT};
