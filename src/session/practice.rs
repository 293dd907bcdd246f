//! PracticeSession: One timed, adaptive question loop
//!
//! The session owns the performance store, the optional training plan and
//! its goal window for its whole lifetime. The hosting surface polls the
//! clock, renders the current question, and feeds answers back in; nothing
//! here blocks.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::warn;

use crate::board::{Board, Position};
use crate::error::{TrainerError, TrainerResult};
use crate::scheduler::{choose, ConstraintSet, GoalWindow, TrainingPlan, TrainingPlanConfig};
use crate::session::summary::{rank_weak_frets, rank_weak_strings, SessionSummary};
use crate::stats::{save_stats, InstrumentMeta, PerformanceStore, SessionMode};
use crate::theory::{check_note_name_answer, index_to_name, note_index_at, Tuning};

/// Attempts of weighted sampling against axis filters before falling back
/// to uniform selection over the materialized constraint product
const REJECTION_BUDGET: usize = 300;

/// Settings for one practice session
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub duration_secs: u64,
    pub max_fret: usize,
    pub tuning: Tuning,
    /// Spell expected answers with flats instead of sharps
    pub prefer_flats: bool,
    /// Caller-chosen restriction, merged with any plan constraints
    pub manual_constraints: Option<ConstraintSet>,
    pub plan: Option<TrainingPlanConfig>,
    /// Where to persist the store on finish; `None` skips persistence
    pub stats_path: Option<PathBuf>,
    /// Fixed seed for reproducible selection
    pub rng_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            duration_secs: 300,
            max_fret: 12,
            tuning: Tuning::standard(),
            prefer_flats: false,
            manual_constraints: None,
            plan: None,
            stats_path: None,
            rng_seed: None,
        }
    }
}

/// The question currently awaiting an answer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentQuestion {
    pub position: Position,
    /// Canonical name of the note at the position
    pub expected: &'static str,
}

/// Outcome of one answered question
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub expected: &'static str,
    pub elapsed: Duration,
}

struct PlanRuntime {
    plan: TrainingPlan,
    window: GoalWindow,
}

/// One bounded-duration adaptive practice session
pub struct PracticeSession {
    board: Board,
    tuning: Tuning,
    prefer_flats: bool,
    store: PerformanceStore,
    manual: Option<ConstraintSet>,
    plan: Option<PlanRuntime>,
    stats_path: Option<PathBuf>,
    rng: StdRng,

    duration: Duration,
    end_time: Instant,
    question_start: Instant,

    answered: u32,
    correct: u32,
    total_time: Duration,

    current: Option<CurrentQuestion>,
    summary: Option<SessionSummary>,
}

impl PracticeSession {
    /// Start a session over the given store
    ///
    /// Validates the configuration, computes the deadline, and selects the
    /// first question immediately.
    pub fn start(config: SessionConfig, store: PerformanceStore) -> TrainerResult<Self> {
        if config.duration_secs == 0 {
            return Err(TrainerError::config("session duration must be > 0 seconds"));
        }
        let board = Board::new(config.tuning.num_strings(), config.max_fret)?;

        let plan = config.plan.map(|plan_config| {
            let window = GoalWindow::new(plan_config.goal_window());
            PlanRuntime {
                plan: TrainingPlan::new(plan_config, board),
                window,
            }
        });

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let duration = Duration::from_secs(config.duration_secs);
        let now = Instant::now();
        let mut session = PracticeSession {
            board,
            tuning: config.tuning,
            prefer_flats: config.prefer_flats,
            store,
            manual: config.manual_constraints,
            plan,
            stats_path: config.stats_path,
            rng,
            duration,
            end_time: now + duration,
            question_start: now,
            answered: 0,
            correct: 0,
            total_time: Duration::ZERO,
            current: None,
            summary: None,
        };
        let _ = session.next_question();
        Ok(session)
    }

    /// Manual constraints merged with the plan's current constraints
    fn effective_constraints(&self) -> ConstraintSet {
        let plan_cs = self
            .plan
            .as_ref()
            .map(|rt| rt.plan.constraints(&self.store));
        match (&self.manual, plan_cs) {
            (None, None) => ConstraintSet::unconstrained(),
            (Some(manual), None) => manual.clone(),
            (None, Some(plan)) => plan,
            (Some(manual), Some(plan)) => manual.intersect(&plan),
        }
    }

    /// Pick the next position, never failing
    ///
    /// Fallback chain: explicit position set → whole board → rejection
    /// sampling under axis filters → uniform over the materialized product →
    /// the origin.
    fn select_position(&mut self) -> Position {
        let mut effective = self.effective_constraints();

        if let Some(positions) = &effective.positions {
            if positions.is_empty() {
                // nothing survives this axis, widen to the alternatives
                effective.positions = None;
            } else {
                let candidates = effective.materialize(self.board);
                if let Some(pos) = choose(&self.store, &candidates, &mut self.rng) {
                    return pos;
                }
                // axis filters emptied the explicit set
                effective.positions = None;
            }
        }

        let full_board: Vec<Position> = self.board.positions().collect();

        if effective.is_unconstrained() {
            if let Some(pos) = choose(&self.store, &full_board, &mut self.rng) {
                return pos;
            }
            return Position::new(0, 0);
        }

        // axis-only constraints: keep the weighting heuristic by resampling
        // the full board until a draw satisfies the filters
        for _ in 0..REJECTION_BUDGET {
            if let Some(pos) = choose(&self.store, &full_board, &mut self.rng) {
                if effective.allows_axes(pos) {
                    return pos;
                }
            }
        }

        let candidates = effective.materialize(self.board);
        if let Some(&pos) = candidates.choose(&mut self.rng) {
            return pos;
        }
        Position::new(0, 0)
    }

    /// Select and expose a new question, or `None` once time is up
    ///
    /// Returning `None` means the host should call `finish`.
    pub fn next_question(&mut self) -> Option<Position> {
        if self.summary.is_some() || self.is_expired() {
            self.current = None;
            return None;
        }

        let position = self.select_position();
        // the board is built from the tuning, so every selectable position
        // has a note; a miss here means those two drifted apart
        let note_index = match note_index_at(position, &self.tuning) {
            Some(index) => index,
            None => {
                debug_assert!(false, "selected {position} off the tuning");
                warn!("selected {} off the tuning, defaulting expected note to C", position);
                0
            }
        };
        self.current = Some(CurrentQuestion {
            position,
            expected: index_to_name(note_index, self.prefer_flats),
        });
        self.question_start = Instant::now();
        Some(position)
    }

    /// Score an answer for the current question
    ///
    /// Records the outcome into the store and the goal window, drives plan
    /// level-ups, and queues the next question. No-op (`None`) once finished
    /// or when no question is pending.
    pub fn submit_answer(&mut self, answer: &str) -> Option<AnswerFeedback> {
        if self.summary.is_some() {
            return None;
        }
        let current = self.current.take()?;
        let elapsed = self.question_start.elapsed();

        let correct = check_note_name_answer(current.expected, answer);
        self.answered += 1;
        if correct {
            self.correct += 1;
        }
        self.total_time += elapsed;

        self.store.record_position_attempt(
            SessionMode::NoteNaming,
            correct,
            current.expected,
            current.position,
        );

        if let Some(rt) = &mut self.plan {
            let now = Instant::now();
            rt.window.record(now, correct);
            if rt.window.goal_met(rt.plan.config().goal_accuracy()) && rt.plan.level_up() {
                // fresh evidence for the new difficulty level
                rt.window.clear();
            }
        }

        // the host shows feedback for a moment; the next question is already
        // waiting when it comes back
        let _ = self.next_question();

        Some(AnswerFeedback {
            correct,
            expected: current.expected,
            elapsed,
        })
    }

    /// End the session now; same terminal path as natural expiry
    pub fn end_early(&mut self) -> SessionSummary {
        self.finish()
    }

    /// Persist the store and produce the summary
    ///
    /// Idempotent: repeated calls return the same summary. A failed persist
    /// is logged and swallowed; the in-memory store stays authoritative.
    pub fn finish(&mut self) -> SessionSummary {
        if let Some(summary) = &self.summary {
            return summary.clone();
        }
        self.current = None;

        if let Some(path) = &self.stats_path {
            let meta = InstrumentMeta {
                tuning_name: Some(self.tuning.name().to_string()),
                num_strings: Some(self.board.num_strings),
            };
            if let Err(e) = save_stats(path, &self.store, &meta) {
                warn!("failed to persist stats to {}: {}", path.display(), e);
            }
        }

        let accuracy_percent = if self.answered > 0 {
            f64::from(self.correct) / f64::from(self.answered) * 100.0
        } else {
            0.0
        };
        let avg_time_secs = if self.answered > 0 {
            self.total_time.as_secs_f64() / f64::from(self.answered)
        } else {
            0.0
        };

        let summary = SessionSummary {
            duration_secs: self.duration.as_secs(),
            max_fret: self.board.max_fret,
            tuning_name: self.tuning.name().to_string(),
            answered: self.answered,
            correct: self.correct,
            accuracy_percent,
            avg_time_secs,
            weak_strings: rank_weak_strings(&self.store, self.board),
            weak_frets: rank_weak_frets(&self.store, self.board),
        };
        self.summary = Some(summary.clone());
        summary
    }

    /// The question currently awaiting an answer
    pub fn current_question(&self) -> Option<&CurrentQuestion> {
        self.current.as_ref()
    }

    /// Whether the session clock has run out
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.end_time
    }

    /// Time left on the session clock
    pub fn time_remaining(&self) -> Duration {
        self.end_time.saturating_duration_since(Instant::now())
    }

    pub fn answered(&self) -> u32 {
        self.answered
    }

    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    /// The attached plan, if any
    pub fn plan(&self) -> Option<&TrainingPlan> {
        self.plan.as_ref().map(|rt| &rt.plan)
    }

    /// Display label for the plan's current difficulty
    pub fn plan_description(&self) -> Option<String> {
        self.plan.as_ref().map(|rt| rt.plan.describe())
    }

    pub fn store(&self) -> &PerformanceStore {
        &self.store
    }

    /// Hand the store back, consuming the session
    pub fn into_store(self) -> PerformanceStore {
        self.store
    }
}
