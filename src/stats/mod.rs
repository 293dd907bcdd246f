//! Performance tracking: Attempt/correct counters and durable storage
//!
//! # Components
//! - `store.rs`: PerformanceStore with per-position, per-note, per-mode counters
//! - `persist.rs`: Atomic JSON save and corrupt-tolerant load

pub mod persist;
pub mod store;

pub use persist::{load_stats, save_stats};
pub use store::{Counter, InstrumentMeta, PerformanceStore, SessionMode};
