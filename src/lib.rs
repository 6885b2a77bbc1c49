//! Habit consistency and streak engine.
//!
//! Pure computations over daily habit records: per-habit streaks under a
//! continuity policy, a dense day-by-day aggregate, 0..=3 contribution
//! scores for a heatmap, and attendance goal arithmetic. Nothing here reads
//! the clock or touches storage; `today` is always passed in.

pub mod config;
pub mod dates;
pub mod engine;
pub mod error;
pub mod models;

pub use error::{EngineError, EngineResult};
