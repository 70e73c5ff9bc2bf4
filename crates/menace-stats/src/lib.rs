//! Outcome accounting for MENACE training runs.
//!
//! Dependency-free utilities consumed by the training loop and its
//! reporting output:
//!
//! - [`OutcomeTally`]: running win/draw/loss counts with rate accessors
//! - [`RateSeries`]: ordered per-game-index checkpoints of a tally,
//!   the interface consumed by external learning-curve plotting
//! - [`RateWindow`]: fixed-capacity sliding window for recent-form rates
//!
//! # Example
//!
//! ```
//! use menace_stats::{GameResult, OutcomeTally, RateSeries};
//!
//! let mut tally = OutcomeTally::default();
//! let mut series = RateSeries::default();
//! tally.record(GameResult::Win);
//! tally.record(GameResult::Draw);
//! series.push(2, tally);
//! assert_eq!(series.last().unwrap().tally.win_rate(), 0.5);
//! ```

pub use self::{rates::*, window::*};

mod rates;
mod window;

/// Result of one game from the tracked player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Draw,
    Loss,
}
