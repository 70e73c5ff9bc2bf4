//! Training loop for the MENACE agent.
//!
//! This crate drives repeated games between an [`Agent`] and an opponent
//! policy, applies the end-of-game reinforcement, and accumulates the
//! per-game-index outcome rates that external visualization consumes.
//!
//! # How Training Works
//!
//! 1. The agent plays X and always moves first; the opponent plays O.
//! 2. Each game runs to a terminal board, recording the agent's decisions
//!    in its trace.
//! 3. The outcome (relative to the agent) is fed back through
//!    [`Agent::record_outcome`], reinforcing every move of the game.
//! 4. A cumulative [`OutcomeTally`] is checkpointed into a
//!    [`RateSeries`] at a configurable reporting interval.
//!
//! Games are strictly sequential and the bead store is exclusively owned
//! by its agent; agent-vs-agent training ([`Trainer::run_pair`]) uses two
//! fully independent stores.
//!
//! Any core error surfacing here (an illegal generated move, a move
//! request on a terminal board) is an internal-invariant violation: the
//! run aborts, nothing is retried.
//!
//! # Example
//!
//! ```
//! use menace_agent::{Agent, BeadConfig, RandomPolicy};
//! use menace_training::Trainer;
//! use rand::SeedableRng as _;
//!
//! let mut agent = Agent::new(BeadConfig::default());
//! let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(1);
//! let report = Trainer::new(100)
//!     .run(&mut agent, &mut RandomPolicy, 500, &mut rng)
//!     .unwrap();
//! assert_eq!(report.tally.total(), 500);
//! ```
//!
//! [`Agent`]: menace_agent::Agent
//! [`Agent::record_outcome`]: menace_agent::Agent::record_outcome
//! [`OutcomeTally`]: menace_stats::OutcomeTally
//! [`RateSeries`]: menace_stats::RateSeries

pub use self::{episode::*, trainer::*};

mod episode;
mod trainer;

/// Fatal error aborting a training run.
///
/// Both variants indicate an internal-invariant violation rather than a
/// recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EpisodeError {
    /// A generated move was illegal for the board it was applied to.
    #[display("generated move was illegal: {_0}")]
    InvalidMove(menace_engine::InvalidMoveError),
    /// The agent was asked to move on a terminal board.
    #[display("agent asked to move on a terminal board: {_0}")]
    NoLegalMove(menace_agent::NoLegalMoveError),
}
