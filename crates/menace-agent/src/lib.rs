//! The MENACE learning agent.
//!
//! This crate implements Donald Michie's matchbox learner: a Tic-Tac-Toe
//! agent whose entire learned state is a set of bead counts, one matchbox
//! per canonical board position.
//!
//! # How Learning Works
//!
//! 1. **Matchboxes** - Every canonical board position the agent has visited
//!    owns a [`Matchbox`]: a map from legal move to a bead count.
//! 2. **Selection** - A move is sampled with probability proportional to
//!    its bead count, so well-rewarded moves are chosen more often.
//! 3. **Reinforcement** - At game end the outcome's reward delta is applied
//!    to *every* move the agent made during the game (full-trajectory
//!    credit assignment), clamped so no move ever drops below the bead
//!    floor.
//!
//! Symmetry reduction (from `menace-engine`) keys all 8 rotations and
//! reflections of a position to one shared matchbox, which cuts the state
//! space by roughly a factor of 8 and speeds up convergence accordingly.
//!
//! # Example
//!
//! ```
//! use menace_agent::{Agent, BeadConfig, Outcome};
//! use menace_engine::Board;
//! use rand::SeedableRng as _;
//!
//! let mut agent = Agent::new(BeadConfig::default());
//! let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(1);
//!
//! let board = Board::EMPTY;
//! let square = agent.choose_move(&board, &mut rng).unwrap();
//! let board = board.apply(square).unwrap();
//! # let _ = board;
//!
//! // ... play the game to its end, then reinforce every move made:
//! agent.record_outcome(Outcome::Win);
//! ```
//!
//! All randomness is drawn from a caller-supplied [`rand::Rng`], so a
//! seeded generator makes entire training runs reproducible.

pub use self::{agent::*, beads::*, policy::*};

mod agent;
mod beads;
mod policy;

/// Error returned by [`Agent::choose_move`] when the board is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no legal move: the game is already over")]
pub struct NoLegalMoveError;
