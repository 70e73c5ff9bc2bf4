//! Tic-Tac-Toe game rules and board symmetry.
//!
//! This crate provides the pure game layer used by the MENACE learner:
//!
//! - [`Board`] - Immutable 3×3 board value type with move legality and
//!   win/draw detection
//! - [`Square`] - Validated board index (0-8)
//! - [`Transform`] - One of the 8 dihedral symmetries of the board
//! - [`canonicalize`] - Reduction of a board to its canonical symmetry image
//!
//! No learning state lives here; the agent crate builds on top of these
//! types.

pub use self::{board::*, symmetry::*};

mod board;
mod symmetry;

/// Error returned by [`Board::apply`] for a move that cannot be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidMoveError {
    /// The target square already holds a symbol.
    #[display("square {_0} is already occupied")]
    SquareOccupied(#[error(not(source))] Square),
    /// The game has already been won or drawn.
    #[display("the game is already over")]
    GameOver,
}

/// Error returned when a 9-character board encoding cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("board encoding must be 9 characters, got {_0}")]
    BadLength(#[error(not(source))] usize),
    #[display("invalid cell character {_0:?}")]
    BadCell(#[error(not(source))] char),
}
