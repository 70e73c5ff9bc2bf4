use arrayvec::ArrayVec;
use rand::Rng;

use menace_engine::{Board, GameStatus, Player, Square, Transform, canonicalize};

use crate::{BeadConfig, BeadStore, NoLegalMoveError};

/// Game outcome from the agent's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Derives the outcome of a terminal status for the player holding
    /// `symbol`. Returns `None` while the game is still ongoing.
    #[must_use]
    pub fn from_status(status: GameStatus, symbol: Player) -> Option<Self> {
        match status {
            GameStatus::Ongoing => None,
            GameStatus::Draw => Some(Outcome::Draw),
            GameStatus::Won(winner) if winner == symbol => Some(Outcome::Win),
            GameStatus::Won(_) => Some(Outcome::Loss),
        }
    }
}

/// One decision recorded during a game, in canonical coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// Canonical board encoding (the matchbox key).
    pub key: String,
    /// The move chosen, in canonical-board coordinates.
    pub square: Square,
    /// Transform that carried the original board to its canonical image.
    pub transform: Transform,
}

/// The MENACE agent: a [`BeadStore`] plus the trace of the game in
/// progress.
///
/// The trace is owned exclusively by the agent and consumed by
/// [`Agent::record_outcome`] at game end; nothing outside the agent ever
/// mutates learned state.
#[derive(Debug, Clone, Default)]
pub struct Agent {
    store: BeadStore,
    trace: ArrayVec<TraceEntry, 9>,
}

impl Agent {
    #[must_use]
    pub fn new(config: BeadConfig) -> Self {
        Self {
            store: BeadStore::new(config),
            trace: ArrayVec::new(),
        }
    }

    /// Builds an agent around an already-learned store.
    #[must_use]
    pub fn with_store(store: BeadStore) -> Self {
        Self {
            store,
            trace: ArrayVec::new(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &BeadStore {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> BeadStore {
        self.store
    }

    /// Decisions made so far in the current game.
    #[must_use]
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Picks a move for `board` and records it in the game trace.
    ///
    /// The board is canonicalized, its matchbox is fetched (created with
    /// uniform beads on first visit), a canonical square is sampled with
    /// probability proportional to bead count, and the square is mapped
    /// back to the original board's coordinates.
    pub fn choose_move<R>(&mut self, board: &Board, rng: &mut R) -> Result<Square, NoLegalMoveError>
    where
        R: Rng + ?Sized,
    {
        if !board.status().is_ongoing() {
            return Err(NoLegalMoveError);
        }
        let (canonical, transform) = canonicalize(board);
        let matchbox = self.store.get_or_init(&canonical);
        let square = matchbox.sample_square(rng).ok_or(NoLegalMoveError)?;
        self.trace.push(TraceEntry {
            key: canonical.encode(),
            square,
            transform,
        });
        Ok(transform.original_square(square))
    }

    /// Reinforces every move of the finished game and clears the trace.
    ///
    /// The reward delta comes from the store's [`RewardPolicy`]; applying
    /// it to the whole trajectory rather than only the final move is
    /// MENACE's defining credit-assignment rule.
    ///
    /// [`RewardPolicy`]: crate::RewardPolicy
    pub fn record_outcome(&mut self, outcome: Outcome) {
        let rewards = self.store.config().rewards;
        let delta = match outcome {
            Outcome::Win => rewards.win,
            Outcome::Draw => rewards.draw,
            Outcome::Loss => rewards.loss,
        };
        for entry in self.trace.take() {
            self.store.adjust(&entry.key, entry.square, delta);
        }
    }

    /// Discards the in-progress trace without learning from it, for games
    /// abandoned before reaching a terminal position.
    pub fn abandon_game(&mut self) {
        self.trace.clear();
    }

    /// Bead counts for `board`, mapped back to original-board coordinates.
    ///
    /// Creates the matchbox if the position has never been visited. Useful
    /// for debugging and for displaying the agent's learned preferences.
    pub fn inspect(&mut self, board: &Board) -> Vec<(Square, u32)> {
        let (canonical, transform) = canonicalize(board);
        self.store
            .get_or_init(&canonical)
            .iter()
            .map(|(square, count)| (transform.original_square(square), count))
            .collect()
    }
}
