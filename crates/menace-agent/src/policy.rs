use rand::Rng;
use rand::seq::IndexedRandom as _;

use menace_engine::{Board, Square};

/// A move-selection policy for the agent's opponent.
///
/// Implementors pick a square for the side to move on `board`, or `None`
/// when the board is terminal. Policies may keep internal state but never
/// share the agent's bead store.
pub trait MovePolicy {
    fn choose_square<R>(&mut self, board: &Board, rng: &mut R) -> Option<Square>
    where
        R: Rng + ?Sized;
}

/// Uniformly random legal play, the classic MENACE training opponent.
///
/// Random play is predictably weak but covers the state space broadly,
/// which is what the bead-count rule needs to converge.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl MovePolicy for RandomPolicy {
    fn choose_square<R>(&mut self, board: &Board, rng: &mut R) -> Option<Square>
    where
        R: Rng + ?Sized,
    {
        board.legal_moves().choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use menace_engine::Cell;

    #[test]
    fn random_policy_plays_only_legal_squares() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let mut policy = RandomPolicy;
        let board = Board::decode("XO.X.O...").unwrap();
        for _ in 0..50 {
            let square = policy.choose_square(&board, &mut rng).unwrap();
            assert_eq!(board.get(square), Cell::Empty);
        }
    }

    #[test]
    fn random_policy_returns_none_on_terminal_board() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let mut policy = RandomPolicy;
        let won = Board::decode("XXX.OO.O.").unwrap();
        assert_eq!(policy.choose_square(&won, &mut rng), None);
    }
}
