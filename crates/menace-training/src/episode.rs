use rand::Rng;

use menace_agent::{Agent, MovePolicy, Outcome};
use menace_engine::{Board, Player};

use crate::EpisodeError;

/// Plays one game: the agent as X (moving first) against `opponent` as O.
///
/// Returns the outcome relative to the agent. The agent's trace is left in
/// place for the caller to consume with [`Agent::record_outcome`] (or
/// [`Agent::abandon_game`]).
pub fn play_game<P, R>(
    agent: &mut Agent,
    opponent: &mut P,
    rng: &mut R,
) -> Result<Outcome, EpisodeError>
where
    P: MovePolicy + ?Sized,
    R: Rng + ?Sized,
{
    let mut board = Board::EMPTY;
    loop {
        let square = agent.choose_move(&board, rng)?;
        board = board.apply(square)?;
        if let Some(outcome) = Outcome::from_status(board.status(), Player::X) {
            return Ok(outcome);
        }

        let square = opponent
            .choose_square(&board, rng)
            .expect("opponent must produce a move on a non-terminal board");
        board = board.apply(square)?;
        if let Some(outcome) = Outcome::from_status(board.status(), Player::X) {
            return Ok(outcome);
        }
    }
}

/// Plays one self-play game between two independent agents.
///
/// `agent_x` moves first. Both traces are left in place; the returned
/// outcome is relative to `agent_x` (invert it for `agent_o`).
pub fn play_pair_game<R>(
    agent_x: &mut Agent,
    agent_o: &mut Agent,
    rng: &mut R,
) -> Result<Outcome, EpisodeError>
where
    R: Rng + ?Sized,
{
    let mut board = Board::EMPTY;
    loop {
        let square = agent_x.choose_move(&board, rng)?;
        board = board.apply(square)?;
        if let Some(outcome) = Outcome::from_status(board.status(), Player::X) {
            return Ok(outcome);
        }

        let square = agent_o.choose_move(&board, rng)?;
        board = board.apply(square)?;
        if let Some(outcome) = Outcome::from_status(board.status(), Player::X) {
            return Ok(outcome);
        }
    }
}

/// Outcome for the O side given the X-relative outcome.
#[must_use]
pub fn invert_outcome(outcome: Outcome) -> Outcome {
    match outcome {
        Outcome::Win => Outcome::Loss,
        Outcome::Loss => Outcome::Win,
        Outcome::Draw => Outcome::Draw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use menace_agent::{BeadConfig, RandomPolicy};

    #[test]
    fn game_reaches_a_terminal_outcome() {
        let mut agent = Agent::new(BeadConfig::default());
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        for _ in 0..50 {
            let outcome = play_game(&mut agent, &mut RandomPolicy, &mut rng).unwrap();
            assert!(!agent.trace().is_empty());
            // the agent moves first, so it makes 1-5 moves per game
            assert!(agent.trace().len() <= 5);
            agent.record_outcome(outcome);
        }
    }

    #[test]
    fn pair_game_gives_both_agents_a_trace() {
        let mut agent_x = Agent::new(BeadConfig::default());
        let mut agent_o = Agent::new(BeadConfig::default());
        let mut rng = Pcg64Mcg::seed_from_u64(12);
        let outcome = play_pair_game(&mut agent_x, &mut agent_o, &mut rng).unwrap();
        assert!(!agent_x.trace().is_empty());
        assert!(!agent_o.trace().is_empty());
        assert!(agent_x.trace().len() >= agent_o.trace().len());
        let _ = outcome;
    }

    #[test]
    fn outcome_inversion_swaps_win_and_loss() {
        assert_eq!(invert_outcome(Outcome::Win), Outcome::Loss);
        assert_eq!(invert_outcome(Outcome::Loss), Outcome::Win);
        assert_eq!(invert_outcome(Outcome::Draw), Outcome::Draw);
    }
}
