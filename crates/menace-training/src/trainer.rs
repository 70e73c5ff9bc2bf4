use rand::Rng;

use menace_agent::{Agent, MovePolicy, Outcome};
use menace_stats::{GameResult, OutcomeTally, RateSeries};

use crate::{EpisodeError, episode};

fn game_result(outcome: Outcome) -> GameResult {
    match outcome {
        Outcome::Win => GameResult::Win,
        Outcome::Draw => GameResult::Draw,
        Outcome::Loss => GameResult::Loss,
    }
}

/// Accumulated results of one training run.
#[derive(Debug, Clone, Default)]
pub struct TrainingReport {
    /// Cumulative outcome counts over the whole run.
    pub tally: OutcomeTally,
    /// Checkpointed rates at each reporting interval (and at the end).
    pub series: RateSeries,
}

/// Sequential training driver.
///
/// Plays `num_games` full games, reinforcing the agent after each one and
/// checkpointing cumulative rates every `report_every` games.
#[derive(Debug, Clone, Copy)]
pub struct Trainer {
    report_every: usize,
}

impl Trainer {
    /// `report_every == 0` disables intermediate checkpoints; the final
    /// checkpoint is always taken.
    #[must_use]
    pub fn new(report_every: usize) -> Self {
        Self { report_every }
    }

    pub fn run<P, R>(
        &self,
        agent: &mut Agent,
        opponent: &mut P,
        num_games: usize,
        rng: &mut R,
    ) -> Result<TrainingReport, EpisodeError>
    where
        P: MovePolicy + ?Sized,
        R: Rng + ?Sized,
    {
        let mut report = TrainingReport::default();
        for game in 1..=num_games {
            let outcome = episode::play_game(agent, opponent, rng)?;
            agent.record_outcome(outcome);
            report.tally.record(game_result(outcome));
            if self.is_checkpoint(game, num_games) {
                report.series.push(game as u64, report.tally);
            }
        }
        Ok(report)
    }

    /// Trains two agents against each other over independent bead stores.
    ///
    /// The returned report is relative to `agent_x`; each agent is
    /// reinforced with its own outcome after every game.
    pub fn run_pair<R>(
        &self,
        agent_x: &mut Agent,
        agent_o: &mut Agent,
        num_games: usize,
        rng: &mut R,
    ) -> Result<TrainingReport, EpisodeError>
    where
        R: Rng + ?Sized,
    {
        let mut report = TrainingReport::default();
        for game in 1..=num_games {
            let outcome = episode::play_pair_game(agent_x, agent_o, rng)?;
            agent_x.record_outcome(outcome);
            agent_o.record_outcome(episode::invert_outcome(outcome));
            report.tally.record(game_result(outcome));
            if self.is_checkpoint(game, num_games) {
                report.series.push(game as u64, report.tally);
            }
        }
        Ok(report)
    }

    fn is_checkpoint(&self, game: usize, num_games: usize) -> bool {
        game == num_games || (self.report_every > 0 && game % self.report_every == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use menace_agent::{BeadConfig, RandomPolicy};

    #[test]
    fn report_counts_every_game() {
        let mut agent = Agent::new(BeadConfig::default());
        let mut rng = Pcg64Mcg::seed_from_u64(5);
        let report = Trainer::new(40)
            .run(&mut agent, &mut RandomPolicy, 100, &mut rng)
            .unwrap();
        assert_eq!(report.tally.total(), 100);
        // checkpoints at 40, 80, and the final game
        let indices: Vec<_> = report.series.iter().map(|p| p.game_index).collect();
        assert_eq!(indices, vec![40, 80, 100]);
        assert!(agent.trace().is_empty());
        assert!(agent.store().len() > 10);
    }

    #[test]
    fn zero_report_interval_keeps_only_the_final_checkpoint() {
        let mut agent = Agent::new(BeadConfig::default());
        let mut rng = Pcg64Mcg::seed_from_u64(6);
        let report = Trainer::new(0)
            .run(&mut agent, &mut RandomPolicy, 25, &mut rng)
            .unwrap();
        assert_eq!(report.series.len(), 1);
        assert_eq!(report.series.last().unwrap().game_index, 25);
    }

    #[test]
    fn pair_training_grows_both_stores() {
        let mut agent_x = Agent::new(BeadConfig::default());
        let mut agent_o = Agent::new(BeadConfig::default());
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let report = Trainer::new(0)
            .run_pair(&mut agent_x, &mut agent_o, 200, &mut rng)
            .unwrap();
        assert_eq!(report.tally.total(), 200);
        assert!(!agent_x.store().is_empty());
        assert!(!agent_o.store().is_empty());
    }

    #[test]
    fn same_seed_reproduces_the_same_run() {
        let run = |seed: u64| {
            let mut agent = Agent::new(BeadConfig::default());
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let report = Trainer::new(0)
                .run(&mut agent, &mut RandomPolicy, 300, &mut rng)
                .unwrap();
            (report.tally, agent.store().snapshot())
        };
        let (tally_a, snapshot_a) = run(99);
        let (tally_b, snapshot_b) = run(99);
        assert_eq!(tally_a, tally_b);
        assert_eq!(snapshot_a, snapshot_b);
    }

    /// Learning-curve property: with enough training against random play,
    /// the agent's recent win rate clearly exceeds its untrained win rate.
    #[test]
    fn win_rate_improves_with_training() {
        let mut agent = Agent::new(BeadConfig::default());
        let mut rng = Pcg64Mcg::seed_from_u64(2024);
        let trainer = Trainer::new(0);

        let early = trainer
            .run(&mut agent, &mut RandomPolicy, 500, &mut rng)
            .unwrap()
            .tally
            .win_rate();
        trainer
            .run(&mut agent, &mut RandomPolicy, 2500, &mut rng)
            .unwrap();
        let late = trainer
            .run(&mut agent, &mut RandomPolicy, 500, &mut rng)
            .unwrap()
            .tally
            .win_rate();

        assert!(
            late > early + 0.05,
            "win rate did not improve: early {early:.3}, late {late:.3}"
        );
    }
}
