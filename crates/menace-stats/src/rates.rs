use crate::GameResult;

/// Running win/draw/loss counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    wins: u64,
    draws: u64,
    losses: u64,
}

#[expect(clippy::cast_precision_loss)]
fn rate(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

impl OutcomeTally {
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Loss => self.losses += 1,
        }
    }

    #[must_use]
    pub fn wins(&self) -> u64 {
        self.wins
    }

    #[must_use]
    pub fn draws(&self) -> u64 {
        self.draws
    }

    #[must_use]
    pub fn losses(&self) -> u64 {
        self.losses
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.wins + self.draws + self.losses
    }

    /// Fraction of games won; 0 when no games are recorded.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        rate(self.wins, self.total())
    }

    #[must_use]
    pub fn draw_rate(&self) -> f64 {
        rate(self.draws, self.total())
    }

    #[must_use]
    pub fn loss_rate(&self) -> f64 {
        rate(self.losses, self.total())
    }
}

/// A tally snapshot taken after `game_index` games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePoint {
    pub game_index: u64,
    pub tally: OutcomeTally,
}

/// Ordered checkpoints of a training run's cumulative rates.
///
/// Consumers (report printing, external plotting) read this as an ordered
/// sequence of `(game_index, rates)` points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateSeries {
    points: Vec<RatePoint>,
}

impl RateSeries {
    /// Appends a checkpoint. `game_index` must not decrease.
    pub fn push(&mut self, game_index: u64, tally: OutcomeTally) {
        debug_assert!(
            self.points.last().is_none_or(|p| p.game_index <= game_index),
            "checkpoints must be pushed in game order"
        );
        self.points.push(RatePoint { game_index, tally });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&RatePoint> {
        self.points.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RatePoint> + '_ {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tally_has_zero_rates() {
        let tally = OutcomeTally::default();
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.win_rate(), 0.0);
        assert_eq!(tally.draw_rate(), 0.0);
        assert_eq!(tally.loss_rate(), 0.0);
    }

    #[test]
    fn rates_sum_to_one() {
        let mut tally = OutcomeTally::default();
        for _ in 0..6 {
            tally.record(GameResult::Win);
        }
        for _ in 0..3 {
            tally.record(GameResult::Draw);
        }
        tally.record(GameResult::Loss);
        assert_eq!(tally.total(), 10);
        assert_eq!(tally.win_rate(), 0.6);
        assert_eq!(tally.draw_rate(), 0.3);
        assert_eq!(tally.loss_rate(), 0.1);
        let sum = tally.win_rate() + tally.draw_rate() + tally.loss_rate();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn series_keeps_checkpoints_in_order() {
        let mut tally = OutcomeTally::default();
        let mut series = RateSeries::default();
        tally.record(GameResult::Win);
        series.push(1, tally);
        tally.record(GameResult::Loss);
        series.push(2, tally);

        let points: Vec<_> = series.iter().map(|p| p.game_index).collect();
        assert_eq!(points, vec![1, 2]);
        assert_eq!(series.last().unwrap().tally.win_rate(), 0.5);
    }
}
