use std::collections::VecDeque;

use crate::{GameResult, OutcomeTally};

/// Fixed-capacity sliding window over recent game results.
///
/// Where [`OutcomeTally`] accumulates over a whole run, a `RateWindow`
/// reflects only the most recent `capacity` games, which is the better
/// signal for "current" strength once learning has plateaued.
#[derive(Debug, Clone)]
pub struct RateWindow {
    capacity: usize,
    results: VecDeque<GameResult>,
}

impl RateWindow {
    /// Creates a window keeping the latest `capacity` results.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be positive");
        Self {
            capacity,
            results: VecDeque::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, result: GameResult) {
        if self.results.len() == self.capacity {
            self.results.pop_front();
        }
        self.results.push_back(result);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.results.len() == self.capacity
    }

    /// Tally over the games currently in the window.
    #[must_use]
    pub fn tally(&self) -> OutcomeTally {
        let mut tally = OutcomeTally::default();
        for result in &self.results {
            tally.record(*result);
        }
        tally
    }
}
