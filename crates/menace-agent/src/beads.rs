use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use rand::Rng;
use rand::distr::{Distribution as _, weighted::WeightedIndex};
use serde::{Deserialize, Serialize};

use menace_engine::{Board, ParseBoardError, Square, canonicalize};

/// Reward deltas applied to every move of a finished game.
///
/// Michie's historical magnitudes were never fully standardized, so they
/// are configuration rather than constants. The defaults follow the common
/// +3/+1/−1 scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPolicy {
    pub win: i32,
    pub draw: i32,
    pub loss: i32,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: -1,
        }
    }
}

/// Learning parameters for a [`BeadStore`].
///
/// `initial_beads` is a fixed per-move constant rather than Michie's
/// ply-scaled counts; `min_beads` is the floor below which punishment never
/// pushes a count, mirroring the physical rule that a matchbox always keeps
/// at least one bead of every color it ever held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeadConfig {
    pub initial_beads: u32,
    pub min_beads: u32,
    pub rewards: RewardPolicy,
}

impl Default for BeadConfig {
    fn default() -> Self {
        Self {
            initial_beads: 4,
            min_beads: 1,
            rewards: RewardPolicy::default(),
        }
    }
}

impl BeadConfig {
    /// Initial per-move count, never below the floor (or 1).
    fn effective_initial(&self) -> u32 {
        self.initial_beads.max(self.min_beads).max(1)
    }
}

/// Bead counts for one canonical board position.
///
/// Keys are squares in canonical-board coordinates. A `BTreeMap` keeps
/// iteration and serialization order deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matchbox {
    beads: BTreeMap<Square, u32>,
}

impl Matchbox {
    fn new_uniform(board: &Board, initial: u32) -> Self {
        let beads = board
            .legal_moves()
            .into_iter()
            .map(|sq| (sq, initial))
            .collect();
        Self { beads }
    }

    #[must_use]
    pub fn bead_count(&self, square: Square) -> Option<u32> {
        self.beads.get(&square).copied()
    }

    #[must_use]
    pub fn total_beads(&self) -> u64 {
        self.beads.values().map(|&c| u64::from(c)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, u32)> + '_ {
        self.beads.iter().map(|(&sq, &count)| (sq, count))
    }

    /// Samples a square with probability proportional to its bead count.
    ///
    /// Returns `None` for an empty box (a terminal position).
    pub fn sample_square<R>(&self, rng: &mut R) -> Option<Square>
    where
        R: Rng + ?Sized,
    {
        let squares: ArrayVec<Square, 9> = self.beads.keys().copied().collect();
        let dist = WeightedIndex::new(self.beads.values().copied()).ok()?;
        Some(squares[dist.sample(rng)])
    }

    /// Adds `delta` beads to `square`, clamped to `floor`.
    ///
    /// Squares the box does not contain are ignored.
    pub fn adjust(&mut self, square: Square, delta: i32, floor: u32) {
        if let Some(count) = self.beads.get_mut(&square) {
            let adjusted = i64::from(*count) + i64::from(delta);
            let clamped = adjusted.clamp(i64::from(floor), i64::from(u32::MAX));
            *count = u32::try_from(clamped).expect("clamped into u32 range");
        }
    }
}

/// The complete learned state: one [`Matchbox`] per visited canonical
/// position, keyed by the position's 9-character encoding.
///
/// Boxes are created lazily on first visit with a uniform bead count per
/// legal move, and mutated only by [`BeadStore::adjust`]; everything else
/// is read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeadStore {
    config: BeadConfig,
    boxes: BTreeMap<String, Matchbox>,
}

impl BeadStore {
    #[must_use]
    pub fn new(config: BeadConfig) -> Self {
        Self {
            config,
            boxes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &BeadConfig {
        &self.config
    }

    /// Number of matchboxes created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Matchbox> {
        self.boxes.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Matchbox)> + '_ {
        self.boxes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the matchbox for a canonical board, creating it with a
    /// uniform bead count per legal move on first visit.
    pub fn get_or_init(&mut self, canonical: &Board) -> &Matchbox {
        let initial = self.config.effective_initial();
        self.boxes
            .entry(canonical.encode())
            .or_insert_with(|| Matchbox::new_uniform(canonical, initial))
    }

    /// Applies a reward delta to one (position, move) pair.
    ///
    /// Unknown keys are ignored; counts never drop below the configured
    /// floor. This is the only mutation point of learned state.
    pub fn adjust(&mut self, key: &str, square: Square, delta: i32) {
        let floor = self.config.min_beads.max(1);
        if let Some(matchbox) = self.boxes.get_mut(key) {
            matchbox.adjust(square, delta, floor);
        }
    }

    /// Extracts a serializable snapshot of the learned state.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let boxes = self
            .boxes
            .iter()
            .map(|(key, matchbox)| {
                let beads = matchbox
                    .iter()
                    .map(|(sq, count)| {
                        let index = u8::try_from(sq.index()).expect("square index is 0-8");
                        (index, i64::from(count))
                    })
                    .collect();
                (key.clone(), beads)
            })
            .collect();
        StoreSnapshot {
            config: self.config,
            boxes,
        }
    }

    /// Rebuilds a store from a snapshot, validating every entry.
    ///
    /// The whole load is rejected on the first corrupt entry; no partial
    /// repair is attempted.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, StoreLoadError> {
        let config = snapshot.config;
        let floor = i64::from(config.min_beads.max(1));
        let mut boxes = BTreeMap::new();
        for (key, raw_beads) in snapshot.boxes {
            let board = Board::decode(&key).map_err(|source| StoreLoadError::BadKey {
                key: key.clone(),
                source,
            })?;
            if canonicalize(&board).0 != board {
                return Err(StoreLoadError::NotCanonical { key });
            }
            let legal = board.legal_moves();
            if raw_beads.len() != legal.len() {
                return Err(StoreLoadError::MoveMismatch { key });
            }
            let mut beads = BTreeMap::new();
            for (index, count) in raw_beads {
                let square = Square::new(index)
                    .ok_or_else(|| StoreLoadError::BadSquare {
                        key: key.clone(),
                        square: index,
                    })?;
                if !legal.contains(&square) {
                    return Err(StoreLoadError::MoveMismatch { key });
                }
                if count < 0 {
                    return Err(StoreLoadError::NegativeCount {
                        key,
                        square: index,
                        count,
                    });
                }
                if count < floor {
                    return Err(StoreLoadError::CountBelowFloor {
                        key,
                        square: index,
                        count,
                        floor,
                    });
                }
                let count = u32::try_from(count).map_err(|_| StoreLoadError::CountTooLarge {
                    key: key.clone(),
                    square: index,
                    count,
                })?;
                beads.insert(square, count);
            }
            boxes.insert(key, Matchbox { beads });
        }
        Ok(Self { config, boxes })
    }
}

/// Durable representation of a [`BeadStore`].
///
/// Counts are parsed as `i64` so corrupt persisted data (negative counts)
/// is detected on load instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub config: BeadConfig,
    pub boxes: BTreeMap<String, BTreeMap<u8, i64>>,
}

/// Error rejecting a corrupt [`StoreSnapshot`] wholesale.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreLoadError {
    #[display("matchbox key {key:?} is not a valid board encoding")]
    BadKey { key: String, source: ParseBoardError },
    #[display("matchbox key {key:?} is not in canonical form")]
    NotCanonical { key: String },
    #[display("matchbox {key:?} refers to square {square} outside the board")]
    BadSquare { key: String, square: u8 },
    #[display("matchbox {key:?} bead squares do not match the position's legal moves")]
    MoveMismatch { key: String },
    #[display("matchbox {key:?} square {square} has negative bead count {count}")]
    NegativeCount { key: String, square: u8, count: i64 },
    #[display("matchbox {key:?} square {square} has count {count} below the floor {floor}")]
    CountBelowFloor {
        key: String,
        square: u8,
        count: i64,
        floor: i64,
    },
    #[display("matchbox {key:?} square {square} has count {count} exceeding u32 range")]
    CountTooLarge { key: String, square: u8, count: i64 },
}
