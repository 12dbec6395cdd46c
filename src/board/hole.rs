//! Holes and stones.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Index of a hole in the board ring.
pub type HoleIndex = usize;

/// Stone identifier. Identity is cosmetic; only counts affect play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoneId(pub u32);

impl std::fmt::Display for StoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stone({})", self.0)
    }
}

/// Display coordinates of a hole. Never read by the game rules.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single hole in the ring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    /// Where clients draw the hole.
    pub position: Position,

    /// The hole swept together with this one on a capture.
    /// `None` for scoring holes.
    pub opposite: Option<HoleIndex>,

    /// Seat owning this hole.
    pub owner: PlayerId,

    /// Scoring holes collect stones and can never be sown from.
    pub scoring: bool,

    /// Stones currently resting here, in drop order.
    pub stones: Vec<StoneId>,
}

impl Hole {
    /// Create an empty play hole.
    #[must_use]
    pub fn play(position: Position, owner: PlayerId, opposite: HoleIndex) -> Self {
        Self {
            position,
            opposite: Some(opposite),
            owner,
            scoring: false,
            stones: Vec::new(),
        }
    }

    /// Create an empty scoring hole.
    #[must_use]
    pub fn scoring(position: Position, owner: PlayerId) -> Self {
        Self {
            position,
            opposite: None,
            owner,
            scoring: true,
            stones: Vec::new(),
        }
    }

    /// Number of stones in the hole.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }
}
