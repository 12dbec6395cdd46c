//! The board ring.
//!
//! Holes form a ring indexed `0..len`; walking always steps by exactly one
//! index and wraps around. For two players the ring reads:
//!
//! ```text
//!   index:  0  1  2  3  4  5 | 6  | 7  8  9 10 11 12 | 13
//!   owner:  P0 play holes    | P0 | P1 play holes    | P1
//!                            |store                  |store
//! ```
//!
//! Play hole `i` faces hole `12 - i`; scoring holes face nothing.

use serde::{Deserialize, Serialize};

use crate::core::{
    GameError, GameRng, PlayerId, PlayerMap, Result, HOLES_PER_PLAYER, STONES_PER_HOLE,
    SUPPORTED_PLAYER_COUNT,
};

use super::hole::{Hole, HoleIndex, Position, StoneId};

/// Board state: the ring of holes plus turn bookkeeping.
///
/// Holes are allocated once per board and mutated in place. The number of
/// stones on the board never changes after construction; moves only
/// relocate them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    holes: Vec<Hole>,

    player_count: usize,

    /// Seat to move next.
    pub current_player: PlayerId,

    /// Consecutive extra turns earned by the current player.
    pub rounds_repeated: i64,

    /// Set once the end-of-game sweep has run.
    pub finished: bool,
}

impl Board {
    /// Build a fresh board.
    ///
    /// Stone identifiers are shuffled across the board and dealt
    /// `STONES_PER_HOLE` to each play hole; the first mover is drawn
    /// uniformly. Only the two-player layout exists.
    pub fn new(player_count: usize, rng: &mut GameRng) -> Result<Self> {
        if player_count != SUPPORTED_PLAYER_COUNT {
            return Err(GameError::InvalidBoardSize(player_count));
        }

        let mut board = Self::empty(player_count);

        let total = (player_count * HOLES_PER_PLAYER * STONES_PER_HOLE) as u32;
        let mut stones: Vec<StoneId> = (0..total).map(StoneId).collect();
        rng.shuffle(&mut stones);

        let mut chunks = stones.chunks(STONES_PER_HOLE);
        for hole in board.holes.iter_mut().filter(|h| !h.scoring) {
            if let Some(chunk) = chunks.next() {
                hole.stones.extend_from_slice(chunk);
            }
        }

        board.current_player = PlayerId::new(rng.gen_range_usize(0..player_count) as u8);
        Ok(board)
    }

    /// The ring with every hole empty and seat 0 to move.
    ///
    /// Useful for setting up positions by hand.
    #[must_use]
    pub fn empty(player_count: usize) -> Self {
        let stride = HOLES_PER_PLAYER + 1;
        let len = stride * player_count;
        let mut holes = Vec::with_capacity(len);

        for seat in PlayerId::all(player_count) {
            let base = seat.index() * stride;
            for slot in 0..HOLES_PER_PLAYER {
                let index = base + slot;
                holes.push(Hole::play(
                    layout_position(seat, slot),
                    seat,
                    len - 2 - index,
                ));
            }
            holes.push(Hole::scoring(layout_position(seat, HOLES_PER_PLAYER), seat));
        }

        Self {
            holes,
            player_count,
            current_player: PlayerId::new(0),
            rounds_repeated: 0,
            finished: false,
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Number of holes in the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    /// All holes in ring order.
    #[must_use]
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    /// A hole by index, if it exists.
    #[must_use]
    pub fn hole(&self, index: HoleIndex) -> Option<&Hole> {
        self.holes.get(index)
    }

    /// The hole after `index`, wrapping at the end of the ring.
    #[must_use]
    pub fn next(&self, index: HoleIndex) -> HoleIndex {
        (index + 1) % self.holes.len()
    }

    /// Index of a seat's scoring hole.
    #[must_use]
    pub fn scoring_hole(&self, player: PlayerId) -> Option<HoleIndex> {
        self.holes
            .iter()
            .position(|h| h.scoring && h.owner == player)
    }

    /// Owner of the hole facing `index`, or of `index` itself when it
    /// faces nothing.
    #[must_use]
    pub fn victim_of(&self, index: HoleIndex) -> Option<PlayerId> {
        let hole = self.holes.get(index)?;
        let target = hole.opposite.unwrap_or(index);
        self.holes.get(target).map(|h| h.owner)
    }

    /// Empty a hole, returning its stones in drop order.
    pub fn take_stones(&mut self, index: HoleIndex) -> Vec<StoneId> {
        std::mem::take(&mut self.holes[index].stones)
    }

    /// Drop one stone into a hole.
    pub fn drop_stone(&mut self, index: HoleIndex, stone: StoneId) {
        self.holes[index].stones.push(stone);
    }

    /// Append stones to a hole.
    pub fn deposit(&mut self, index: HoleIndex, stones: &[StoneId]) {
        self.holes[index].stones.extend_from_slice(stones);
    }

    /// Hand the move to the next seat and clear the repeat streak.
    pub fn advance_turn(&mut self) {
        self.rounds_repeated = 0;
        self.current_player = self.current_player.next(self.player_count);
    }

    /// Stones across every hole.
    #[must_use]
    pub fn total_stones(&self) -> usize {
        self.holes.iter().map(Hole::len).sum()
    }

    /// Stones resting in each seat's play holes.
    #[must_use]
    pub fn free_stones(&self) -> PlayerMap<usize> {
        let mut free = PlayerMap::with_value(self.player_count, 0);
        for hole in self.holes.iter().filter(|h| !h.scoring) {
            free[hole.owner] += hole.len();
        }
        free
    }

    /// Stones in each seat's scoring hole.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<usize> {
        let mut scores = PlayerMap::with_value(self.player_count, 0);
        for hole in self.holes.iter().filter(|h| h.scoring) {
            scores[hole.owner] += hole.len();
        }
        scores
    }
}

/// Display coordinates: seat 0 along the bottom left to right, seat 1 along
/// the top right to left, stores at either end.
fn layout_position(seat: PlayerId, slot: usize) -> Position {
    let sign = if seat.index() == 0 { 1.0 } else { -1.0 };
    if slot == HOLES_PER_PLAYER {
        Position::new(sign * 3.5, 0.0)
    } else {
        let centred = slot as f64 - (HOLES_PER_PLAYER as f64 - 1.0) / 2.0;
        Position::new(sign * centred, -sign)
    }
}
