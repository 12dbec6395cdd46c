//! Rules engine trait for board games played on a [`Board`].
//!
//! Implementations define:
//! - Which holes a seat may sow from
//! - How a move changes the board, and which events it produces
//! - Win/loss/tie conditions

use crate::board::{Board, HoleIndex};
use crate::core::{GameRng, PlayerId, Result};
use crate::triggers::Event;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Several seats share the best score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a seat won or shared the win.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply_move` must validate everything before touching the board:
///   an `Err` leaves the board exactly as it was
/// - `rng` only affects cosmetic stone order, never hole counts
/// - `is_terminal` returns `None` while the game continues
pub trait RulesEngine {
    /// Holes `player` may currently sow from. Empty if it is not their turn.
    fn legal_holes(&self, board: &Board, player: PlayerId) -> Vec<HoleIndex>;

    /// Play `hole` for `player`, returning the events in the order they happened.
    fn apply_move(
        &self,
        board: &mut Board,
        player: PlayerId,
        hole: HoleIndex,
        rng: &mut GameRng,
    ) -> Result<Vec<Event>>;

    /// Check if the game is over.
    fn is_terminal(&self, board: &Board) -> Option<GameResult>;
}
