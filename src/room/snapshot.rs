//! Serializable view of a room, returned by join and state queries.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::triggers::RuleBook;

/// A player as seen by clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
}

/// Consistent copy of a room's state, taken under a single read lock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub code: String,
    pub players: Vec<PlayerView>,
    pub board: Board,
    pub rules: RuleBook,
    pub history: Vector<String>,
    pub hotseat: bool,
}

impl RoomSnapshot {
    /// Player names in seat order.
    pub fn player_names(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.name.as_str())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
