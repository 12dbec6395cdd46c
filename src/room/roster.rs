//! Players seated in a room and their live connections.
//!
//! Seat order is roster order: the player at position `i` plays
//! `PlayerId(i)`. A name is unique within a roster.

use std::sync::Arc;

use crate::core::GameRng;

use super::connection::{Connection, ConnectionId};

pub(crate) type Target = (ConnectionId, Arc<dyn Connection>);

/// One named player and the clients currently attached for them.
pub struct Player {
    pub name: String,
    connections: Vec<Target>,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connections: Vec::new(),
        }
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    fn detach(&mut self, id: ConnectionId) -> bool {
        let before = self.connections.len();
        self.connections.retain(|(cid, _)| *cid != id);
        self.connections.len() != before
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("connections", &self.connections.len())
            .finish()
    }
}

/// Ordered, name-unique list of players.
#[derive(Debug, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat `name` unless already present. Returns whether a player was added.
    pub fn join(&mut self, name: &str) -> bool {
        if self.index_of(name).is_some() {
            return false;
        }
        self.players.push(Player::new(name));
        true
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Name of the player in `seat`, if seated.
    #[must_use]
    pub fn name_at(&self, seat: usize) -> Option<&str> {
        self.players.get(seat).map(|p| p.name.as_str())
    }

    /// Names in seat order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    /// Randomize seat order.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.players);
    }

    /// Attach a connection to the named player.
    ///
    /// Returns `false` if no such player is seated.
    pub fn attach(&mut self, name: &str, id: ConnectionId, conn: Arc<dyn Connection>) -> bool {
        match self.players.iter_mut().find(|p| p.name == name) {
            Some(player) => {
                player.connections.push((id, conn));
                true
            }
            None => false,
        }
    }

    /// Remove a connection from whichever player holds it.
    pub fn detach(&mut self, id: ConnectionId) -> bool {
        self.players.iter_mut().any(|p| p.detach(id))
    }

    /// Remove every listed connection. Returns how many were found.
    pub fn prune(&mut self, ids: &[ConnectionId]) -> usize {
        ids.iter().filter(|id| self.detach(**id)).count()
    }

    /// Every connection of every player.
    pub(crate) fn all_targets(&self) -> Vec<Target> {
        self.players
            .iter()
            .flat_map(|p| p.connections.iter().cloned())
            .collect()
    }

    /// Connections of the player in `seat`, if seated.
    pub(crate) fn seat_targets(&self, seat: usize) -> Vec<Target> {
        self.players
            .get(seat)
            .map(|p| p.connections.clone())
            .unwrap_or_default()
    }
}
