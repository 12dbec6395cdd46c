//! A single game room.
//!
//! ## Key Components
//!
//! - [`Room`]: board, rule book, roster and history behind one `RwLock`
//! - [`MoveAction`]: a move (or reset) request from a named player
//! - [`ActionOutcome`]: what an accepted action did
//!
//! ## Locking
//!
//! Every mutation runs under the write lock and either fully applies or
//! leaves the room untouched. Notifications are sent only after the lock is
//! released: targets are cloned out under a read lock, sent to without any
//! lock held, and failed connections are pruned under a fresh write lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use im::Vector;
use log::{debug, info, warn};
use parking_lot::RwLock;

use crate::board::{Board, HoleIndex};
use crate::core::{GameError, GameRng, Result, RoomConfig, RESET_MARKER};
use crate::games::sowing::SowingRules;
use crate::rules::RulesEngine;
use crate::triggers::{Rule, RuleBook, RuleContext};

use super::connection::{Connection, ConnectionId, Notice};
use super::roster::{Roster, Target};
use super::snapshot::{PlayerView, RoomSnapshot};

/// A move request. With `reset` set on a finished game, starts a new one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveAction {
    pub player: String,
    pub hole: HoleIndex,
    pub reset: bool,
}

impl MoveAction {
    #[must_use]
    pub fn new(player: impl Into<String>, hole: HoleIndex) -> Self {
        Self {
            player: player.into(),
            hole,
            reset: false,
        }
    }

    #[must_use]
    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }
}

/// What an accepted [`MoveAction`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A move was played and produced this many events.
    Moved { events: usize },
    /// The finished game was replaced by a fresh one.
    Reset,
}

struct RoomState {
    board: Board,
    rules: RuleBook,
    roster: Roster,
    history: Vector<String>,
    hotseat: bool,
    player_count: usize,
    rng: GameRng,
    engine: SowingRules,
}

impl RoomState {
    fn apply(&mut self, action: &MoveAction) -> Result<ActionOutcome> {
        if action.reset && self.board.finished {
            self.reset()?;
            return Ok(ActionOutcome::Reset);
        }

        SowingRules::ensure_in_progress(&self.board)?;

        let mover = if self.hotseat {
            self.board.current_player
        } else {
            if self.roster.len() < self.player_count {
                return Err(GameError::NotEnoughPlayers {
                    joined: self.roster.len(),
                    needed: self.player_count,
                });
            }
            let seat = self
                .roster
                .index_of(&action.player)
                .ok_or_else(|| GameError::PlayerNotFound(action.player.clone()))?;
            if seat != self.board.current_player.index() {
                return Err(GameError::WrongPlayer(action.player.clone()));
            }
            self.board.current_player
        };

        let events = self
            .engine
            .apply_move(&mut self.board, mover, action.hole, &mut self.rng)?;

        let names = self.roster.names();
        let block = self
            .rules
            .handle_events(&events, &RuleContext::new(&self.board, &names));
        if !block.is_empty() {
            self.history.push_back(block);
        }

        Ok(ActionOutcome::Moved {
            events: events.len(),
        })
    }

    /// Fresh board, shuffled seats, history cleared to the reset marker.
    /// Rules and connections are kept.
    fn reset(&mut self) -> Result<()> {
        let board = Board::new(self.player_count, &mut self.rng)?;
        self.board = board;
        self.roster.shuffle(&mut self.rng);
        self.history = Vector::unit(RESET_MARKER.to_string());
        Ok(())
    }

    fn snapshot(&self, code: &str) -> RoomSnapshot {
        RoomSnapshot {
            code: code.to_string(),
            players: self
                .roster
                .iter()
                .map(|p| PlayerView {
                    name: p.name.clone(),
                })
                .collect(),
            board: self.board.clone(),
            rules: self.rules.clone(),
            history: self.history.clone(),
            hotseat: self.hotseat,
        }
    }
}

/// A game room: one board shared by a roster of named players.
pub struct Room {
    code: String,
    state: RwLock<RoomState>,
    next_connection: AtomicU64,
}

impl Room {
    /// Create a room with a fresh board and the default rule book.
    ///
    /// The RNG is seeded from `config.seed`, or from entropy when unset.
    pub fn new(code: impl Into<String>, config: &RoomConfig) -> Result<Self> {
        Self::with_rng(code, config, GameRng::seeded_or_entropy(config.seed))
    }

    pub(crate) fn with_rng(
        code: impl Into<String>,
        config: &RoomConfig,
        mut rng: GameRng,
    ) -> Result<Self> {
        config.validate()?;
        let board = Board::new(config.player_count, &mut rng)?;
        Ok(Self {
            code: code.into(),
            state: RwLock::new(RoomState {
                board,
                rules: RuleBook::with_defaults(),
                roster: Roster::new(),
                history: Vector::new(),
                hotseat: config.hotseat,
                player_count: config.player_count,
                rng,
                engine: SowingRules::new(),
            }),
            next_connection: AtomicU64::new(1),
        })
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Seat `name` if new and return the resulting state.
    ///
    /// Players are notified only when someone was actually added.
    pub fn join(&self, name: &str) -> RoomSnapshot {
        let (snapshot, added) = {
            let mut state = self.state.write();
            let added = state.roster.join(name);
            (state.snapshot(&self.code), added)
        };
        if added {
            info!("room {}: {} joined", self.code, name);
            self.notify_players();
        }
        snapshot
    }

    /// Validate and apply a move, or reset a finished game.
    ///
    /// On error nothing about the room has changed and nobody is notified.
    pub fn apply_action(&self, action: &MoveAction) -> Result<ActionOutcome> {
        let outcome = self.state.write().apply(action);
        match &outcome {
            Ok(ActionOutcome::Reset) => info!("room {}: game reset by {}", self.code, action.player),
            Ok(ActionOutcome::Moved { events }) => debug!(
                "room {}: {} sowed hole {} ({} events)",
                self.code, action.player, action.hole, events
            ),
            Err(e) => debug!("room {}: rejected move from {}: {}", self.code, action.player, e),
        }
        if outcome.is_ok() {
            self.notify_players();
        }
        outcome
    }

    /// Start a new game regardless of whether the current one finished.
    pub fn reset(&self) -> Result<()> {
        self.state.write().reset()?;
        info!("room {}: game reset", self.code);
        self.notify_players();
        Ok(())
    }

    /// Append a rule to the rule book.
    pub fn add_rule(&self, rule: Rule) {
        self.state.write().rules.push(rule);
        info!("room {}: rule added", self.code);
        self.notify_players();
    }

    /// Remove the rule at `index`. Index 0 is refused.
    pub fn delete_rule(&self, index: usize) -> Result<Rule> {
        let removed = self.state.write().rules.remove(index)?;
        info!("room {}: rule {} deleted", self.code, index);
        self.notify_players();
        Ok(removed)
    }

    /// Consistent copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> RoomSnapshot {
        self.state.read().snapshot(&self.code)
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.state.read().board.clone()
    }

    #[must_use]
    pub fn history(&self) -> Vector<String> {
        self.state.read().history.clone()
    }

    /// Test support: replace the board with a hand-built position.
    ///
    /// Skips every move check and does not preserve the stone count.
    #[doc(hidden)]
    pub fn load_board(&self, board: Board) {
        self.state.write().board = board;
        self.notify_players();
    }

    /// Attach a live connection to the named player.
    pub fn connect(&self, name: &str, conn: Arc<dyn Connection>) -> Result<ConnectionId> {
        let id = ConnectionId(self.next_connection.fetch_add(1, Ordering::Relaxed));
        if self.state.write().roster.attach(name, id, conn) {
            debug!("room {}: {} attached {}", self.code, name, id);
            Ok(id)
        } else {
            Err(GameError::PlayerNotFound(name.to_string()))
        }
    }

    /// Detach a connection. Returns `false` if it was not attached.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.state.write().roster.detach(id)
    }

    /// Tell every connected client the state changed.
    ///
    /// Returns how many notices were delivered.
    pub fn notify_players(&self) -> usize {
        let targets = self.state.read().roster.all_targets();
        self.broadcast(targets, &Notice::StateChanged {})
    }

    /// Nudge the player to move on behalf of `from`.
    ///
    /// Nothing is sent when `from` is the player to move. Returns how many
    /// notices were delivered.
    pub fn ping(&self, from: &str) -> usize {
        let targets = {
            let state = self.state.read();
            let seat = state.board.current_player.index();
            let other_to_move = state.roster.name_at(seat).is_some_and(|name| name != from);
            let targets = if other_to_move {
                state.roster.seat_targets(seat)
            } else {
                Vec::new()
            };
            targets
        };
        self.broadcast(targets, &Notice::ping(from))
    }

    fn broadcast(&self, targets: Vec<Target>, notice: &Notice) -> usize {
        let mut dead = Vec::new();
        let mut delivered = 0;
        for (id, conn) in targets {
            match conn.send(notice) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!("room {}: dropping {}: {}", self.code, id, e);
                    dead.push(id);
                }
            }
        }
        if !dead.is_empty() {
            self.state.write().roster.prune(&dead);
        }
        delivered
    }
}

impl std::fmt::Debug for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Room").field("code", &self.code).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::StoneId;
    use crate::core::PlayerId;
    use crate::room::ChannelConnection;

    fn room() -> Room {
        Room::new("abc123", &RoomConfig::default().with_seed(7)).unwrap()
    }

    fn mover_name(room: &Room) -> String {
        let snap = room.snapshot();
        snap.players[snap.board.current_player.index()].name.clone()
    }

    /// Board where seat 0 is to move and every play hole holds one stone,
    /// except hole 0 which holds two.
    fn sparse_board() -> Board {
        let mut board = Board::empty(2);
        let mut id = 0;
        for hole in (0..6).chain(7..13) {
            board.deposit(hole, &[StoneId(id)]);
            id += 1;
        }
        board.deposit(0, &[StoneId(id)]);
        board
    }

    #[test]
    fn test_new_room() {
        let room = room();
        let snap = room.snapshot();
        assert_eq!(snap.code, "abc123");
        assert!(snap.players.is_empty());
        assert!(snap.history.is_empty());
        assert_eq!(snap.board.total_stones(), 48);
        assert_eq!(snap.rules, RuleBook::with_defaults());
        assert!(!snap.hotseat);
    }

    #[test]
    fn test_invalid_player_count() {
        let err = Room::new("x", &RoomConfig::default().with_player_count(3)).unwrap_err();
        assert_eq!(err, GameError::InvalidBoardSize(3));
    }

    #[test]
    fn test_move_needs_players() {
        let room = room();
        room.join("ann");
        let err = room.apply_action(&MoveAction::new("ann", 0)).unwrap_err();
        assert_eq!(err, GameError::NotEnoughPlayers { joined: 1, needed: 2 });
    }

    #[test]
    fn test_move_checks_identity() {
        let room = room();
        room.join("ann");
        room.join("bob");
        let before = room.snapshot();

        let err = room.apply_action(&MoveAction::new("cat", 0)).unwrap_err();
        assert_eq!(err, GameError::PlayerNotFound("cat".to_string()));

        let mover = mover_name(&room);
        let other = if mover == "ann" { "bob" } else { "ann" };
        let err = room.apply_action(&MoveAction::new(other, 0)).unwrap_err();
        assert_eq!(err, GameError::WrongPlayer(other.to_string()));

        assert_eq!(room.snapshot(), before);
    }

    #[test]
    fn test_move_applies_and_logs() {
        let room = room();
        room.join("ann");
        room.join("bob");
        room.load_board(sparse_board());
        assert_eq!(mover_name(&room), "ann");

        // Two stones from hole 0 land in 1 and 2; hole 2 already has one.
        let outcome = room.apply_action(&MoveAction::new("ann", 0)).unwrap();
        assert_eq!(outcome, ActionOutcome::Moved { events: 0 });
        let snap = room.snapshot();
        assert_eq!(snap.board.hole(2).unwrap().len(), 2);
        assert_eq!(snap.board.current_player, PlayerId::new(1));
        assert!(snap.history.is_empty());
    }

    #[test]
    fn test_failed_move_changes_nothing() {
        let room = room();
        room.join("ann");
        room.join("bob");
        let mover = mover_name(&room);
        let before = room.snapshot();

        // Scoring holes can never be played.
        let store = if before.board.current_player.index() == 0 { 6 } else { 13 };
        let err = room.apply_action(&MoveAction::new(&mover, store)).unwrap_err();
        assert_eq!(err, GameError::ScoringHole(store));
        assert_eq!(room.snapshot(), before);
    }

    #[test]
    fn test_hotseat_ignores_names() {
        let room = Room::new("hot", &RoomConfig::default().with_hotseat(true).with_seed(1)).unwrap();
        let current = room.board().current_player;
        let hole = if current.index() == 0 { 0 } else { 7 };

        assert!(room.apply_action(&MoveAction::new("anyone", hole)).is_ok());
        assert!(room.snapshot().hotseat);
    }

    #[test]
    fn test_reset_only_when_finished() {
        let room = Room::new("r", &RoomConfig::default().with_hotseat(true).with_seed(2)).unwrap();
        let current = room.board().current_player;
        let hole = if current.index() == 0 { 0 } else { 7 };

        // Not finished: the reset flag is ignored and the move is played.
        let outcome = room
            .apply_action(&MoveAction::new("x", hole).with_reset(true))
            .unwrap();
        assert!(matches!(outcome, ActionOutcome::Moved { .. }));

        let mut finished = room.board();
        finished.finished = true;
        room.load_board(finished);
        assert_eq!(
            room.apply_action(&MoveAction::new("x", 0)).unwrap_err(),
            GameError::GameFinished
        );

        let outcome = room
            .apply_action(&MoveAction::new("x", 0).with_reset(true))
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Reset);
        let snap = room.snapshot();
        assert!(!snap.board.finished);
        assert_eq!(snap.board.total_stones(), 48);
        assert_eq!(snap.history, Vector::unit(RESET_MARKER.to_string()));
    }

    #[test]
    fn test_reset_with_seated_players() {
        let room = room();
        room.join("ann");
        room.join("bob");
        let (conn, rx) = ChannelConnection::new();
        room.connect("ann", Arc::new(conn)).unwrap();
        room.add_rule(Rule::new("swap seats"));

        let mut finished = sparse_board();
        finished.finished = true;
        room.load_board(finished);
        let before = room.snapshot();
        while rx.try_recv().is_ok() {}

        let mover = mover_name(&room);
        let outcome = room
            .apply_action(&MoveAction::new(&mover, 0).with_reset(true))
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Reset);

        let snap = room.snapshot();
        assert_eq!(snap.rules, before.rules);
        assert_eq!(snap.history, Vector::unit(RESET_MARKER.to_string()));
        assert_eq!(snap.board.total_stones(), 48);
        let mut names: Vec<_> = snap.player_names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["ann", "bob"]);

        // The connection moves with ann to the new seat.
        assert_eq!(rx.try_recv().unwrap(), Notice::StateChanged {});
        assert_eq!(room.notify_players(), 1);
    }

    #[test]
    fn test_reset_shuffles_seats() {
        let reordered = (0..20).any(|seed| {
            let room = Room::new("s", &RoomConfig::default().with_seed(seed)).unwrap();
            room.join("ann");
            room.join("bob");
            room.reset().unwrap();
            room.snapshot().player_names().next() == Some("bob")
        });
        assert!(reordered);
    }

    #[test]
    fn test_rule_edits() {
        let room = room();
        assert_eq!(room.delete_rule(0).unwrap_err(), GameError::InvalidRuleIndex(0));
        let before = room.snapshot().rules.len();

        room.add_rule(Rule::new("dance"));
        assert_eq!(room.snapshot().rules.len(), before + 1);

        let removed = room.delete_rule(before).unwrap();
        assert_eq!(removed.text, "dance");
        assert_eq!(
            room.delete_rule(before).unwrap_err(),
            GameError::InvalidRuleIndex(before)
        );
    }

    #[test]
    fn test_join_notifies_only_when_added() {
        let room = room();
        room.join("ann");
        let (conn, rx) = ChannelConnection::new();
        room.connect("ann", Arc::new(conn)).unwrap();

        room.join("ann");
        assert!(rx.try_recv().is_err());

        room.join("bob");
        assert_eq!(rx.try_recv().unwrap(), Notice::StateChanged {});
    }

    #[test]
    fn test_connect_unknown_player() {
        let room = room();
        let (conn, _rx) = ChannelConnection::new();
        assert_eq!(
            room.connect("ghost", Arc::new(conn)).unwrap_err(),
            GameError::PlayerNotFound("ghost".to_string())
        );
    }

    #[test]
    fn test_dead_connections_are_pruned() {
        let room = room();
        room.join("ann");
        let (live, live_rx) = ChannelConnection::new();
        let (dead, dead_rx) = ChannelConnection::new();
        room.connect("ann", Arc::new(live)).unwrap();
        room.connect("ann", Arc::new(dead)).unwrap();
        drop(dead_rx);

        assert_eq!(room.notify_players(), 1);
        assert_eq!(live_rx.try_recv().unwrap(), Notice::StateChanged {});

        // The dead connection is gone; the live one still receives.
        assert_eq!(room.notify_players(), 1);
        assert_eq!(room.snapshot().players.len(), 1);
    }

    #[test]
    fn test_disconnect() {
        let room = room();
        room.join("ann");
        let (conn, _rx) = ChannelConnection::new();
        let id = room.connect("ann", Arc::new(conn)).unwrap();

        assert!(room.disconnect(id));
        assert!(!room.disconnect(id));
        assert_eq!(room.notify_players(), 0);
    }

    #[test]
    fn test_ping_targets_mover() {
        let room = room();
        room.join("ann");
        room.join("bob");
        let (ann, ann_rx) = ChannelConnection::new();
        let (bob, bob_rx) = ChannelConnection::new();
        room.connect("ann", Arc::new(ann)).unwrap();
        room.connect("bob", Arc::new(bob)).unwrap();

        let mover = mover_name(&room);
        let (waiting, mover_rx, waiting_rx) = if mover == "ann" {
            ("bob", &ann_rx, &bob_rx)
        } else {
            ("ann", &bob_rx, &ann_rx)
        };

        assert_eq!(room.ping(waiting), 1);
        assert_eq!(mover_rx.try_recv().unwrap(), Notice::ping(waiting));
        assert!(waiting_rx.try_recv().is_err());

        // Pinging yourself does nothing.
        assert_eq!(room.ping(&mover), 0);
    }

    #[test]
    fn test_ping_empty_seat() {
        let room = room();
        assert_eq!(room.ping("ann"), 0);

        // A seated player with no connection receives nothing.
        room.join("ann");
        room.join("bob");
        let waiting = if mover_name(&room) == "ann" { "bob" } else { "ann" };
        assert_eq!(room.ping(waiting), 0);
    }
}
