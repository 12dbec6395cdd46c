//! # drunkala
//!
//! A server-authoritative engine for a two-player sowing game (a Mancala
//! variant) with a configurable drinking-rule layer on top.
//!
//! ## Design Principles
//!
//! 1. **Events, not text**: moves emit typed [`Event`]s. Turning events into
//!    lines for the room history is entirely the job of the [`RuleBook`].
//!
//! 2. **All or nothing**: every move is validated before the board is
//!    touched. A rejected move leaves board, rules, roster and history as
//!    they were.
//!
//! 3. **Rooms are independent**: each [`Room`] has its own lock; the
//!    [`RoomDirectory`] lock only guards the code → room map and is never
//!    held during a room operation.
//!
//! ## Modules
//!
//! - `core`: seats, per-seat maps, RNG, configuration, errors
//! - `board`: the hole ring and stone bookkeeping
//! - `triggers`: events, rules, duplicate tallying
//! - `rules`: `RulesEngine` trait for game implementations
//! - `games`: the sowing rules
//! - `room`: rooms, connections, the directory and request entry points

pub mod board;
pub mod core;
pub mod games;
pub mod room;
pub mod rules;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    DirectoryConfig, GameError, GameRng, PlayerId, PlayerMap, Result, RoomConfig,
};

pub use crate::board::{Board, Hole, HoleIndex, StoneId};

pub use crate::triggers::{Addressing, Channel, Event, Rule, RuleBook, RuleContext};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::games::sowing::SowingRules;

pub use crate::room::{
    ActionOutcome, Connection, ConnectionId, MoveAction, Notice, Room, RoomDirectory,
    RoomSnapshot,
};
