//! Core engine types: seats, RNG, configuration, errors.
//!
//! These are shared by the board, the action engine, the rule layer and the
//! room layer, and carry no game mechanics of their own.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{
    DirectoryConfig, RoomConfig, DIE_FACES, HOLES_PER_PLAYER, RESET_MARKER, STONES_PER_HOLE,
    SUPPORTED_PLAYER_COUNT, VICTORY_TIE, VICTORY_WIN,
};
pub use error::{GameError, Result};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
