//! Error type shared by the board, the action engine and the room layer.
//!
//! Every variant is non-fatal: it is surfaced to the caller and nothing is
//! retried. Validation always runs before any mutation, so an `Err` means
//! the board, the rules and the history are untouched.

use thiserror::Error;

/// Errors produced by room, directory and move operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid board size: {0}")]
    InvalidBoardSize(usize),

    #[error("no such lobby: {0}")]
    RoomNotFound(String),

    #[error("invalid room code settings: {0}")]
    InvalidCodeSpace(&'static str),

    #[error("could not create unique room code after {0} attempts")]
    CodeSpaceExhausted(usize),

    #[error("{0} missing from request")]
    MissingField(&'static str),

    #[error("waiting for more players ({joined}/{needed})")]
    NotEnoughPlayers { joined: usize, needed: usize },

    #[error("no such player: {0}")]
    PlayerNotFound(String),

    #[error("wrong player: it is not {0}'s turn")]
    WrongPlayer(String),

    #[error("hole {index} does not exist (board has {len} holes)")]
    HoleOutOfRange { index: usize, len: usize },

    #[error("player does not own hole {0}")]
    NotOwnHole(usize),

    #[error("hole {0} is a scoring hole and can not be moved")]
    ScoringHole(usize),

    #[error("hole {0} is empty")]
    EmptyHole(usize),

    #[error("game already finished")]
    GameFinished,

    #[error("invalid rule id: {0}")]
    InvalidRuleIndex(usize),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GameError>;
