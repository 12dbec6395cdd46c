//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define legal moves, how a move changes
//! the board and what events it emits, and when the game is over. The room
//! layer calls into it but never interprets the mechanics itself.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
