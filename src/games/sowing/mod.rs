//! Two-seat sowing game with captures, extra turns and own-goals.
//!
//! - Each seat owns six play holes and one scoring hole
//! - Sowing never skips a hole, so stones can land in any scoring hole
//! - The game ends when any seat's play holes are empty

mod game;

pub use game::SowingRules;
