//! Board topology and stone containers.
//!
//! ## Key Types
//!
//! - `Board`: the ring of holes, whose turn it is, repeat streak, finished flag
//! - `Hole`: one hole with owner, scoring flag, opposite link and stones
//! - `StoneId`: cosmetic stone identity
//! - `HoleIndex`: position in the ring

pub mod hole;
pub mod ring;

pub use hole::{Hole, HoleIndex, Position, StoneId};
pub use ring::Board;
