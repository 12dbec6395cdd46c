//! Event-driven rule layer.
//!
//! Moves produce [`Event`]s; a room's [`RuleBook`] turns them into the
//! human-readable lines appended to the room history.
//!
//! ## Key Components
//!
//! - [`Event`]: six magnitude channels plus seat, hole and stones
//! - [`Channel`]: the fixed channel priority used for matching
//! - [`Rule`]: matcher template, addressing, bounds and text
//! - [`RuleBook`]: ordered rule list and per-move tallying
//! - [`LineTally`]: duplicate counting with first-occurrence order
//!
//! ## Example Usage
//!
//! ```
//! use drunkala::board::{Board, StoneId};
//! use drunkala::core::PlayerId;
//! use drunkala::triggers::{Addressing, Channel, Event, Rule, RuleBook, RuleContext};
//!
//! let mut book = RuleBook::new();
//! book.push(
//!     Rule::new("take a drink!")
//!         .on(Channel::Eaten)
//!         .addressed_to(Addressing::Victim)
//!         .scaled(),
//! );
//!
//! let board = Board::empty(2);
//! let names = vec!["ann".to_string(), "bob".to_string()];
//! let ctx = RuleContext::new(&board, &names);
//!
//! // Seat 0 lands in hole 3 and eats two stones from hole 9.
//! let ev = Event::eaten(PlayerId::new(0), 3, 2, [StoneId(1), StoneId(2), StoneId(3)]);
//! assert_eq!(book.handle_events(&[ev], &ctx), "bob: take a drink! ×2");
//! ```

mod event;
mod registry;
mod rule;
mod tally;

pub use event::{Channel, Event, Stones};
pub use registry::RuleBook;
pub use rule::{Addressing, Rule, RuleContext, RuleMatch, NO_UPPER_BOUND, PLACEHOLDER};
pub use tally::LineTally;
