//! Game events.
//!
//! An event records one thing that happened during a move. It carries six
//! independent magnitude channels; the action engine fills exactly one of
//! them per event. Rules reuse the same struct as a matcher template, where
//! a non-zero channel means "listen on this channel".

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{HoleIndex, StoneId};
use crate::core::PlayerId;

/// Stone lists on events. Most events carry one to a handful of stones.
pub type Stones = SmallVec<[StoneId; 4]>;

/// The six magnitude channels, in matching priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// A stone dropped into another seat's scoring hole.
    OwnGoal,
    /// Stones captured from the facing hole.
    Eaten,
    /// An extra turn earned; magnitude is the streak length.
    Repeat,
    /// A stone landed in the event player's own scoring hole.
    Collected,
    /// Stones swept home when the game ended.
    EndOfRound,
    /// Final standing: win, tie, or negative losing margin.
    Victory,
}

impl Channel {
    /// Channels in the order rules test them.
    pub const PRIORITY: [Channel; 6] = [
        Channel::OwnGoal,
        Channel::Eaten,
        Channel::Repeat,
        Channel::Collected,
        Channel::EndOfRound,
        Channel::Victory,
    ];

    /// Read this channel from an event.
    #[must_use]
    pub fn value(self, event: &Event) -> i64 {
        match self {
            Channel::OwnGoal => event.own_goal,
            Channel::Eaten => event.eaten,
            Channel::Repeat => event.repeat,
            Channel::Collected => event.collected,
            Channel::EndOfRound => event.end_of_round,
            Channel::Victory => event.victory,
        }
    }

    fn slot(self, event: &mut Event) -> &mut i64 {
        match self {
            Channel::OwnGoal => &mut event.own_goal,
            Channel::Eaten => &mut event.eaten,
            Channel::Repeat => &mut event.repeat,
            Channel::Collected => &mut event.collected,
            Channel::EndOfRound => &mut event.end_of_round,
            Channel::Victory => &mut event.victory,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::OwnGoal => "own-goal",
            Channel::Eaten => "eaten",
            Channel::Repeat => "repeat",
            Channel::Collected => "collected",
            Channel::EndOfRound => "end-of-round",
            Channel::Victory => "victory",
        };
        f.write_str(name)
    }
}

/// A game event with its magnitudes and context.
///
/// Events are created and consumed within a single move and never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub own_goal: i64,
    pub eaten: i64,
    pub repeat: i64,
    pub collected: i64,
    pub end_of_round: i64,
    /// 1 = won, 2 = tied, negative = lost by that margin.
    pub victory: i64,

    /// Seat the event is about.
    pub player: PlayerId,

    /// Hole where it happened, if any.
    pub hole: Option<HoleIndex>,

    /// Stones that took part.
    pub stones: Stones,
}

impl Event {
    /// Create an event with a single channel set.
    #[must_use]
    pub fn new(channel: Channel, value: i64, player: PlayerId) -> Self {
        Self::default().with_channel(channel, value).with_player(player)
    }

    /// Set a channel value (builder pattern).
    #[must_use]
    pub fn with_channel(mut self, channel: Channel, value: i64) -> Self {
        *channel.slot(&mut self) = value;
        self
    }

    /// Set the seat (builder pattern).
    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = player;
        self
    }

    /// Set the hole (builder pattern).
    #[must_use]
    pub fn with_hole(mut self, hole: HoleIndex) -> Self {
        self.hole = Some(hole);
        self
    }

    /// Add participating stones (builder pattern).
    #[must_use]
    pub fn with_stones(mut self, stones: impl IntoIterator<Item = StoneId>) -> Self {
        self.stones.extend(stones);
        self
    }

    /// The first channel, in priority order, with a non-zero value.
    #[must_use]
    pub fn primary_channel(&self) -> Option<Channel> {
        Channel::PRIORITY.into_iter().find(|c| c.value(self) != 0)
    }
}

/// Builders for the events the action engine emits.
impl Event {
    /// A stone landed in the mover's own scoring hole.
    pub fn collected(player: PlayerId, hole: HoleIndex, stone: StoneId) -> Self {
        Self::new(Channel::Collected, 1, player)
            .with_hole(hole)
            .with_stones([stone])
    }

    /// The mover dropped a stone into another seat's scoring hole.
    pub fn own_goal(player: PlayerId, hole: HoleIndex, stone: StoneId) -> Self {
        Self::new(Channel::OwnGoal, 1, player)
            .with_hole(hole)
            .with_stones([stone])
    }

    /// The mover earned an extra turn; `streak` is the new repeat count.
    pub fn repeat(player: PlayerId, hole: HoleIndex, streak: i64) -> Self {
        Self::new(Channel::Repeat, streak, player).with_hole(hole)
    }

    /// The mover captured `count` stones from the hole facing `hole`.
    pub fn eaten(
        player: PlayerId,
        hole: HoleIndex,
        count: i64,
        stones: impl IntoIterator<Item = StoneId>,
    ) -> Self {
        Self::new(Channel::Eaten, count, player)
            .with_hole(hole)
            .with_stones(stones)
    }

    /// Stones swept into a seat's scoring hole at the end of the game.
    pub fn end_of_round(player: PlayerId, stones: &[StoneId]) -> Self {
        Self::new(Channel::EndOfRound, stones.len() as i64, player)
            .with_stones(stones.iter().copied())
    }

    /// Final standing for a seat.
    pub fn victory(player: PlayerId, value: i64) -> Self {
        Self::new(Channel::Victory, value, player)
    }
}
