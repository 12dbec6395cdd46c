//! Rules: event matchers with a text template.
//!
//! ## Matching
//!
//! A rule is tested against an event by scanning the channels in
//! [`Channel::PRIORITY`] order. The first channel where both the event and
//! the rule's template are non-zero is the only one considered; if the
//! event's value on that channel fails the rule's bounds or stone filter,
//! the rule does not fire for that event at all. Channels further down the
//! list are never consulted once one has been selected.
//!
//! Bounds are inclusive and checked against the signed channel value.
//! A bound of zero is unconstrained, as is a maximum of [`NO_UPPER_BOUND`].
//!
//! ## Rendering
//!
//! A matched rule renders with the absolute channel value as its magnitude,
//! optionally folded onto a die face, embedded at each `{}` in the text,
//! and repeated `magnitude` times when the rule scales.

use serde::{Deserialize, Serialize};

use crate::board::{Board, StoneId};
use crate::core::{PlayerId, DIE_FACES};

use super::event::{Channel, Event};

/// Rule maximum meaning "no upper bound".
pub const NO_UPPER_BOUND: i64 = -1;

/// Placeholder replaced by the magnitude in embedding rules.
pub const PLACEHOLDER: &str = "{}";

/// Who a rendered line is addressed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Addressing {
    /// The seat the event is about.
    #[default]
    Actor,
    /// Everyone in the room except the event's seat.
    Opponents,
    /// The owner of the hole facing the event's hole.
    Victim,
}

/// A configurable matcher plus text template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    /// Template event. Non-zero channels select what the rule listens to;
    /// stones listed here must all be present on a matching event.
    pub event: Event,

    pub addressing: Addressing,

    /// Emit the line once per unit of magnitude.
    pub scale_with_num: bool,

    /// Substitute the magnitude into the text.
    pub embed_value: bool,

    /// Fold the magnitude onto 1..=6 before using it.
    pub cyclic_value: bool,

    pub text: String,

    /// Inclusive lower bound, 0 = none.
    pub min: i64,

    /// Inclusive upper bound, 0 or -1 = none.
    pub max: i64,
}

/// Which channel a rule matched on and the event's raw value there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleMatch {
    pub channel: Channel,
    pub value: i64,
}

impl RuleMatch {
    /// Magnitude used for rendering.
    #[must_use]
    pub fn magnitude(&self, cyclic: bool) -> i64 {
        let magnitude = self.value.abs();
        if cyclic {
            match magnitude % DIE_FACES {
                0 => DIE_FACES,
                face => face,
            }
        } else {
            magnitude
        }
    }
}

impl Rule {
    /// Create a rule with the given text that listens to nothing yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Listen on a channel (builder pattern).
    #[must_use]
    pub fn on(mut self, channel: Channel) -> Self {
        self.event = self.event.with_channel(channel, 1);
        self
    }

    /// Set the addressing mode (builder pattern).
    #[must_use]
    pub fn addressed_to(mut self, addressing: Addressing) -> Self {
        self.addressing = addressing;
        self
    }

    /// Repeat the line per unit of magnitude (builder pattern).
    #[must_use]
    pub fn scaled(mut self) -> Self {
        self.scale_with_num = true;
        self
    }

    /// Embed the magnitude into the text (builder pattern).
    #[must_use]
    pub fn embedded(mut self) -> Self {
        self.embed_value = true;
        self
    }

    /// Fold the magnitude onto a die face (builder pattern).
    #[must_use]
    pub fn cyclic(mut self) -> Self {
        self.cyclic_value = true;
        self
    }

    /// Set the inclusive lower bound (builder pattern).
    #[must_use]
    pub fn with_min(mut self, min: i64) -> Self {
        self.min = min;
        self
    }

    /// Set the inclusive upper bound (builder pattern).
    #[must_use]
    pub fn with_max(mut self, max: i64) -> Self {
        self.max = max;
        self
    }

    /// Require these stones on matching events (builder pattern).
    #[must_use]
    pub fn requiring(mut self, stones: impl IntoIterator<Item = StoneId>) -> Self {
        self.event = self.event.with_stones(stones);
        self
    }

    fn in_bounds(&self, value: i64) -> bool {
        if self.min != 0 && value < self.min {
            return false;
        }
        if self.max != 0 && self.max != NO_UPPER_BOUND && value > self.max {
            return false;
        }
        true
    }

    /// Test this rule against an event.
    #[must_use]
    pub fn matches(&self, event: &Event) -> Option<RuleMatch> {
        let channel = Channel::PRIORITY
            .into_iter()
            .find(|c| c.value(event) != 0 && c.value(&self.event) != 0)?;
        let value = channel.value(event);

        if !self.in_bounds(value) {
            return None;
        }
        if !self.event.stones.iter().all(|s| event.stones.contains(s)) {
            return None;
        }

        Some(RuleMatch { channel, value })
    }

    /// Lines this rule produces for an event. Empty when it does not match.
    #[must_use]
    pub fn fire(&self, event: &Event, ctx: &RuleContext<'_>) -> Vec<String> {
        let Some(hit) = self.matches(event) else {
            return Vec::new();
        };
        let magnitude = hit.magnitude(self.cyclic_value);

        let text = if self.embed_value {
            self.text.replace(PLACEHOLDER, &magnitude.to_string())
        } else {
            self.text.clone()
        };

        let line = match ctx.addressee(self.addressing, event) {
            Some(prefix) => format!("{prefix}: {text}"),
            None => text,
        };

        let times = if self.scale_with_num && magnitude > 1 {
            magnitude as usize
        } else {
            1
        };
        vec![line; times]
    }
}

/// What rules need to know about the room to address lines.
#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
    pub board: &'a Board,
    /// Display names in seat order.
    pub names: &'a [String],
}

impl<'a> RuleContext<'a> {
    pub fn new(board: &'a Board, names: &'a [String]) -> Self {
        Self { board, names }
    }

    /// Display name of a seat, or its generic label when nobody sits there.
    #[must_use]
    pub fn name_of(&self, player: PlayerId) -> String {
        self.names
            .get(player.index())
            .cloned()
            .unwrap_or_else(|| player.to_string())
    }

    /// Line prefix for an addressing mode, `None` when nobody qualifies.
    #[must_use]
    pub fn addressee(&self, addressing: Addressing, event: &Event) -> Option<String> {
        match addressing {
            Addressing::Actor => Some(self.name_of(event.player)),
            Addressing::Opponents => {
                let others: Vec<&str> = self
                    .names
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != event.player.index())
                    .map(|(_, n)| n.as_str())
                    .collect();
                (!others.is_empty()).then(|| others.join(","))
            }
            Addressing::Victim => {
                let victim = event
                    .hole
                    .and_then(|h| self.board.victim_of(h))
                    .unwrap_or(event.player);
                Some(self.name_of(victim))
            }
        }
    }
}
