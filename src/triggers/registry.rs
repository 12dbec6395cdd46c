//! Rule book: the room's ordered, mutable rule list.
//!
//! Every event of a move is tested against every rule, in list order, and
//! all resulting lines are tallied into one history block. Rules never
//! fail: a rule that cannot match is simply inert.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, Result};

use super::event::{Channel, Event};
use super::rule::{Addressing, Rule, RuleContext, NO_UPPER_BOUND};
use super::tally::LineTally;

/// Ordered rule list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleBook {
    rules: Vec<Rule>,
}

impl RuleBook {
    /// Create an empty rule book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The rule set every new room starts with.
    #[must_use]
    pub fn with_defaults() -> Self {
        let drink = || Rule::new("take a drink!").scaled();

        let rules = vec![
            Rule::new("give a level 6 confession")
                .on(Channel::Eaten)
                .on(Channel::Collected)
                .on(Channel::EndOfRound)
                .addressed_to(Addressing::Opponents),
            drink().on(Channel::Eaten).addressed_to(Addressing::Victim),
            drink().on(Channel::Collected).addressed_to(Addressing::Opponents),
            drink().on(Channel::EndOfRound).addressed_to(Addressing::Opponents),
            drink().on(Channel::EndOfRound).addressed_to(Addressing::Opponents),
            Rule::new("best/worst category").on(Channel::Repeat).with_max(1),
            Rule::new("give a dice roll confession").on(Channel::OwnGoal),
            Rule::new("say a nice thing").on(Channel::Eaten).with_min(1).with_max(1),
            Rule::new("say a mean thing").on(Channel::Eaten).with_min(2).with_max(2),
            Rule::new("ask a level {} truth")
                .on(Channel::Eaten)
                .with_min(3)
                .embedded()
                .cyclic(),
            Rule::new("give a level {} confession")
                .on(Channel::Victory)
                .embedded()
                .scaled()
                .with_max(NO_UPPER_BOUND),
        ];

        Self { rules }
    }

    /// Append a rule.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Remove the rule at `index`.
    ///
    /// Index 0 is refused along with out-of-range indices.
    pub fn remove(&mut self, index: usize) -> Result<Rule> {
        if index == 0 || index >= self.rules.len() {
            return Err(GameError::InvalidRuleIndex(index));
        }
        Ok(self.rules.remove(index))
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Lines produced by every rule for one event, in rule order.
    #[must_use]
    pub fn apply(&self, event: &Event, ctx: &RuleContext<'_>) -> Vec<String> {
        self.rules
            .iter()
            .flat_map(|rule| rule.fire(event, ctx))
            .collect()
    }

    /// Tally the lines for a whole move's events into one history block.
    ///
    /// Returns an empty string when nothing fired.
    #[must_use]
    pub fn handle_events(&self, events: &[Event], ctx: &RuleContext<'_>) -> String {
        let mut tally = LineTally::new();
        for event in events {
            tally.extend(self.apply(event, ctx));
        }
        tally.render()
    }
}

impl From<Vec<Rule>> for RuleBook {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}
