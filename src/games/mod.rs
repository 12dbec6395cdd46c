//! Game implementations of [`RulesEngine`](crate::rules::RulesEngine).

pub mod sowing;
