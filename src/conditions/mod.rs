//! Condition rule set.
//!
//! A condition is a pure predicate over one record's derived legs, its
//! context fields and the [`Vocabulary`](crate::vocabulary::Vocabulary).
//! When it fires it contributes its own [`ConditionId`]; otherwise 0.
//!
//! # Key Types
//!
//! - [`ConditionRule`]: the predicate contract
//! - [`ConditionSet`]: the ordered, id-indexed table of rules; every rule is
//!   evaluated through one guard that turns a [`RuleError`](crate::error::RuleError)
//!   into "not fired" and logs it
//! - [`ConditionVector`]: per-record results, one slot per rule
//!
//! The reference table ([`ConditionSet::reference`]) has 109 ids. Disabled
//! ids stay in the table and always return 0.

mod reference;
mod set;
mod types;

pub use set::{ConditionSet, Disabled, DisabledReason, FnRule, Predicate};
pub use types::{ConditionId, ConditionRule, ConditionVector, RuleInput};
