//! Ordered, id-indexed collection of condition rules.

use super::types::{ConditionId, ConditionRule, ConditionVector, RuleInput};
use crate::error::{MapperError, Result, RuleError};
use std::fmt;

/// Why a condition is permanently disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledReason {
    /// Applies only to another airport (prefix given).
    OtherAirport(&'static str),
    /// Not applicable to the surveyed airport.
    NotApplicable,
    /// Needs the total trip duration, which the survey extract lacks.
    NeedsTripDuration,
    /// Logic folded into another condition.
    MergedInto(ConditionId),
    /// The mode it classifies no longer operates.
    DiscontinuedMode,
    /// Retired from the reference rule set.
    Retired,
}

impl fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisabledReason::OtherAirport(prefix) => write!(f, "applies to {prefix} only"),
            DisabledReason::NotApplicable => f.write_str("not applicable to this airport"),
            DisabledReason::NeedsTripDuration => f.write_str("needs trip duration"),
            DisabledReason::MergedInto(id) => write!(f, "merged into condition {id}"),
            DisabledReason::DiscontinuedMode => f.write_str("mode discontinued"),
            DisabledReason::Retired => f.write_str("retired"),
        }
    }
}

/// A condition that never fires. Holds its id so the id space stays stable.
#[derive(Debug, Clone, Copy)]
pub struct Disabled {
    id: ConditionId,
    reason: DisabledReason,
}

impl Disabled {
    pub fn new(id: u16, reason: DisabledReason) -> Self {
        Self {
            id: ConditionId(id),
            reason,
        }
    }

    pub fn reason(&self) -> DisabledReason {
        self.reason
    }
}

impl ConditionRule for Disabled {
    fn id(&self) -> ConditionId {
        self.id
    }

    fn name(&self) -> &str {
        "disabled"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn check(&self, _input: &RuleInput<'_>) -> std::result::Result<bool, RuleError> {
        Ok(false)
    }
}

/// Predicate signature used by [`FnRule`].
pub type Predicate = fn(&RuleInput<'_>) -> std::result::Result<bool, RuleError>;

/// A rule backed by a plain function.
#[derive(Clone, Copy)]
pub struct FnRule {
    id: ConditionId,
    name: &'static str,
    predicate: Predicate,
}

impl FnRule {
    pub fn new(id: u16, name: &'static str, predicate: Predicate) -> Self {
        Self {
            id: ConditionId(id),
            name,
            predicate,
        }
    }
}

impl fmt::Debug for FnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl ConditionRule for FnRule {
    fn id(&self) -> ConditionId {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn check(&self, input: &RuleInput<'_>) -> std::result::Result<bool, RuleError> {
        (self.predicate)(input)
    }
}

/// Runs one rule under the catch-and-log policy.
///
/// Returns the rule's id if it fired, 0 otherwise. Disabled rules are not
/// evaluated. A rule error is logged and counts as "not fired".
fn guarded(rule: &dyn ConditionRule, input: &RuleInput<'_>) -> u16 {
    if !rule.is_enabled() {
        return 0;
    }
    match rule.check(input) {
        Ok(true) => rule.id().get(),
        Ok(false) => 0,
        Err(err) => {
            tracing::warn!(
                condition = rule.id().get(),
                name = rule.name(),
                record = input.record.id,
                error = %err,
                "condition evaluation failed, treating as not fired"
            );
            0
        }
    }
}

/// The ordered rule set evaluated against every record.
///
/// Rules are kept in id order. A valid set covers the ids `1..=N` exactly
/// once (see [`validate`](Self::validate)).
///
/// # Examples
///
/// ```
/// use lasam_modemap::conditions::ConditionSet;
///
/// let set = ConditionSet::reference();
/// assert_eq!(set.len(), 109);
/// assert!(set.validate().is_ok());
/// ```
pub struct ConditionSet {
    rules: Vec<Box<dyn ConditionRule>>,
}

impl ConditionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a rule, keeping the set sorted by id.
    pub fn with_rule<R: ConditionRule + 'static>(mut self, rule: R) -> Self {
        let pos = self
            .rules
            .partition_point(|r| r.id() <= rule.id());
        self.rules.insert(pos, Box::new(rule));
        self
    }

    /// Number of rules, enabled or not.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the rule with `id`.
    pub fn get(&self, id: ConditionId) -> Option<&dyn ConditionRule> {
        self.rules
            .binary_search_by(|r| r.id().cmp(&id))
            .ok()
            .map(|i| self.rules[i].as_ref())
    }

    /// All ids in order.
    pub fn ids(&self) -> Vec<ConditionId> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Ids of rules that can fire.
    pub fn enabled_ids(&self) -> Vec<ConditionId> {
        self.rules
            .iter()
            .filter(|r| r.is_enabled())
            .map(|r| r.id())
            .collect()
    }

    /// Ids of rules that never fire.
    pub fn disabled_ids(&self) -> Vec<ConditionId> {
        self.rules
            .iter()
            .filter(|r| !r.is_enabled())
            .map(|r| r.id())
            .collect()
    }

    /// Checks that ids run `1..=N` with no gap and no duplicate.
    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(MapperError::EmptyConditionSet);
        }
        for (i, rule) in self.rules.iter().enumerate() {
            let expected = ConditionId(i as u16 + 1);
            let found = rule.id();
            if found != expected {
                if i > 0 && self.rules[i - 1].id() == found {
                    return Err(MapperError::DuplicateCondition { id: found });
                }
                return Err(MapperError::ConditionGap { expected, found });
            }
        }
        Ok(())
    }

    /// Evaluates every rule against one record.
    pub fn evaluate(&self, input: &RuleInput<'_>) -> ConditionVector {
        self.rules
            .iter()
            .map(|rule| guarded(rule.as_ref(), input))
            .collect()
    }

    /// Evaluates a single rule standalone, under the same guard.
    ///
    /// Returns 0 if the rule did not fire or does not exist.
    pub fn evaluate_one(&self, id: ConditionId, input: &RuleInput<'_>) -> u16 {
        self.get(id).map_or(0, |rule| guarded(rule, input))
    }
}

impl Default for ConditionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionSet")
            .field("len", &self.rules.len())
            .field("enabled", &self.enabled_ids().len())
            .finish()
    }
}
