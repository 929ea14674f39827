//! Core types for the condition rule set.

use crate::error::RuleError;
use crate::legs::DerivedLegs;
use crate::record::{OriginClass, SurveyRecord};
use crate::vocabulary::Vocabulary;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a condition.
///
/// Ids are keys into the priority lookup and the output schema, so they
/// never change meaning, even for disabled conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ConditionId(pub u16);

impl ConditionId {
    /// Returns the raw id.
    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for ConditionId {
    fn from(id: u16) -> Self {
        ConditionId(id)
    }
}

/// Everything a predicate may read for one record.
///
/// Context fields are read lazily through accessors so that a predicate
/// which short-circuits before touching a missing field does not fail.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub record: &'a SurveyRecord,
    pub legs: &'a DerivedLegs,
    pub vocab: &'a Vocabulary,
}

impl<'a> RuleInput<'a> {
    pub fn new(record: &'a SurveyRecord, legs: &'a DerivedLegs, vocab: &'a Vocabulary) -> Self {
        Self {
            record,
            legs,
            vocab,
        }
    }

    pub fn last(&self) -> &'a str {
        &self.legs.last
    }

    pub fn second_last(&self) -> &'a str {
        &self.legs.second_last
    }

    pub fn third_last(&self) -> &'a str {
        &self.legs.third_last
    }

    /// Returns the origin class.
    ///
    /// # Errors
    /// [`RuleError::MissingField`] if the record has no origin.
    pub fn origin(&self) -> Result<OriginClass, RuleError> {
        self.record
            .origin
            .ok_or(RuleError::MissingField { field: "origin" })
    }

    /// Shorthand for `origin()? == origin`.
    pub fn origin_is(&self, origin: OriginClass) -> Result<bool, RuleError> {
        Ok(self.origin()? == origin)
    }

    /// Returns the survey segment id.
    ///
    /// # Errors
    /// [`RuleError::MissingField`] if the record has no segment.
    pub fn segment_id(&self) -> Result<i64, RuleError> {
        self.record
            .segment_id
            .ok_or(RuleError::MissingField { field: "segment_id" })
    }

    /// Returns `true` if the surveyed airport has the given prefix.
    ///
    /// # Errors
    /// [`RuleError::MissingField`] if the record has no airport prefix.
    pub fn airport_is(&self, prefix: &str) -> Result<bool, RuleError> {
        self.record
            .airport_prefix
            .as_deref()
            .map(|p| p == prefix)
            .ok_or(RuleError::MissingField {
                field: "airport_prefix",
            })
    }

    /// See [`SurveyRecord::is_airport_district`].
    pub fn is_airport_district(&self) -> bool {
        self.record.is_airport_district()
    }
}

/// A business rule over one record's legs and context.
///
/// A rule that fires contributes its own id to the record's
/// [`ConditionVector`]; otherwise it contributes 0. Rules must be pure:
/// same input, same answer, regardless of evaluation order.
///
/// # Examples
///
/// ```
/// use lasam_modemap::conditions::{ConditionId, ConditionRule, RuleInput};
/// use lasam_modemap::error::RuleError;
///
/// struct BoatOnly;
///
/// impl ConditionRule for BoatOnly {
///     fn id(&self) -> ConditionId { ConditionId(1) }
///     fn name(&self) -> &str { "boat_only" }
///     fn check(&self, input: &RuleInput<'_>) -> Result<bool, RuleError> {
///         Ok(input.last() == "Boat")
///     }
/// }
/// ```
pub trait ConditionRule: Send + Sync {
    /// Returns the stable id of this rule.
    fn id(&self) -> ConditionId;

    /// Returns a short name used in logs.
    fn name(&self) -> &str;

    /// Returns `false` for rules kept only to hold their id.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Evaluates the rule.
    ///
    /// An `Err` means the record lacks data the rule needs; the caller
    /// treats it as "not fired" for this record only.
    fn check(&self, input: &RuleInput<'_>) -> Result<bool, RuleError>;
}

/// Per-record condition results, one slot per rule in set order.
///
/// Each slot holds 0 (not fired) or the id of the rule that fired.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ConditionVector {
    values: Vec<u16>,
}

impl ConditionVector {
    /// Wraps raw slot values.
    pub fn from_values(values: Vec<u16>) -> Self {
        Self { values }
    }

    /// Returns the raw slot values.
    pub fn values(&self) -> &[u16] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Ids of the rules that fired, in set order.
    pub fn fired_ids(&self) -> impl Iterator<Item = ConditionId> + '_ {
        self.values
            .iter()
            .filter(|&&v| v != 0)
            .map(|&v| ConditionId(v))
    }

    /// Number of rules that fired.
    pub fn fired_count(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0).count()
    }

    /// Sum of fired ids. Equals the fired id when exactly one fired.
    pub fn fired_sum(&self) -> u32 {
        self.values.iter().map(|&v| v as u32).sum()
    }

    /// Returns `true` if the rule with `id` fired.
    pub fn is_fired(&self, id: ConditionId) -> bool {
        id.0 != 0 && self.values.contains(&id.0)
    }
}

impl FromIterator<u16> for ConditionVector {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_counts() {
        let v: ConditionVector = [0, 2, 0, 4, 5].into_iter().collect();
        assert_eq!(v.len(), 5);
        assert_eq!(v.fired_count(), 3);
        assert_eq!(v.fired_sum(), 11);
        assert_eq!(
            v.fired_ids().collect::<Vec<_>>(),
            vec![ConditionId(2), ConditionId(4), ConditionId(5)]
        );
        assert!(v.is_fired(ConditionId(4)));
        assert!(!v.is_fired(ConditionId(3)));
        assert!(!v.is_fired(ConditionId(0)));
    }

    #[test]
    fn test_single_fired_sum_is_id() {
        let v = ConditionVector::from_values(vec![0, 0, 0, 4, 0]);
        assert_eq!(v.fired_count(), 1);
        assert_eq!(v.fired_sum(), 4);
    }

    #[test]
    fn test_accessors_report_missing_fields() {
        let record = SurveyRecord::new(1);
        let legs = record.derived_legs();
        let vocab = Vocabulary::default();
        let input = RuleInput::new(&record, &legs, &vocab);

        assert_eq!(
            input.origin(),
            Err(RuleError::MissingField { field: "origin" })
        );
        assert!(input.segment_id().is_err());
        assert!(input.airport_is("LHR").is_err());
        assert!(!input.is_airport_district());
    }

    #[test]
    fn test_accessors_present() {
        let record = SurveyRecord::new(1)
            .with_origin(OriginClass::NonLdn)
            .with_segment(2)
            .with_airport("LHR");
        let legs = record.derived_legs();
        let vocab = Vocabulary::default();
        let input = RuleInput::new(&record, &legs, &vocab);

        assert_eq!(input.origin_is(OriginClass::NonLdn), Ok(true));
        assert_eq!(input.segment_id(), Ok(2));
        assert_eq!(input.airport_is("LHR"), Ok(true));
        assert_eq!(input.airport_is("LGW"), Ok(false));
    }
}
