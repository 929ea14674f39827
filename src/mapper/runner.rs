//! Condition-and-priority mapping pipeline.
//!
//! [`ModeConditionMapper`] runs, per record:
//! leg derivation → condition evaluation → classification → conflict
//! resolution → lookup join → final-mode fallback.

use super::config::MapperConfig;
use super::types::{MappedRecord, MappingResult, MappingSummary, NOT_ASSIGNED};
use crate::batch::map_ordered;
use crate::classify::{classify, ModeProcessCheck};
use crate::conditions::{ConditionId, ConditionSet, ConditionVector, RuleInput};
use crate::error::Result;
use crate::legs::DerivedLegs;
use crate::priority::ModePriorityLookup;
use crate::record::SurveyRecord;
use crate::vocabulary::Vocabulary;
use std::sync::Once;

/// Maps survey records to LASAM modes through the condition rule set.
///
/// The condition set, vocabulary and lookup are immutable after
/// construction and shared across worker threads. Lookup gaps against the
/// final condition set are logged once, on the first mapped record.
///
/// # Examples
///
/// ```
/// use lasam_modemap::classify::ModeProcessCheck;
/// use lasam_modemap::conditions::ConditionId;
/// use lasam_modemap::mapper::ModeConditionMapper;
/// use lasam_modemap::priority::{ModeAllocation, ModePriorityLookup};
/// use lasam_modemap::record::{OriginClass, SurveyRecord};
///
/// let lookup = ModePriorityLookup::from_entries([(
///     ConditionId(4),
///     ModeAllocation::new("Taxi", "Black Cab", 12, 10),
/// )])
/// .unwrap();
/// let mapper = ModeConditionMapper::new(lookup);
///
/// let record = SurveyRecord::new(1)
///     .with_legs("Taxi", "No Mode", "No Mode")
///     .with_origin(OriginClass::Ldn);
/// let mapped = mapper.map_record(&record);
/// assert_eq!(mapped.check, ModeProcessCheck::CorrectlyAssigned);
/// assert_eq!(mapped.condition_id, 4);
/// assert_eq!(mapped.lasam_mode.as_deref(), Some("Black Cab"));
/// ```
#[derive(Debug)]
pub struct ModeConditionMapper {
    conditions: ConditionSet,
    vocabulary: Vocabulary,
    lookup: ModePriorityLookup,
    config: MapperConfig,
    lookup_checked: Once,
}

impl ModeConditionMapper {
    /// Creates a mapper over the reference condition set and vocabulary.
    pub fn new(lookup: ModePriorityLookup) -> Self {
        Self {
            conditions: ConditionSet::reference(),
            vocabulary: Vocabulary::default(),
            lookup,
            config: MapperConfig::default(),
            lookup_checked: Once::new(),
        }
    }

    /// Replaces the condition set.
    ///
    /// # Errors
    /// Returns the set's validation error if its ids have a gap or duplicate.
    pub fn with_conditions(mut self, conditions: ConditionSet) -> Result<Self> {
        conditions.validate()?;
        self.conditions = conditions;
        Ok(self)
    }

    /// Replaces the vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn lookup(&self) -> &ModePriorityLookup {
        &self.lookup
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Enabled conditions of the current set that have no lookup entry.
    pub fn missing_ids(&self) -> Vec<ConditionId> {
        self.lookup.missing_ids(&self.conditions)
    }

    fn warn_missing_ids(&self) {
        let missing = self.missing_ids();
        if !missing.is_empty() {
            let ids: Vec<u16> = missing.iter().map(|id| id.get()).collect();
            tracing::warn!(
                count = missing.len(),
                ids = ?ids,
                "enabled conditions have no lookup entry"
            );
        }
    }

    /// Evaluates every condition for one record.
    pub fn evaluate(&self, record: &SurveyRecord, legs: &DerivedLegs) -> ConditionVector {
        let input = RuleInput::new(record, legs, &self.vocabulary);
        self.conditions.evaluate(&input)
    }

    /// Maps a single record.
    pub fn map_record(&self, record: &SurveyRecord) -> MappedRecord {
        self.lookup_checked.call_once(|| self.warn_missing_ids());
        let legs = record.derived_legs();
        let conditions = self.evaluate(record, &legs);
        let classification = classify(&conditions, &legs);

        let condition_id = self.condition_id(record, &conditions, classification.check);

        let allocation = u16::try_from(condition_id)
            .ok()
            .and_then(|id| self.lookup.get(id.into()));
        if allocation.is_none() && condition_id != NOT_ASSIGNED {
            tracing::debug!(
                record = record.id,
                condition = condition_id,
                "condition id has no lookup entry"
            );
        }

        let mut mapped = MappedRecord {
            record: record.clone(),
            legs,
            conditions: None,
            conditions_met: classification.conditions_met,
            condition_sum: classification.condition_sum,
            check: classification.check,
            condition_id,
            lasam_main_mode: allocation.map(|a| a.main_mode.clone()),
            lasam_mode: allocation.map(|a| a.mode.clone()),
            lasam_mode_code: allocation.map(|a| a.mode_code),
            used_final_mode_fallback: false,
        };

        if self.config.apply_final_mode_fallback
            && mapped.check == ModeProcessCheck::NotAssignedLogic
        {
            mapped.lasam_mode = record.system_final_mode.clone();
            mapped.lasam_mode_code = record.system_final_mode_code;
            mapped.used_final_mode_fallback = true;
        }

        if self.config.keep_conditions {
            mapped.conditions = Some(conditions);
        }
        mapped
    }

    fn condition_id(
        &self,
        record: &SurveyRecord,
        conditions: &ConditionVector,
        check: ModeProcessCheck,
    ) -> i32 {
        match check {
            ModeProcessCheck::CorrectlyAssigned => conditions
                .fired_ids()
                .next()
                .map_or(NOT_ASSIGNED, |id| i32::from(id.get())),
            ModeProcessCheck::DuplicatesAssigned => {
                let Some(res) = self
                    .lookup
                    .resolve(conditions.fired_ids(), self.config.tie_breaker)
                else {
                    return NOT_ASSIGNED;
                };
                if res.priority.is_none() {
                    tracing::warn!(
                        record = record.id,
                        winner = res.winner.get(),
                        "no fired condition has a priority, using lowest id"
                    );
                } else if res.tied {
                    tracing::debug!(
                        record = record.id,
                        winner = res.winner.get(),
                        priority = ?res.priority,
                        tie_breaker = ?self.config.tie_breaker,
                        "priority tie resolved"
                    );
                }
                i32::from(res.winner.get())
            }
            ModeProcessCheck::NotAssignedData | ModeProcessCheck::NotAssignedLogic => NOT_ASSIGNED,
        }
    }

    /// Maps a batch. One output per input, in input order.
    pub fn map_batch(&self, records: &[SurveyRecord]) -> MappingResult {
        let mapped = map_ordered(records, self.config.parallel, |r| self.map_record(r));
        let summary = MappingSummary::from_records(&mapped);

        tracing::info!(
            records = summary.records,
            correctly_assigned = summary.correctly_assigned,
            duplicates_assigned = summary.duplicates_assigned,
            not_assigned_data = summary.not_assigned_data,
            not_assigned_logic = summary.not_assigned_logic,
            fallbacks = summary.fallbacks,
            join_misses = summary.join_misses,
            "mode mapping complete"
        );

        MappingResult {
            records: mapped,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{Disabled, DisabledReason, FnRule};
    use crate::error::{MapperError, RuleError};
    use crate::priority::{ModeAllocation, TieBreaker};
    use crate::record::OriginClass::{Ldn, NonLdn};
    use crate::vocabulary::labels::*;

    fn lookup() -> ModePriorityLookup {
        ModePriorityLookup::from_entries([
            (ConditionId(4), ModeAllocation::new("Taxi", "Black Cab", 12, 10)),
            (ConditionId(5), ModeAllocation::new("Taxi", "Black Cab", 12, 11)),
            (ConditionId(57), ModeAllocation::new("Taxi", "Black Cab", 12, 40)),
            (ConditionId(10), ModeAllocation::new("Rental", "Rental Car", 20, 6)),
            (ConditionId(9), ModeAllocation::new("Private Car", "Short Stay", 3, 2)),
            (ConditionId(14), ModeAllocation::new("Private Car", "Short Stay", 3, 5)),
        ])
        .unwrap()
    }

    fn mapper() -> ModeConditionMapper {
        ModeConditionMapper::new(lookup()).with_config(MapperConfig::default().with_parallel(false))
    }

    fn trip(a: &str, b: &str, c: &str) -> SurveyRecord {
        SurveyRecord::new(1)
            .with_legs(a, b, c)
            .with_airport("LHR")
            .with_segment(1)
    }

    #[test]
    fn test_single_taxi_from_london() {
        let r = trip(TAXI, NO_MODE, NO_MODE).with_origin(Ldn);
        let m = mapper().map_record(&r);
        assert_eq!(m.check, ModeProcessCheck::CorrectlyAssigned);
        assert_eq!(m.conditions_met, 1);
        assert_eq!(m.condition_id, 4);
        assert_eq!(m.lasam_main_mode.as_deref(), Some("Taxi"));
        assert_eq!(m.lasam_mode_code, Some(12));
        assert!(!m.used_final_mode_fallback);
    }

    #[test]
    fn test_rental_short_term() {
        let r = SurveyRecord::new(1).with_legs(RENTAL_SHORT_TERM, NO_MODE, NO_MODE);
        let m = mapper().map_record(&r);
        assert_eq!(m.check, ModeProcessCheck::CorrectlyAssigned);
        assert_eq!(m.condition_id, 10);
        assert_eq!(m.lasam_mode.as_deref(), Some("Rental Car"));
    }

    #[test]
    fn test_short_stay_duplicates_resolved_by_priority() {
        let r = trip(SHORT_TERM_CAR_PARK, NO_MODE, NO_MODE).with_origin(Ldn);
        let m = mapper().map_record(&r);
        assert_eq!(m.check, ModeProcessCheck::DuplicatesAssigned);
        assert_eq!(m.conditions_met, 2);
        assert_eq!(m.condition_sum, 23);
        assert_eq!(m.condition_id, 9);
    }

    #[test]
    fn test_duplicates_follow_lookup_ranks() {
        let lookup = ModePriorityLookup::from_entries([
            (ConditionId(9), ModeAllocation::new("Private Car", "Short Stay", 3, 8)),
            (ConditionId(14), ModeAllocation::new("Private Car", "Short Stay", 3, 5)),
        ])
        .unwrap();
        let mapper = ModeConditionMapper::new(lookup);
        let r = trip(SHORT_TERM_CAR_PARK, NO_MODE, NO_MODE).with_origin(Ldn);
        assert_eq!(mapper.map_record(&r).condition_id, 14);
    }

    #[test]
    fn test_all_empty_is_data_gap() {
        let r = SurveyRecord::new(1).with_final_mode("Taxi", 12);
        let m = mapper().map_record(&r);
        assert_eq!(m.check, ModeProcessCheck::NotAssignedData);
        assert_eq!(m.condition_id, NOT_ASSIGNED);
        assert_eq!(m.lasam_mode, None);
        assert_eq!(m.lasam_mode_code, None);
        assert!(!m.used_final_mode_fallback);
    }

    #[test]
    fn test_logic_gap_uses_final_mode() {
        let r = SurveyRecord::new(1)
            .with_legs(ELIZABETH_LINE, WALK, NO_MODE)
            .with_final_mode("Rail", 31);
        let m = mapper().map_record(&r);
        assert_eq!(m.check, ModeProcessCheck::NotAssignedLogic);
        assert_eq!(m.condition_id, NOT_ASSIGNED);
        assert_eq!(m.lasam_main_mode, None);
        assert_eq!(m.lasam_mode.as_deref(), Some("Rail"));
        assert_eq!(m.lasam_mode_code, Some(31));
        assert!(m.used_final_mode_fallback);
    }

    #[test]
    fn test_logic_gap_without_fallback() {
        let r = SurveyRecord::new(1)
            .with_legs(ELIZABETH_LINE, WALK, NO_MODE)
            .with_final_mode("Rail", 31);
        let m = mapper()
            .with_config(MapperConfig::qa())
            .map_record(&r);
        assert_eq!(m.check, ModeProcessCheck::NotAssignedLogic);
        assert_eq!(m.lasam_mode, None);
        assert!(!m.used_final_mode_fallback);
        assert!(m.conditions.is_some());
    }

    #[test]
    fn test_join_miss_leaves_modes_empty() {
        let r = trip(TUBE, NO_MODE, NO_MODE).with_origin(Ldn);
        let m = mapper().map_record(&r);
        assert_eq!(m.condition_id, 18);
        assert!(m.is_join_miss());
        assert_eq!(m.lasam_mode, None);
    }

    #[test]
    fn test_keep_conditions() {
        let r = trip(TAXI, NO_MODE, NO_MODE).with_origin(Ldn);
        let m = mapper()
            .with_config(MapperConfig::default().with_keep_conditions(true))
            .map_record(&r);
        let v = m.conditions.unwrap();
        assert_eq!(v.len(), 109);
        assert!(v.is_fired(ConditionId(4)));

        let m = mapper().map_record(&r);
        assert!(m.conditions.is_none());
    }

    #[test]
    fn test_all_unranked_duplicates_use_lowest_id() {
        let r = SurveyRecord::new(1)
            .with_legs(CAR_UNSPECIFIED, NO_MODE, NO_MODE)
            .with_segment(1);
        let m = mapper().map_record(&r);
        assert_eq!(m.check, ModeProcessCheck::DuplicatesAssigned);
        assert_eq!(m.condition_id, 30);
        assert!(m.is_join_miss());
    }

    #[test]
    fn test_batch_order_and_summary() {
        let records = vec![
            trip(TAXI, NO_MODE, NO_MODE).with_origin(Ldn),
            SurveyRecord::new(2),
            trip(SHORT_TERM_CAR_PARK, NO_MODE, NO_MODE).with_origin(Ldn),
            SurveyRecord::new(4).with_legs(ELIZABETH_LINE, WALK, NO_MODE),
            trip(TUBE, NO_MODE, NO_MODE).with_origin(Ldn),
        ];
        let result = mapper().map_batch(&records);
        assert_eq!(result.records.len(), 5);
        let ids: Vec<i32> = result.records.iter().map(|m| m.condition_id).collect();
        assert_eq!(ids, vec![4, -1, 9, -1, 18]);

        let s = result.summary;
        assert_eq!(s.records, 5);
        assert_eq!(s.correctly_assigned, 2);
        assert_eq!(s.duplicates_assigned, 1);
        assert_eq!(s.not_assigned_data, 1);
        assert_eq!(s.not_assigned_logic, 1);
        assert_eq!(s.fallbacks, 1);
        assert_eq!(s.join_misses, 1);
        assert!((s.assigned_ratio() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let records: Vec<SurveyRecord> = (0..200)
            .map(|i| {
                let leg = [TAXI, SHORT_TERM_CAR_PARK, TUBE, RENTAL_SHORT_TERM][i % 4];
                trip(leg, NO_MODE, NO_MODE).with_origin(if i % 3 == 0 { Ldn } else { NonLdn })
            })
            .collect();
        let seq = mapper().map_batch(&records);
        let par = ModeConditionMapper::new(lookup())
            .with_config(MapperConfig::default().with_parallel(true))
            .map_batch(&records);
        assert_eq!(seq.records, par.records);
        assert_eq!(seq.summary, par.summary);
    }

    #[test]
    fn test_disabled_never_wins() {
        fn always(_: &RuleInput<'_>) -> std::result::Result<bool, RuleError> {
            Ok(true)
        }
        let set = ConditionSet::new()
            .with_rule(Disabled::new(1, DisabledReason::Retired))
            .with_rule(FnRule::new(2, "always", always));
        let lookup = ModePriorityLookup::from_entries([
            (ConditionId(1), ModeAllocation::new("A", "A", 1, 1)),
            (ConditionId(2), ModeAllocation::new("B", "B", 2, 9)),
        ])
        .unwrap();
        let mapper = ModeConditionMapper::new(lookup).with_conditions(set).unwrap();
        let m = mapper.map_record(&SurveyRecord::new(1).with_legs(TAXI, NO_MODE, NO_MODE));
        assert_eq!(m.condition_id, 2);
        assert_eq!(m.check, ModeProcessCheck::CorrectlyAssigned);
    }

    #[test]
    fn test_tie_breaker_lookup_order() {
        fn yes(_: &RuleInput<'_>) -> std::result::Result<bool, RuleError> {
            Ok(true)
        }
        let set = ConditionSet::new()
            .with_rule(FnRule::new(1, "one", yes))
            .with_rule(FnRule::new(2, "two", yes));
        let lookup = ModePriorityLookup::from_entries([
            (ConditionId(2), ModeAllocation::new("B", "B", 2, 1)),
            (ConditionId(1), ModeAllocation::new("A", "A", 1, 1)),
        ])
        .unwrap();
        let base = ModeConditionMapper::new(lookup).with_conditions(set).unwrap();
        let r = SurveyRecord::new(1).with_legs(TAXI, NO_MODE, NO_MODE);

        assert_eq!(base.map_record(&r).condition_id, 1);
        let by_order = base.with_config(
            MapperConfig::default().with_tie_breaker(TieBreaker::LookupOrder),
        );
        assert_eq!(by_order.map_record(&r).condition_id, 2);
    }

    #[test]
    fn test_invalid_condition_set_rejected() {
        fn yes(_: &RuleInput<'_>) -> std::result::Result<bool, RuleError> {
            Ok(true)
        }
        let set = ConditionSet::new().with_rule(FnRule::new(2, "two", yes));
        let err = ModeConditionMapper::new(lookup())
            .with_conditions(set)
            .unwrap_err();
        assert_eq!(
            err,
            MapperError::ConditionGap {
                expected: ConditionId(1),
                found: ConditionId(2),
            }
        );
    }

    #[test]
    fn test_blank_legs_read_as_no_mode() {
        let r = SurveyRecord::new(1)
            .with_legs(TAXI, "", "")
            .with_origin(Ldn);
        let m = mapper().map_record(&r);
        assert_eq!(m.legs.last, TAXI);
        assert_eq!(m.legs.second_last, NO_MODE);
        assert_eq!(m.check, ModeProcessCheck::CorrectlyAssigned);
        assert_eq!(m.condition_id, 4);
        assert_eq!(m.lasam_mode.as_deref(), Some("Black Cab"));
    }

    #[test]
    fn test_lookup_gaps_checked_against_final_set() {
        fn yes(_: &RuleInput<'_>) -> std::result::Result<bool, RuleError> {
            Ok(true)
        }
        let set = ConditionSet::new()
            .with_rule(FnRule::new(1, "one", yes))
            .with_rule(Disabled::new(2, DisabledReason::Retired));
        let lookup = ModePriorityLookup::from_entries([(
            ConditionId(1),
            ModeAllocation::new("A", "A", 1, 1),
        )])
        .unwrap();
        assert!(!lookup.missing_ids(&ConditionSet::reference()).is_empty());

        let m = ModeConditionMapper::new(lookup).with_conditions(set).unwrap();
        assert!(m.missing_ids().is_empty());
        assert!(!m.lookup_checked.is_completed());

        m.map_record(&SurveyRecord::new(1).with_legs(TAXI, NO_MODE, NO_MODE));
        assert!(m.lookup_checked.is_completed());
    }
}
