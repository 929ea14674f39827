//! Mapper output types.

use crate::classify::ModeProcessCheck;
use crate::conditions::ConditionVector;
use crate::legs::DerivedLegs;
use crate::record::SurveyRecord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Condition id written for records where no condition was assigned.
pub const NOT_ASSIGNED: i32 = -1;

/// One mapped record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MappedRecord {
    pub record: SurveyRecord,
    pub legs: DerivedLegs,

    /// Per-condition results, kept only when
    /// [`MapperConfig::keep_conditions`](super::MapperConfig::keep_conditions) is set.
    pub conditions: Option<ConditionVector>,

    pub conditions_met: usize,
    pub condition_sum: u32,
    pub check: ModeProcessCheck,

    /// Winning condition id, or [`NOT_ASSIGNED`].
    pub condition_id: i32,

    pub lasam_main_mode: Option<String>,
    pub lasam_mode: Option<String>,
    pub lasam_mode_code: Option<u32>,

    /// Whether mode and mode code came from the system final mode.
    pub used_final_mode_fallback: bool,
}

impl MappedRecord {
    /// Returns `true` if a condition was assigned but had no lookup entry.
    pub fn is_join_miss(&self) -> bool {
        self.condition_id != NOT_ASSIGNED && self.lasam_main_mode.is_none()
    }
}

/// Batch counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MappingSummary {
    pub records: usize,
    pub correctly_assigned: usize,
    pub duplicates_assigned: usize,
    pub not_assigned_data: usize,
    pub not_assigned_logic: usize,
    /// Records whose mode came from the system final mode.
    pub fallbacks: usize,
    /// Assigned records whose condition id had no lookup entry.
    pub join_misses: usize,
}

impl MappingSummary {
    /// Tallies a slice of mapped records.
    pub fn from_records(records: &[MappedRecord]) -> Self {
        let mut summary = Self {
            records: records.len(),
            ..Self::default()
        };
        for r in records {
            match r.check {
                ModeProcessCheck::CorrectlyAssigned => summary.correctly_assigned += 1,
                ModeProcessCheck::DuplicatesAssigned => summary.duplicates_assigned += 1,
                ModeProcessCheck::NotAssignedData => summary.not_assigned_data += 1,
                ModeProcessCheck::NotAssignedLogic => summary.not_assigned_logic += 1,
            }
            if r.used_final_mode_fallback {
                summary.fallbacks += 1;
            }
            if r.is_join_miss() {
                summary.join_misses += 1;
            }
        }
        summary
    }

    /// Number of records with the given outcome.
    pub fn count(&self, check: ModeProcessCheck) -> usize {
        match check {
            ModeProcessCheck::CorrectlyAssigned => self.correctly_assigned,
            ModeProcessCheck::DuplicatesAssigned => self.duplicates_assigned,
            ModeProcessCheck::NotAssignedData => self.not_assigned_data,
            ModeProcessCheck::NotAssignedLogic => self.not_assigned_logic,
        }
    }

    /// Fraction of records assigned by logic (0.0 for an empty batch).
    pub fn assigned_ratio(&self) -> f64 {
        if self.records == 0 {
            return 0.0;
        }
        (self.correctly_assigned + self.duplicates_assigned) as f64 / self.records as f64
    }
}

/// Result of mapping a batch.
///
/// `records` has one entry per input record, in input order.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MappingResult {
    pub records: Vec<MappedRecord>,
    pub summary: MappingSummary,
}
