//! Assignment classifier.
//!
//! Summarises a record's condition results into a firing count, a firing
//! sum and one of four outcomes.

use crate::conditions::ConditionVector;
use crate::legs::DerivedLegs;
use crate::vocabulary::labels::{AIRPORT_COACH, NO_MODE};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of condition evaluation for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModeProcessCheck {
    /// Exactly one condition fired.
    CorrectlyAssigned,
    /// More than one condition fired; resolved by priority.
    DuplicatesAssigned,
    /// Nothing fired and the record has no usable mode data.
    NotAssignedData,
    /// Nothing fired although mode data exists: a gap in rule coverage.
    NotAssignedLogic,
}

impl ModeProcessCheck {
    /// All outcomes in precedence order.
    pub const ALL: [ModeProcessCheck; 4] = [
        ModeProcessCheck::CorrectlyAssigned,
        ModeProcessCheck::DuplicatesAssigned,
        ModeProcessCheck::NotAssignedData,
        ModeProcessCheck::NotAssignedLogic,
    ];

    /// Returns the text used by downstream QA reports.
    pub fn as_str(self) -> &'static str {
        match self {
            ModeProcessCheck::CorrectlyAssigned => "Correctly Assigned",
            ModeProcessCheck::DuplicatesAssigned => "Duplicates Assigned",
            ModeProcessCheck::NotAssignedData => "Not Assigned - Data",
            ModeProcessCheck::NotAssignedLogic => "Not Assigned - Logic",
        }
    }

    /// Returns `true` if a condition id was assigned by logic.
    pub fn is_assigned(self) -> bool {
        matches!(
            self,
            ModeProcessCheck::CorrectlyAssigned | ModeProcessCheck::DuplicatesAssigned
        )
    }
}

impl fmt::Display for ModeProcessCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Firing summary for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Classification {
    /// Number of conditions that fired.
    pub conditions_met: usize,
    /// Sum of fired ids.
    pub condition_sum: u32,
    pub check: ModeProcessCheck,
}

/// Classifies a record's condition results.
///
/// Precedence: one fired → correctly assigned; several → duplicates; none
/// with a last leg of `"No Mode"` or the airport-to-airport coach →
/// data gap; none otherwise → logic gap.
pub fn classify(conditions: &ConditionVector, legs: &DerivedLegs) -> Classification {
    let conditions_met = conditions.fired_count();
    let condition_sum = conditions.fired_sum();

    let check = match conditions_met {
        1 => ModeProcessCheck::CorrectlyAssigned,
        n if n > 1 => ModeProcessCheck::DuplicatesAssigned,
        _ if legs.last == AIRPORT_COACH || legs.last == NO_MODE => {
            ModeProcessCheck::NotAssignedData
        }
        _ => ModeProcessCheck::NotAssignedLogic,
    };

    Classification {
        conditions_met,
        condition_sum,
        check,
    }
}
