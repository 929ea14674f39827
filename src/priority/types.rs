//! Lookup row types.

use crate::conditions::ConditionId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output mode for one condition id, with its precedence.
///
/// `priority` follows the minimization convention: 1 is the highest
/// precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModeAllocation {
    pub main_mode: String,
    pub mode: String,
    pub mode_code: u32,
    pub priority: u32,
}

impl ModeAllocation {
    pub fn new(
        main_mode: impl Into<String>,
        mode: impl Into<String>,
        mode_code: u32,
        priority: u32,
    ) -> Self {
        Self {
            main_mode: main_mode.into(),
            mode: mode.into(),
            mode_code,
            priority,
        }
    }
}

/// Strategy for choosing between fired conditions with equal priority.
///
/// Equal priorities among conditions that can co-fire are a data-quality
/// defect in the lookup; the strategy only makes the outcome deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TieBreaker {
    /// The smallest condition id wins.
    #[default]
    LowestId,

    /// The condition listed first in the lookup table wins.
    LookupOrder,
}

/// Result of resolving a set of fired conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The winning condition.
    pub winner: ConditionId,
    /// Priority of the winner, `None` if no fired id had a lookup entry.
    pub priority: Option<u32>,
    /// Whether another fired id shared the winning priority.
    pub tied: bool,
}
