//! Mapper configuration.

use crate::priority::TieBreaker;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`ModeConditionMapper`](super::ModeConditionMapper).
///
/// # Defaults
///
/// ```
/// use lasam_modemap::mapper::MapperConfig;
/// use lasam_modemap::priority::TieBreaker;
///
/// let config = MapperConfig::default();
/// assert!(config.parallel);
/// assert_eq!(config.tie_breaker, TieBreaker::LowestId);
/// assert!(config.apply_final_mode_fallback);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use lasam_modemap::mapper::MapperConfig;
/// use lasam_modemap::priority::TieBreaker;
///
/// let config = MapperConfig::default()
///     .with_parallel(false)
///     .with_tie_breaker(TieBreaker::LookupOrder)
///     .with_keep_conditions(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapperConfig {
    /// Whether to map records in parallel using rayon.
    ///
    /// Has no effect without the `parallel` cargo feature.
    pub parallel: bool,

    /// How to settle fired conditions with equal priority.
    pub tie_breaker: TieBreaker,

    /// Keep each record's [`ConditionVector`](crate::conditions::ConditionVector)
    /// on the output.
    pub keep_conditions: bool,

    /// Overwrite mode and mode code with the system final mode for records
    /// classified `NotAssignedLogic`.
    ///
    /// Switch off for QA runs that need to see raw logic gaps.
    pub apply_final_mode_fallback: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            tie_breaker: TieBreaker::default(),
            keep_conditions: false,
            apply_final_mode_fallback: true,
        }
    }
}

impl MapperConfig {
    /// Sets whether records are mapped in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the tie-break strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Sets whether condition vectors are kept on the output.
    pub fn with_keep_conditions(mut self, keep: bool) -> Self {
        self.keep_conditions = keep;
        self
    }

    /// Sets whether the system final mode fallback is applied.
    pub fn with_final_mode_fallback(mut self, apply: bool) -> Self {
        self.apply_final_mode_fallback = apply;
        self
    }

    /// QA preset: sequential, conditions kept, no fallback.
    pub fn qa() -> Self {
        Self {
            parallel: false,
            tie_breaker: TieBreaker::LowestId,
            keep_conditions: true,
            apply_final_mode_fallback: false,
        }
    }
}
