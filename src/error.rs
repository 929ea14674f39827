//! Error types.
//!
//! Two layers:
//!
//! - [`RuleError`]: raised by a single condition predicate for a single
//!   record. Always recovered by the condition guard (the condition is
//!   treated as not fired), never propagated to the batch.
//! - [`MapperError`]: raised while building an engine (condition set,
//!   lookup tables). Returned to the caller before any record is mapped.

use crate::conditions::ConditionId;
use thiserror::Error;

/// Per-record predicate failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A field the predicate needs is absent on the record.
    #[error("missing field `{field}`")]
    MissingField { field: &'static str },

    /// A field is present but holds a value the predicate cannot interpret.
    #[error("invalid value {value:?} for field `{field}`")]
    InvalidValue { field: &'static str, value: String },
}

/// Engine construction failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapperError {
    /// Two rules registered under the same condition id.
    #[error("duplicate condition id {id}")]
    DuplicateCondition { id: ConditionId },

    /// The id space is not contiguous from 1.
    #[error("condition id space has a gap: expected {expected}, found {found}")]
    ConditionGap {
        expected: ConditionId,
        found: ConditionId,
    },

    /// The condition set holds no rules.
    #[error("condition set is empty")]
    EmptyConditionSet,

    /// A lookup table contains the same key twice.
    #[error("duplicate lookup key {key}")]
    DuplicateLookupKey { key: String },
}

/// Convenience alias for construction results.
pub type Result<T> = std::result::Result<T, MapperError>;
