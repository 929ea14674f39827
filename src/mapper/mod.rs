//! Condition-and-priority mode mapper.
//!
//! Every condition is evaluated independently for each record. A single
//! fired condition assigns its mode directly; several are settled by the
//! [`ModePriorityLookup`](crate::priority::ModePriorityLookup). Records no
//! condition covers fall back to the externally computed final mode when
//! the gap is in the rules, never when the data is missing.
//!
//! # Key Types
//!
//! - [`MapperConfig`]: parallelism, tie-break, fallback and output options
//! - [`ModeConditionMapper`]: runs the pipeline per record and per batch
//! - [`MappedRecord`], [`MappingResult`], [`MappingSummary`]: outputs

mod config;
mod runner;
mod types;

pub use config::MapperConfig;
pub use runner::ModeConditionMapper;
pub use types::{MappedRecord, MappingResult, MappingSummary, NOT_ASSIGNED};
