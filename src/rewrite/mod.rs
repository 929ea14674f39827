//! Sequential rewrite-chain mapper.
//!
//! An alternative to the condition-and-priority mapper: each record's label
//! is pushed through eleven ordered rewrite steps and the final label is
//! joined against an [`AllocationLookup`]. There is no priority concept.
//! The two mappers are never mixed in one pipeline.
//!
//! # Key Types
//!
//! - [`RouteFlags`]: whole-route facts read from the raw legs
//! - [`STEPS`]: the chain, in order
//! - [`RewriteMapper`]: runs the chain per record and per batch

mod config;
mod flags;
mod lookup;
mod runner;
mod steps;

pub use config::RewriteConfig;
pub use flags::RouteFlags;
pub use lookup::{AllocationLookup, LabelAllocation};
pub use runner::{RewriteMapper, RewriteResult, RewriteSummary, RewrittenRecord};
pub use steps::{
    run_chain, RewriteStep, StepFn, StepInput, CAR_UNSPECIFIED_FOREIGN, CAR_UNSPECIFIED_UK,
    RENTALS, STEPS,
};
