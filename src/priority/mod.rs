//! Mode priority lookup.
//!
//! Maps each condition id to the output mode it assigns and a priority rank
//! used to settle records where several conditions fire.
//!
//! # Key Types
//!
//! - [`ModeAllocation`]: main mode, mode, mode code and priority for one id
//! - [`ModePriorityLookup`]: the injected lookup table, with
//!   [`resolve`](ModePriorityLookup::resolve) for conflict resolution
//! - [`TieBreaker`]: deterministic rule for equal priorities

mod lookup;
mod types;

pub use lookup::ModePriorityLookup;
pub use types::{ModeAllocation, Resolution, TieBreaker};
