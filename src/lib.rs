//! Survey access-mode mapping for the LASAM model.
//!
//! Turns airport passenger survey records, each with up to three observed
//! trip legs, into a single LASAM main mode, mode and mode code.
//!
//! - **Leg derivation**: reads a trip backwards from its final leg, with
//!   `"No Mode"` standing in for empty legs.
//! - **Condition rules**: 109 id-indexed business rules evaluated
//!   independently per record, each isolated behind a catch-and-log guard.
//! - **Classification**: one fired rule, several, or none (split into a
//!   data gap and a logic gap).
//! - **Priority resolution**: an injected lookup table settles records
//!   where several rules fire, and supplies the output mode.
//! - **Rewrite chain**: an alternative mapper that pushes a label through
//!   eleven ordered rewrite steps and joins the result.
//!
//! # Architecture
//!
//! All lookup tables and the vocabulary are injected values; nothing is
//! read from fixed paths. Batches are mapped in parallel with rayon when
//! the `parallel` feature is enabled. The library emits `tracing` events
//! and never installs a subscriber.

mod batch;

pub mod classify;
pub mod conditions;
pub mod error;
pub mod legs;
pub mod mapper;
pub mod priority;
pub mod record;
pub mod rewrite;
pub mod vocabulary;
