//! Rewrite-chain mapping pipeline.

use super::config::RewriteConfig;
use super::flags::RouteFlags;
use super::lookup::AllocationLookup;
use super::steps::{run_chain, StepInput};
use crate::batch::map_ordered;
use crate::legs::DerivedLegs;
use crate::record::SurveyRecord;
use crate::vocabulary::Vocabulary;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One record after the rewrite chain and allocation join.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewrittenRecord {
    pub record: SurveyRecord,
    pub legs: DerivedLegs,
    pub flags: RouteFlags,

    /// Label produced by each step, when
    /// [`RewriteConfig::keep_trace`] is set.
    pub trace: Option<Vec<Option<String>>>,

    /// Final label of the chain; `None` if unresolved.
    pub mode_allocated: Option<String>,

    pub lasam_main_mode: Option<String>,
    pub lasam_mode: Option<String>,
    pub lasam_mode_code: Option<u32>,
}

/// Batch counts for the rewrite chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewriteSummary {
    pub records: usize,
    /// Records whose chain ended without a label.
    pub unresolved: usize,
    /// Resolved labels with no allocation entry.
    pub join_misses: usize,
}

impl RewriteSummary {
    pub fn from_records(records: &[RewrittenRecord]) -> Self {
        let mut summary = Self {
            records: records.len(),
            ..Self::default()
        };
        for r in records {
            if r.mode_allocated.is_none() {
                summary.unresolved += 1;
            } else if r.lasam_main_mode.is_none() {
                summary.join_misses += 1;
            }
        }
        summary
    }
}

/// Result of rewriting a batch, one record per input in input order.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewriteResult {
    pub records: Vec<RewrittenRecord>,
    pub summary: RewriteSummary,
}

/// Maps records through the sequential rewrite chain.
///
/// # Examples
///
/// ```
/// use lasam_modemap::record::SurveyRecord;
/// use lasam_modemap::rewrite::{AllocationLookup, LabelAllocation, RewriteMapper};
///
/// let lookup = AllocationLookup::from_entries([(
///     "Heathrow Express",
///     LabelAllocation::new("Rail", "Heathrow Express", 40),
/// )])
/// .unwrap();
/// let mapper = RewriteMapper::new(lookup);
///
/// let record = SurveyRecord::new(1).with_legs("Heathrow Express", "Taxi", "No Mode");
/// let out = mapper.map_record(&record);
/// assert_eq!(out.mode_allocated.as_deref(), Some("Heathrow Express"));
/// assert_eq!(out.lasam_mode_code, Some(40));
/// ```
#[derive(Debug, Clone)]
pub struct RewriteMapper {
    vocabulary: Vocabulary,
    lookup: AllocationLookup,
    config: RewriteConfig,
}

impl RewriteMapper {
    pub fn new(lookup: AllocationLookup) -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            lookup,
            config: RewriteConfig::default(),
        }
    }

    /// Replaces the vocabulary used for route flags and local bus feeders.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_config(mut self, config: RewriteConfig) -> Self {
        self.config = config;
        self
    }

    pub fn lookup(&self) -> &AllocationLookup {
        &self.lookup
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Maps a single record.
    pub fn map_record(&self, record: &SurveyRecord) -> RewrittenRecord {
        let legs = record.derived_legs();
        let flags = RouteFlags::from_record(record, &self.vocabulary);
        let input = StepInput {
            record,
            legs: &legs,
            flags,
            vocab: &self.vocabulary,
        };
        let (label, trace) = run_chain(&input, self.config.keep_trace);

        let allocation = label.as_deref().and_then(|l| self.lookup.get(l));
        match (&label, allocation) {
            (None, _) => tracing::debug!(record = record.id, "rewrite chain left record unresolved"),
            (Some(l), None) => {
                tracing::debug!(record = record.id, label = %l, "allocated label has no lookup entry")
            }
            _ => {}
        }

        RewrittenRecord {
            record: record.clone(),
            legs,
            flags,
            trace,
            lasam_main_mode: allocation.map(|a| a.main_mode.clone()),
            lasam_mode: allocation.map(|a| a.mode.clone()),
            lasam_mode_code: allocation.map(|a| a.mode_code),
            mode_allocated: label,
        }
    }

    /// Maps a batch. One output per input, in input order.
    pub fn map_batch(&self, records: &[SurveyRecord]) -> RewriteResult {
        let rewritten = map_ordered(records, self.config.parallel, |r| self.map_record(r));
        let summary = RewriteSummary::from_records(&rewritten);

        tracing::info!(
            records = summary.records,
            unresolved = summary.unresolved,
            join_misses = summary.join_misses,
            "rewrite mapping complete"
        );

        RewriteResult {
            records: rewritten,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::{LabelAllocation, RENTALS};
    use crate::vocabulary::labels::*;

    fn lookup() -> AllocationLookup {
        AllocationLookup::from_entries([
            (TAXI, LabelAllocation::new("Taxi", "Black Cab", 12)),
            (RENTALS, LabelAllocation::new("Rental", "Rental Car", 20)),
            (HEATHROW_EXPRESS, LabelAllocation::new("Rail", "Heathrow Express", 40)),
        ])
        .unwrap()
    }

    fn mapper() -> RewriteMapper {
        RewriteMapper::new(lookup()).with_config(RewriteConfig::default().with_parallel(false))
    }

    #[test]
    fn test_join() {
        let r = SurveyRecord::new(1).with_legs(RENTAL_SHORT_TERM, NO_MODE, NO_MODE);
        let out = mapper().map_record(&r);
        assert_eq!(out.mode_allocated.as_deref(), Some(RENTALS));
        assert_eq!(out.lasam_main_mode.as_deref(), Some("Rental"));
        assert!(out.trace.is_none());
    }

    #[test]
    fn test_unresolved() {
        let r = SurveyRecord::new(1).with_legs(CAR_UNSPECIFIED, NO_MODE, NO_MODE);
        let out = mapper().map_record(&r);
        assert_eq!(out.mode_allocated, None);
        assert_eq!(out.lasam_mode, None);
    }

    #[test]
    fn test_keep_trace() {
        let r = SurveyRecord::new(1).with_legs(HEATHROW_EXPRESS, TUBE, NO_MODE);
        let out = mapper()
            .with_config(RewriteConfig::default().with_keep_trace(true))
            .map_record(&r);
        let trace = out.trace.unwrap();
        assert_eq!(trace.len(), 11);
        assert_eq!(trace[0].as_deref(), Some(TUBE));
        assert_eq!(trace[2].as_deref(), Some(HEATHROW_EXPRESS));
        assert_eq!(trace.last().cloned().flatten(), out.mode_allocated);
    }

    #[test]
    fn test_batch_summary_and_order() {
        let records = vec![
            SurveyRecord::new(1).with_legs(TAXI, NO_MODE, NO_MODE),
            SurveyRecord::new(2).with_legs(CAR_UNSPECIFIED, NO_MODE, NO_MODE),
            SurveyRecord::new(3).with_legs(BOAT, NO_MODE, NO_MODE),
            SurveyRecord::new(4).with_legs(HEATHROW_EXPRESS, TAXI, NO_MODE),
        ];
        let result = mapper().map_batch(&records);
        let ids: Vec<u64> = result.records.iter().map(|r| r.record.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(
            result.summary,
            RewriteSummary {
                records: 4,
                unresolved: 1,
                join_misses: 1,
            }
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let labels = [TAXI, RENTAL_COURTESY_BUS, TUBE, OTHER, WALK, AIRPORT_COACH];
        let records: Vec<SurveyRecord> = (0..120)
            .map(|i| {
                SurveyRecord::new(i as u64).with_legs(labels[i % 6], labels[(i / 6) % 6], NO_MODE)
            })
            .collect();
        let seq = mapper().map_batch(&records);
        let par = RewriteMapper::new(lookup()).map_batch(&records);
        assert_eq!(seq.records, par.records);
    }
}
