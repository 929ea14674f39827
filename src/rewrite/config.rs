//! Rewrite mapper configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`RewriteMapper`](super::RewriteMapper).
///
/// ```
/// use lasam_modemap::rewrite::RewriteConfig;
///
/// let config = RewriteConfig::default().with_keep_trace(true);
/// assert!(config.parallel);
/// assert!(config.keep_trace);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewriteConfig {
    /// Whether to map records in parallel using rayon.
    pub parallel: bool,

    /// Keep each step's label on the output.
    pub keep_trace: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            keep_trace: false,
        }
    }
}

impl RewriteConfig {
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_keep_trace(mut self, keep: bool) -> Self {
        self.keep_trace = keep;
        self
    }
}
