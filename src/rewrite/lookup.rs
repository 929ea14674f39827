//! Allocated label → output mode.

use crate::error::{MapperError, Result};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output mode for one allocated label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelAllocation {
    pub main_mode: String,
    pub mode: String,
    pub mode_code: u32,
}

impl LabelAllocation {
    pub fn new(main_mode: impl Into<String>, mode: impl Into<String>, mode_code: u32) -> Self {
        Self {
            main_mode: main_mode.into(),
            mode: mode.into(),
            mode_code,
        }
    }
}

/// Join table for the rewrite chain's final label. Keys are exact labels.
///
/// With the `serde` feature the table (de)serializes as a list of
/// `(label, allocation)` pairs sorted by label; duplicate labels are
/// rejected on load.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        try_from = "Vec<(String, LabelAllocation)>",
        into = "Vec<(String, LabelAllocation)>"
    )
)]
pub struct AllocationLookup {
    entries: HashMap<String, LabelAllocation>,
}

impl AllocationLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a lookup from `(label, allocation)` pairs.
    ///
    /// # Errors
    /// [`MapperError::DuplicateLookupKey`] if a label appears twice.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, LabelAllocation)>,
        S: Into<String>,
    {
        let mut lookup = Self::new();
        for (label, allocation) in entries {
            lookup.insert(label, allocation)?;
        }
        Ok(lookup)
    }

    /// Adds an entry.
    ///
    /// # Errors
    /// [`MapperError::DuplicateLookupKey`] if `label` is already present.
    pub fn insert(&mut self, label: impl Into<String>, allocation: LabelAllocation) -> Result<()> {
        let label = label.into();
        if self.entries.contains_key(&label) {
            return Err(MapperError::DuplicateLookupKey { key: label });
        }
        self.entries.insert(label, allocation);
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<&LabelAllocation> {
        self.entries.get(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<(String, LabelAllocation)>> for AllocationLookup {
    type Error = MapperError;

    fn try_from(entries: Vec<(String, LabelAllocation)>) -> Result<Self> {
        Self::from_entries(entries)
    }
}

impl From<AllocationLookup> for Vec<(String, LabelAllocation)> {
    fn from(lookup: AllocationLookup) -> Self {
        let mut entries: Vec<_> = lookup.entries.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get() {
        let lookup = AllocationLookup::from_entries([
            ("Taxi", LabelAllocation::new("Taxi", "Black Cab", 12)),
            ("Rentals", LabelAllocation::new("Rental", "Rental Car", 20)),
        ])
        .unwrap();
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get("Rentals").map(|a| a.mode_code), Some(20));
        assert!(lookup.get("taxi").is_none());
    }

    #[test]
    fn test_duplicate_label() {
        let err = AllocationLookup::from_entries([
            ("Taxi", LabelAllocation::new("Taxi", "Black Cab", 12)),
            ("Taxi", LabelAllocation::new("Taxi", "Minicab", 13)),
        ])
        .unwrap_err();
        assert_eq!(err, MapperError::DuplicateLookupKey { key: "Taxi".into() });
    }

    #[test]
    fn test_pairs_sorted_by_label() {
        let lookup = AllocationLookup::from_entries([
            ("Taxi", LabelAllocation::new("Taxi", "Black Cab", 12)),
            ("Rentals", LabelAllocation::new("Rental", "Rental Car", 20)),
        ])
        .unwrap();
        let labels: Vec<String> = Vec::from(lookup).into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Rentals", "Taxi"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_json_rejects_duplicates() {
        let json = r#"[["Taxi",{"main_mode":"Taxi","mode":"Black Cab","mode_code":12}]]"#;
        let lookup: AllocationLookup = serde_json::from_str(json).unwrap();
        assert_eq!(lookup.get("Taxi").map(|a| a.mode_code), Some(12));

        let dup = r#"[["Taxi",{"main_mode":"Taxi","mode":"Black Cab","mode_code":12}],
                      ["Taxi",{"main_mode":"Taxi","mode":"Minicab","mode_code":13}]]"#;
        let err = serde_json::from_str::<AllocationLookup>(dup).unwrap_err();
        assert!(err.to_string().contains("duplicate lookup key Taxi"));
    }
}
