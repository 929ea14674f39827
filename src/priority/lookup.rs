//! Mode priority lookup and conflict resolution.

use super::types::{ModeAllocation, Resolution, TieBreaker};
use crate::conditions::{ConditionId, ConditionSet};
use crate::error::{MapperError, Result};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Condition id → output mode and priority.
///
/// Entries keep insertion order, which [`TieBreaker::LookupOrder`] relies on.
/// With the `serde` feature the table (de)serializes as a list of
/// `(id, allocation)` pairs; duplicate ids are rejected on load.
///
/// # Examples
///
/// ```
/// use lasam_modemap::conditions::ConditionId;
/// use lasam_modemap::priority::{ModeAllocation, ModePriorityLookup, TieBreaker};
///
/// let lookup = ModePriorityLookup::from_entries([
///     (ConditionId(9), ModeAllocation::new("Private Car", "Short Stay", 3, 2)),
///     (ConditionId(14), ModeAllocation::new("Private Car", "Short Stay", 3, 5)),
/// ])
/// .unwrap();
///
/// let res = lookup
///     .resolve([ConditionId(9), ConditionId(14)], TieBreaker::LowestId)
///     .unwrap();
/// assert_eq!(res.winner, ConditionId(9));
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        try_from = "Vec<(ConditionId, ModeAllocation)>",
        into = "Vec<(ConditionId, ModeAllocation)>"
    )
)]
pub struct ModePriorityLookup {
    entries: Vec<(ConditionId, ModeAllocation)>,
    index: HashMap<ConditionId, usize>,
}

impl ModePriorityLookup {
    /// Creates an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a lookup from `(id, allocation)` pairs.
    ///
    /// # Errors
    /// [`MapperError::DuplicateLookupKey`] if an id appears twice.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ConditionId, ModeAllocation)>,
    {
        let mut lookup = Self::new();
        for (id, allocation) in entries {
            lookup.insert(id, allocation)?;
        }
        Ok(lookup)
    }

    /// Appends an entry.
    ///
    /// # Errors
    /// [`MapperError::DuplicateLookupKey`] if `id` is already present.
    pub fn insert(&mut self, id: ConditionId, allocation: ModeAllocation) -> Result<()> {
        if self.index.contains_key(&id) {
            return Err(MapperError::DuplicateLookupKey {
                key: id.to_string(),
            });
        }
        self.index.insert(id, self.entries.len());
        self.entries.push((id, allocation));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the allocation for `id`.
    pub fn get(&self, id: ConditionId) -> Option<&ModeAllocation> {
        self.index.get(&id).map(|&pos| &self.entries[pos].1)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ConditionId, &ModeAllocation)> {
        self.entries.iter().map(|(id, a)| (*id, a))
    }

    /// Enabled conditions of `set` that have no lookup entry.
    ///
    /// A record won by one of these ids ends up with empty mode fields.
    pub fn missing_ids(&self, set: &ConditionSet) -> Vec<ConditionId> {
        set.enabled_ids()
            .into_iter()
            .filter(|id| !self.index.contains_key(id))
            .collect()
    }

    /// Picks the fired id with the lowest priority value.
    ///
    /// Ids without a lookup entry never beat a ranked id. When none of the
    /// fired ids is ranked, the smallest id wins with `priority: None`.
    /// Returns `None` only if `fired` is empty.
    pub fn resolve<I>(&self, fired: I, tie_breaker: TieBreaker) -> Option<Resolution>
    where
        I: IntoIterator<Item = ConditionId>,
    {
        // (id, priority, lookup position)
        let mut best: Option<(ConditionId, u32, usize)> = None;
        let mut tied = false;
        let mut unranked: Option<ConditionId> = None;

        for id in fired {
            let Some(&pos) = self.index.get(&id) else {
                unranked = Some(unranked.map_or(id, |u| u.min(id)));
                continue;
            };
            let priority = self.entries[pos].1.priority;

            match best {
                None => best = Some((id, priority, pos)),
                Some((best_id, best_priority, best_pos)) => {
                    if priority < best_priority {
                        best = Some((id, priority, pos));
                        tied = false;
                    } else if priority == best_priority {
                        tied = true;
                        let wins = match tie_breaker {
                            TieBreaker::LowestId => id < best_id,
                            TieBreaker::LookupOrder => pos < best_pos,
                        };
                        if wins {
                            best = Some((id, priority, pos));
                        }
                    }
                }
            }
        }

        match best {
            Some((winner, priority, _)) => Some(Resolution {
                winner,
                priority: Some(priority),
                tied,
            }),
            None => unranked.map(|winner| Resolution {
                winner,
                priority: None,
                tied: false,
            }),
        }
    }
}

impl TryFrom<Vec<(ConditionId, ModeAllocation)>> for ModePriorityLookup {
    type Error = MapperError;

    fn try_from(entries: Vec<(ConditionId, ModeAllocation)>) -> Result<Self> {
        Self::from_entries(entries)
    }
}

impl From<ModePriorityLookup> for Vec<(ConditionId, ModeAllocation)> {
    fn from(lookup: ModePriorityLookup) -> Self {
        lookup.entries
    }
}
