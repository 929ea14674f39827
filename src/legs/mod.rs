//! Leg derivation.
//!
//! A survey record carries up to three raw leg labels, oldest first
//! (`mode_a`, `mode_b`, `mode_c`). Predicates never look at the raw legs;
//! they read the trip backwards from its final leg through [`DerivedLegs`].
//!
//! Missing legs, blank labels and the `"No Mode"` sentinel are equivalent.
//! The derivation
//! is deliberately asymmetric: a two-leg trip (C empty) has no third-to-last
//! leg even when A is populated.

use crate::vocabulary::labels::NO_MODE;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The last three legs of a trip, counted back from the final leg.
///
/// Every slot holds a label; empty slots hold `"No Mode"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DerivedLegs {
    pub last: String,
    pub second_last: String,
    pub third_last: String,
}

impl DerivedLegs {
    /// Returns `true` if no leg carries a mode.
    pub fn is_empty(&self) -> bool {
        self.last == NO_MODE && self.second_last == NO_MODE && self.third_last == NO_MODE
    }

    /// Returns the legs newest first.
    pub fn as_array(&self) -> [&str; 3] {
        [&self.last, &self.second_last, &self.third_last]
    }
}

/// Returns `true` if a raw leg is missing, blank or the sentinel.
pub fn is_empty_leg(leg: Option<&str>) -> bool {
    match leg {
        None => true,
        Some(s) => s == NO_MODE || s.trim().is_empty(),
    }
}

fn label(leg: Option<&str>) -> String {
    match leg {
        Some(s) if !is_empty_leg(leg) => s.to_string(),
        _ => NO_MODE.to_string(),
    }
}

/// Derives `last`, `second_last` and `third_last` from three raw legs.
///
/// # Examples
///
/// ```
/// use lasam_modemap::legs::derive_legs;
///
/// let legs = derive_legs(Some("Tube/Metro/Subway"), Some("Taxi"), None);
/// assert_eq!(legs.last, "Taxi");
/// assert_eq!(legs.second_last, "Tube/Metro/Subway");
/// assert_eq!(legs.third_last, "No Mode");
/// ```
pub fn derive_legs(
    mode_a: Option<&str>,
    mode_b: Option<&str>,
    mode_c: Option<&str>,
) -> DerivedLegs {
    let b_empty = is_empty_leg(mode_b);
    let c_empty = is_empty_leg(mode_c);

    if c_empty && b_empty {
        DerivedLegs {
            last: label(mode_a),
            second_last: NO_MODE.to_string(),
            third_last: NO_MODE.to_string(),
        }
    } else if c_empty {
        DerivedLegs {
            last: label(mode_b),
            second_last: label(mode_a),
            third_last: NO_MODE.to_string(),
        }
    } else {
        DerivedLegs {
            last: label(mode_c),
            second_last: label(mode_b),
            third_last: label(mode_a),
        }
    }
}
