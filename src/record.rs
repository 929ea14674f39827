//! Survey record input type.

use crate::error::RuleError;
use crate::legs::{derive_legs, DerivedLegs};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the respondent's trip started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OriginClass {
    /// Greater London.
    #[cfg_attr(feature = "serde", serde(rename = "LDN"))]
    Ldn,
    /// Outside London.
    #[cfg_attr(feature = "serde", serde(rename = "NonLDN"))]
    NonLdn,
    /// Another airport (connecting by ground transport).
    #[cfg_attr(feature = "serde", serde(rename = "AIRPORT"))]
    Airport,
}

impl OriginClass {
    /// Returns the survey text for this class.
    pub fn as_str(self) -> &'static str {
        match self {
            OriginClass::Ldn => "LDN",
            OriginClass::NonLdn => "NonLDN",
            OriginClass::Airport => "AIRPORT",
        }
    }
}

impl fmt::Display for OriginClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OriginClass {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LDN" => Ok(OriginClass::Ldn),
            "NonLDN" => Ok(OriginClass::NonLdn),
            "AIRPORT" => Ok(OriginClass::Airport),
            other => Err(RuleError::InvalidValue {
                field: "origin",
                value: other.to_string(),
            }),
        }
    }
}

/// One survey respondent trip, as supplied by the upstream cleaning step.
///
/// All contextual fields are optional; predicates that need a missing field
/// fail for that record only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurveyRecord {
    /// Caller-supplied row identifier, used for log context.
    pub id: u64,
    /// Oldest leg.
    pub mode_a: Option<String>,
    pub mode_b: Option<String>,
    /// Newest leg.
    pub mode_c: Option<String>,
    pub origin: Option<OriginClass>,
    pub district: Option<String>,
    pub terminal: Option<u8>,
    pub airport_prefix: Option<String>,
    pub country: Option<String>,
    pub segment_id: Option<i64>,
    /// Fallback label computed by the survey system.
    pub system_final_mode: Option<String>,
    /// Fallback code computed by the survey system.
    pub system_final_mode_code: Option<u32>,
}

impl SurveyRecord {
    /// Creates an empty record with the given id.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Sets the three raw legs, oldest first.
    pub fn with_legs(mut self, a: &str, b: &str, c: &str) -> Self {
        self.mode_a = Some(a.to_string());
        self.mode_b = Some(b.to_string());
        self.mode_c = Some(c.to_string());
        self
    }

    pub fn with_origin(mut self, origin: OriginClass) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn with_terminal(mut self, terminal: u8) -> Self {
        self.terminal = Some(terminal);
        self
    }

    pub fn with_airport(mut self, prefix: impl Into<String>) -> Self {
        self.airport_prefix = Some(prefix.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_segment(mut self, segment_id: i64) -> Self {
        self.segment_id = Some(segment_id);
        self
    }

    /// Sets the externally computed fallback mode and code.
    pub fn with_final_mode(mut self, mode: impl Into<String>, code: u32) -> Self {
        self.system_final_mode = Some(mode.into());
        self.system_final_mode_code = Some(code);
        self
    }

    /// Returns the raw legs, oldest first.
    pub fn raw_legs(&self) -> [Option<&str>; 3] {
        [
            self.mode_a.as_deref(),
            self.mode_b.as_deref(),
            self.mode_c.as_deref(),
        ]
    }

    /// Derives the last three legs of this trip.
    pub fn derived_legs(&self) -> DerivedLegs {
        derive_legs(
            self.mode_a.as_deref(),
            self.mode_b.as_deref(),
            self.mode_c.as_deref(),
        )
    }

    /// Returns `true` if the district names an airport (case-insensitive)
    /// or is Crawley, which hosts Gatwick.
    ///
    /// A missing district is not an airport district.
    pub fn is_airport_district(&self) -> bool {
        match self.district.as_deref() {
            Some(d) => {
                d.to_lowercase().contains("airport")
                    || d == crate::vocabulary::labels::CRAWLEY_DISTRICT
            }
            None => false,
        }
    }
}
