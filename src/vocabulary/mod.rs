//! Mode vocabulary.
//!
//! Groups raw leg labels into named mode classes that condition predicates
//! test membership against. The vocabulary is a plain value handed to the
//! engine; [`Vocabulary::default`] yields the reference classes.
//!
//! Membership is an exact, case-sensitive string match.

pub mod labels;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named set of raw mode labels treated as equivalent by predicates.
///
/// # Examples
///
/// ```
/// use lasam_modemap::vocabulary::ModeClass;
///
/// let minicab = ModeClass::new("minicab", ["Minicab", "Uber"]);
/// assert!(minicab.contains("Uber"));
/// assert!(!minicab.contains("uber"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModeClass {
    name: String,
    labels: Vec<String>,
}

impl ModeClass {
    /// Creates a class from a name and its member labels.
    pub fn new<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member labels in declaration order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns `true` if `label` belongs to this class.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// The full set of mode classes used by the condition rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vocabulary {
    pub minicab: ModeClass,
    pub hotel_bus: ModeClass,
    pub national_coach: ModeClass,
    pub local_bus: ModeClass,
    pub tube: ModeClass,
    pub national_rail: ModeClass,
    pub unspecified: ModeClass,
}

impl Default for Vocabulary {
    fn default() -> Self {
        use labels::*;

        Self {
            minicab: ModeClass::new("minicab", [MINICAB, UBER]),
            hotel_bus: ModeClass::new("hotel_bus", [COURTESY_BUS, HOTEL_BUS]),
            national_coach: ModeClass::new(
                "national_coach",
                [LHR_LTN_COACH, NATIONAL_EXPRESS_COACH, OTHER_REGIONAL_COACH],
            ),
            local_bus: ModeClass::new(
                "local_bus",
                ["Local bus companies", "Luton airport parkway DART"],
            ),
            tube: ModeClass::new("tube", ["Docklands Light Railway", "Tram", TUBE]),
            national_rail: ModeClass::new(
                "national_rail",
                [
                    NATIONAL_RAILWAYS,
                    "National railways (MAN only) - changed trains",
                    "National railways (MAN only) - not changed trains",
                ],
            ),
            unspecified: ModeClass::new(
                "unspecified",
                [
                    CAR_UNSPECIFIED,
                    BUS_UNSPECIFIED,
                    TAXI_UNSPECIFIED,
                    RAIL_UNSPECIFIED,
                ],
            ),
        }
    }
}

impl Vocabulary {
    /// Returns all classes in a fixed order.
    pub fn classes(&self) -> [&ModeClass; 7] {
        [
            &self.minicab,
            &self.hotel_bus,
            &self.national_coach,
            &self.local_bus,
            &self.tube,
            &self.national_rail,
            &self.unspecified,
        ]
    }

    /// Tube or national rail.
    pub fn is_rail(&self, label: &str) -> bool {
        self.tube.contains(label) || self.national_rail.contains(label)
    }

    /// Local bus or London bus.
    pub fn is_any_local_bus(&self, label: &str) -> bool {
        label == labels::LONDON_BUS || self.local_bus.contains(label)
    }

    /// National coach, airport-to-airport coach or an unknown bus/coach operator.
    pub fn is_any_coach(&self, label: &str) -> bool {
        self.national_coach.contains(label)
            || label == labels::AIRPORT_COACH
            || label == labels::BUS_COACH_UNKNOWN
    }
}
