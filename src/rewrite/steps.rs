//! The eleven rewrite steps.
//!
//! Each step receives the previous step's label (`None` = unresolved) and
//! the record context, and returns a label. Steps are total: every input
//! maps to exactly one output.

use super::flags::RouteFlags;
use crate::legs::DerivedLegs;
use crate::record::{OriginClass, SurveyRecord};
use crate::vocabulary::labels::*;
use crate::vocabulary::Vocabulary;

/// Label for trips with a rental leg and no rail link.
pub const RENTALS: &str = "Rentals";
pub const CAR_UNSPECIFIED_UK: &str = "Car Unspecified UK";
pub const CAR_UNSPECIFIED_FOREIGN: &str = "Car Unspecified Foreign";

/// Car and taxi modes that yield to a public-transport second-last leg.
const CAR_TAXI_MODES: [&str; 6] = [DRIVEN_AWAY, UBER, MINICAB, TAXI, CHAUFFEUR, TAXI_UNSPECIFIED];

/// Second-last legs that take precedence over a final car or taxi leg,
/// alongside the vocabulary's local bus class.
const PUBLIC_TRANSPORT_FEEDERS: [&str; 13] = [
    "National Rail",
    "London Underground",
    LONDON_BUS,
    BUS_UNSPECIFIED,
    CHARTER_COACH,
    NATIONAL_EXPRESS_COACH,
    OTHER_REGIONAL_COACH,
    BUS_COACH_UNKNOWN,
    RAILAIR_BUS,
    ELIZABETH_LINE,
    TUBE,
    LHR_LTN_COACH,
    AIRPORT_COACH,
];

/// Modes that, found on an older leg, make a RailAir leg a genuine rail link.
const RAILAIR_FEEDERS: [&str; 5] = [
    TUBE,
    ELIZABETH_LINE,
    TFL_RAIL,
    NATIONAL_RAILWAYS,
    RAIL_UNSPECIFIED,
];

/// Context shared by every step of one record.
#[derive(Debug, Clone, Copy)]
pub struct StepInput<'a> {
    pub record: &'a SurveyRecord,
    pub legs: &'a DerivedLegs,
    pub flags: RouteFlags,
    pub vocab: &'a Vocabulary,
}

impl<'a> StepInput<'a> {
    fn last(&self) -> &'a str {
        &self.legs.last
    }

    fn second_last(&self) -> &'a str {
        &self.legs.second_last
    }

    fn third_last(&self) -> &'a str {
        &self.legs.third_last
    }
}

/// Step function signature.
pub type StepFn = fn(&StepInput<'_>, Option<String>) -> Option<String>;

/// A named step of the chain.
#[derive(Clone, Copy)]
pub struct RewriteStep {
    pub name: &'static str,
    apply: StepFn,
}

impl RewriteStep {
    pub fn apply(&self, input: &StepInput<'_>, prev: Option<String>) -> Option<String> {
        (self.apply)(input, prev)
    }
}

impl std::fmt::Debug for RewriteStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewriteStep").field("name", &self.name).finish()
    }
}

/// The chain, in application order.
pub const STEPS: [RewriteStep; 11] = [
    RewriteStep { name: "collapse_other", apply: collapse_other },
    RewriteStep { name: "collapse_cycle_walk", apply: collapse_cycle_walk },
    RewriteStep { name: "tube_disambiguation", apply: tube_disambiguation },
    RewriteStep { name: "heathrow_express_only", apply: heathrow_express_only },
    RewriteStep { name: "heathrow_express_and_elizabeth", apply: heathrow_express_and_elizabeth },
    RewriteStep { name: "rentals", apply: rentals },
    RewriteStep { name: "public_transport_feeder", apply: public_transport_feeder },
    RewriteStep { name: "hotel_bus_after_charter", apply: hotel_bus_after_charter },
    RewriteStep { name: "car_unspecified_country", apply: car_unspecified_country },
    RewriteStep { name: "airport_coach", apply: airport_coach },
    RewriteStep { name: "railair", apply: railair },
];

/// Runs the full chain. Returns the final label and, if `keep_trace`, each
/// step's output in order.
pub fn run_chain(
    input: &StepInput<'_>,
    keep_trace: bool,
) -> (Option<String>, Option<Vec<Option<String>>>) {
    let mut trace = keep_trace.then(|| Vec::with_capacity(STEPS.len()));
    let mut label = None;
    for step in &STEPS {
        label = step.apply(input, label);
        if let Some(t) = trace.as_mut() {
            t.push(label.clone());
        }
    }
    (label, trace)
}

fn is(label: &Option<String>, expected: &str) -> bool {
    label.as_deref() == Some(expected)
}

fn other_or_empty(label: &str) -> bool {
    label == OTHER || label == NO_MODE
}

fn cycle_or_walk(label: &str) -> bool {
    label == CYCLE || label == WALK
}

fn collapse_other(i: &StepInput<'_>, _prev: Option<String>) -> Option<String> {
    let label = if i.last() != OTHER {
        i.last()
    } else if !other_or_empty(i.second_last()) {
        i.second_last()
    } else if !other_or_empty(i.third_last()) {
        i.third_last()
    } else {
        OTHER
    };
    Some(label.to_string())
}

fn collapse_cycle_walk(i: &StepInput<'_>, prev: Option<String>) -> Option<String> {
    match prev.as_deref() {
        Some(l) if cycle_or_walk(l) => {
            let label = if cycle_or_walk(i.second_last()) {
                if i.third_last() == NO_MODE {
                    OTHER
                } else {
                    i.third_last()
                }
            } else if i.second_last() == NO_MODE {
                OTHER
            } else {
                i.second_last()
            };
            Some(label.to_string())
        }
        _ => prev,
    }
}

fn tube_disambiguation(i: &StepInput<'_>, prev: Option<String>) -> Option<String> {
    if is(&prev, TUBE) {
        if i.flags.heathrow_express {
            return Some(HEATHROW_EXPRESS.to_string());
        }
        if i.second_last() == ELIZABETH_LINE {
            return Some(ELIZABETH_LINE.to_string());
        }
    }
    prev
}

fn heathrow_express_only(i: &StepInput<'_>, prev: Option<String>) -> Option<String> {
    if i.flags.heathrow_express && !i.flags.elizabeth_line {
        Some(HEATHROW_EXPRESS.to_string())
    } else {
        prev
    }
}

fn heathrow_express_and_elizabeth(i: &StepInput<'_>, prev: Option<String>) -> Option<String> {
    if !(i.flags.heathrow_express && i.flags.elizabeth_line) {
        return prev;
    }
    // A missing terminal counts as not 5.
    if i.record.terminal == Some(5) {
        Some(ELIZABETH_LINE.to_string())
    } else {
        Some(HEATHROW_EXPRESS.to_string())
    }
}

fn rentals(i: &StepInput<'_>, prev: Option<String>) -> Option<String> {
    let f = i.flags;
    if f.rental && !(f.heathrow_express || f.elizabeth_line || f.tube) {
        Some(RENTALS.to_string())
    } else {
        prev
    }
}

fn public_transport_feeder(i: &StepInput<'_>, prev: Option<String>) -> Option<String> {
    let car_or_taxi = prev
        .as_deref()
        .is_some_and(|l| CAR_TAXI_MODES.contains(&l));
    let s = i.second_last();
    if car_or_taxi && (PUBLIC_TRANSPORT_FEEDERS.contains(&s) || i.vocab.local_bus.contains(s)) {
        Some(i.second_last().to_string())
    } else {
        prev
    }
}

fn hotel_bus_after_charter(i: &StepInput<'_>, prev: Option<String>) -> Option<String> {
    if i.last() == HOTEL_BUS && i.second_last() == CHARTER_COACH {
        Some(CHARTER_COACH.to_string())
    } else {
        prev
    }
}

fn car_unspecified_country(i: &StepInput<'_>, prev: Option<String>) -> Option<String> {
    if !is(&prev, CAR_UNSPECIFIED) {
        return prev;
    }
    match i.record.country.as_deref() {
        Some("UK") => Some(CAR_UNSPECIFIED_UK.to_string()),
        Some("Foreign") => Some(CAR_UNSPECIFIED_FOREIGN.to_string()),
        _ => None,
    }
}

fn airport_coach(i: &StepInput<'_>, prev: Option<String>) -> Option<String> {
    if !is(&prev, AIRPORT_COACH) {
        return prev;
    }
    let from_airport =
        i.record.origin == Some(OriginClass::Airport) || i.record.is_airport_district();
    if from_airport {
        prev
    } else {
        Some(NATIONAL_EXPRESS_COACH.to_string())
    }
}

fn railair(i: &StepInput<'_>, prev: Option<String>) -> Option<String> {
    let legs = i.legs.as_array();
    let Some(pos) = legs.iter().position(|l| l.contains(RAILAIR_BUS)) else {
        return prev;
    };
    let fed_by_rail = legs[pos + 1..]
        .iter()
        .any(|older| RAILAIR_FEEDERS.iter().any(|m| older.contains(m)));
    if fed_by_rail {
        Some(RAILAIR_BUS.to_string())
    } else {
        Some(OTHER_REGIONAL_COACH.to_string())
    }
}
