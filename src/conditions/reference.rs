//! The reference rule set for Heathrow ground-access surveys.
//!
//! 109 conditions. 53 are live predicates; the rest are disabled but keep
//! their ids because the priority lookup and the output schema are keyed by
//! id. Notation in the rule docs: L/S/T are the last, second-last and
//! third-last legs, O is the origin class.

use super::set::{ConditionSet, Disabled, DisabledReason, FnRule, Predicate};
use super::types::{ConditionId, RuleInput};
use crate::error::RuleError;
use crate::record::OriginClass::{self, Airport, Ldn, NonLdn};
use crate::vocabulary::labels::*;

type Outcome = Result<bool, RuleError>;

const HEATHROW: &str = "LHR";

fn is_short_stay(label: &str) -> bool {
    SHORT_STAY.contains(&label)
}

fn is_long_stay(label: &str) -> bool {
    LONG_STAY.contains(&label)
}

fn is_kiss_and_fly(label: &str) -> bool {
    label == DRIVEN_AWAY || label == CHAUFFEUR
}

fn is_airport_rail_link(label: &str) -> bool {
    matches!(label, HEATHROW_EXPRESS | STANSTED_EXPRESS | GATWICK_EXPRESS)
}

/// Public-transport labels that, as the second-last leg of a non-London
/// trip, mean the car leg is only the last mile.
fn is_feeder(i: &RuleInput<'_>, label: &str, with_stansted: bool) -> bool {
    let v = i.vocab;
    v.national_coach.contains(label)
        || v.tube.contains(label)
        || v.local_bus.contains(label)
        || v.national_rail.contains(label)
        || matches!(
            label,
            AIRPORT_COACH | LONDON_BUS | BUS_COACH_UNKNOWN | HEATHROW_EXPRESS | ELIZABETH_LINE
                | GATWICK_EXPRESS
        )
        || (with_stansted && label == STANSTED_EXPRESS)
}

/// London origins always pass; non-London origins pass unless `excluded`.
fn london_or_unless(i: &RuleInput<'_>, excluded: impl FnOnce() -> bool) -> Outcome {
    Ok(match i.origin()? {
        Ldn => true,
        NonLdn => !excluded(),
        Airport => false,
    })
}

fn from(i: &RuleInput<'_>, origin: OriginClass) -> Outcome {
    i.origin_is(origin)
}

// ---- Coach, courtesy and taxi ----

/// L = Charter coach, or a non-London charter coach feeding anything but HEX.
fn c1(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == CHARTER_COACH
        || (i.second_last() == CHARTER_COACH
            && i.last() != HEATHROW_EXPRESS
            && from(i, NonLdn)?))
}

/// Single-leg airport-to-airport coach from an airport.
fn c2(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == AIRPORT_COACH
        && i.second_last() == NO_MODE
        && (i.is_airport_district() || from(i, Airport)?))
}

fn c3(i: &RuleInput<'_>) -> Outcome {
    let v = i.vocab;
    if matches!(i.second_last(), CHARTER_COACH) || is_airport_rail_link(i.second_last()) {
        return Ok(false);
    }
    Ok(v.hotel_bus.contains(i.last())
        || (v.minicab.contains(i.last())
            && v.hotel_bus.contains(i.second_last())
            && from(i, NonLdn)?))
}

fn c4(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == TAXI && i.second_last() != HEATHROW_EXPRESS && from(i, Ldn)?)
}

/// Single-leg taxi from outside London (London taxis are condition 4).
fn c5(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == TAXI
        && i.second_last() == NO_MODE
        && i.third_last() == NO_MODE
        && !from(i, Ldn)?)
}

fn c6(i: &RuleInput<'_>) -> Outcome {
    Ok(i.vocab.minicab.contains(i.last())
        && i.second_last() != HEATHROW_EXPRESS
        && from(i, Ldn)?)
}

/// Single-leg minicab from outside London (London minicabs are condition 6).
fn c7(i: &RuleInput<'_>) -> Outcome {
    Ok(i.vocab.minicab.contains(i.last())
        && i.second_last() == NO_MODE
        && i.third_last() == NO_MODE
        && !from(i, Ldn)?)
}

fn c8(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == AIRLINE_COURTESY_CAR)
}

// ---- Private car and rental ----

/// Short-stay parking on a short segment.
fn c9(i: &RuleInput<'_>) -> Outcome {
    if !is_short_stay(i.last()) || i.segment_id()? >= 3 {
        return Ok(false);
    }
    london_or_unless(i, || is_feeder(i, i.second_last(), true))
}

fn c10(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == RENTAL_SHORT_TERM)
}

fn c11(i: &RuleInput<'_>) -> Outcome {
    if !is_long_stay(i.last()) {
        return Ok(false);
    }
    london_or_unless(i, || is_feeder(i, i.second_last(), false))
}

fn c12(i: &RuleInput<'_>) -> Outcome {
    if i.last() != RENTAL_COURTESY_BUS {
        return Ok(false);
    }
    let v = i.vocab;
    london_or_unless(i, || {
        v.national_coach.contains(i.second_last()) || v.national_rail.contains(i.second_last())
    })
}

/// Kiss-and-fly: dropped off by car or chauffeur.
fn c13(i: &RuleInput<'_>) -> Outcome {
    if !is_kiss_and_fly(i.last()) {
        return Ok(false);
    }
    let v = i.vocab;
    let s = i.second_last();
    Ok(match i.origin()? {
        Ldn => true,
        NonLdn => {
            !(v.national_coach.contains(s)
                || v.local_bus.contains(s)
                || v.tube.contains(s)
                || v.national_rail.contains(s)
                || matches!(
                    s,
                    CHARTER_COACH
                        | AIRPORT_COACH
                        | LONDON_BUS
                        | BUS_COACH_UNKNOWN
                        | HEATHROW_EXPRESS
                        | ELIZABETH_LINE
                ))
        }
        Airport => s == NO_MODE && i.third_last() == NO_MODE,
    })
}

/// Short-stay parking regardless of segment.
fn c14(i: &RuleInput<'_>) -> Outcome {
    if !is_short_stay(i.last()) {
        return Ok(false);
    }
    london_or_unless(i, || is_feeder(i, i.second_last(), true))
}

/// Heathrow Express as last or second-last leg (absorbs 31 and 72).
fn c15(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == HEATHROW_EXPRESS || i.second_last() == HEATHROW_EXPRESS)
}

// ---- Rail and bus ----

fn c17(i: &RuleInput<'_>) -> Outcome {
    let v = i.vocab;
    Ok(i.last() == RAILAIR_BUS && (v.is_rail(i.second_last()) || v.is_rail(i.third_last())))
}

fn c18(i: &RuleInput<'_>) -> Outcome {
    Ok(i.vocab.tube.contains(i.last())
        && i.second_last() != HEATHROW_EXPRESS
        && from(i, Ldn)?
        && i.airport_is(HEATHROW)?)
}

fn c19(i: &RuleInput<'_>) -> Outcome {
    Ok(i.vocab.tube.contains(i.last())
        && !matches!(i.second_last(), CHARTER_COACH | AIRPORT_COACH | HEATHROW_EXPRESS)
        && from(i, NonLdn)?
        && i.airport_is(HEATHROW)?)
}

fn c23(i: &RuleInput<'_>) -> Outcome {
    Ok(i.vocab.national_coach.contains(i.last())
        && (i.second_last() != HEATHROW_EXPRESS || from(i, Ldn)?))
}

fn c24(i: &RuleInput<'_>) -> Outcome {
    let v = i.vocab;
    Ok(i.last() == RAILAIR_BUS && !v.is_rail(i.second_last()) && !v.is_rail(i.third_last()))
}

/// Tube as the last leg after a coach, on a non-London Heathrow trip.
///
/// Departs from the legacy rule list, where a nested membership test kept
/// this condition from ever firing.
fn c25(i: &RuleInput<'_>) -> Outcome {
    let v = i.vocab;
    let t = i.third_last();
    let third_ok = v.national_coach.contains(t)
        || v.local_bus.contains(t)
        || v.national_rail.contains(t)
        || v.minicab.contains(t)
        || matches!(
            t,
            AIRPORT_COACH | BUS_COACH_UNKNOWN | NO_MODE | DRIVEN_AWAY | CHAUFFEUR | RAILAIR_BUS
        );
    Ok(v.tube.contains(i.last())
        && v.is_any_coach(i.second_last())
        && third_ok
        && from(i, NonLdn)?
        && i.airport_is(HEATHROW)?)
}

fn c27(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == AIRPORT_COACH && i.second_last() != NO_MODE && !from(i, Airport)?)
}

fn c29(i: &RuleInput<'_>) -> Outcome {
    let v = i.vocab;
    if !v.is_any_local_bus(i.last()) {
        return Ok(false);
    }
    let s = i.second_last();
    Ok(match i.origin()? {
        NonLdn => {
            !v.national_rail.contains(s)
                && !is_airport_rail_link(s)
                && !v.national_rail.contains(i.third_last())
        }
        Ldn => !is_airport_rail_link(s),
        Airport => false,
    })
}

/// Minor and unspecified modes, unless fed by an airport rail link.
fn c30(i: &RuleInput<'_>) -> Outcome {
    let l = i.last();
    let minor = matches!(l, BOAT | WALK | CYCLE | MOTORCYCLE | OTHER) || i.vocab.unspecified.contains(l);
    let s = i.second_last();
    Ok(minor && !is_airport_rail_link(s) && s != ELIZABETH_LINE)
}

fn c32(i: &RuleInput<'_>) -> Outcome {
    if i.last() != BUS_COACH_UNKNOWN {
        return Ok(false);
    }
    let v = i.vocab;
    Ok(match i.origin()? {
        Ldn => true,
        NonLdn => {
            i.second_last() != CHARTER_COACH
                && !v.national_rail.contains(i.second_last())
                && !v.national_rail.contains(i.third_last())
        }
        Airport => false,
    })
}

// ---- Rail feeding a car leg ----

fn c34(i: &RuleInput<'_>) -> Outcome {
    Ok(is_kiss_and_fly(i.last())
        && i.vocab.tube.contains(i.second_last())
        && from(i, NonLdn)?
        && i.airport_is(HEATHROW)?)
}

fn c36(i: &RuleInput<'_>) -> Outcome {
    let s = i.second_last();
    Ok(is_kiss_and_fly(i.last())
        && (i.vocab.national_rail.contains(s) || s == AIRPORT_COACH || s == BUS_COACH_UNKNOWN)
        && from(i, NonLdn)?)
}

fn c37(i: &RuleInput<'_>) -> Outcome {
    Ok(is_kiss_and_fly(i.last())
        && i.vocab.is_any_local_bus(i.second_last())
        && from(i, NonLdn)?)
}

fn c42(i: &RuleInput<'_>) -> Outcome {
    Ok(is_short_stay(i.last()) && i.vocab.tube.contains(i.second_last()) && from(i, NonLdn)?)
}

fn c44(i: &RuleInput<'_>) -> Outcome {
    Ok(is_short_stay(i.last()) && i.vocab.is_any_coach(i.second_last()) && from(i, NonLdn)?)
}

fn c46(i: &RuleInput<'_>) -> Outcome {
    Ok(is_short_stay(i.last()) && i.vocab.is_any_local_bus(i.second_last()) && from(i, NonLdn)?)
}

fn c49(i: &RuleInput<'_>) -> Outcome {
    Ok(is_long_stay(i.last())
        && i.vocab.tube.contains(i.second_last())
        && from(i, NonLdn)?
        && i.airport_is(HEATHROW)?)
}

/// Long stay after a coach. The London bus label stands where the unknown
/// operator label would be expected; that follows the legacy rule list.
fn c51(i: &RuleInput<'_>) -> Outcome {
    let s = i.second_last();
    Ok(is_long_stay(i.last())
        && (i.vocab.national_coach.contains(s) || s == AIRPORT_COACH || s == LONDON_BUS)
        && from(i, NonLdn)?)
}

fn c52(i: &RuleInput<'_>) -> Outcome {
    Ok(is_long_stay(i.last()) && i.vocab.is_any_local_bus(i.second_last()) && from(i, NonLdn)?)
}

// ---- Non-London taxi and minicab ----

fn c57(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == TAXI
        && !matches!(i.second_last(), HEATHROW_EXPRESS | RAILAIR_BUS)
        && from(i, NonLdn)?)
}

fn c58(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == TAXI && is_kiss_and_fly(i.second_last()) && from(i, NonLdn)?)
}

fn c59(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == TAXI && i.second_last() == HOTEL_CAR_PARK_BUS && from(i, NonLdn)?)
}

fn c61(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == TAXI && i.vocab.is_any_coach(i.second_last()) && from(i, NonLdn)?)
}

fn c62(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == TAXI && i.vocab.is_any_local_bus(i.second_last()) && from(i, NonLdn)?)
}

fn c65(i: &RuleInput<'_>) -> Outcome {
    Ok(i.vocab.minicab.contains(i.last())
        && !matches!(i.second_last(), HEATHROW_EXPRESS | RAILAIR_BUS)
        && from(i, NonLdn)?)
}

fn c67(i: &RuleInput<'_>) -> Outcome {
    Ok(i.vocab.minicab.contains(i.last())
        && matches!(i.second_last(), HOTEL_CAR_PARK_BUS | PRIVATE_LONG_TERM_BUS)
        && from(i, NonLdn)?)
}

fn c68(i: &RuleInput<'_>) -> Outcome {
    Ok(i.vocab.minicab.contains(i.last())
        && matches!(i.second_last(), RENTAL_SHORT_TERM | RENTAL_COURTESY_BUS)
        && i.third_last() == NO_MODE
        && from(i, NonLdn)?)
}

fn c69(i: &RuleInput<'_>) -> Outcome {
    Ok(i.vocab.minicab.contains(i.last())
        && i.vocab.is_any_coach(i.second_last())
        && from(i, NonLdn)?)
}

fn c70(i: &RuleInput<'_>) -> Outcome {
    Ok(i.vocab.minicab.contains(i.last())
        && i.vocab.is_any_local_bus(i.second_last())
        && from(i, NonLdn)?)
}

fn c86(i: &RuleInput<'_>) -> Outcome {
    Ok(i.vocab.tube.contains(i.last())
        && i.vocab.national_coach.contains(i.third_last())
        && from(i, NonLdn)?)
}

// ---- Unspecified modes ----

fn c99(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == CAR_UNSPECIFIED && i.segment_id()? > 2)
}

fn c100(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == CAR_UNSPECIFIED && i.segment_id()? < 2)
}

fn c103(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == TAXI_UNSPECIFIED)
}

fn c104(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == BUS_UNSPECIFIED)
}

fn c105(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == CAR_UNSPECIFIED && i.segment_id()? < 3)
}

fn c106(i: &RuleInput<'_>) -> Outcome {
    let l = i.last();
    Ok((i.vocab.national_rail.contains(l) || l == RAIL_UNSPECIFIED) && i.airport_is(HEATHROW)?)
}

// ---- Elizabeth Line ----

fn c108(i: &RuleInput<'_>) -> Outcome {
    Ok(i.last() == ELIZABETH_LINE && i.second_last() != HEATHROW_EXPRESS)
}

/// Car, taxi or tube onward from the Elizabeth Line.
///
/// Departs from the legacy rule list, where two labels were fused into one
/// string: Taxi and `Private car - type of car park unknown` now match.
fn c109(i: &RuleInput<'_>) -> Outcome {
    let l = i.last();
    let v = i.vocab;
    let onward = v.minicab.contains(l)
        || v.tube.contains(l)
        || is_kiss_and_fly(l)
        || is_short_stay(l)
        || is_long_stay(l)
        || l == TAXI;
    Ok(onward && i.second_last() == ELIZABETH_LINE && from(i, NonLdn)?)
}

const ENABLED: &[(u16, &str, Predicate)] = &[
    (1, "charter_coach", c1),
    (2, "airport_coach_from_airport", c2),
    (3, "hotel_courtesy_bus", c3),
    (4, "taxi_london", c4),
    (5, "taxi_single_leg", c5),
    (6, "minicab_london", c6),
    (7, "minicab_single_leg", c7),
    (8, "airline_courtesy_car", c8),
    (9, "short_stay_short_segment", c9),
    (10, "rental_short_term", c10),
    (11, "long_stay_parking", c11),
    (12, "rental_courtesy_bus", c12),
    (13, "kiss_and_fly", c13),
    (14, "short_stay_parking", c14),
    (15, "heathrow_express", c15),
    (17, "railair_after_rail", c17),
    (18, "tube_london", c18),
    (19, "tube_non_london", c19),
    (23, "national_coach", c23),
    (24, "railair_direct", c24),
    (25, "tube_after_coach", c25),
    (27, "airport_coach_connecting", c27),
    (29, "local_bus", c29),
    (30, "minor_or_unspecified", c30),
    (32, "bus_coach_unknown", c32),
    (34, "kiss_and_fly_after_tube", c34),
    (36, "kiss_and_fly_after_rail_or_coach", c36),
    (37, "kiss_and_fly_after_bus", c37),
    (42, "short_stay_after_tube", c42),
    (44, "short_stay_after_coach", c44),
    (46, "short_stay_after_bus", c46),
    (49, "long_stay_after_tube", c49),
    (51, "long_stay_after_coach", c51),
    (52, "long_stay_after_bus", c52),
    (57, "taxi_non_london", c57),
    (58, "taxi_after_car", c58),
    (59, "taxi_after_hotel_parking", c59),
    (61, "taxi_after_coach", c61),
    (62, "taxi_after_bus", c62),
    (65, "minicab_non_london", c65),
    (67, "minicab_after_parking", c67),
    (68, "minicab_after_rental", c68),
    (69, "minicab_after_coach", c69),
    (70, "minicab_after_bus", c70),
    (86, "tube_after_national_coach", c86),
    (99, "car_unspecified_long_segment", c99),
    (100, "car_unspecified_first_segment", c100),
    (103, "taxi_unspecified", c103),
    (104, "bus_unspecified", c104),
    (105, "car_unspecified_short_segment", c105),
    (106, "national_rail", c106),
    (108, "elizabeth_line", c108),
    (109, "onward_from_elizabeth_line", c109),
];

const RETIRED: &[u16] = &[
    20, 21, 22, 26, 28, 33, 35, 39, 40, 41, 43, 45, 47, 48, 50, 53, 54, 55, 56, 60, 63, 64, 66,
    71, 75, 76, 77, 78, 87, 101, 102, 107,
];

fn disabled() -> Vec<Disabled> {
    use DisabledReason::*;

    let mut out = vec![
        Disabled::new(16, OtherAirport("LGW")),
        Disabled::new(31, MergedInto(ConditionId(15))),
        Disabled::new(38, OtherAirport("STN")),
        Disabled::new(72, MergedInto(ConditionId(15))),
        Disabled::new(73, OtherAirport("LGW")),
        Disabled::new(74, OtherAirport("STN")),
        Disabled::new(79, DiscontinuedMode),
        Disabled::new(98, NeedsTripDuration),
    ];
    // Former Heathrow Connect services.
    out.extend((80..=85).map(|id| Disabled::new(id, DiscontinuedMode)));
    out.extend((88..=97).map(|id| Disabled::new(id, NotApplicable)));
    out.extend(RETIRED.iter().map(|&id| Disabled::new(id, Retired)));
    out
}

impl ConditionSet {
    /// Builds the 109-condition reference rule set.
    pub fn reference() -> Self {
        let mut set = ConditionSet::new();
        for &(id, name, predicate) in ENABLED {
            set = set.with_rule(FnRule::new(id, name, predicate));
        }
        for rule in disabled() {
            set = set.with_rule(rule);
        }
        set
    }
}
