//! Canonical raw mode labels.
//!
//! Labels are matched case-sensitively and must already be canonical
//! upstream. Spellings (including `Chauffer`) follow the survey instrument.

/// Empty-leg sentinel.
pub const NO_MODE: &str = "No Mode";

pub const TAXI: &str = "Taxi";
pub const MINICAB: &str = "Minicab";
pub const UBER: &str = "Uber";
pub const CHAUFFEUR: &str = "Chauffer";
pub const AIRLINE_COURTESY_CAR: &str = "Airline courtesy car";

pub const CHARTER_COACH: &str = "Charter coach";
pub const AIRPORT_COACH: &str = "Airport to airport coach service";
pub const LONDON_BUS: &str = "London bus companies";
pub const BUS_COACH_UNKNOWN: &str = "Bus/coach company unknown";
pub const HOTEL_BUS: &str = "Hotel bus";
pub const COURTESY_BUS: &str = "Courtesy bus (travel agent)";
pub const NATIONAL_EXPRESS_COACH: &str = "National Express Coach";
pub const LHR_LTN_COACH: &str = "LHR-LTN Coach Service";
pub const OTHER_REGIONAL_COACH: &str = "Other National/Regional coach service";
pub const RAILAIR_BUS: &str = "RailAir Bus (Reading/Woking/Feltham)";

pub const HEATHROW_EXPRESS: &str = "Heathrow Express";
pub const ELIZABETH_LINE: &str = "Elizabeth Line";
pub const STANSTED_EXPRESS: &str = "Stansted Express";
pub const GATWICK_EXPRESS: &str = "Gatwick Express";
pub const TFL_RAIL: &str = "TfL Rail (formerly Heathrow Connect)";
pub const TUBE: &str = "Tube/Metro/Subway";
pub const NATIONAL_RAILWAYS: &str = "National railways";

pub const DRIVEN_AWAY: &str = "Private car - driven away";
pub const SHORT_TERM_CAR_PARK: &str = "Private car - short term car park";
pub const SHORT_TERM_MEET_GREET: &str = "Private car - short term car park - meet/greet";
pub const HOTEL_CAR_PARK_BUS: &str = "Private car - hotel car park bus";
pub const PRIVATE_LONG_TERM_BUS: &str = "Private car - private long term car park bus";
pub const RENTAL_SHORT_TERM: &str = "Rental car - short term car park";
pub const RENTAL_COURTESY_BUS: &str = "Rental car - hire car courtesy bus";
/// Prefix shared by every rental-car label.
pub const RENTAL_PREFIX: &str = "Rental car";

pub const BOAT: &str = "Boat";
pub const WALK: &str = "Walk (where only mode)";
pub const CYCLE: &str = "Cycle";
pub const MOTORCYCLE: &str = "Motorcycle";
pub const OTHER: &str = "Other";

pub const CAR_UNSPECIFIED: &str = "Car Unspecified";
pub const BUS_UNSPECIFIED: &str = "Bus Unspecified";
pub const TAXI_UNSPECIFIED: &str = "Taxi/Minicab Unspecified";
pub const RAIL_UNSPECIFIED: &str = "Rail Unspecified";

/// Short-stay car park labels.
pub const SHORT_STAY: [&str; 2] = [SHORT_TERM_CAR_PARK, SHORT_TERM_MEET_GREET];

/// Long-stay, valet and car-park-bus labels.
pub const LONG_STAY: [&str; 9] = [
    "Private car - valet service - Off airport",
    "Private car - valet service - On airport",
    "Private car - airport long term car park bus",
    PRIVATE_LONG_TERM_BUS,
    "Private car - business car park",
    "Private car - mid stay car park bus",
    "Private car - staff car park bus",
    HOTEL_CAR_PARK_BUS,
    "Private car - type of car park unknown",
];

/// District that is treated as an airport district despite its name.
pub const CRAWLEY_DISTRICT: &str = "Crawley District (SE)";
