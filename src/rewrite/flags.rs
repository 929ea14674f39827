//! Whole-route flags read from the raw legs.

use crate::record::SurveyRecord;
use crate::vocabulary::labels::{ELIZABETH_LINE, HEATHROW_EXPRESS, RENTAL_PREFIX};
use crate::vocabulary::Vocabulary;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which notable modes appear anywhere on a record's route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteFlags {
    pub heathrow_express: bool,
    pub elizabeth_line: bool,
    /// Any leg in the tube class.
    pub tube: bool,
    /// Any rental-car leg.
    pub rental: bool,
}

impl RouteFlags {
    /// Scans the three raw legs. Missing legs are ignored.
    pub fn from_record(record: &SurveyRecord, vocab: &Vocabulary) -> Self {
        let mut flags = Self::default();
        for leg in record.raw_legs().into_iter().flatten() {
            flags.heathrow_express |= leg == HEATHROW_EXPRESS;
            flags.elizabeth_line |= leg == ELIZABETH_LINE;
            flags.tube |= vocab.tube.contains(leg);
            flags.rental |= leg.starts_with(RENTAL_PREFIX);
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::labels::*;

    fn flags(a: &str, b: &str, c: &str) -> RouteFlags {
        let r = SurveyRecord::new(1).with_legs(a, b, c);
        RouteFlags::from_record(&r, &Vocabulary::default())
    }

    #[test]
    fn test_flags_any_position() {
        let f = flags(HEATHROW_EXPRESS, TAXI, NO_MODE);
        assert!(f.heathrow_express);
        assert!(!f.elizabeth_line);

        let f = flags(TAXI, NO_MODE, ELIZABETH_LINE);
        assert!(f.elizabeth_line);
    }

    #[test]
    fn test_tube_class() {
        assert!(flags("Tram", NO_MODE, NO_MODE).tube);
        assert!(flags(TAXI, TUBE, NO_MODE).tube);
        assert!(!flags(NATIONAL_RAILWAYS, NO_MODE, NO_MODE).tube);
    }

    #[test]
    fn test_rental_prefix() {
        assert!(flags(RENTAL_COURTESY_BUS, NO_MODE, NO_MODE).rental);
        assert!(!flags(SHORT_TERM_CAR_PARK, NO_MODE, NO_MODE).rental);
    }

    #[test]
    fn test_missing_legs() {
        let f = RouteFlags::from_record(&SurveyRecord::new(1), &Vocabulary::default());
        assert_eq!(f, RouteFlags::default());
    }
}
