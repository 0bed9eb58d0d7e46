use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use super::errors::DomainError;

/// A hotel stay as a half-open interval of calendar days:
/// check-in is included, check-out is excluded. Adjacent stays may touch
/// (one guest leaves the morning another arrives) without overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

// Deserialization goes through `new` so an inverted or zero-night range can
// never enter through the wire either.
impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            check_in: NaiveDate,
            check_out: NaiveDate,
        }
        let raw = Raw::deserialize(deserializer)?;
        DateRange::new(raw.check_in, raw.check_out).map_err(serde::de::Error::custom)
    }
}

impl DateRange {
    /// Build a range, rejecting empty or inverted stays up front so no other
    /// component ever sees a zero-night range.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, DomainError> {
        if check_in >= check_out {
            return Err(DomainError::InvalidRange);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn num_nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Iterate the nights of the stay: every date in [check_in, check_out).
    pub fn nights(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let check_out = self.check_out;
        self.check_in.iter_days().take_while(move |d| *d < check_out)
    }

    /// Half-open overlap: [a,b) and [c,d) overlap iff a < d && c < b.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

/// Whether a night carries the weekend surcharge. The hotel's local calendar
/// decides, not the guest's timezone: Friday and Saturday nights.
pub fn is_weekend_night(night: NaiveDate) -> bool {
    matches!(night.weekday(), Weekday::Fri | Weekday::Sat)
}
