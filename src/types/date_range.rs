//! Inclusive calendar ranges used to scope a pipeline run.

use chrono::{Days, NaiveDate};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Request date format understood by the NDAWN table endpoint.
pub const REQUEST_DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive range of calendar days.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ndawn_gdd::DateRange;
///
/// let start = NaiveDate::from_ymd_opt(2017, 5, 15).unwrap();
/// let end = NaiveDate::from_ymd_opt(2017, 5, 17).unwrap();
/// let range = DateRange::new(start, end).unwrap();
/// assert_eq!(range.iter_days().count(), 3);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns `None` when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, both ends included.
    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Iterates over every day from `start` to `end` inclusive.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let mut next = Some(self.start);
        std::iter::from_fn(move || {
            let current = next?;
            next = current
                .checked_add_days(Days::new(1))
                .filter(|day| *day <= self.end);
            Some(current)
        })
    }

    /// Compact `YYYY-MM-DDYYYY-MM-DD` tag used in export file names.
    pub fn file_tag(&self) -> String {
        format!(
            "{}{}",
            self.start.format(REQUEST_DATE_FORMAT),
            self.end.format(REQUEST_DATE_FORMAT)
        )
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(REQUEST_DATE_FORMAT),
            self.end.format(REQUEST_DATE_FORMAT)
        )
    }
}
