use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The one textual form dates take in and out of the engine.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Width of a formatted date, `DD.MM.YYYY`.
const DATE_WIDTH: usize = 10;

/// A whole calendar day with no time-of-day or timezone attached.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Builds a date from its parts, returning `None` for impossible days.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses the fixed `DD.MM.YYYY` form. Unpadded or otherwise
    /// variable-width input is rejected.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidDate(text.to_string());

        let bytes = text.as_bytes();
        let well_formed = bytes.len() == DATE_WIDTH
            && bytes.iter().enumerate().all(|(i, b)| match i {
                2 | 5 => *b == b'.',
                _ => b.is_ascii_digit(),
            });
        if !well_formed {
            return Err(invalid());
        }

        NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Number of days in this date's month.
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.0.year(), self.0.month())
    }

    pub fn add_days(&self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Adds one calendar year. A day that does not exist in the target
    /// month (Feb 29 in a non-leap year) overflows into the next month.
    pub fn add_year(&self) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(self.0.year().checked_add(1)?, self.0.month(), 1)?;
        first
            .checked_add_days(Days::new(u64::from(self.0.day() - 1)))
            .map(Self)
    }

    pub fn add_years(&self, years: u32) -> Option<Self> {
        self.0
            .checked_add_months(Months::new(years.checked_mul(12)?))
            .map(Self)
    }

    /// Signed distance in days from `other` to `self`.
    pub fn days_since(&self, other: &CalendarDate) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Length of a month, taken from chrono's calendar: the last day number
/// for which a date exists. Returns 0 for a month outside `1..=12` or a year
/// outside chrono's range.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
        .unwrap_or(0)
}
