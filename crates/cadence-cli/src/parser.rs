use cadence_core::date::CalendarDate;
use chrono::{DateTime, TimeZone};
use chrono_english::{parse_date_string, Dialect};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
#[error("invalid date '{0}': expected DD.MM.YYYY or a phrase like 'tomorrow'")]
pub struct DateInputError(String);

/// Reads a reference date: the fixed `DD.MM.YYYY` form first, then a
/// natural-language phrase relative to `now`.
pub fn parse_reference_date<Tz>(
    input: &str,
    now: DateTime<Tz>,
) -> Result<CalendarDate, DateInputError>
where
    Tz: TimeZone,
    Tz::Offset: Copy,
{
    if let Ok(date) = CalendarDate::parse(input) {
        return Ok(date);
    }
    parse_date_string(input, now, Dialect::Uk)
        .map(|dt| CalendarDate::from(dt.date_naive()))
        .map_err(|_| DateInputError(input.to_string()))
}

/// Resolves "today": an explicit override when given, else the local date.
pub fn resolve_today<Tz>(
    overridden: Option<&str>,
    now: DateTime<Tz>,
) -> Result<CalendarDate, DateInputError>
where
    Tz: TimeZone,
    Tz::Offset: Copy,
{
    match overridden {
        Some(text) => parse_reference_date(text, now),
        None => Ok(CalendarDate::from(now.date_naive())),
    }
}
