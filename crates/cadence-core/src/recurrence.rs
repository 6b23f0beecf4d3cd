use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::{CoreError, ParseError};
use crate::rule::{parse_rule, RecurrenceRule};

/// Configuration for the next-occurrence search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How far past the later of anchor and reference the search may run
    /// before the rule is declared unsatisfiable.
    pub horizon_years: u32,
}

/// Most dates a single preview returns.
pub const MAX_PREVIEW_COUNT: usize = 1000;

impl Default for EngineConfig {
    fn default() -> Self {
        Self { horizon_years: 10 }
    }
}

/// RecurrenceEngine: computes when a repeating task next falls due.
///
/// The engine holds nothing but its configuration, so one value can be shared
/// freely between threads or built per call.
///
/// Every evaluation:
/// 1. Parses the anchor date and the rule text
/// 2. Rejects rules that can never match
/// 3. Advances from the anchor, at least one step, until the candidate is
///    strictly after the reference date
#[derive(Debug, Clone, Copy, Default)]
pub struct RecurrenceEngine {
    config: EngineConfig,
}

impl RecurrenceEngine {
    /// Creates an engine. A horizon below one year is raised to one year.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config: EngineConfig {
                horizon_years: config.horizon_years.max(1),
            },
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes the next due date from raw task fields.
    ///
    /// # Arguments
    /// * `reference` - The result must fall strictly after this date
    /// * `anchor` - The task's current date, `DD.MM.YYYY`
    /// * `rule` - Repeat rule text; must not be empty
    ///
    /// # Errors
    /// * `CoreError::InvalidDate` - `anchor` is not a `DD.MM.YYYY` date
    /// * `CoreError::Parse` - `rule` is empty or malformed
    /// * `CoreError::Validation` - `rule` can never produce a date
    /// * `CoreError::Unsatisfiable` - no date found within the horizon
    pub fn next_date(
        &self,
        reference: CalendarDate,
        anchor: &str,
        rule: &str,
    ) -> Result<CalendarDate, CoreError> {
        let anchor = CalendarDate::parse(anchor)?;
        let rule = parse_rule(rule)?;
        self.next_after(reference, anchor, &rule)
    }

    /// Same as [`next_date`](Self::next_date), formatted as `DD.MM.YYYY`.
    pub fn next_date_text(
        &self,
        reference: CalendarDate,
        anchor: &str,
        rule: &str,
    ) -> Result<String, CoreError> {
        self.next_date(reference, anchor, rule)
            .map(|date| date.to_string())
    }

    /// Finds the first date the rule selects after stepping from `anchor`
    /// that is strictly later than `reference`.
    pub fn next_after(
        &self,
        reference: CalendarDate,
        anchor: CalendarDate,
        rule: &RecurrenceRule,
    ) -> Result<CalendarDate, CoreError> {
        rule.validate()?;

        let search = Search {
            reference,
            horizon: reference.max(anchor).add_years(self.config.horizon_years),
        };

        let found = match rule {
            RecurrenceRule::None => {
                return Err(ParseError::UnsupportedFormat(String::new()).into());
            }
            RecurrenceRule::Daily(interval) => {
                let days = u64::from(interval.get());
                search.run(anchor, |d| d.add_days(days), |_| true)
            }
            RecurrenceRule::Yearly => search.run(anchor, CalendarDate::add_year, |_| true),
            RecurrenceRule::Weekly(weekdays) => {
                search.run(anchor, CalendarDate::succ, |d| weekdays.contains(d.weekday()))
            }
            RecurrenceRule::Monthly(monthly) => {
                search.run(anchor, CalendarDate::succ, |d| monthly.matches(d))
            }
        };

        match found {
            Some((date, steps)) => {
                tracing::debug!(
                    rule = %rule,
                    %anchor,
                    %reference,
                    steps,
                    next = %date,
                    "computed next due date"
                );
                Ok(date)
            }
            None => {
                tracing::debug!(
                    rule = %rule,
                    %anchor,
                    %reference,
                    horizon_years = self.config.horizon_years,
                    "search horizon reached"
                );
                Err(CoreError::Unsatisfiable {
                    rule: rule.to_string(),
                    horizon_years: self.config.horizon_years,
                })
            }
        }
    }

    /// Lists up to `count` upcoming due dates, at most [`MAX_PREVIEW_COUNT`].
    ///
    /// The first entry is [`next_date`](Self::next_date); each following entry
    /// re-evaluates with the previous result as the reference, keeping the
    /// original anchor, so the list is strictly increasing.
    pub fn preview(
        &self,
        reference: CalendarDate,
        anchor: &str,
        rule: &str,
        count: usize,
    ) -> Result<Vec<CalendarDate>, CoreError> {
        let anchor = CalendarDate::parse(anchor)?;
        let rule = parse_rule(rule)?;
        if rule.is_none() {
            return Err(ParseError::UnsupportedFormat(String::new()).into());
        }

        let count = count.min(MAX_PREVIEW_COUNT);
        let mut dates = Vec::with_capacity(count);
        let mut reference = reference;
        for _ in 0..count {
            let next = self.next_after(reference, anchor, &rule)?;
            dates.push(next);
            reference = next;
        }
        Ok(dates)
    }
}

/// Bounds of one next-occurrence search.
struct Search {
    reference: CalendarDate,
    /// `None` when the horizon lies past the end of the calendar.
    horizon: Option<CalendarDate>,
}

impl Search {
    /// Steps from `anchor` until `accept` holds for a date after the
    /// reference. Returns the date and the number of steps taken, or `None`
    /// once the horizon or the end of the calendar is passed.
    fn run(
        &self,
        anchor: CalendarDate,
        step: impl Fn(&CalendarDate) -> Option<CalendarDate>,
        accept: impl Fn(&CalendarDate) -> bool,
    ) -> Option<(CalendarDate, u64)> {
        let mut candidate = anchor;
        let mut steps = 0u64;
        loop {
            candidate = step(&candidate)?;
            steps += 1;
            if self.horizon.is_some_and(|limit| candidate > limit) {
                return None;
            }
            if candidate > self.reference && accept(&candidate) {
                return Some((candidate, steps));
            }
        }
    }
}

/// [`RecurrenceEngine::next_date`] with the default configuration.
pub fn next_date(
    reference: CalendarDate,
    anchor: &str,
    rule: &str,
) -> Result<CalendarDate, CoreError> {
    RecurrenceEngine::with_defaults().next_date(reference, anchor, rule)
}

/// [`RecurrenceEngine::next_date_text`] with the default configuration.
pub fn next_date_text(
    reference: CalendarDate,
    anchor: &str,
    rule: &str,
) -> Result<String, CoreError> {
    RecurrenceEngine::with_defaults().next_date_text(reference, anchor, rule)
}
