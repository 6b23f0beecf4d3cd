//! Date policies applied around the engine when tasks are created, edited
//! and completed. Storage stays with the caller; these only decide which
//! date to persist.

use serde::Serialize;

use crate::date::CalendarDate;
use crate::error::CoreError;
use crate::recurrence::RecurrenceEngine;
use crate::rule::parse_rule;

/// What to do with a task once it is marked done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "date", rename_all = "lowercase")]
pub enum Completion {
    /// A one-off task is finished and can be removed.
    Remove,
    /// A repeating task moves to its next due date.
    Reschedule(CalendarDate),
}

fn date_or_today(today: CalendarDate, text: &str) -> Result<CalendarDate, CoreError> {
    if text.is_empty() {
        Ok(today)
    } else {
        CalendarDate::parse(text)
    }
}

/// The date a new task is stored with.
///
/// An empty date means today. A date in the past is moved to today for a
/// one-off task, or to the next occurrence after today for a repeating one.
/// The rule is checked even when the date needs no adjustment.
pub fn plan_task_date(
    engine: &RecurrenceEngine,
    today: CalendarDate,
    date: &str,
    rule: &str,
) -> Result<CalendarDate, CoreError> {
    let planned = date_or_today(today, date)?;
    let parsed = parse_rule(rule)?;
    parsed.validate()?;

    if planned >= today {
        return Ok(planned);
    }
    if parsed.is_none() {
        tracing::debug!(%planned, %today, "moved one-off task from the past to today");
        return Ok(today);
    }

    let next = engine.next_after(today, planned, &parsed)?;
    tracing::debug!(%planned, %next, rule, "moved repeating task from the past");
    Ok(next)
}

/// Checks an edited task and returns the date to store.
///
/// The rule, when present, is evaluated once against the task's own date so
/// that a rule which parses but cannot produce a date is refused up front.
pub fn check_task(
    engine: &RecurrenceEngine,
    today: CalendarDate,
    date: &str,
    rule: &str,
) -> Result<CalendarDate, CoreError> {
    let checked = date_or_today(today, date)?;
    let parsed = parse_rule(rule)?;
    if !parsed.is_none() {
        engine.next_after(checked, checked, &parsed)?;
    }
    Ok(checked)
}

/// Decides what happens to a task marked done today.
///
/// A task without a rule is removed whatever its date holds; the date is
/// only parsed when there is something to reschedule.
pub fn complete_task(
    engine: &RecurrenceEngine,
    today: CalendarDate,
    date: &str,
    rule: &str,
) -> Result<Completion, CoreError> {
    let parsed = parse_rule(rule)?;
    if parsed.is_none() {
        return Ok(Completion::Remove);
    }
    let anchor = CalendarDate::parse(date)?;
    engine
        .next_after(today, anchor, &parsed)
        .map(Completion::Reschedule)
}
