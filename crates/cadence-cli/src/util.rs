use anyhow::{Context as _, Result};
use cadence_core::date::CalendarDate;
use cadence_core::recurrence::RecurrenceEngine;
use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::parser::{parse_reference_date, resolve_today};

/// Everything a command needs besides its own arguments.
pub struct Session {
    pub engine: RecurrenceEngine,
    pub config: Config,
    pub today: CalendarDate,
    pub json: bool,
}

impl Session {
    pub fn new(config: Config, json: bool) -> Result<Self> {
        let today = resolve_today(config.today.as_deref(), Local::now())
            .context("configured 'today' is not a date")?;
        tracing::debug!(%today, horizon_years = config.engine.horizon_years, "session ready");
        Ok(Self {
            engine: RecurrenceEngine::new(config.engine),
            config,
            today,
            json,
        })
    }

    /// The `--now` value when given, else today. Relative phrases count
    /// from today, so a pinned today pins them too.
    pub fn reference(&self, now: Option<&str>) -> Result<CalendarDate> {
        match now {
            Some(text) => Ok(parse_reference_date(text, self.today_start())?),
            None => Ok(self.today),
        }
    }

    fn today_start(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.today.as_naive().and_time(NaiveTime::default()))
    }

    /// Prints `value` as JSON or `text` as plain output.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}
