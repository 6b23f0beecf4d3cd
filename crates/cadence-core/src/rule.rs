//! The repeat-rule grammar.
//!
//! A rule is one of:
//!
//! - `d N` - every N days, 1 <= N <= 400
//! - `y` - every year on the same month and day
//! - `w 1,3` - on the listed ISO weekdays (1 = Monday, 7 = Sunday)
//! - `m 1,15,-1 [1,6]` - on the listed days of the month (`-1` last day,
//!   `-2` second-to-last day), optionally only in the listed months
//!
//! The empty string is the rule of a task that does not repeat.

use chrono::Weekday;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::date::{days_in_month, CalendarDate};
use crate::error::{CoreError, ParseError};

pub const MAX_DAY_INTERVAL: u32 = 400;

/// A leap year, so that month lengths are the longest each month can be.
const LEAP_YEAR: i32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub enum RecurrenceRule {
    None,
    Daily(DayInterval),
    Yearly,
    Weekly(WeekdaySet),
    Monthly(MonthlyRule),
}

/// Parses rule text. The empty string yields [`RecurrenceRule::None`].
pub fn parse_rule(text: &str) -> Result<RecurrenceRule, ParseError> {
    if text.is_empty() {
        return Ok(RecurrenceRule::None);
    }

    let mut tokens = text.split_whitespace();
    let kind = tokens
        .next()
        .ok_or_else(|| ParseError::UnsupportedFormat(text.to_string()))?;
    let args: Vec<&str> = tokens.collect();

    let rule = match kind {
        "d" => {
            let [arg] = exact_args::<1>("d", &args)?;
            RecurrenceRule::Daily(DayInterval::new(parse_number(arg)?)?)
        }
        "y" => {
            exact_args::<0>("y", &args)?;
            RecurrenceRule::Yearly
        }
        "w" => {
            let [arg] = exact_args::<1>("w", &args)?;
            RecurrenceRule::Weekly(WeekdaySet::new(parse_list(arg)?)?)
        }
        "m" => {
            let (days, months) = match args.as_slice() {
                [] => return Err(ParseError::MissingArgument("m")),
                [days] => (parse_list(days)?, Vec::new()),
                [days, months] => (parse_list(days)?, parse_list(months)?),
                [_, _, extra, ..] => return Err(ParseError::UnexpectedArgument(extra.to_string())),
            };
            RecurrenceRule::Monthly(MonthlyRule::new(days, months)?)
        }
        _ => return Err(ParseError::UnsupportedFormat(text.to_string())),
    };

    tracing::trace!(text, rule = %rule, "parsed repeat rule");
    Ok(rule)
}

fn exact_args<'a, const N: usize>(
    kind: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], ParseError> {
    match <[&'a str; N]>::try_from(args) {
        Ok(exact) => Ok(exact),
        Err(_) if args.len() < N => Err(ParseError::MissingArgument(kind)),
        Err(_) => Err(ParseError::UnexpectedArgument(args[N].to_string())),
    }
}

fn parse_number(fragment: &str) -> Result<i64, ParseError> {
    fragment
        .parse()
        .map_err(|_| ParseError::InvalidNumber(fragment.to_string()))
}

fn parse_list(list: &str) -> Result<Vec<i64>, ParseError> {
    list.split(',')
        .map(|element| {
            if element.is_empty() {
                Err(ParseError::EmptyElement(list.to_string()))
            } else {
                parse_number(element)
            }
        })
        .collect()
}

impl RecurrenceRule {
    pub fn is_none(&self) -> bool {
        matches!(self, RecurrenceRule::None)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RecurrenceRule::None => "none",
            RecurrenceRule::Daily(_) => "daily",
            RecurrenceRule::Yearly => "yearly",
            RecurrenceRule::Weekly(_) => "weekly",
            RecurrenceRule::Monthly(_) => "monthly",
        }
    }

    /// Rejects rules that parse but can never produce a date.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            RecurrenceRule::Monthly(monthly) => monthly.validate(),
            _ => Ok(()),
        }
    }

    /// A one-line English description of the rule.
    pub fn describe(&self) -> String {
        match self {
            RecurrenceRule::None => "does not repeat".to_string(),
            RecurrenceRule::Daily(interval) if interval.get() == 1 => "every day".to_string(),
            RecurrenceRule::Daily(interval) => format!("every {} days", interval.get()),
            RecurrenceRule::Yearly => "every year".to_string(),
            RecurrenceRule::Weekly(weekdays) => {
                let names: Vec<String> = weekdays.iter().map(|d| format!("{d:?}")).collect();
                format!("every week on {}", names.join(", "))
            }
            RecurrenceRule::Monthly(monthly) => {
                let days: Vec<String> = monthly
                    .days()
                    .map(|day| match day {
                        MonthDay::Day(d) => format!("day {d}"),
                        MonthDay::Last => "the last day".to_string(),
                        MonthDay::SecondToLast => "the second-to-last day".to_string(),
                    })
                    .collect();
                let months = if monthly.months.is_empty() {
                    "every month".to_string()
                } else {
                    format!("months {}", join(monthly.months.iter()))
                };
                format!("{} of {}", days.join(", "), months)
            }
        }
    }
}

impl FromStr for RecurrenceRule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rule(s)
    }
}

/// Canonical text: lists sorted and deduplicated.
impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::None => Ok(()),
            RecurrenceRule::Daily(interval) => write!(f, "d {}", interval.get()),
            RecurrenceRule::Yearly => write!(f, "y"),
            RecurrenceRule::Weekly(weekdays) => {
                write!(f, "w {}", join(weekdays.iter().map(|d| d.number_from_monday())))
            }
            RecurrenceRule::Monthly(monthly) => {
                write!(f, "m {}", join(monthly.days().map(MonthDay::number)))?;
                if !monthly.months.is_empty() {
                    write!(f, " {}", join(monthly.months.iter()))?;
                }
                Ok(())
            }
        }
    }
}

fn join<T: fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join(",")
}

/// Step of a daily rule, always within `1..=400`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayInterval(u32);

impl DayInterval {
    pub fn new(days: i64) -> Result<Self, ParseError> {
        match u32::try_from(days) {
            Ok(n) if (1..=MAX_DAY_INTERVAL).contains(&n) => Ok(Self(n)),
            _ => Err(ParseError::OutOfRange {
                kind: "day interval",
                value: days,
                allowed: "1 to 400",
            }),
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

/// Non-empty set of weekdays, one bit per day starting at Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// Accepts ISO weekday numbers; duplicates collapse.
    pub fn new(numbers: impl IntoIterator<Item = i64>) -> Result<Self, ParseError> {
        let mut bits = 0u8;
        for n in numbers {
            if !(1..=7).contains(&n) {
                return Err(ParseError::OutOfRange {
                    kind: "weekday",
                    value: n,
                    allowed: "1 to 7",
                });
            }
            bits |= 1 << (n - 1);
        }
        if bits == 0 {
            return Err(ParseError::MissingArgument("w"));
        }
        Ok(Self(bits))
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .filter(|day| self.contains(*day))
    }
}

/// A day selector inside a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MonthDay {
    Day(u32),
    Last,
    SecondToLast,
}

impl MonthDay {
    pub fn new(n: i64) -> Result<Self, ParseError> {
        match n {
            1..=31 => Ok(MonthDay::Day(n as u32)),
            -1 => Ok(MonthDay::Last),
            -2 => Ok(MonthDay::SecondToLast),
            _ => Err(ParseError::OutOfRange {
                kind: "day of month",
                value: n,
                allowed: "1 to 31, -1 or -2",
            }),
        }
    }

    /// The concrete day this selector names in a month of `month_len` days,
    /// or `None` when the month is too short.
    pub fn resolve(&self, month_len: u32) -> Option<u32> {
        match *self {
            MonthDay::Day(d) if d <= month_len => Some(d),
            MonthDay::Day(_) => None,
            MonthDay::Last => Some(month_len).filter(|d| *d > 0),
            MonthDay::SecondToLast => month_len.checked_sub(1).filter(|d| *d > 0),
        }
    }

    pub fn number(self) -> i64 {
        match self {
            MonthDay::Day(d) => i64::from(d),
            MonthDay::Last => -1,
            MonthDay::SecondToLast => -2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRule {
    days: BTreeSet<MonthDay>,
    /// Empty means every month.
    months: BTreeSet<u32>,
}

impl MonthlyRule {
    pub fn new(
        days: impl IntoIterator<Item = i64>,
        months: impl IntoIterator<Item = i64>,
    ) -> Result<Self, ParseError> {
        let days = days
            .into_iter()
            .map(MonthDay::new)
            .collect::<Result<BTreeSet<_>, _>>()?;
        if days.is_empty() {
            return Err(ParseError::MissingArgument("m"));
        }

        let months = months
            .into_iter()
            .map(|m| match m {
                1..=12 => Ok(m as u32),
                _ => Err(ParseError::OutOfRange {
                    kind: "month",
                    value: m,
                    allowed: "1 to 12",
                }),
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Self { days, months })
    }

    pub fn days(&self) -> impl Iterator<Item = MonthDay> + '_ {
        self.days.iter().copied()
    }

    pub fn months(&self) -> impl Iterator<Item = u32> + '_ {
        self.months.iter().copied()
    }

    pub fn applies_to_month(&self, month: u32) -> bool {
        self.months.is_empty() || self.months.contains(&month)
    }

    pub fn matches(&self, date: &CalendarDate) -> bool {
        if !self.applies_to_month(date.month()) {
            return false;
        }
        let month_len = date.days_in_month();
        self.days
            .iter()
            .any(|selector| selector.resolve(month_len) == Some(date.day()))
    }

    fn validate(&self) -> Result<(), CoreError> {
        let reachable = self.days.iter().any(|selector| match selector {
            MonthDay::Day(d) => {
                self.months.is_empty()
                    || self
                        .months
                        .iter()
                        .any(|m| *d <= days_in_month(LEAP_YEAR, *m))
            }
            MonthDay::Last | MonthDay::SecondToLast => true,
        });

        if reachable {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "days {} never occur in months {}",
                join(self.days().map(MonthDay::number)),
                join(self.months.iter()),
            )))
        }
    }
}
