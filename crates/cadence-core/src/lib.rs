//! # Cadence Core Library
//!
//! The recurrence engine of the Cadence task scheduler. Given a reference
//! date ("today"), a task's current date and its repeat rule, it computes the
//! next calendar day the task falls due.
//!
//! ## Core Modules
//!
//! - [`date`]: Whole-day dates in the fixed `DD.MM.YYYY` form
//! - [`rule`]: The repeat-rule grammar and its typed representation
//! - [`recurrence`]: Next-occurrence search and previews
//! - [`schedule`]: Date policies for creating, editing and completing tasks
//! - [`error`]: Error types with user-facing messages
//!
//! ## Example Usage
//!
//! ```rust
//! use cadence_core::{date::CalendarDate, recurrence::next_date_text};
//!
//! let today = CalendarDate::parse("23.07.2024")?;
//! let next = next_date_text(today, "23.07.2024", "d 3")?;
//! assert_eq!(next, "26.07.2024");
//! # Ok::<(), cadence_core::error::CoreError>(())
//! ```

pub mod date;
pub mod error;
pub mod recurrence;
pub mod rule;
pub mod schedule;

pub use date::CalendarDate;
pub use error::{CoreError, ParseError};
pub use recurrence::{next_date, next_date_text, EngineConfig, RecurrenceEngine, MAX_PREVIEW_COUNT};
pub use rule::{parse_rule, RecurrenceRule};
