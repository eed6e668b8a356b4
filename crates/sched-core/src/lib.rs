//! Core domain logic for the personal calendar.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: named occurrences on a date with a half-open time interval
//! - Storage: an ordered store that rejects conflicting insertions and
//!   answers half-open date-range queries
//! - Period state: which window of time is shown, at what granularity,
//!   and how it moves under navigation commands
//! - Import: expanding the weekly-recurring schedule text format into
//!   individual events

pub mod event;
pub mod import;
pub mod interval;
mod notify;
pub mod period;
pub mod planner;
pub mod store;
pub mod types;

pub use event::{Event, format_date};
pub use import::{ImportError, parse_line, parse_schedule, read_schedule};
pub use interval::{Relation, TimeInterval};
pub use notify::Subscribers;
pub use period::{Nav, PeriodState, ViewMode};
pub use planner::{ImportOutcome, Planner};
pub use store::EventStore;
pub use types::{ClockTime, EventName, ValidationError};
