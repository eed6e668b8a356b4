//! Calendar events: a named occurrence on a date with a time interval.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::interval::{Relation, TimeInterval};
use crate::types::EventName;

/// A scheduled event.
///
/// Events are immutable after construction and order by
/// `(date, interval)`, where the interval part is the three-way
/// relation of [`TimeInterval::relation`] rather than a total order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    name: EventName,
    date: NaiveDate,
    interval: TimeInterval,
}

impl Event {
    /// Placeholder substituted with the full day-of-week name.
    pub const DAY_OF_WEEK: &'static str = "FORMAT/DAYOFWEEK";
    /// Placeholder substituted with the full month name.
    pub const MONTH: &'static str = "FORMAT/MONTH";
    /// Placeholder substituted with the zero-padded day of the month.
    pub const DAY_OF_MONTH: &'static str = "FORMAT/DAYOFMONTH";
    /// Placeholder substituted with the four-digit year.
    pub const YEAR: &'static str = "FORMAT/YEAR";

    /// Creates an event.
    pub const fn new(name: EventName, date: NaiveDate, interval: TimeInterval) -> Self {
        Self {
            name,
            date,
            interval,
        }
    }

    /// Returns the event name.
    pub const fn name(&self) -> &EventName {
        &self.name
    }

    /// Returns the calendar date the event falls on.
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the event's time interval.
    pub const fn interval(&self) -> TimeInterval {
        self.interval
    }

    /// Compares this event with another.
    ///
    /// Events on different dates order by date; events on the same date
    /// take the interval relation, so `Overlaps` marks a scheduling
    /// conflict rather than equality.
    pub fn relation(&self, other: &Self) -> Relation {
        match self.date.cmp(&other.date) {
            Ordering::Less => Relation::Before,
            Ordering::Greater => Relation::After,
            Ordering::Equal => self.interval.relation(other.interval),
        }
    }

    /// Renders this event's date through a placeholder template.
    ///
    /// See [`format_date`] for the placeholder contract.
    pub fn format_date(&self, template: &str) -> String {
        format_date(self.date, template)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.interval, self.name)
    }
}

/// Substitutes the four date placeholders into a template string.
///
/// The recognized placeholders are [`Event::DAY_OF_WEEK`],
/// [`Event::MONTH`], [`Event::DAY_OF_MONTH`] (zero padded), and
/// [`Event::YEAR`]. Any other text passes through untouched.
pub fn format_date(date: NaiveDate, template: &str) -> String {
    template
        .replace(Event::DAY_OF_WEEK, &date.format("%A").to_string())
        .replace(Event::MONTH, &date.format("%B").to_string())
        .replace(Event::DAY_OF_MONTH, &date.format("%d").to_string())
        .replace(Event::YEAR, &date.format("%Y").to_string())
}
