//! The period/view state machine.
//!
//! Tracks which half-open date window `[first_day, last_day)` is being
//! shown and at what granularity, and recomputes the window under
//! navigation commands. Weeks start on Sunday; month windows span
//! exactly one calendar month.

use std::fmt;

use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::notify::Subscribers;
use crate::types::ValidationError;

/// View granularity for the calendar display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// A single day.
    #[default]
    Day,
    /// A Sunday-aligned seven-day week.
    Week,
    /// One calendar month, starting on its first day.
    Month,
    /// An arbitrary caller-chosen window.
    Agenda,
}

impl ViewMode {
    /// String representation used in config files and CLI output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Agenda => "agenda",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ViewMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "agenda" => Ok(Self::Agenda),
            _ => Err(ValidationError::InvalidView {
                value: s.to_string(),
            }),
        }
    }
}

/// A navigation command over the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    /// Move one view unit into the past, preserving window length.
    Backward,
    /// Move one view unit into the future, preserving window length.
    Forward,
    /// Recompute the window so it contains the given date.
    ToDate(NaiveDate),
}

/// Current view granularity plus the display window it selects.
///
/// Invariant: `first_day < last_day` at all times. Created once at
/// startup and mutated only through [`PeriodState::set_view`] and
/// [`PeriodState::navigate`].
#[derive(Debug)]
pub struct PeriodState {
    view: ViewMode,
    first_day: NaiveDate,
    last_day: NaiveDate,
    subscribers: Subscribers,
}

impl PeriodState {
    /// Creates a state machine in Day view showing today.
    pub fn new() -> Self {
        Self::starting_at(Local::now().date_naive())
    }

    /// Creates a state machine in Day view showing the given date.
    pub fn starting_at(day: NaiveDate) -> Self {
        Self {
            view: ViewMode::Day,
            first_day: day,
            last_day: day + Duration::days(1),
            subscribers: Subscribers::new(),
        }
    }

    /// Returns the current view granularity.
    pub const fn view(&self) -> ViewMode {
        self.view
    }

    /// Returns the first day of the window (inclusive).
    pub const fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Returns the day after the last day of the window (exclusive).
    pub const fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// Returns the window length in days.
    pub fn window_days(&self) -> i64 {
        (self.last_day - self.first_day).num_days()
    }

    /// Registers a no-payload change callback.
    ///
    /// Subscribers run synchronously, in registration order, after
    /// every successful view change and after every navigation.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) {
        self.subscribers.subscribe(callback);
    }

    /// Switches the view granularity, recomputing the window.
    ///
    /// Day keeps `first_day` and shows that one day. Week realigns to
    /// the most recent Sunday on or before `first_day`. Month realigns
    /// to the first of `first_day`'s month and spans the whole month.
    /// Agenda takes the explicit `[from, to)` window and is the only
    /// view that cannot derive one itself: requesting it without a
    /// window is refused, returning `false` with the state intact and
    /// no notification sent.
    pub fn set_view(
        &mut self,
        view: ViewMode,
        agenda_window: Option<(NaiveDate, NaiveDate)>,
    ) -> bool {
        match view {
            ViewMode::Day => {
                let first = self.first_day;
                self.set_window(first, first + Duration::days(1));
            }
            ViewMode::Week => {
                let first = sunday_on_or_before(self.first_day);
                self.set_window(first, first + Duration::days(7));
            }
            ViewMode::Month => {
                let first = first_of_month(self.first_day);
                self.set_window(first, first + Months::new(1));
            }
            ViewMode::Agenda => {
                let Some((from, to)) = agenda_window else {
                    tracing::debug!("agenda view requested without a window, refusing");
                    return false;
                };
                debug_assert!(from < to, "agenda window must be non-empty");
                self.set_window(from, to);
            }
        }
        self.view = view;
        self.subscribers.notify();
        true
    }

    /// Applies a navigation command under the current view's rules.
    ///
    /// Subscribers are notified after every command, even when the
    /// resulting window is unchanged.
    pub fn navigate(&mut self, nav: Nav) {
        match nav {
            Nav::Backward => self.shift_backward(),
            Nav::Forward => self.shift_forward(),
            Nav::ToDate(date) => self.move_to(date),
        }
        self.subscribers.notify();
    }

    fn shift_forward(&mut self) {
        let (first, last) = (self.first_day, self.last_day);
        match self.view {
            ViewMode::Day => self.set_window(first + Duration::days(1), last + Duration::days(1)),
            ViewMode::Week => self.set_window(first + Duration::days(7), last + Duration::days(7)),
            // Calendar-month arithmetic, not a fixed day count: stepping
            // from Jan 31 lands on Feb 28/29.
            ViewMode::Month => self.set_window(first + Months::new(1), last + Months::new(1)),
            ViewMode::Agenda => {
                let step = Duration::days(self.window_days());
                self.set_window(first + step, last + step);
            }
        }
    }

    fn shift_backward(&mut self) {
        let (first, last) = (self.first_day, self.last_day);
        match self.view {
            ViewMode::Day => self.set_window(first - Duration::days(1), last - Duration::days(1)),
            ViewMode::Week => self.set_window(first - Duration::days(7), last - Duration::days(7)),
            ViewMode::Month => self.set_window(first - Months::new(1), last - Months::new(1)),
            ViewMode::Agenda => {
                let step = Duration::days(self.window_days());
                self.set_window(first - step, last - step);
            }
        }
    }

    fn move_to(&mut self, date: NaiveDate) {
        match self.view {
            ViewMode::Day => self.set_window(date, date + Duration::days(1)),
            ViewMode::Week => {
                let first = sunday_on_or_before(date);
                self.set_window(first, first + Duration::days(7));
            }
            ViewMode::Month => {
                let first = first_of_month(date);
                self.set_window(first, first + Months::new(1));
            }
            ViewMode::Agenda => {
                // Same length as the current window, starting at the anchor.
                let length = Duration::days(self.window_days());
                self.set_window(date, date + length);
            }
        }
    }

    fn set_window(&mut self, first: NaiveDate, last: NaiveDate) {
        self.first_day = first;
        self.last_day = last;
    }
}

impl Default for PeriodState {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the most recent Sunday on or before the given date.
fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Returns the first day of the given date's month.
fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap()
}
