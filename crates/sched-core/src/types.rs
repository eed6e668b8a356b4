//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The minutes-since-midnight value was out of range.
    #[error("clock time must be below 1440 minutes, got {value}")]
    MinutesOutOfRange { value: u16 },

    /// The clock time text was not a valid `H:MM` time.
    #[error("invalid clock time: {value}")]
    InvalidClockTime { value: String },

    /// Invalid view mode name.
    #[error("invalid view mode: {value}")]
    InvalidView { value: String },
}

/// A validated event name.
///
/// Event names must be non-empty. Validation of everything else a user
/// may type (date text, interval ordering) happens at the input
/// boundary before an [`crate::Event`] is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventName(String);

impl EventName {
    /// Creates a new event name after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "event name" });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EventName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventName> for String {
    fn from(name: EventName) -> Self {
        name.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Number of minutes in a calendar day.
const MINUTES_PER_DAY: u16 = 24 * 60;

/// A clock time, stored as minutes since midnight in `0..1440`.
///
/// Renders as `H:MM` with no leading zero on the hour, which is also
/// the accepted parse form (`9:00`, `17:30`, `09:05`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight, the start of the day.
    pub const MIDNIGHT: Self = Self(0);

    /// Creates a clock time from minutes since midnight.
    pub const fn from_minutes(minutes: u16) -> Result<Self, ValidationError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(ValidationError::MinutesOutOfRange { value: minutes });
        }
        Ok(Self(minutes))
    }

    /// Creates a clock time from an hour and minute pair.
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidClockTime {
                value: format!("{hour}:{minute:02}"),
            });
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Returns the hour component (`0..24`).
    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Returns the minute component (`0..60`).
    pub const fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Returns the raw minutes-since-midnight value.
    pub const fn minutes_from_midnight(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
    }
}

impl std::str::FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidClockTime {
            value: s.to_string(),
        };
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u16 = hour.parse().map_err(|_| invalid())?;
        let minute: u16 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
