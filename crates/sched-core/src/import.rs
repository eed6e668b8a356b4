//! Recurring-event text import.
//!
//! Each line of a schedule file describes one weekly-recurring event:
//!
//! ```text
//! name;year;startMonth;endMonth;weekdayLetters;startHour;endHour
//! ```
//!
//! `weekdayLetters` is a string over `MTWHFAS` (Monday through
//! Sunday). Every letter expands into one event per matching weekday
//! within `[startMonth, endMonth]` of `year`, each with the interval
//! `startHour:00 - endHour:00`. Recurrence is pre-expanded here; the
//! store only ever sees individual events.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use thiserror::Error;

use crate::event::Event;
use crate::interval::TimeInterval;
use crate::types::{ClockTime, EventName};

/// Weekday letters in field five, Monday first.
pub const WEEKDAY_LETTERS: &str = "MTWHFAS";

/// Errors raised while reading a schedule file.
///
/// Line numbers are 1-based. Malformed text is an importer concern;
/// the store itself only ever receives fully-constructed events.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected 7 semicolon-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid {field}: {value}")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: unknown weekday letter '{letter}' (expected one of {WEEKDAY_LETTERS})")]
    UnknownWeekday { line: usize, letter: char },

    #[error("line {line}: empty event name")]
    EmptyName { line: usize },
}

/// Reads a schedule file and expands it into individual events.
pub fn read_schedule(path: &Path) -> Result<Vec<Event>, ImportError> {
    let file = File::open(path)?;
    parse_schedule(BufReader::new(file))
}

/// Parses schedule lines from any buffered reader.
///
/// Blank lines are skipped; any malformed line aborts the import.
pub fn parse_schedule<R: BufRead>(reader: R) -> Result<Vec<Event>, ImportError> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        events.extend(parse_line(idx + 1, trimmed)?);
    }
    Ok(events)
}

/// Parses one schedule line into its expanded events.
///
/// `line_no` is only used for error reporting.
pub fn parse_line(line_no: usize, text: &str) -> Result<Vec<Event>, ImportError> {
    let fields: Vec<&str> = text.split(';').collect();
    if fields.len() != 7 {
        return Err(ImportError::FieldCount {
            line: line_no,
            found: fields.len(),
        });
    }

    let name = EventName::new(fields[0].trim())
        .map_err(|_| ImportError::EmptyName { line: line_no })?;
    let year: i32 = parse_number(line_no, "year", fields[1])?;
    let start_month: u32 = parse_number(line_no, "start month", fields[2])?;
    let end_month: u32 = parse_number(line_no, "end month", fields[3])?;
    let letters = fields[4].trim();
    let start_hour: u16 = parse_number(line_no, "start hour", fields[5])?;
    let end_hour: u16 = parse_number(line_no, "end hour", fields[6])?;

    let interval = TimeInterval::new(
        clock_on_the_hour(line_no, "start hour", start_hour)?,
        clock_on_the_hour(line_no, "end hour", end_hour)?,
    );

    let first_of_range = month_start(line_no, "start month", year, start_month)?;
    // Day after the last day of the recurrence range.
    let end_of_range = month_start(line_no, "end month", year, end_month)? + Months::new(1);

    let mut events = Vec::new();
    for letter in letters.chars() {
        let target = weekday_for(letter).ok_or(ImportError::UnknownWeekday {
            line: line_no,
            letter,
        })?;
        // First matching weekday on or after the 1st of the start month.
        let offset = (7 + target.num_days_from_monday()
            - first_of_range.weekday().num_days_from_monday())
            % 7;
        let mut current = first_of_range + Duration::days(i64::from(offset));
        while current < end_of_range {
            events.push(Event::new(name.clone(), current, interval));
            current += Duration::days(7);
        }
    }

    if events.is_empty() {
        tracing::warn!(line = line_no, "schedule line expanded to no events");
    }

    Ok(events)
}

/// Maps a schedule-file weekday letter to its weekday.
const fn weekday_for(letter: char) -> Option<Weekday> {
    match letter {
        'M' => Some(Weekday::Mon),
        'T' => Some(Weekday::Tue),
        'W' => Some(Weekday::Wed),
        'H' => Some(Weekday::Thu),
        'F' => Some(Weekday::Fri),
        'A' => Some(Weekday::Sat),
        'S' => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_number<T: std::str::FromStr>(
    line: usize,
    field: &'static str,
    raw: &str,
) -> Result<T, ImportError> {
    raw.trim().parse().map_err(|_| ImportError::InvalidField {
        line,
        field,
        value: raw.trim().to_string(),
    })
}

fn clock_on_the_hour(
    line: usize,
    field: &'static str,
    hour: u16,
) -> Result<ClockTime, ImportError> {
    ClockTime::from_hm(hour, 0).map_err(|_| ImportError::InvalidField {
        line,
        field,
        value: hour.to_string(),
    })
}

fn month_start(
    line: usize,
    field: &'static str,
    year: i32,
    month: u32,
) -> Result<NaiveDate, ImportError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(ImportError::InvalidField {
        line,
        field,
        value: month.to_string(),
    })
}
