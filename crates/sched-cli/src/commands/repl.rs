//! Interactive session: add events and browse calendar windows.

use std::io::{self, BufRead as _, Write as _};
use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};
use sched_core::{
    ClockTime, Event, EventName, Nav, Planner, TimeInterval, ViewMode, read_schedule,
};

use super::show::render;
use crate::Config;

const HELP: &str = "\
commands:
  view day|week|month        switch the window granularity
  agenda FROM TO             show an explicit window (TO is exclusive)
  next / prev                step the window forward or backward
  goto DATE                  move the window to a date
  today                      move the window to today
  add DATE START END NAME    schedule an event, e.g. add 2024-03-08 18:00 19:30 Yoga
  list                       reprint the current window
  help                       show this message
  quit                       leave the session";

pub fn run(config: &Config, schedule: Option<&Path>) -> Result<()> {
    let mut planner = Planner::new();
    if let Some(path) = schedule.or(config.schedule_path.as_deref()) {
        let events =
            read_schedule(path).with_context(|| format!("failed to read {}", path.display()))?;
        let outcome = planner.add_all(events);
        println!(
            "loaded {} events from {} ({} conflicting entries dropped)",
            outcome.added,
            path.display(),
            outcome.rejected.len()
        );
    }
    let _ = planner.set_view(config.default_view, None);

    println!("type 'help' for commands");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match respond(&mut planner, line.trim(), &config.header_format) {
            Reply::Quit => break,
            Reply::Text(text) => {
                if !text.is_empty() {
                    println!("{text}");
                }
            }
        }
    }
    Ok(())
}

/// Outcome of one line of input.
#[derive(Debug)]
enum Reply {
    Text(String),
    Quit,
}

/// Parses one line of input and applies it to the planner.
///
/// Kept free of I/O so the whole command surface is unit-testable.
fn respond(planner: &mut Planner, input: &str, header_format: &str) -> Reply {
    let mut words = input.split_whitespace();
    let Some(command) = words.next() else {
        return Reply::Text(String::new());
    };
    let text = match command {
        "help" => HELP.to_owned(),
        "quit" | "exit" => return Reply::Quit,
        "list" => window(planner, header_format),
        "next" => {
            planner.navigate(Nav::Forward);
            window(planner, header_format)
        }
        "prev" => {
            planner.navigate(Nav::Backward);
            window(planner, header_format)
        }
        "today" => {
            planner.navigate(Nav::ToDate(Local::now().date_naive()));
            window(planner, header_format)
        }
        "goto" => match parse_date(words.next()) {
            Ok(date) => {
                planner.navigate(Nav::ToDate(date));
                window(planner, header_format)
            }
            Err(message) => message,
        },
        "view" => set_view(planner, words.next(), header_format),
        "agenda" => set_agenda(planner, words.next(), words.next(), header_format),
        "add" => add_event(planner, &mut words, header_format),
        other => format!("unknown command '{other}'; type 'help' for the list"),
    };
    Reply::Text(text)
}

fn window(planner: &Planner, header_format: &str) -> String {
    let mut text = render(planner.period(), &planner.visible_events(), header_format);
    // Drop render's trailing newline; the prompt loop adds its own.
    text.truncate(text.trim_end().len());
    text
}

fn set_view(planner: &mut Planner, name: Option<&str>, header_format: &str) -> String {
    let Some(name) = name else {
        return "usage: view day|week|month".to_owned();
    };
    match name.parse::<ViewMode>() {
        Ok(ViewMode::Agenda) => "the agenda view needs an explicit window: agenda FROM TO".to_owned(),
        Ok(view) => {
            let _ = planner.set_view(view, None);
            window(planner, header_format)
        }
        Err(error) => error.to_string(),
    }
}

fn set_agenda(
    planner: &mut Planner,
    from: Option<&str>,
    to: Option<&str>,
    header_format: &str,
) -> String {
    let (from, to) = match (parse_date(from), parse_date(to)) {
        (Ok(from), Ok(to)) => (from, to),
        (Err(message), _) | (_, Err(message)) => return message,
    };
    if from >= to {
        return format!("agenda window is empty: {from} is not before {to}");
    }
    let _ = planner.set_view(ViewMode::Agenda, Some((from, to)));
    window(planner, header_format)
}

fn add_event<'a>(
    planner: &mut Planner,
    words: &mut impl Iterator<Item = &'a str>,
    header_format: &str,
) -> String {
    let date = match parse_date(words.next()) {
        Ok(date) => date,
        Err(message) => return message,
    };
    let (start, end) = match (parse_time(words.next()), parse_time(words.next())) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(message), _) | (_, Err(message)) => return message,
    };
    if start >= end {
        return format!("event must start before it ends, got {start} - {end}");
    }
    let name = words.collect::<Vec<_>>().join(" ");
    let name = match EventName::new(name) {
        Ok(name) => name,
        Err(_) => return "usage: add DATE START END NAME".to_owned(),
    };

    let event = Event::new(name, date, TimeInterval::new(start, end));
    if planner.add_event(event.clone()) {
        planner.navigate(Nav::ToDate(date));
        format!("added {event}\n{}", window(planner, header_format))
    } else {
        format!("conflict: {event} overlaps an existing event")
    }
}

fn parse_date(word: Option<&str>) -> Result<NaiveDate, String> {
    let Some(word) = word else {
        return Err("expected a date (YYYY-MM-DD)".to_owned());
    };
    word.parse()
        .map_err(|_| format!("'{word}' is not a date (YYYY-MM-DD)"))
}

fn parse_time(word: Option<&str>) -> Result<ClockTime, String> {
    let Some(word) = word else {
        return Err("expected a time (HH:MM)".to_owned());
    };
    word.parse().map_err(|_| format!("'{word}' is not a time (HH:MM)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "FORMAT/DAYOFWEEK, FORMAT/MONTH FORMAT/DAYOFMONTH, FORMAT/YEAR";

    fn planner() -> Planner {
        Planner::starting_at(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap())
    }

    fn text(planner: &mut Planner, input: &str) -> String {
        match respond(planner, input, HEADER) {
            Reply::Text(text) => text,
            Reply::Quit => panic!("unexpected quit for input {input:?}"),
        }
    }

    #[test]
    fn quit_and_exit_end_the_session() {
        let mut p = planner();
        assert!(matches!(respond(&mut p, "quit", HEADER), Reply::Quit));
        assert!(matches!(respond(&mut p, "exit", HEADER), Reply::Quit));
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut p = planner();
        assert_eq!(text(&mut p, "   "), "");
    }

    #[test]
    fn add_schedules_and_shows_the_day() {
        let mut p = planner();
        let reply = text(&mut p, "add 2024-03-08 18:00 19:30 Evening Yoga");
        assert!(reply.starts_with("added 2024-03-08 18:00 - 19:30 Evening Yoga"));
        assert!(reply.contains("Friday, March 08, 2024"));
        assert_eq!(p.store().len(), 1);
    }

    #[test]
    fn conflicting_add_is_reported_and_dropped() {
        let mut p = planner();
        text(&mut p, "add 2024-03-08 18:00 19:30 Yoga");
        let reply = text(&mut p, "add 2024-03-08 19:00 20:00 Dance");
        assert!(reply.starts_with("conflict:"));
        assert_eq!(p.store().len(), 1);
    }

    #[test]
    fn add_rejects_inverted_times() {
        let mut p = planner();
        let reply = text(&mut p, "add 2024-03-08 19:00 18:00 Yoga");
        assert!(reply.contains("must start before it ends"));
        assert!(p.store().is_empty());
    }

    #[test]
    fn add_requires_a_name() {
        let mut p = planner();
        let reply = text(&mut p, "add 2024-03-08 18:00 19:00");
        assert_eq!(reply, "usage: add DATE START END NAME");
    }

    #[test]
    fn view_switches_and_agenda_is_refused_without_a_window() {
        let mut p = planner();
        let reply = text(&mut p, "view week");
        assert!(reply.contains("[week]"));
        assert_eq!(p.period().view(), ViewMode::Week);

        let reply = text(&mut p, "view agenda");
        assert!(reply.contains("agenda FROM TO"));
        assert_eq!(p.period().view(), ViewMode::Week);
    }

    #[test]
    fn agenda_command_sets_an_explicit_window() {
        let mut p = planner();
        let reply = text(&mut p, "agenda 2024-03-01 2024-03-10");
        assert!(reply.contains("[agenda]"));
        assert_eq!(p.period().window_days(), 9);

        let reply = text(&mut p, "agenda 2024-03-10 2024-03-10");
        assert!(reply.contains("agenda window is empty"));
    }

    #[test]
    fn goto_and_steps_move_the_window() {
        let mut p = planner();
        text(&mut p, "goto 2024-07-20");
        assert_eq!(
            p.period().first_day(),
            NaiveDate::from_ymd_opt(2024, 7, 20).unwrap()
        );
        text(&mut p, "next");
        assert_eq!(
            p.period().first_day(),
            NaiveDate::from_ymd_opt(2024, 7, 21).unwrap()
        );
        text(&mut p, "prev");
        text(&mut p, "prev");
        assert_eq!(
            p.period().first_day(),
            NaiveDate::from_ymd_opt(2024, 7, 19).unwrap()
        );
    }

    #[test]
    fn bad_dates_and_unknown_commands_get_messages() {
        let mut p = planner();
        assert!(text(&mut p, "goto tomorrow").contains("is not a date"));
        assert!(text(&mut p, "frobnicate").contains("unknown command"));
    }
}
