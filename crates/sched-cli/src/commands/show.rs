//! Show command: print the events visible in a calendar window.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use chrono::{Duration, NaiveDate};
use sched_core::{Event, Nav, PeriodState, Planner, ViewMode, format_date, read_schedule};

use crate::Config;

/// Flags collected from `sched show`.
#[derive(Debug)]
pub struct ShowRequest {
    pub schedule: Option<PathBuf>,
    pub view: Option<ViewMode>,
    pub date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub json: bool,
}

pub fn run(config: &Config, request: &ShowRequest) -> Result<()> {
    let mut planner = Planner::new();
    load_schedule(
        &mut planner,
        request
            .schedule
            .as_deref()
            .or(config.schedule_path.as_deref()),
    )?;
    position_window(&mut planner, request, config.default_view)?;

    let events = planner.visible_events();
    if request.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else {
        print!("{}", render(planner.period(), &events, &config.header_format));
    }
    Ok(())
}

fn load_schedule(planner: &mut Planner, path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let events =
        read_schedule(path).with_context(|| format!("failed to read {}", path.display()))?;
    let outcome = planner.add_all(events);
    if !outcome.rejected.is_empty() {
        tracing::warn!(
            dropped = outcome.rejected.len(),
            "conflicting schedule entries were dropped"
        );
    }
    Ok(())
}

/// Positions the planner's window from the request flags.
///
/// The agenda view is the only one that takes an explicit window, and
/// the only one that cannot take an anchor date.
fn position_window(
    planner: &mut Planner,
    request: &ShowRequest,
    default_view: ViewMode,
) -> Result<()> {
    let view = request.view.unwrap_or(default_view);
    if view == ViewMode::Agenda {
        ensure!(
            request.date.is_none(),
            "--date cannot be combined with the agenda view; use --from/--to"
        );
        let (from, to) = request
            .from
            .zip(request.to)
            .context("agenda view requires --from and --to")?;
        ensure!(from < to, "--from must be before --to");
        planner.set_view(ViewMode::Agenda, Some((from, to)));
    } else {
        ensure!(
            request.from.is_none() && request.to.is_none(),
            "--from/--to only apply to the agenda view"
        );
        planner.set_view(view, None);
        if let Some(date) = request.date {
            planner.navigate(Nav::ToDate(date));
        }
    }
    Ok(())
}

/// Renders a window header plus its events, grouped by date.
pub(crate) fn render(period: &PeriodState, events: &[Event], header_format: &str) -> String {
    let mut out = String::new();
    let first = period.first_day();
    let last_inclusive = period.last_day() - Duration::days(1);
    if first == last_inclusive {
        let _ = writeln!(out, "{} [{}]", format_date(first, header_format), period.view());
    } else {
        let _ = writeln!(
            out,
            "{} - {} [{}]",
            format_date(first, header_format),
            format_date(last_inclusive, header_format),
            period.view()
        );
    }

    if events.is_empty() {
        let _ = writeln!(out, "  (no events)");
        return out;
    }

    let mut current_date = None;
    for event in events {
        if current_date != Some(event.date()) {
            let _ = writeln!(out, "{}", event.format_date(header_format));
            current_date = Some(event.date());
        }
        let _ = writeln!(out, "  {}  {}", event.interval(), event.name());
    }
    out
}
