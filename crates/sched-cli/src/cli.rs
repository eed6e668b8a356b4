//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sched_core::ViewMode;

/// Personal calendar.
///
/// Keeps scheduled events in memory for the life of one invocation,
/// rejects conflicting entries, and shows them through day, week,
/// month, or agenda windows.
#[derive(Debug, Parser)]
#[command(name = "sched", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the events visible in a calendar window.
    Show {
        /// Recurring-schedule file to load events from.
        #[arg(long)]
        schedule: Option<PathBuf>,

        /// View granularity: day, week, month, or agenda.
        #[arg(long)]
        view: Option<ViewMode>,

        /// Anchor date (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// First day of an agenda window (YYYY-MM-DD).
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Day after the last day of an agenda window (YYYY-MM-DD).
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Output as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Check a schedule file for internal conflicts.
    Check {
        /// Recurring-schedule file to verify.
        #[arg(long)]
        schedule: PathBuf,
    },

    /// Interactive session: add events and browse windows.
    Repl {
        /// Recurring-schedule file to preload.
        #[arg(long)]
        schedule: Option<PathBuf>,
    },
}
