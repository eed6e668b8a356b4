//! Check command: verify a schedule file is internally conflict-free.

use std::path::Path;

use anyhow::{Context, Result};
use sched_core::{EventStore, read_schedule};

/// Loads a schedule file and reports every entry that conflicts with an
/// earlier one. Returns the number of conflicts found.
pub fn run(schedule: &Path) -> Result<usize> {
    let events =
        read_schedule(schedule).with_context(|| format!("failed to read {}", schedule.display()))?;
    let total = events.len();

    let mut store = EventStore::new();
    let mut conflicts = 0usize;
    for event in events {
        if !store.insert(event.clone()) {
            conflicts += 1;
            println!("conflict: {event}");
        }
    }

    println!(
        "{} of {total} events scheduled, {conflicts} conflict{}",
        total - conflicts,
        if conflicts == 1 { "" } else { "s" }
    );
    Ok(conflicts)
}
