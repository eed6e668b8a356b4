//! Ordered event storage with conflict-rejecting insertion.

use chrono::NaiveDate;

use crate::event::Event;
use crate::interval::Relation;

/// An ordered collection of events.
///
/// Invariants: events stay sorted ascending by `(date, interval)`, and
/// no two stored events overlap. Both are maintained by [`EventStore::insert`],
/// which rejects conflicting events instead of merging them.
///
/// Lookup is a linear scan. Fine for personal-calendar volumes; a
/// balanced structure keyed by `(date, start)` would be the upgrade
/// path if that ever changed.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    /// Creates an empty store.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Inserts an event in order, returning whether it was accepted.
    ///
    /// Returns `false` and leaves the store untouched when the event
    /// overlaps one already stored on the same date. Conflict is an
    /// expected outcome, not an error; callers surface it to the user.
    pub fn insert(&mut self, event: Event) -> bool {
        let mut idx = 0;
        while idx < self.events.len() {
            match self.events[idx].relation(&event) {
                Relation::Before => idx += 1,
                Relation::Overlaps => {
                    tracing::debug!(
                        date = %event.date(),
                        interval = %event.interval(),
                        existing = %self.events[idx].interval(),
                        "rejecting conflicting event"
                    );
                    return false;
                }
                Relation::After => {
                    self.events.insert(idx, event);
                    return true;
                }
            }
        }
        self.events.push(event);
        true
    }

    /// Returns every event dated within `[from, to)`, ascending.
    ///
    /// An empty range or a range containing no events yields an empty
    /// vector.
    ///
    /// # Panics
    ///
    /// Panics if `from > to`; that is a caller bug, not a recoverable
    /// condition.
    pub fn events_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<Event> {
        assert!(
            from <= to,
            "events_between called with from ({from}) after to ({to})"
        );
        let mut selected = Vec::new();
        for event in &self.events {
            if event.date() < from {
                continue;
            }
            if event.date() >= to {
                // The store is sorted, nothing later can match.
                break;
            }
            selected.push(event.clone());
        }
        selected
    }

    /// Iterates over all stored events in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Returns the number of stored events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` when no events are stored.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for &'a EventStore {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClockTime, EventName};
    use crate::TimeInterval;

    fn event(name: &str, date: (i32, u32, u32), start: (u16, u16), end: (u16, u16)) -> Event {
        Event::new(
            EventName::new(name).unwrap(),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            TimeInterval::new(
                ClockTime::from_hm(start.0, start.1).unwrap(),
                ClockTime::from_hm(end.0, end.1).unwrap(),
            ),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn insert_into_empty_store_succeeds() {
        let mut store = EventStore::new();
        assert!(store.insert(event("a", (2024, 5, 1), (9, 0), (10, 0))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insert_keeps_events_sorted() {
        let mut store = EventStore::new();
        assert!(store.insert(event("late", (2024, 5, 3), (9, 0), (10, 0))));
        assert!(store.insert(event("early", (2024, 5, 1), (9, 0), (10, 0))));
        assert!(store.insert(event("middle", (2024, 5, 2), (9, 0), (10, 0))));
        let names: Vec<_> = store.iter().map(|e| e.name().as_str().to_string()).collect();
        assert_eq!(names, ["early", "middle", "late"]);
    }

    #[test]
    fn overlapping_insert_is_rejected() {
        let mut store = EventStore::new();
        assert!(store.insert(event("a", (2024, 5, 1), (9, 0), (10, 0))));
        assert!(!store.insert(event("b", (2024, 5, 1), (9, 30), (10, 30))));
        assert_eq!(store.len(), 1);
        // Back-to-back is allowed by the half-open rule.
        assert!(store.insert(event("c", (2024, 5, 1), (10, 0), (11, 0))));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn duplicate_insert_is_rejected_and_size_unchanged() {
        let mut store = EventStore::new();
        assert!(store.insert(event("a", (2024, 5, 1), (9, 0), (10, 0))));
        assert!(!store.insert(event("a", (2024, 5, 1), (9, 0), (10, 0))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn same_time_on_another_date_is_accepted() {
        let mut store = EventStore::new();
        assert!(store.insert(event("mon", (2024, 5, 6), (9, 0), (10, 0))));
        assert!(store.insert(event("tue", (2024, 5, 7), (9, 0), (10, 0))));
        assert_eq!(store.len(), 2);
    }

    fn event_on(name: &str, day: NaiveDate) -> Event {
        Event::new(
            EventName::new(name).unwrap(),
            day,
            TimeInterval::new(
                ClockTime::from_hm(9, 0).unwrap(),
                ClockTime::from_hm(10, 0).unwrap(),
            ),
        )
    }

    #[test]
    fn events_between_is_half_open() {
        let mut store = EventStore::new();
        let today = date(2024, 5, 10);
        for (name, offset) in [("m2", -2i64), ("m1", -1), ("d", 0), ("p3", 3)] {
            assert!(store.insert(event_on(name, today + chrono::Duration::days(offset))));
        }

        let hits = store.events_between(
            today - chrono::Duration::days(1),
            today + chrono::Duration::days(3),
        );
        let names: Vec<_> = hits.iter().map(|e| e.name().as_str().to_string()).collect();
        assert_eq!(names, ["m1", "d"]);
    }

    #[test]
    fn events_between_empty_range_yields_nothing() {
        let mut store = EventStore::new();
        assert!(store.insert(event("a", (2024, 5, 1), (9, 0), (10, 0))));
        let hits = store.events_between(date(2024, 5, 1), date(2024, 5, 1));
        assert!(hits.is_empty());
    }

    #[test]
    fn events_between_misses_return_empty_not_error() {
        let store = EventStore::new();
        assert!(store.events_between(date(2024, 1, 1), date(2024, 2, 1)).is_empty());
    }

    #[test]
    #[should_panic(expected = "events_between called with from")]
    fn events_between_panics_on_inverted_range() {
        let store = EventStore::new();
        let _ = store.events_between(date(2024, 5, 2), date(2024, 5, 1));
    }

    #[test]
    fn same_date_results_come_back_in_time_order() {
        let mut store = EventStore::new();
        assert!(store.insert(event("lunch", (2024, 5, 1), (12, 0), (13, 0))));
        assert!(store.insert(event("standup", (2024, 5, 1), (9, 0), (9, 30))));
        assert!(store.insert(event("review", (2024, 5, 1), (15, 0), (16, 0))));
        let hits = store.events_between(date(2024, 5, 1), date(2024, 5, 2));
        let names: Vec<_> = hits.iter().map(|e| e.name().as_str().to_string()).collect();
        assert_eq!(names, ["standup", "lunch", "review"]);
    }
}
