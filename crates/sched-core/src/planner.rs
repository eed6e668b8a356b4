//! Coordinating model: one event store plus one period state machine.

use chrono::NaiveDate;

use crate::event::Event;
use crate::notify::Subscribers;
use crate::period::{Nav, PeriodState, ViewMode};
use crate::store::EventStore;

/// Result of adding a batch of events.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    /// How many events were accepted into the store.
    pub added: usize,
    /// Events rejected because they conflict with a stored event.
    pub rejected: Vec<Event>,
}

/// The owning coordinator for the calendar's data.
///
/// Holds the event store and the period state machine, routes
/// mutations through them, and fans out a no-payload change signal
/// after every successful mutation so read-side consumers know to
/// re-query [`Planner::visible_events`].
#[derive(Debug)]
pub struct Planner {
    store: EventStore,
    period: PeriodState,
    subscribers: Subscribers,
}

impl Planner {
    /// Creates a planner showing today in Day view, with no events.
    pub fn new() -> Self {
        Self::with_period(PeriodState::new())
    }

    /// Creates a planner anchored at a specific date.
    pub fn starting_at(day: NaiveDate) -> Self {
        Self::with_period(PeriodState::starting_at(day))
    }

    fn with_period(period: PeriodState) -> Self {
        Self {
            store: EventStore::new(),
            period,
            subscribers: Subscribers::new(),
        }
    }

    /// Registers a no-payload change callback.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) {
        self.subscribers.subscribe(callback);
    }

    /// Adds one event, returning whether it was accepted.
    ///
    /// A conflicting event is rejected and produces no notification.
    pub fn add_event(&mut self, event: Event) -> bool {
        let added = self.store.insert(event);
        if added {
            self.subscribers.notify();
        }
        added
    }

    /// Adds a batch of events, collecting the conflicting ones.
    ///
    /// Subscribers are notified once at the end if anything was added.
    pub fn add_all(&mut self, events: impl IntoIterator<Item = Event>) -> ImportOutcome {
        let mut outcome = ImportOutcome::default();
        for event in events {
            if self.store.insert(event.clone()) {
                outcome.added += 1;
            } else {
                outcome.rejected.push(event);
            }
        }
        if outcome.added > 0 {
            self.subscribers.notify();
        }
        outcome
    }

    /// Switches the view granularity. See [`PeriodState::set_view`].
    pub fn set_view(
        &mut self,
        view: ViewMode,
        agenda_window: Option<(NaiveDate, NaiveDate)>,
    ) -> bool {
        let applied = self.period.set_view(view, agenda_window);
        if applied {
            self.subscribers.notify();
        }
        applied
    }

    /// Applies a navigation command. See [`PeriodState::navigate`].
    pub fn navigate(&mut self, nav: Nav) {
        self.period.navigate(nav);
        self.subscribers.notify();
    }

    /// Returns the events falling inside the current display window.
    pub fn visible_events(&self) -> Vec<Event> {
        self.store
            .events_between(self.period.first_day(), self.period.last_day())
    }

    /// Read access to the period state machine.
    pub const fn period(&self) -> &PeriodState {
        &self.period
    }

    /// Read access to the event store.
    pub const fn store(&self) -> &EventStore {
        &self.store
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::interval::TimeInterval;
    use crate::types::{ClockTime, EventName};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(name: &str, day: NaiveDate, start: u16, end: u16) -> Event {
        Event::new(
            EventName::new(name).unwrap(),
            day,
            TimeInterval::new(
                ClockTime::from_hm(start, 0).unwrap(),
                ClockTime::from_hm(end, 0).unwrap(),
            ),
        )
    }

    #[test]
    fn visible_events_follow_the_window() {
        let mut planner = Planner::starting_at(date(2024, 5, 10));
        assert!(planner.add_event(event("today", date(2024, 5, 10), 9, 10)));
        assert!(planner.add_event(event("tomorrow", date(2024, 5, 11), 9, 10)));

        let visible = planner.visible_events();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name().as_str(), "today");

        planner.navigate(Nav::Forward);
        let visible = planner.visible_events();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name().as_str(), "tomorrow");
    }

    #[test]
    fn week_window_shows_the_whole_week() {
        // 2024-05-10 was a Friday; its week is Sun 05 .. Sat 11.
        let mut planner = Planner::starting_at(date(2024, 5, 10));
        assert!(planner.add_event(event("sunday", date(2024, 5, 5), 9, 10)));
        assert!(planner.add_event(event("saturday", date(2024, 5, 11), 9, 10)));
        assert!(planner.add_event(event("next week", date(2024, 5, 12), 9, 10)));

        assert!(planner.set_view(ViewMode::Week, None));
        let names: Vec<_> = planner
            .visible_events()
            .iter()
            .map(|e| e.name().as_str().to_string())
            .collect();
        assert_eq!(names, ["sunday", "saturday"]);
    }

    #[test]
    fn conflicting_add_reports_false_and_skips_notification() {
        let mut planner = Planner::starting_at(date(2024, 5, 10));
        let notified = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&notified);
        planner.subscribe(move || counter.set(counter.get() + 1));

        assert!(planner.add_event(event("a", date(2024, 5, 10), 9, 10)));
        assert_eq!(notified.get(), 1);

        assert!(!planner.add_event(event("b", date(2024, 5, 10), 9, 10)));
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn add_all_collects_rejects_and_notifies_once() {
        let mut planner = Planner::starting_at(date(2024, 5, 10));
        let notified = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&notified);
        planner.subscribe(move || counter.set(counter.get() + 1));

        let outcome = planner.add_all([
            event("a", date(2024, 5, 10), 9, 10),
            event("b", date(2024, 5, 10), 9, 10),
            event("c", date(2024, 5, 10), 10, 11),
        ]);
        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].name().as_str(), "b");
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn refused_view_change_does_not_notify() {
        let mut planner = Planner::starting_at(date(2024, 5, 10));
        let notified = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&notified);
        planner.subscribe(move || counter.set(counter.get() + 1));

        assert!(!planner.set_view(ViewMode::Agenda, None));
        assert_eq!(notified.get(), 0);
        assert_eq!(planner.period().view(), ViewMode::Day);
    }
}
