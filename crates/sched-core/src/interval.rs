//! Half-open clock-time intervals and their three-way relation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ClockTime;

/// How one interval (or event) stands relative to another.
///
/// This is deliberately *not* an [`std::cmp::Ordering`]: `Overlaps`
/// means the two ranges collide, not that they are equal, and the
/// relation is not transitive. Feeding it into a generic sort would
/// produce nonsense, so the store consumes it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The left operand ends at or before the right one starts.
    Before,
    /// The two ranges share at least one instant.
    Overlaps,
    /// The left operand starts at or after the right one ends.
    After,
}

/// A half-open clock-time range `[start, end)` within a single day.
///
/// Immutable once constructed. `start < end` is a caller-supplied
/// precondition; the behavior of [`TimeInterval::relation`] on a zero
/// or negative length interval is unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    start: ClockTime,
    end: ClockTime,
}

impl TimeInterval {
    /// Creates an interval from `start` (inclusive) to `end` (exclusive).
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        debug_assert!(start < end, "interval start must precede its end");
        Self { start, end }
    }

    /// Returns the inclusive start time.
    pub const fn start(self) -> ClockTime {
        self.start
    }

    /// Returns the exclusive end time.
    pub const fn end(self) -> ClockTime {
        self.end
    }

    /// Compares this interval with another.
    ///
    /// Because the ranges are half-open, back-to-back intervals such as
    /// `9:00 - 10:00` and `10:00 - 11:00` do not overlap.
    pub fn relation(self, other: Self) -> Relation {
        if self.end <= other.start {
            return Relation::Before;
        }
        if self.start >= other.end {
            return Relation::After;
        }
        Relation::Overlaps
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(start: (u16, u16), end: (u16, u16)) -> TimeInterval {
        TimeInterval::new(
            ClockTime::from_hm(start.0, start.1).unwrap(),
            ClockTime::from_hm(end.0, end.1).unwrap(),
        )
    }

    #[test]
    fn disjoint_intervals_relate_before_and_after() {
        let morning = interval((9, 0), (10, 0));
        let afternoon = interval((14, 0), (15, 30));
        assert_eq!(morning.relation(afternoon), Relation::Before);
        assert_eq!(afternoon.relation(morning), Relation::After);
    }

    #[test]
    fn back_to_back_intervals_do_not_overlap() {
        let first = interval((9, 0), (10, 0));
        let second = interval((10, 0), (11, 0));
        assert_eq!(first.relation(second), Relation::Before);
        assert_eq!(second.relation(first), Relation::After);
    }

    #[test]
    fn partial_overlap_is_detected_both_ways() {
        let a = interval((9, 0), (10, 0));
        let b = interval((9, 30), (10, 30));
        assert_eq!(a.relation(b), Relation::Overlaps);
        assert_eq!(b.relation(a), Relation::Overlaps);
    }

    #[test]
    fn containment_counts_as_overlap() {
        let outer = interval((8, 0), (12, 0));
        let inner = interval((9, 0), (10, 0));
        assert_eq!(outer.relation(inner), Relation::Overlaps);
        assert_eq!(inner.relation(outer), Relation::Overlaps);
    }

    #[test]
    fn identical_intervals_overlap() {
        let a = interval((9, 0), (10, 0));
        assert_eq!(a.relation(a), Relation::Overlaps);
    }

    #[test]
    fn display_renders_both_ends() {
        assert_eq!(interval((9, 0), (10, 30)).to_string(), "9:00 - 10:30");
        assert_eq!(interval((0, 5), (23, 59)).to_string(), "0:05 - 23:59");
    }

    #[test]
    fn serde_roundtrip_keeps_clock_strings() {
        let a = interval((9, 0), (10, 30));
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, r#"{"start":"9:00","end":"10:30"}"#);
        let parsed: TimeInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, a);
    }
}
