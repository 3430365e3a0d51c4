//! Half-open time windows and the overlap predicate every conflict check uses.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// True iff `[a_start, a_end)` and `[b_start, b_end)` share at least one instant.
///
/// Adjacent windows (one ends exactly when the other starts) do NOT overlap.
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// A half-open interval `[start, end)` of local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Window of `minutes` length beginning at `start`, or `None` when the end
    /// falls outside chrono's representable range.
    pub fn starting_at(start: NaiveDateTime, minutes: i64) -> Option<Self> {
        let end = start.checked_add_signed(TimeDelta::try_minutes(minutes)?)?;
        Some(Self { start, end })
    }

    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

