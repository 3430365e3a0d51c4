//! Per-day index of committed intervals used to test candidate slots.
//!
//! Each day holds a short list scanned linearly with the half-open
//! [`overlaps`](crate::window::overlaps) predicate. Adjacent intervals (one
//! ends exactly when another starts) are NOT conflicts.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::window::{overlaps, TimeWindow};

#[derive(Debug, Clone, Default)]
pub struct ConflictIndex {
    days: HashMap<NaiveDate, Vec<TimeWindow>>,
}

impl ConflictIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `[start, end)` overlaps anything already committed on `day`.
    pub fn has_conflict(&self, day: NaiveDate, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.days
            .get(&day)
            .is_some_and(|committed| committed.iter().any(|w| overlaps(w.start, w.end, start, end)))
    }

    /// Commit `[start, end)` under `day`.
    ///
    /// An interval that runs past midnight is also filed under every later day
    /// it covers, so that day's scan sees the spill-over.
    pub fn insert(&mut self, day: NaiveDate, start: NaiveDateTime, end: NaiveDateTime) {
        let window = TimeWindow::new(start, end);
        let mut current = day;
        loop {
            self.days.entry(current).or_default().push(window);
            current = match current.succ_opt() {
                Some(next) if next.and_time(NaiveTime::MIN) < end => next,
                _ => break,
            };
        }
    }

    /// Intervals committed under `day`, in insertion order.
    pub fn intervals(&self, day: NaiveDate) -> &[TimeWindow] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }
}
