//! Recurrence expansion -- turns event definitions into concrete dated occurrences.
//!
//! Expansion is bounded by a horizon of `horizon_days + 1` calendar days
//! starting at `horizon_start` (both ends inclusive). Non-recurring and
//! monthly events are not horizon-bound: each yields exactly its own slot.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::event::{Event, Frequency};
use crate::window::TimeWindow;

/// One concrete dated instance of a (possibly recurring) event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOccurrence {
    pub event_id: String,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl EventOccurrence {
    fn original(event: &Event) -> Self {
        Self {
            event_id: event.id.clone(),
            name: event.name.clone(),
            start: event.start,
            end: event.end,
        }
    }

    /// `None` when the end would fall past chrono's last representable date.
    fn repeat_of(event: &Event, start: NaiveDateTime) -> Option<Self> {
        Some(Self {
            event_id: event.id.clone(),
            name: event.name.clone(),
            start,
            end: start.checked_add_signed(event.duration())?,
        })
    }

    /// The calendar day this occurrence is filed under.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }
}

/// Expand one event into its occurrences within the horizon.
///
/// The event is assumed valid (see [`Event::validate`]). Recurring
/// occurrences keep the event's hour, minute and duration; seconds are
/// dropped. Results are in chronological order.
pub fn expand(event: &Event, horizon_start: NaiveDate, horizon_days: u32) -> Vec<EventOccurrence> {
    let horizon = horizon_start
        .iter_days()
        .take((horizon_days as usize).saturating_add(1));
    let start = event.start.time();
    let time_of_day = NaiveTime::from_hms_opt(start.hour(), start.minute(), 0).unwrap_or(start);

    match event.recurrence.frequency {
        Frequency::None | Frequency::Monthly => vec![EventOccurrence::original(event)],
        Frequency::Daily => horizon
            .filter_map(|day| EventOccurrence::repeat_of(event, day.and_time(time_of_day)))
            .collect(),
        Frequency::Weekly => horizon
            .filter(|day| event.recurrence.includes(day.weekday()))
            .filter_map(|day| EventOccurrence::repeat_of(event, day.and_time(time_of_day)))
            .collect(),
    }
}

/// Expand every event, preserving input order (all occurrences of the first
/// event, then the second, and so on).
pub fn expand_all(events: &[Event], horizon_start: NaiveDate, horizon_days: u32) -> Vec<EventOccurrence> {
    events
        .iter()
        .flat_map(|event| expand(event, horizon_start, horizon_days))
        .collect()
}
