//! Fixed-granularity slot search within a day's working window.
//!
//! Candidates start at the window's opening hour and advance by the configured
//! granularity. The first candidate that ends inside the window and clears the
//! [`ConflictIndex`] wins, so gaps narrower than one step can be missed.

use chrono::NaiveDate;

use crate::config::GeneratorConfig;
use crate::conflict::ConflictIndex;
use crate::window::TimeWindow;

/// Find the earliest free slot of `duration_minutes` on `day`.
///
/// `None` means the day has no capacity for this duration; it is not an error.
pub fn find_slot(
    duration_minutes: i64,
    day: NaiveDate,
    index: &ConflictIndex,
    config: &GeneratorConfig,
) -> Option<TimeWindow> {
    let work = config.work_window(day);
    let step = config.granularity();

    if duration_minutes > work.duration_minutes() {
        return None;
    }

    let mut candidate = work.start;
    while candidate < work.end {
        let slot = TimeWindow::starting_at(candidate, duration_minutes)?;
        // Later candidates only end later.
        if slot.end > work.end {
            return None;
        }
        if !index.has_conflict(day, slot.start, slot.end) {
            return Some(slot);
        }
        candidate += step;
    }

    None
}
