//! Greedy, non-backtracking task placement.
//!
//! Tasks are taken most-urgent first (earliest deadline, then highest
//! priority) and each is committed to the first free slot found walking days
//! from today through its deadline day. Later tasks see earlier placements
//! through the shared [`ConflictIndex`], so the order decides the outcome.
//! This is not optimal packing: a different order can sometimes fit more.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::conflict::ConflictIndex;
use crate::slot::find_slot;
use crate::task::{by_urgency, Task};
use crate::timeline::PlacedItem;

/// Incomplete tasks in placement order. The sort is stable, so tasks with
/// equal deadline and priority keep their input order.
pub fn placement_order(tasks: &[Task]) -> Vec<&Task> {
    let mut pending: Vec<&Task> = tasks.iter().filter(|t| !t.is_complete()).collect();
    pending.sort_by(|a, b| by_urgency(a, b));
    pending
}

/// Place `tasks` around whatever `index` already holds.
///
/// Returns the placed tasks (in placement order) and the tasks no day could
/// fit before their deadline. Completed tasks appear in neither list.
pub fn place_tasks(
    tasks: &[Task],
    index: &mut ConflictIndex,
    now: NaiveDateTime,
    config: &GeneratorConfig,
) -> (Vec<PlacedItem>, Vec<Task>) {
    let today = now.date();
    let mut placed = Vec::new();
    let mut unplaced = Vec::new();

    'tasks: for task in placement_order(tasks) {
        let last_day = task.deadline.date();

        for day in today.iter_days().take_while(|d| *d <= last_day) {
            if let Some(slot) = find_slot(task.duration_minutes, day, index, config) {
                index.insert(day, slot.start, slot.end);
                debug!(task = %task.id, start = %slot.start, end = %slot.end, "task placed");
                placed.push(PlacedItem::for_task(task, slot));
                continue 'tasks;
            }
        }

        debug!(task = %task.id, deadline = %task.deadline, "no slot before deadline");
        unplaced.push(task.clone());
    }

    (placed, unplaced)
}
