//! The generation entry point: validate, expand, place, assemble.

use chrono::NaiveDateTime;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::conflict::ConflictIndex;
use crate::error::Result;
use crate::event::Event;
use crate::expander::expand_all;
use crate::placer::place_tasks;
use crate::task::Task;
use crate::timeline::{assemble, GenerationResult};

/// Generate a timeline from fixed events and pending tasks.
///
/// `now` is never read from the system clock; pass the same value to get the
/// same result. Recurring events expand over `now`'s date plus the configured
/// horizon, and tasks are placed from `now`'s date onward.
///
/// # Errors
/// Returns `PlanError::InvalidEvent` or `PlanError::InvalidTask` for the first
/// malformed record; nothing is placed in that case. Tasks that simply do not
/// fit are reported in [`GenerationResult::unplaced`].
pub fn generate(
    events: &[Event],
    tasks: &[Task],
    now: NaiveDateTime,
    config: &GeneratorConfig,
) -> Result<GenerationResult> {
    for event in events {
        event.validate()?;
    }
    for task in tasks {
        task.validate()?;
    }

    let occurrences = expand_all(events, now.date(), config.recurrence_horizon_days());

    let mut index = ConflictIndex::new();
    for occurrence in &occurrences {
        index.insert(occurrence.day(), occurrence.start, occurrence.end);
    }

    let (placed, unplaced) = place_tasks(tasks, &mut index, now, config);

    info!(
        occurrences = occurrences.len(),
        placed = placed.len(),
        unplaced = unplaced.len(),
        "schedule generated"
    );

    Ok(assemble(&occurrences, placed, unplaced))
}
