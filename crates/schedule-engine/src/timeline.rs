//! Output timeline: placed events and tasks in one chronological sequence.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::expander::EventOccurrence;
use crate::task::Task;
use crate::window::TimeWindow;

/// What a [`PlacedItem`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Event,
    Task,
}

/// One entry of the generated timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedItem {
    /// Id of the originating event or task.
    pub source_id: String,
    pub kind: ItemKind,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl PlacedItem {
    pub fn from_occurrence(occurrence: &EventOccurrence) -> Self {
        Self {
            source_id: occurrence.event_id.clone(),
            kind: ItemKind::Event,
            name: occurrence.name.clone(),
            start: occurrence.start,
            end: occurrence.end,
        }
    }

    pub fn for_task(task: &Task, slot: TimeWindow) -> Self {
        Self {
            source_id: task.id.clone(),
            kind: ItemKind::Task,
            name: task.name.clone(),
            start: slot.start,
            end: slot.end,
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }
}

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Ascending by start; items starting together keep production order
    /// (events before tasks).
    pub items: Vec<PlacedItem>,
    /// Tasks that found no slot before their deadline, in placement order.
    pub unplaced: Vec<Task>,
}

impl GenerationResult {
    pub fn events(&self) -> impl Iterator<Item = &PlacedItem> {
        self.items.iter().filter(|i| i.kind == ItemKind::Event)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &PlacedItem> {
        self.items.iter().filter(|i| i.kind == ItemKind::Task)
    }

    /// The placement of task `id`, if it was placed.
    pub fn placement_of(&self, id: &str) -> Option<&PlacedItem> {
        self.tasks().find(|i| i.source_id == id)
    }

    pub fn items_on(&self, day: NaiveDate) -> impl Iterator<Item = &PlacedItem> {
        self.items.iter().filter(move |i| i.day() == day)
    }

    pub fn is_fully_placed(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Merge occurrences and placed tasks into a [`GenerationResult`].
pub fn assemble(
    occurrences: &[EventOccurrence],
    placed_tasks: Vec<PlacedItem>,
    unplaced: Vec<Task>,
) -> GenerationResult {
    let mut items: Vec<PlacedItem> = occurrences
        .iter()
        .map(PlacedItem::from_occurrence)
        .chain(placed_tasks)
        .collect();

    // Stable: equal starts keep events ahead of tasks.
    items.sort_by_key(|item| item.start);

    GenerationResult { items, unplaced }
}
