//! Caller-owned schedule aggregate: one user's events and tasks.
//!
//! A `Schedule` is a plain value. Hosts create one per owner, mutate it
//! through the methods below, and call [`Schedule::generate`] when they want a
//! timeline. Nothing here is global, and concurrent use of one schedule must
//! be serialized by the caller.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::{PlanError, Result};
use crate::event::{Event, RecurrenceRule};
use crate::generator::generate;
use crate::task::{by_urgency, Task, COMPLETE};
use crate::timeline::GenerationResult;

/// Fields of an event as supplied by the user; the schedule assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub recurrence: RecurrenceRule,
}

/// Fields of a task as supplied by the user; the schedule assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub name: String,
    pub deadline: NaiveDateTime,
    pub duration_minutes: i64,
    #[serde(default)]
    pub completion_level: u8,
    #[serde(default)]
    pub priority: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub owner: String,
    events: Vec<Event>,
    tasks: Vec<Task>,
    next_event_id: u64,
    next_task_id: u64,
}

impl Schedule {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            events: Vec::new(),
            tasks: Vec::new(),
            next_event_id: 1,
            next_task_id: 1,
        }
    }

    /// Drop all events and tasks and restart id numbering.
    pub fn clear(&mut self) {
        self.events.clear();
        self.tasks.clear();
        self.next_event_id = 1;
        self.next_task_id = 1;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    // ── Events ──────────────────────────────────────────────────────────────

    /// # Errors
    /// `PlanError::InvalidEvent` if the draft fails validation; no id is consumed.
    pub fn add_event(&mut self, draft: EventDraft) -> Result<&Event> {
        let event = Event::new(
            self.next_event_id.to_string(),
            draft.name,
            draft.start,
            draft.end,
            draft.recurrence,
        )?;
        self.next_event_id += 1;
        let pos = self.events.len();
        self.events.push(event);
        Ok(&self.events[pos])
    }

    pub fn edit_event(&mut self, id: &str, draft: EventDraft) -> Result<&Event> {
        let pos = self.event_position(id)?;
        let event = Event::new(id, draft.name, draft.start, draft.end, draft.recurrence)?;
        self.events[pos] = event;
        Ok(&self.events[pos])
    }

    pub fn delete_event(&mut self, id: &str) -> Result<Event> {
        let pos = self.event_position(id)?;
        Ok(self.events.remove(pos))
    }

    /// Events ordered by start time.
    pub fn sorted_events(&self) -> Vec<&Event> {
        let mut sorted: Vec<&Event> = self.events.iter().collect();
        sorted.sort_by_key(|e| e.start);
        sorted
    }

    // ── Tasks ───────────────────────────────────────────────────────────────

    /// # Errors
    /// `PlanError::InvalidTask` if the draft fails validation; no id is consumed.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<&Task> {
        let task = Task::new(
            self.next_task_id.to_string(),
            draft.name,
            draft.deadline,
            draft.duration_minutes,
            draft.completion_level,
            draft.priority,
        )?;
        self.next_task_id += 1;
        let pos = self.tasks.len();
        self.tasks.push(task);
        Ok(&self.tasks[pos])
    }

    pub fn edit_task(&mut self, id: &str, draft: TaskDraft) -> Result<&Task> {
        let pos = self.task_position(id)?;
        let task = Task::new(
            id,
            draft.name,
            draft.deadline,
            draft.duration_minutes,
            draft.completion_level,
            draft.priority,
        )?;
        self.tasks[pos] = task;
        Ok(&self.tasks[pos])
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let pos = self.task_position(id)?;
        Ok(self.tasks.remove(pos))
    }

    /// Set a task's completion level, clamped into 0–100.
    pub fn update_task_completion(&mut self, id: &str, level: i64) -> Result<&Task> {
        let pos = self.task_position(id)?;
        self.tasks[pos].completion_level = level.clamp(0, COMPLETE as i64) as u8;
        Ok(&self.tasks[pos])
    }

    /// Tasks by deadline, then priority (highest first).
    pub fn sorted_tasks(&self) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        sorted.sort_by(|a, b| by_urgency(a, b));
        sorted
    }

    pub fn pending_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.is_complete()).collect()
    }

    pub fn completed_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_complete()).collect()
    }

    // ── Generation ──────────────────────────────────────────────────────────

    pub fn generate(&self, now: NaiveDateTime, config: &GeneratorConfig) -> Result<GenerationResult> {
        generate(&self.events, &self.tasks, now, config)
    }

    fn event_position(&self, id: &str) -> Result<usize> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| PlanError::EventNotFound(id.to_string()))
    }

    fn task_position(&self, id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| PlanError::TaskNotFound(id.to_string()))
    }
}
