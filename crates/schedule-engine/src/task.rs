//! Deadline-bearing backlog tasks.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// Completion level at which a task counts as done and is never placed.
pub const COMPLETE: u8 = 100;

/// A task waiting to be placed into free capacity before its deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub deadline: NaiveDateTime,
    /// Expected duration in minutes; must be positive.
    #[serde(alias = "expectedCompletionTime")]
    pub duration_minutes: i64,
    /// Percent complete, 0–100 inclusive.
    #[serde(default, alias = "completionLevel")]
    pub completion_level: u8,
    /// Higher is more urgent.
    #[serde(default)]
    pub priority: i64,
}

impl Task {
    /// Build a validated task.
    ///
    /// # Errors
    /// Returns `PlanError::InvalidTask` if the duration is not positive or the
    /// completion level exceeds 100.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        deadline: NaiveDateTime,
        duration_minutes: i64,
        completion_level: u8,
        priority: i64,
    ) -> Result<Self> {
        let task = Self {
            id: id.into(),
            name: name.into(),
            deadline,
            duration_minutes,
            completion_level,
            priority,
        };
        task.validate()?;
        Ok(task)
    }

    pub fn validate(&self) -> Result<()> {
        if self.duration_minutes <= 0 {
            return Err(PlanError::InvalidTask(format!(
                "'{}' ({}) has non-positive duration {} minutes",
                self.name, self.id, self.duration_minutes
            )));
        }
        if self.completion_level > COMPLETE {
            return Err(PlanError::InvalidTask(format!(
                "'{}' ({}) has completion level {} outside 0-100",
                self.name, self.id, self.completion_level
            )));
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.completion_level >= COMPLETE
    }
}

/// Placement order: earlier deadline first, then higher priority.
///
/// Equal keys compare `Equal`, so a stable sort keeps input order for them.
pub fn by_urgency(a: &Task, b: &Task) -> Ordering {
    a.deadline
        .cmp(&b.deadline)
        .then_with(|| b.priority.cmp(&a.priority))
}
