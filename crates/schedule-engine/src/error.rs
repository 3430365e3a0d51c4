//! Error types for schedule-engine operations.
//!
//! Capacity exhaustion is deliberately absent: a task that finds no slot is
//! reported through [`GenerationResult::unplaced`](crate::GenerationResult),
//! never as an error.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
