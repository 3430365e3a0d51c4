//! # schedule-engine
//!
//! Deterministic schedule generation for a calendar of fixed events and a
//! backlog of deadline-bearing tasks.
//!
//! Given events (optionally recurring), tasks, an explicit "now", and a
//! [`GeneratorConfig`], [`generate`] expands every event into dated
//! occurrences, then greedily places each incomplete task (earliest deadline
//! first, higher priority breaking ties) into the first free slot of a daily
//! working window before its deadline. The result is one chronologically
//! ordered timeline plus the tasks that did not fit.
//!
//! The engine performs no I/O and never reads the clock, so identical inputs
//! always produce identical output.
//!
//! ## Modules
//!
//! - [`window`] — Half-open time windows and the overlap predicate
//! - [`event`] / [`task`] — Input records and their validation
//! - [`expander`] — Recurrence rule → concrete dated occurrences
//! - [`conflict`] — Per-day index of committed intervals
//! - [`slot`] — Fixed-granularity search for a free slot in one day
//! - [`placer`] — Greedy deadline/priority task placement
//! - [`timeline`] — Merged, ordered output
//! - [`schedule`] — Caller-owned aggregate of one user's events and tasks
//! - [`config`] — Validated generator configuration
//! - [`error`] — Error types

pub mod config;
pub mod conflict;
pub mod error;
pub mod event;
pub mod expander;
pub mod generator;
pub mod placer;
pub mod schedule;
pub mod slot;
pub mod task;
pub mod timeline;
pub mod window;

pub use config::GeneratorConfig;
pub use conflict::ConflictIndex;
pub use error::PlanError;
pub use event::{Event, Frequency, RecurrenceRule};
pub use expander::{expand, expand_all, EventOccurrence};
pub use generator::generate;
pub use placer::place_tasks;
pub use schedule::{EventDraft, Schedule, TaskDraft};
pub use slot::find_slot;
pub use task::Task;
pub use timeline::{GenerationResult, ItemKind, PlacedItem};
pub use window::{overlaps, TimeWindow};
