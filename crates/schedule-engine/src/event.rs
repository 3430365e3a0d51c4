//! Fixed calendar events and their recurrence rules.
//!
//! Events are authoritative: the generator never moves or rejects one for
//! overlapping something else. The only rejection is structural (an event
//! whose end does not follow its start), and it happens at construction or
//! validation time, never during expansion.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// How often an event repeats.
///
/// Serialized upper-case (`"DAILY"`); lower-case spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    #[default]
    #[serde(alias = "none")]
    None,
    #[serde(alias = "daily")]
    Daily,
    #[serde(alias = "weekly")]
    Weekly,
    /// Expands to the event's own single occurrence; no month-stepping is done.
    #[serde(alias = "monthly")]
    Monthly,
}

/// Recurrence rule attached to an [`Event`].
///
/// `weekdays` holds indices 0–6 with 0 = Sunday and is only consulted for
/// [`Frequency::Weekly`]. A weekly rule with no weekdays yields no occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecurrenceRule {
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default, alias = "daysOfWeek", skip_serializing_if = "BTreeSet::is_empty")]
    pub weekdays: BTreeSet<u8>,
}

impl RecurrenceRule {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn daily() -> Self {
        Self {
            frequency: Frequency::Daily,
            weekdays: BTreeSet::new(),
        }
    }

    pub fn weekly<I>(days: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        Self {
            frequency: Frequency::Weekly,
            weekdays: days
                .into_iter()
                .map(|d| d.num_days_from_sunday() as u8)
                .collect(),
        }
    }

    pub fn monthly() -> Self {
        Self {
            frequency: Frequency::Monthly,
            weekdays: BTreeSet::new(),
        }
    }

    /// Whether a weekly rule fires on `weekday`.
    pub fn includes(&self, weekday: Weekday) -> bool {
        self.weekdays
            .contains(&(weekday.num_days_from_sunday() as u8))
    }

    fn validate(&self) -> std::result::Result<(), String> {
        match self.weekdays.iter().find(|&&d| d > 6) {
            Some(bad) => Err(format!("weekday index {} is outside 0-6", bad)),
            None => Ok(()),
        }
    }
}

/// A user's fixed calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default, alias = "repeat")]
    pub recurrence: RecurrenceRule,
}

impl Event {
    /// Build a validated event.
    ///
    /// # Errors
    /// Returns `PlanError::InvalidEvent` if `end <= start` or the rule names a
    /// weekday index above 6.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        recurrence: RecurrenceRule,
    ) -> Result<Self> {
        let event = Self {
            id: id.into(),
            name: name.into(),
            start,
            end,
            recurrence,
        };
        event.validate()?;
        Ok(event)
    }

    /// Re-check the construction invariants, e.g. after deserialization.
    pub fn validate(&self) -> Result<()> {
        if self.end <= self.start {
            return Err(PlanError::InvalidEvent(format!(
                "'{}' ({}) ends at {} which is not after its start {}",
                self.name, self.id, self.end, self.start
            )));
        }
        self.recurrence
            .validate()
            .map_err(|msg| PlanError::InvalidEvent(format!("'{}' ({}): {}", self.name, self.id, msg)))
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}
