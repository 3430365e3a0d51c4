//! Generator configuration: working window, scan granularity, recurrence horizon.
//!
//! Every constructor path (including deserialization) goes through
//! [`GeneratorConfig::new`], so an invalid configuration can never reach the
//! generator.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::window::TimeWindow;

pub const DEFAULT_WORK_WINDOW_START: u32 = 9;
pub const DEFAULT_WORK_WINDOW_END: u32 = 18;
pub const DEFAULT_SLOT_GRANULARITY_MINUTES: u32 = 15;
pub const DEFAULT_RECURRENCE_HORIZON_DAYS: u32 = 7;
/// Longest accepted recurrence horizon (about ten years).
pub const MAX_RECURRENCE_HORIZON_DAYS: u32 = 3660;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct GeneratorConfig {
    work_window_start: u32,
    work_window_end: u32,
    slot_granularity_minutes: u32,
    recurrence_horizon_days: u32,
}

impl GeneratorConfig {
    /// # Errors
    /// Returns `PlanError::InvalidConfig` when the granularity or horizon is
    /// zero, the horizon exceeds [`MAX_RECURRENCE_HORIZON_DAYS`], or the work
    /// window is empty, inverted, or runs past hour 24.
    pub fn new(
        work_window_start: u32,
        work_window_end: u32,
        slot_granularity_minutes: u32,
        recurrence_horizon_days: u32,
    ) -> Result<Self> {
        if slot_granularity_minutes == 0 {
            return Err(PlanError::InvalidConfig(
                "slot granularity must be at least 1 minute".to_string(),
            ));
        }
        if recurrence_horizon_days == 0 {
            return Err(PlanError::InvalidConfig(
                "recurrence horizon must be at least 1 day".to_string(),
            ));
        }
        if recurrence_horizon_days > MAX_RECURRENCE_HORIZON_DAYS {
            return Err(PlanError::InvalidConfig(format!(
                "recurrence horizon of {} days exceeds the maximum of {}",
                recurrence_horizon_days, MAX_RECURRENCE_HORIZON_DAYS
            )));
        }
        if work_window_end > 24 {
            return Err(PlanError::InvalidConfig(format!(
                "work window end hour {} is past 24",
                work_window_end
            )));
        }
        if work_window_end <= work_window_start {
            return Err(PlanError::InvalidConfig(format!(
                "work window end hour {} must be after start hour {}",
                work_window_end, work_window_start
            )));
        }
        Ok(Self {
            work_window_start,
            work_window_end,
            slot_granularity_minutes,
            recurrence_horizon_days,
        })
    }

    /// This configuration with a different horizon, validated like [`Self::new`].
    pub fn with_recurrence_horizon_days(self, days: u32) -> Result<Self> {
        Self::new(
            self.work_window_start,
            self.work_window_end,
            self.slot_granularity_minutes,
            days,
        )
    }

    pub fn work_window_start(&self) -> u32 {
        self.work_window_start
    }

    pub fn work_window_end(&self) -> u32 {
        self.work_window_end
    }

    pub fn slot_granularity_minutes(&self) -> u32 {
        self.slot_granularity_minutes
    }

    pub fn recurrence_horizon_days(&self) -> u32 {
        self.recurrence_horizon_days
    }

    /// The working window on `day`. An end hour of 24 means the following midnight.
    pub fn work_window(&self, day: NaiveDate) -> TimeWindow {
        let midnight = day.and_time(NaiveTime::MIN);
        TimeWindow::new(
            midnight + Duration::hours(self.work_window_start as i64),
            midnight + Duration::hours(self.work_window_end as i64),
        )
    }

    pub fn granularity(&self) -> Duration {
        Duration::minutes(self.slot_granularity_minutes as i64)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            work_window_start: DEFAULT_WORK_WINDOW_START,
            work_window_end: DEFAULT_WORK_WINDOW_END,
            slot_granularity_minutes: DEFAULT_SLOT_GRANULARITY_MINUTES,
            recurrence_horizon_days: DEFAULT_RECURRENCE_HORIZON_DAYS,
        }
    }
}

/// Unvalidated wire shape; omitted fields take the defaults.
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    work_window_start: u32,
    work_window_end: u32,
    slot_granularity_minutes: u32,
    recurrence_horizon_days: u32,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            work_window_start: DEFAULT_WORK_WINDOW_START,
            work_window_end: DEFAULT_WORK_WINDOW_END,
            slot_granularity_minutes: DEFAULT_SLOT_GRANULARITY_MINUTES,
            recurrence_horizon_days: DEFAULT_RECURRENCE_HORIZON_DAYS,
        }
    }
}

impl TryFrom<RawConfig> for GeneratorConfig {
    type Error = PlanError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        Self::new(
            raw.work_window_start,
            raw.work_window_end,
            raw.slot_granularity_minutes,
            raw.recurrence_horizon_days,
        )
    }
}
