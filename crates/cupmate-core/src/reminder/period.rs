//! Work periods: daily time windows in which reminders may fire.
//!
//! At most one period is active. The collection stores a single
//! `Option<WorkPeriodId>` selector instead of a flag per period, so there is
//! no way to end up with two enabled periods.

use std::collections::HashSet;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;

/// Unique identifier for a work period.
pub type WorkPeriodId = String;

/// Default window offered when adding a period.
pub fn default_period_bounds() -> (NaiveTime, NaiveTime) {
    (
        NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
        NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
    )
}

/// A time-of-day window, `start < end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPeriod {
    pub id: WorkPeriodId,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl WorkPeriod {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        let period = Self {
            id: uuid::Uuid::new_v4().to_string(),
            start,
            end,
        };
        period.validate()?;
        Ok(period)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start < self.end {
            Ok(())
        } else {
            Err(ValidationError::InvalidTimeRange {
                start: self.start,
                end: self.end,
            })
        }
    }

    /// Length of the window in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time <= self.end
    }

    /// `"09:00 ~ 18:00"`
    pub fn label(&self) -> String {
        format!("{} ~ {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// The configured work periods plus which one is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPeriods {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active: Option<WorkPeriodId>,
    #[serde(default)]
    periods: Vec<WorkPeriod>,
}

impl WorkPeriods {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&WorkPeriod> {
        self.periods.iter().find(|p| p.id == id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&WorkPeriod> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    /// Periods in insertion order, each with its enabled flag.
    pub fn iter(&self) -> impl Iterator<Item = (&WorkPeriod, bool)> + '_ {
        self.periods.iter().map(|p| (p, self.is_enabled(&p.id)))
    }

    /// Every period valid, ids unique, and the selector pointing at an
    /// existing period.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(self.periods.len());
        for period in &self.periods {
            period.validate()?;
            if !seen.insert(period.id.as_str()) {
                return Err(ValidationError::DuplicateWorkPeriod(period.id.clone()));
            }
        }
        match self.active.as_deref() {
            Some(id) if self.get(id).is_none() => {
                Err(ValidationError::UnknownWorkPeriod(id.to_string()))
            }
            _ => Ok(()),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Add a period. The first period added becomes active.
    pub fn add(&mut self, start: NaiveTime, end: NaiveTime) -> Result<WorkPeriodId, ValidationError> {
        let period = WorkPeriod::new(start, end)?;
        let id = period.id.clone();
        if self.periods.is_empty() {
            self.active = Some(id.clone());
        }
        debug!(id = %id, window = %period.label(), "work period added");
        self.periods.push(period);
        Ok(id)
    }

    /// Remove a period. Removing the active one leaves none active.
    pub fn remove(&mut self, id: &str) -> Result<WorkPeriod, ValidationError> {
        let idx = self
            .periods
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ValidationError::UnknownWorkPeriod(id.to_string()))?;
        if self.is_enabled(id) {
            self.active = None;
        }
        debug!(id, "work period removed");
        Ok(self.periods.remove(idx))
    }

    /// Enable `id` exclusively, or disable it.
    ///
    /// Disabling the active period does not promote another one.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), ValidationError> {
        if self.get(id).is_none() {
            return Err(ValidationError::UnknownWorkPeriod(id.to_string()));
        }
        if enabled {
            self.active = Some(id.to_string());
        } else if self.is_enabled(id) {
            self.active = None;
        }
        debug!(id, enabled, "work period toggled");
        Ok(())
    }
}

/// `HH:MM` serde format for time-of-day fields.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    /// Accepts `HH:MM` and `HH:MM:SS`.
    pub fn parse(s: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(s.trim(), FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(s.trim(), "%H:%M:%S"))
    }
}

pub use hhmm::parse as parse_time_of_day;
