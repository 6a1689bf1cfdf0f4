//! Reminder planning and the enabled/disabled state machine.
//!
//! ```text
//! Disabled --enable(now)--> Enabled --schedule_reminders(now)--> Enabled
//!    ^                         |
//!    +-------disable()---------+
//! ```
//!
//! Every pass starts by cancelling whatever the notifier still holds, so a
//! pass is a full replacement of today's reminders.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::{weekday_ordinal, ReminderConfig};
use super::notifier::{NotificationHandle, Notifier};
use super::period::WorkPeriods;
use crate::error::{CoreError, Result, ValidationError};

/// Why a pass produced no reminders. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// Reminders are switched off.
    Disabled,
    /// Weekday filter excludes today.
    NotActiveWeekday,
    /// No work period is enabled.
    NoActivePeriod,
    /// Every slot in the active period is already past.
    NoUpcomingTimes,
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyReason::Disabled => write!(f, "reminders are disabled"),
            EmptyReason::NotActiveWeekday => write!(f, "today is not an active weekday"),
            EmptyReason::NoActivePeriod => write!(f, "no work period is enabled"),
            EmptyReason::NoUpcomingTimes => write!(f, "no reminder times left today"),
        }
    }
}

/// Outcome of a planning pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReminderPlan {
    Scheduled { times: Vec<NaiveDateTime> },
    Empty { reason: EmptyReason },
}

impl ReminderPlan {
    pub fn times(&self) -> &[NaiveDateTime] {
        match self {
            ReminderPlan::Scheduled { times } => times,
            ReminderPlan::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.times().is_empty()
    }

    fn empty(reason: EmptyReason) -> Self {
        ReminderPlan::Empty { reason }
    }
}

/// Compute today's upcoming reminder instants without side effects.
///
/// Slots start at the active period's start and step by the interval while
/// they are not later than the period's end. Only slots strictly after `now`
/// are kept.
///
/// # Errors
///
/// Returns a validation error when the configuration is invalid. Nothing is
/// planned in that case.
pub fn plan_reminders(config: &ReminderConfig, now: NaiveDateTime) -> Result<ReminderPlan> {
    config.validate()?;

    if !config.enabled {
        return Ok(ReminderPlan::empty(EmptyReason::Disabled));
    }

    let today = now.date();
    if !config.allows_date(today) {
        debug!(weekday = weekday_ordinal(today), "weekday filtered out");
        return Ok(ReminderPlan::empty(EmptyReason::NotActiveWeekday));
    }

    let Some(period) = config.work_periods.active() else {
        return Ok(ReminderPlan::empty(EmptyReason::NoActivePeriod));
    };

    let step = config.interval.as_duration();
    let end = today.and_time(period.end);
    let mut times = Vec::new();
    let mut slot = today.and_time(period.start);
    while slot <= end {
        if slot > now {
            times.push(slot);
        }
        slot += step;
    }
    times.sort();

    if times.is_empty() {
        return Ok(ReminderPlan::empty(EmptyReason::NoUpcomingTimes));
    }
    Ok(ReminderPlan::Scheduled { times })
}

/// Owns the reminder configuration and keeps the notifier in sync with it.
#[derive(Debug)]
pub struct ReminderScheduler<N: Notifier> {
    config: ReminderConfig,
    notifier: N,
    scheduled: Vec<(NaiveDateTime, NotificationHandle)>,
    last_plan: Option<ReminderPlan>,
}

impl<N: Notifier> ReminderScheduler<N> {
    /// Start in the disabled state, whatever `config.enabled` says.
    ///
    /// Anything the notifier still holds from an earlier run is cancelled.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `config` is invalid.
    pub fn new(mut config: ReminderConfig, mut notifier: N) -> Result<Self> {
        config.validate()?;
        config.enabled = false;
        notifier.cancel_all();
        Ok(Self {
            config,
            notifier,
            scheduled: Vec::new(),
            last_plan: None,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &ReminderConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Today's upcoming instants from the last pass, ascending.
    pub fn scheduled_times(&self) -> Vec<NaiveDateTime> {
        self.scheduled.iter().map(|(at, _)| *at).collect()
    }

    pub fn handles(&self) -> impl Iterator<Item = &NotificationHandle> + '_ {
        self.scheduled.iter().map(|(_, h)| h)
    }

    /// Result of the last pass, `None` before the first one.
    pub fn last_plan(&self) -> Option<&ReminderPlan> {
        self.last_plan.as_ref()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change the configuration.
    ///
    /// The closure's result is validated before it is kept; an invalid
    /// change is rolled back. The enabled flag is not touched here, use
    /// [`ReminderScheduler::enable`] and [`ReminderScheduler::disable`].
    /// While enabled, a kept change is followed by a pass for `now`, whose
    /// plan is returned.
    ///
    /// # Errors
    ///
    /// Returns the validation error of the rejected change.
    pub fn update_config<F>(&mut self, now: NaiveDateTime, f: F) -> Result<Option<&ReminderPlan>>
    where
        F: FnOnce(&mut ReminderConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.enabled = self.config.enabled;
        if let Err(e) = candidate.validate() {
            warn!(error = %e, "rejected reminder configuration change");
            return Err(e.into());
        }
        self.config = candidate;
        self.reschedule_if_enabled(now)
    }

    /// Switch reminders on and run a pass.
    ///
    /// # Errors
    ///
    /// Fails with "cannot enable: invalid configuration" and stays disabled
    /// when the configuration does not validate.
    pub fn enable(&mut self, now: NaiveDateTime) -> Result<&ReminderPlan> {
        if let Err(e) = self.config.validate() {
            warn!(error = %e, "cannot enable reminders");
            return Err(CoreError::Config(e.cannot_enable()));
        }
        self.config.enabled = true;
        info!("reminders enabled");
        self.schedule_reminders(now)
    }

    /// Switch reminders off and cancel everything pending.
    pub fn disable(&mut self) {
        self.config.enabled = false;
        self.clear();
        self.last_plan = Some(ReminderPlan::empty(EmptyReason::Disabled));
        info!("reminders disabled");
    }

    /// Replace today's reminders with a fresh plan for `now`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the configuration is invalid. Pending
    /// notifications are cancelled even then.
    pub fn schedule_reminders(&mut self, now: NaiveDateTime) -> Result<&ReminderPlan> {
        self.clear();
        let plan = match plan_reminders(&self.config, now) {
            Ok(plan) => plan,
            Err(e) => {
                self.last_plan = None;
                return Err(e);
            }
        };

        for &at in plan.times() {
            let handle = self
                .notifier
                .schedule_at(at, &self.config.message, self.config.sound);
            self.scheduled.push((at, handle));
        }
        self.scheduled.sort_by_key(|(at, _)| *at);

        match &plan {
            ReminderPlan::Scheduled { times } => {
                info!(count = times.len(), interval = %self.config.interval, "reminders scheduled");
            }
            ReminderPlan::Empty { reason } => {
                info!(%reason, "no reminders today");
            }
        }
        let plan: &ReminderPlan = self.last_plan.insert(plan);
        Ok(plan)
    }

    /// Mutable access to the work periods, followed by a validation pass
    /// and, while enabled, a scheduling pass for `now`.
    ///
    /// # Errors
    ///
    /// Propagates the closure's error, or a validation error if the result
    /// is inconsistent (the change is rolled back).
    pub fn edit_periods<F, T>(&mut self, now: NaiveDateTime, f: F) -> Result<T>
    where
        F: FnOnce(&mut WorkPeriods) -> Result<T, ValidationError>,
    {
        let mut periods = self.config.work_periods.clone();
        let out = f(&mut periods)?;
        periods.validate()?;
        self.config.work_periods = periods;
        self.reschedule_if_enabled(now)?;
        Ok(out)
    }

    fn reschedule_if_enabled(&mut self, now: NaiveDateTime) -> Result<Option<&ReminderPlan>> {
        if self.config.enabled {
            self.schedule_reminders(now).map(Some)
        } else {
            Ok(None)
        }
    }

    fn clear(&mut self) {
        self.notifier.cancel_all();
        self.scheduled.clear();
    }
}
