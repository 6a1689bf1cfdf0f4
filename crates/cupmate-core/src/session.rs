//! One user's day: intake, goal and reminders behind a single owner.
//!
//! Every mutation goes through `&mut Session` and returns the [`Event`] it
//! produced. A host that serves several clients keeps one `Session` per
//! client behind its own lock.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::intake::{parse_amount, Applied, Category, IntakeSnapshot, IntakeStore};
use crate::progress::{DailyGoal, ProgressRing};
use crate::reminder::{
    Notifier, ReminderConfig, ReminderPlan, ReminderScheduler, WorkPeriods,
};

/// Everything the presentation layer draws, taken at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub intake: IntakeSnapshot,
    pub total_ml: f64,
    pub ring: ProgressRing,
    pub reminders_enabled: bool,
    pub scheduled_times: Vec<NaiveDateTime>,
}

#[derive(Debug)]
pub struct Session<N: Notifier> {
    intake: IntakeStore,
    goal: DailyGoal,
    reminders: ReminderScheduler<N>,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<N: Notifier> Session<N> {
    /// Fresh session: all intake at zero, reminders disabled.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `reminders` is invalid.
    pub fn new(goal: DailyGoal, reminders: ReminderConfig, notifier: N) -> Result<Self> {
        Ok(Self {
            intake: IntakeStore::new(),
            goal,
            reminders: ReminderScheduler::new(reminders, notifier)?,
        })
    }

    /// Session seeded from the user's configuration file.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the reminder section is invalid.
    pub fn from_config(config: &Config, notifier: N) -> Result<Self> {
        Self::new(config.intake.daily_goal, config.reminders.clone(), notifier)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn intake(&self) -> &IntakeStore {
        &self.intake
    }

    pub fn goal(&self) -> DailyGoal {
        self.goal
    }

    pub fn total(&self) -> f64 {
        self.intake.total()
    }

    pub fn progress(&self) -> ProgressRing {
        ProgressRing::compute(&self.intake.snapshot(), self.goal)
    }

    pub fn reminders(&self) -> &ReminderScheduler<N> {
        &self.reminders
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let intake = self.intake.snapshot();
        SessionSnapshot {
            total_ml: intake.total(),
            ring: ProgressRing::compute(&intake, self.goal),
            intake,
            reminders_enabled: self.reminders.is_enabled(),
            scheduled_times: self.reminders.scheduled_times(),
        }
    }

    // ── Intake ───────────────────────────────────────────────────────

    pub fn add_intake(&mut self, category: Category, amount: f64) -> Event {
        match self.intake.add(category, amount) {
            Applied::Applied => Event::IntakeAdded {
                category,
                amount_ml: amount,
                value_ml: self.intake.get(category),
                total_ml: self.intake.total(),
                at: local_now(),
            },
            Applied::Ignored => rejected(category, amount.to_string()),
        }
    }

    /// Add from raw text input, e.g. a number field.
    pub fn add_intake_text(&mut self, category: Category, text: &str) -> Event {
        match parse_amount(text) {
            Some(amount) => self.add_intake(category, amount),
            None => rejected(category, text.to_string()),
        }
    }

    pub fn subtract_intake(&mut self, category: Category, amount: f64) -> Event {
        match self.intake.subtract(category, amount) {
            Applied::Applied => Event::IntakeSubtracted {
                category,
                amount_ml: amount,
                value_ml: self.intake.get(category),
                total_ml: self.intake.total(),
                at: local_now(),
            },
            Applied::Ignored => rejected(category, amount.to_string()),
        }
    }

    pub fn subtract_intake_text(&mut self, category: Category, text: &str) -> Event {
        match parse_amount(text) {
            Some(amount) => self.subtract_intake(category, amount),
            None => rejected(category, text.to_string()),
        }
    }

    pub fn reset_intake(&mut self, category: Category) -> Event {
        self.intake.reset(category);
        Event::IntakeReset {
            category,
            total_ml: self.intake.total(),
            at: local_now(),
        }
    }

    pub fn reset_day(&mut self) -> Event {
        self.intake.reset_all();
        Event::DayReset { at: local_now() }
    }

    // ── Reminders ────────────────────────────────────────────────────

    /// # Errors
    ///
    /// "cannot enable: invalid configuration" when the config does not validate.
    pub fn enable_reminders(&mut self, now: NaiveDateTime) -> Result<Event> {
        let plan = self.reminders.enable(now)?;
        Ok(plan_event(plan, now))
    }

    pub fn disable_reminders(&mut self) -> Event {
        self.reminders.disable();
        Event::RemindersCleared { at: local_now() }
    }

    /// Run a scheduling pass for `now`, e.g. at the start of a new day.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the configuration is invalid.
    pub fn reschedule(&mut self, now: NaiveDateTime) -> Result<Event> {
        let plan = self.reminders.schedule_reminders(now)?;
        Ok(plan_event(plan, now))
    }

    /// Edit the reminder configuration; reschedules when reminders are on.
    ///
    /// # Errors
    ///
    /// Returns the validation error of a rejected change (nothing changes).
    pub fn update_reminders<F>(&mut self, now: NaiveDateTime, f: F) -> Result<Option<Event>>
    where
        F: FnOnce(&mut ReminderConfig),
    {
        let plan = self.reminders.update_config(now, f)?;
        Ok(plan.map(|plan| plan_event(plan, now)))
    }

    /// Add, remove or toggle work periods; reschedules when reminders are on.
    ///
    /// # Errors
    ///
    /// Propagates the closure's validation error (nothing changes).
    pub fn edit_work_periods<F, T>(&mut self, now: NaiveDateTime, f: F) -> Result<T>
    where
        F: FnOnce(&mut WorkPeriods) -> Result<T, ValidationError>,
    {
        self.reminders.edit_periods(now, f)
    }
}

fn rejected(category: Category, input: String) -> Event {
    Event::InputRejected {
        category,
        input,
        at: local_now(),
    }
}

fn plan_event(plan: &ReminderPlan, now: NaiveDateTime) -> Event {
    match plan {
        ReminderPlan::Scheduled { times } => Event::RemindersScheduled {
            count: times.len(),
            times: times.clone(),
            at: now,
        },
        ReminderPlan::Empty { reason } => Event::NoRemindersToday {
            reason: *reason,
            at: now,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::{EmptyReason, MemoryNotifier, ReminderInterval};
    use chrono::{NaiveDate, NaiveTime};

    fn monday(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn session() -> Session<MemoryNotifier> {
        Session::new(DailyGoal::default(), ReminderConfig::default(), MemoryNotifier::new()).unwrap()
    }

    #[test]
    fn intake_events_carry_running_totals() {
        let mut s = session();
        s.add_intake(Category::Water, 500.0);
        let event = s.add_intake(Category::Coffee, 300.0);
        match event {
            Event::IntakeAdded { value_ml, total_ml, .. } => {
                assert_eq!(value_ml, 300.0);
                assert_eq!(total_ml, 800.0);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(s.total(), 800.0);
    }

    #[test]
    fn invalid_text_is_reported_not_applied() {
        let mut s = session();
        let event = s.add_intake_text(Category::Water, "a lot");
        assert!(matches!(event, Event::InputRejected { ref input, .. } if input == "a lot"));
        let event = s.subtract_intake(Category::Water, -1.0);
        assert!(matches!(event, Event::InputRejected { .. }));
        assert_eq!(s.total(), 0.0);
    }

    #[test]
    fn snapshot_reflects_ring() {
        let mut s = session();
        s.add_intake_text(Category::Water, "1500");
        let snap = s.snapshot();
        assert_eq!(snap.total_ml, 1500.0);
        assert_eq!(snap.ring.percent(Category::Water), Some(50));
        assert!(!snap.reminders_enabled);
        assert!(snap.scheduled_times.is_empty());
    }

    #[test]
    fn reset_day_clears_everything() {
        let mut s = session();
        s.add_intake(Category::Soup, 250.0);
        s.add_intake(Category::Drink, 250.0);
        s.reset_intake(Category::Soup);
        assert_eq!(s.total(), 250.0);
        assert!(matches!(s.reset_day(), Event::DayReset { .. }));
        assert_eq!(s.total(), 0.0);
    }

    #[test]
    fn enable_without_period_reports_empty_day() {
        let mut s = session();
        let event = s.enable_reminders(monday(8, 0)).unwrap();
        assert_eq!(
            event,
            Event::NoRemindersToday {
                reason: EmptyReason::NoActivePeriod,
                at: monday(8, 0)
            }
        );
    }

    #[test]
    fn editing_periods_while_enabled_reschedules() {
        let mut s = session();
        s.enable_reminders(monday(8, 0)).unwrap();
        s.edit_work_periods(monday(8, 0), |p| p.add(t(9, 0), t(12, 0)))
            .unwrap();
        assert_eq!(
            s.reminders().scheduled_times(),
            vec![monday(9, 0), monday(10, 30), monday(12, 0)]
        );

        let event = s
            .update_reminders(monday(8, 0), |c| {
                c.interval = ReminderInterval::new(3, 0).unwrap();
            })
            .unwrap();
        assert!(matches!(event, Some(Event::RemindersScheduled { count: 2, .. })));
    }

    #[test]
    fn disable_clears_notifier() {
        let mut s = session();
        s.edit_work_periods(monday(8, 0), |p| p.add(t(9, 0), t(12, 0)))
            .unwrap();
        s.enable_reminders(monday(8, 0)).unwrap();
        assert_eq!(s.reminders().notifier().pending().len(), 3);
        assert!(matches!(s.disable_reminders(), Event::RemindersCleared { .. }));
        assert!(s.reminders().notifier().pending().is_empty());
    }
}
