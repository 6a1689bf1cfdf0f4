//! Reminder planning.
//!
//! - [`WorkPeriods`]: daily windows, at most one active
//! - [`ReminderConfig`]: weekday filter, interval, message, sound
//! - [`plan_reminders`]: pure computation of today's upcoming instants
//! - [`ReminderScheduler`]: keeps a [`Notifier`] in sync with the config

mod config;
mod notifier;
mod period;
mod scheduler;

pub use config::{
    weekday_ordinal, ReminderConfig, ReminderInterval, SoundChoice, INTERVAL_MINUTE_CHOICES,
    MAX_INTERVAL_HOURS,
};
pub use notifier::{
    LogNotifier, MemoryNotifier, NotificationHandle, Notifier, PendingNotification, REMINDER_TITLE,
};
pub use period::{default_period_bounds, parse_time_of_day, WorkPeriod, WorkPeriodId, WorkPeriods};
pub use scheduler::{plan_reminders, EmptyReason, ReminderPlan, ReminderScheduler};
