//! # CupMate Core Library
//!
//! Business logic for the CupMate hydration tracker. The GUI (and the
//! `cupmate` CLI) are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Intake**: per-category accumulated ml, mutated only by add/subtract/reset
//! - **Progress**: pure projection of intake onto a multi-segment ring
//! - **Reminders**: work periods, interval and weekday filter turned into
//!   today's notification instants, pushed to a [`Notifier`]
//! - **Session**: single owner tying the three together, emitting [`Event`]s
//!
//! ## Key Components
//!
//! - [`IntakeStore`]: accumulated intake with floor-at-zero subtraction
//! - [`ProgressRing`]: ring segments and percentage labels
//! - [`ReminderScheduler`]: enabled/disabled state machine over a [`Notifier`]
//! - [`Config`]: TOML configuration (goal and reminder settings)

pub mod config;
pub mod error;
pub mod events;
pub mod intake;
pub mod progress;
pub mod reminder;
pub mod session;

pub use config::{Config, IntakeConfig};
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use events::Event;
pub use intake::{parse_amount, Applied, Category, IntakeSnapshot, IntakeStore};
pub use progress::{DailyGoal, PercentLabel, ProgressRing, RingSegment};
pub use reminder::{
    plan_reminders, EmptyReason, LogNotifier, MemoryNotifier, Notifier, ReminderConfig,
    ReminderInterval, ReminderPlan, ReminderScheduler, SoundChoice, WorkPeriod, WorkPeriods,
};
pub use session::{Session, SessionSnapshot};
