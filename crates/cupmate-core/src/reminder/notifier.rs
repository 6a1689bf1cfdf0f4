//! Notification collaborator.
//!
//! The scheduler only needs two calls: register a one-shot notification at
//! a local instant, and drop everything still pending. Delivery, permission
//! prompts and sound lookup belong to the implementation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::config::SoundChoice;

/// Title of every reminder notification.
pub const REMINDER_TITLE: &str = "Hydration reminder";

/// Opaque id returned by [`Notifier::schedule_at`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationHandle(pub String);

impl NotificationHandle {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// A notification as handed to the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingNotification {
    pub handle: NotificationHandle,
    pub at: NaiveDateTime,
    pub title: String,
    pub body: String,
    pub sound: SoundChoice,
}

/// Platform notification service.
pub trait Notifier {
    /// Register a one-shot notification at `at` (local time).
    fn schedule_at(&mut self, at: NaiveDateTime, message: &str, sound: SoundChoice) -> NotificationHandle;

    /// Drop every pending notification. Calling it twice is harmless.
    fn cancel_all(&mut self);
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn schedule_at(&mut self, at: NaiveDateTime, message: &str, sound: SoundChoice) -> NotificationHandle {
        (**self).schedule_at(at, message, sound)
    }

    fn cancel_all(&mut self) {
        (**self).cancel_all()
    }
}

/// Keeps pending notifications in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifier {
    pending: Vec<PendingNotification>,
    cancel_calls: usize,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[PendingNotification] {
        &self.pending
    }

    /// How many times `cancel_all` was called.
    pub fn cancel_calls(&self) -> usize {
        self.cancel_calls
    }
}

impl Notifier for MemoryNotifier {
    fn schedule_at(&mut self, at: NaiveDateTime, message: &str, sound: SoundChoice) -> NotificationHandle {
        let handle = NotificationHandle::generate();
        self.pending.push(PendingNotification {
            handle: handle.clone(),
            at,
            title: REMINDER_TITLE.to_string(),
            body: message.to_string(),
            sound,
        });
        handle
    }

    fn cancel_all(&mut self) {
        self.pending.clear();
        self.cancel_calls += 1;
    }
}

/// Emits a log line per request instead of delivering anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn schedule_at(&mut self, at: NaiveDateTime, message: &str, sound: SoundChoice) -> NotificationHandle {
        let handle = NotificationHandle::generate();
        info!(
            handle = %handle.0,
            at = %at.format("%Y-%m-%d %H:%M"),
            sound = %sound,
            title = REMINDER_TITLE,
            message,
            "reminder registered"
        );
        handle
    }

    fn cancel_all(&mut self) {
        info!("pending reminders cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn memory_notifier_records_and_clears() {
        let mut n = MemoryNotifier::new();
        let h1 = n.schedule_at(at(9, 0), "drink", SoundChoice::BirdSong);
        let h2 = n.schedule_at(at(10, 0), "drink", SoundChoice::BirdSong);
        assert_ne!(h1, h2);
        assert_eq!(n.pending().len(), 2);
        assert_eq!(n.pending()[0].title, REMINDER_TITLE);
        assert_eq!(n.pending()[1].sound, SoundChoice::BirdSong);

        n.cancel_all();
        n.cancel_all();
        assert!(n.pending().is_empty());
        assert_eq!(n.cancel_calls(), 2);
    }

    #[test]
    fn boxed_notifier_forwards() {
        let mut n: Box<dyn Notifier> = Box::new(LogNotifier);
        let handle = n.schedule_at(at(9, 0), "drink", SoundChoice::Default);
        assert!(!handle.0.is_empty());
        n.cancel_all();
    }
}
