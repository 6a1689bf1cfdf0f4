use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::intake::Category;
use crate::reminder::EmptyReason;

/// Every state change in a session produces an Event.
/// The presentation layer redraws from them; timestamps are local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    IntakeAdded {
        category: Category,
        amount_ml: f64,
        value_ml: f64,
        total_ml: f64,
        at: NaiveDateTime,
    },
    IntakeSubtracted {
        category: Category,
        amount_ml: f64,
        value_ml: f64,
        total_ml: f64,
        at: NaiveDateTime,
    },
    IntakeReset {
        category: Category,
        total_ml: f64,
        at: NaiveDateTime,
    },
    /// Every category back to zero.
    DayReset {
        at: NaiveDateTime,
    },
    /// Amount text was not a positive number; nothing changed.
    InputRejected {
        category: Category,
        input: String,
        at: NaiveDateTime,
    },
    RemindersScheduled {
        count: usize,
        times: Vec<NaiveDateTime>,
        at: NaiveDateTime,
    },
    /// A pass ran but produced nothing for today.
    NoRemindersToday {
        reason: EmptyReason,
        at: NaiveDateTime,
    },
    RemindersCleared {
        at: NaiveDateTime,
    },
}

impl Event {
    pub fn at(&self) -> NaiveDateTime {
        match self {
            Event::IntakeAdded { at, .. }
            | Event::IntakeSubtracted { at, .. }
            | Event::IntakeReset { at, .. }
            | Event::DayReset { at }
            | Event::InputRejected { at, .. }
            | Event::RemindersScheduled { at, .. }
            | Event::NoRemindersToday { at, .. }
            | Event::RemindersCleared { at } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn serializes_with_type_tag() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let event = Event::IntakeReset {
            category: Category::Water,
            total_ml: 0.0,
            at,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "IntakeReset");
        assert_eq!(json["category"], "water");
        assert_eq!(event.at(), at);
    }
}
