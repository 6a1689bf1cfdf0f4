use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::period::WorkPeriods;
use crate::error::ValidationError;

/// Minute values the interval picker offers.
pub const INTERVAL_MINUTE_CHOICES: [u8; 4] = [0, 15, 30, 45];
pub const MAX_INTERVAL_HOURS: u8 = 3;

/// Time between two reminders. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct ReminderInterval {
    hours: u8,
    minutes: u8,
}

#[derive(Serialize, Deserialize)]
struct RawInterval {
    hours: u8,
    minutes: u8,
}

impl ReminderInterval {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidInterval`] when hours exceed 3,
    /// minutes are not one of 0/15/30/45, or both are zero.
    pub fn new(hours: u8, minutes: u8) -> Result<Self, ValidationError> {
        let in_range = hours <= MAX_INTERVAL_HOURS && INTERVAL_MINUTE_CHOICES.contains(&minutes);
        if !in_range || (hours == 0 && minutes == 0) {
            return Err(ValidationError::InvalidInterval { hours, minutes });
        }
        Ok(Self { hours, minutes })
    }

    pub fn hours(self) -> u8 {
        self.hours
    }

    pub fn minutes(self) -> u8 {
        self.minutes
    }

    pub fn as_secs(self) -> i64 {
        i64::from(self.hours) * 3600 + i64::from(self.minutes) * 60
    }

    pub fn as_duration(self) -> Duration {
        Duration::seconds(self.as_secs())
    }
}

impl Default for ReminderInterval {
    fn default() -> Self {
        Self {
            hours: 1,
            minutes: 30,
        }
    }
}

impl TryFrom<RawInterval> for ReminderInterval {
    type Error = ValidationError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Self::new(raw.hours, raw.minutes)
    }
}

impl From<ReminderInterval> for RawInterval {
    fn from(interval: ReminderInterval) -> Self {
        Self {
            hours: interval.hours,
            minutes: interval.minutes,
        }
    }
}

impl std::fmt::Display for ReminderInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h{:02}m", self.hours, self.minutes)
    }
}

/// Notification sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundChoice {
    #[default]
    Default,
    WaterDrop,
    BirdSong,
    Custom,
}

impl SoundChoice {
    pub const ALL: [SoundChoice; 4] = [
        SoundChoice::Default,
        SoundChoice::WaterDrop,
        SoundChoice::BirdSong,
        SoundChoice::Custom,
    ];

    /// Bundled sound resource, `None` for the platform default.
    pub fn sound_file(self) -> Option<&'static str> {
        match self {
            SoundChoice::Default => None,
            SoundChoice::WaterDrop => Some("waterdrop.caf"),
            SoundChoice::BirdSong => Some("bird.caf"),
            SoundChoice::Custom => Some("custom.caf"),
        }
    }
}

impl std::fmt::Display for SoundChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoundChoice::Default => write!(f, "default"),
            SoundChoice::WaterDrop => write!(f, "water_drop"),
            SoundChoice::BirdSong => write!(f, "bird_song"),
            SoundChoice::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for SoundChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "default" => Ok(SoundChoice::Default),
            "water_drop" | "waterdrop" => Ok(SoundChoice::WaterDrop),
            "bird_song" | "bird" => Ok(SoundChoice::BirdSong),
            "custom" => Ok(SoundChoice::Custom),
            other => Err(format!("unknown sound '{other}'")),
        }
    }
}

/// ISO weekday ordinal of `date`, 1 = Monday ... 7 = Sunday.
pub fn weekday_ordinal(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

fn default_true() -> bool {
    true
}

fn default_weekdays() -> BTreeSet<u8> {
    (1..=5).collect()
}

fn default_message() -> String {
    "Time to drink some water 💧".to_string()
}

/// Everything the reminder screen edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Weekday ordinals, 1 = Monday ... 7 = Sunday.
    #[serde(default = "default_weekdays")]
    pub active_weekdays: BTreeSet<u8>,
    #[serde(default = "default_true")]
    pub workday_filter_enabled: bool,
    #[serde(default = "default_message")]
    pub message: String,
    #[serde(default)]
    pub sound: SoundChoice,
    #[serde(default)]
    pub interval: ReminderInterval,
    #[serde(default)]
    pub work_periods: WorkPeriods,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            active_weekdays: default_weekdays(),
            workday_filter_enabled: true,
            message: default_message(),
            sound: SoundChoice::default(),
            interval: ReminderInterval::default(),
            work_periods: WorkPeriods::new(),
        }
    }
}

impl ReminderConfig {
    /// Check every field that could make a schedule meaningless.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ReminderInterval::new(self.interval.hours, self.interval.minutes)?;
        if let Some(&bad) = self.active_weekdays.iter().find(|d| !(1..=7).contains(*d)) {
            return Err(ValidationError::InvalidWeekday(bad));
        }
        self.work_periods.validate()
    }

    /// Whether the weekday filter lets reminders through on `date`.
    pub fn allows_date(&self, date: NaiveDate) -> bool {
        !self.workday_filter_enabled || self.active_weekdays.contains(&weekday_ordinal(date))
    }

    /// Flip one weekday in the filter, as the weekday picker does.
    pub fn toggle_weekday(&mut self, weekday: u8) -> Result<(), ValidationError> {
        if !(1..=7).contains(&weekday) {
            return Err(ValidationError::InvalidWeekday(weekday));
        }
        if !self.active_weekdays.remove(&weekday) {
            self.active_weekdays.insert(weekday);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_is_rejected() {
        assert_eq!(
            ReminderInterval::new(0, 0),
            Err(ValidationError::InvalidInterval { hours: 0, minutes: 0 })
        );
    }

    #[test]
    fn interval_bounds() {
        assert!(ReminderInterval::new(0, 15).is_ok());
        assert!(ReminderInterval::new(3, 45).is_ok());
        assert!(ReminderInterval::new(4, 0).is_err());
        assert!(ReminderInterval::new(1, 20).is_err());
        assert_eq!(ReminderInterval::new(1, 30).unwrap().as_secs(), 5400);
    }

    #[test]
    fn zero_interval_in_toml_fails_to_load() {
        let result: Result<ReminderConfig, _> = toml::from_str(
            r#"
            [interval]
            hours = 0
            minutes = 0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn defaults_match_reminder_screen() {
        let cfg = ReminderConfig::default();
        assert!(!cfg.enabled);
        assert!(cfg.workday_filter_enabled);
        assert_eq!(cfg.active_weekdays, (1..=5).collect::<BTreeSet<u8>>());
        assert_eq!(cfg.interval, ReminderInterval::new(1, 30).unwrap());
        assert_eq!(cfg.sound, SoundChoice::Default);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn weekday_filter() {
        let cfg = ReminderConfig::default();
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2026, 10, 24).unwrap();
        assert_eq!(weekday_ordinal(monday), 1);
        assert_eq!(weekday_ordinal(saturday), 6);
        assert!(cfg.allows_date(monday));
        assert!(!cfg.allows_date(saturday));

        let unfiltered = ReminderConfig {
            workday_filter_enabled: false,
            ..ReminderConfig::default()
        };
        assert!(unfiltered.allows_date(saturday));
    }

    #[test]
    fn toggle_weekday_flips_membership() {
        let mut cfg = ReminderConfig::default();
        cfg.toggle_weekday(6).unwrap();
        assert!(cfg.active_weekdays.contains(&6));
        cfg.toggle_weekday(6).unwrap();
        assert!(!cfg.active_weekdays.contains(&6));
        assert_eq!(cfg.toggle_weekday(8), Err(ValidationError::InvalidWeekday(8)));
    }

    #[test]
    fn out_of_range_weekday_fails_validation() {
        let mut cfg = ReminderConfig::default();
        cfg.active_weekdays.insert(0);
        assert_eq!(cfg.validate(), Err(ValidationError::InvalidWeekday(0)));
    }

    #[test]
    fn sound_files() {
        assert_eq!(SoundChoice::Default.sound_file(), None);
        assert_eq!(SoundChoice::WaterDrop.sound_file(), Some("waterdrop.caf"));
        assert_eq!("bird-song".parse::<SoundChoice>().unwrap(), SoundChoice::BirdSong);
        for s in SoundChoice::ALL {
            assert_eq!(s.to_string().parse::<SoundChoice>().unwrap(), s);
        }
    }
}
