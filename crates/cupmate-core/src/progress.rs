//! Progress ring projection.
//!
//! Splits a full circle into one contiguous arc per [`Category`], each sized
//! by that category's share of `max(total, goal)`. While the day is below
//! goal the ring is partly empty. Once the goal is passed the denominator
//! becomes the total and the ring closes.
//!
//! Everything here is recomputed from an [`IntakeSnapshot`] on every read.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::intake::{Category, IntakeSnapshot};

/// Target volume for the day, in ml. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DailyGoal(f64);

impl DailyGoal {
    pub const DEFAULT_ML: f64 = 3000.0;

    pub fn new(ml: f64) -> Result<Self, ValidationError> {
        if ml.is_finite() && ml > 0.0 {
            Ok(Self(ml))
        } else {
            Err(ValidationError::InvalidGoal(ml))
        }
    }

    pub fn ml(self) -> f64 {
        self.0
    }
}

impl Default for DailyGoal {
    fn default() -> Self {
        Self(Self::DEFAULT_ML)
    }
}

impl TryFrom<f64> for DailyGoal {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DailyGoal> for f64 {
    fn from(goal: DailyGoal) -> Self {
        goal.0
    }
}

/// One arc of the ring, in degrees measured from the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingSegment {
    pub category: Category,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl RingSegment {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Start and end as fractions of the circle, for trim-style renderers.
    pub fn trim(&self) -> (f64, f64) {
        (self.start_angle / 360.0, self.end_angle / 360.0)
    }
}

/// Integer percentage shown next to a category.
///
/// This is the share of `max(total, goal)`, so below goal the labels add up
/// to less than 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentLabel {
    pub category: Category,
    pub percent: u32,
}

/// The whole ring for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRing {
    pub segments: Vec<RingSegment>,
    pub labels: Vec<PercentLabel>,
    pub total_ml: f64,
    pub goal_ml: f64,
}

impl ProgressRing {
    pub fn compute(snapshot: &IntakeSnapshot, goal: DailyGoal) -> Self {
        let total = snapshot.total();
        let denom = total.max(goal.ml());

        let share = |value: f64| if denom > 0.0 { value / denom } else { 0.0 };

        let mut segments = Vec::with_capacity(Category::COUNT);
        let mut labels = Vec::with_capacity(Category::COUNT);
        let mut prior = 0.0;
        for category in Category::ALL {
            let value = snapshot.get(category);
            let start_angle = 360.0 * share(prior);
            let end_angle = start_angle + 360.0 * share(value);
            segments.push(RingSegment {
                category,
                start_angle,
                end_angle,
            });
            labels.push(PercentLabel {
                category,
                percent: (100.0 * share(value)).round() as u32,
            });
            prior += value;
        }

        Self {
            segments,
            labels,
            total_ml: total,
            goal_ml: goal.ml(),
        }
    }

    pub fn segment(&self, category: Category) -> Option<&RingSegment> {
        self.segments.iter().find(|s| s.category == category)
    }

    pub fn percent(&self, category: Category) -> Option<u32> {
        self.labels
            .iter()
            .find(|l| l.category == category)
            .map(|l| l.percent)
    }

    /// End angle of the last arc; `360 * total / max(total, goal)`.
    pub fn filled_degrees(&self) -> f64 {
        self.segments.last().map(|s| s.end_angle).unwrap_or(0.0)
    }

    pub fn goal_reached(&self) -> bool {
        self.total_ml >= self.goal_ml
    }

    /// Header text, e.g. `"800 / 3000 ml"`.
    pub fn summary(&self) -> String {
        format!("{} / {} ml", self.total_ml as i64, self.goal_ml as i64)
    }
}
