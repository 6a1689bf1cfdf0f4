//! Per-category intake accumulator.
//!
//! All mutation goes through [`IntakeStore::add`], [`IntakeStore::subtract`]
//! and [`IntakeStore::reset`]. Values never go below zero. Non-positive or
//! non-finite amounts are not applied and the caller is told so through
//! [`Applied`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::category::Category;

/// Reference volume for a full cup in the cup view, in ml.
pub const CUP_FULL_ML: f64 = 2000.0;

/// Outcome of an intake mutation.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applied {
    Applied,
    /// Input was not a positive number; nothing changed.
    Ignored,
}

impl Applied {
    pub fn is_applied(self) -> bool {
        self == Applied::Applied
    }
}

/// Parse user-entered amount text.
///
/// Returns `None` unless the trimmed text is a finite number greater than zero.
pub fn parse_amount(text: &str) -> Option<f64> {
    let amount: f64 = text.trim().parse().ok()?;
    is_valid_amount(amount).then_some(amount)
}

fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Accumulated intake for the session, in ml.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeStore {
    values: [f64; Category::COUNT],
}

impl IntakeStore {
    /// A store with every category at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn get(&self, category: Category) -> f64 {
        self.values[category.index()]
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// How full the cup for `category` is drawn, `0.0 ..= 1.0`.
    pub fn fill_level(&self, category: Category) -> f64 {
        (self.get(category) / CUP_FULL_ML).min(1.0)
    }

    /// Immutable copy for rendering.
    pub fn snapshot(&self) -> IntakeSnapshot {
        IntakeSnapshot {
            entries: Category::ALL
                .iter()
                .map(|&category| IntakeEntry {
                    category,
                    amount_ml: self.get(category),
                })
                .collect(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn add(&mut self, category: Category, amount: f64) -> Applied {
        if !is_valid_amount(amount) {
            debug!(%category, amount, "ignoring non-positive intake");
            return Applied::Ignored;
        }
        let value = self.get(category) + amount;
        // Both the value and the total stay finite.
        if !value.is_finite() || !(self.total() + amount).is_finite() {
            debug!(%category, amount, "ignoring intake that overflows");
            return Applied::Ignored;
        }
        self.values[category.index()] = value;
        debug!(%category, amount, value, "intake added");
        Applied::Applied
    }

    /// Subtract, flooring at zero.
    pub fn subtract(&mut self, category: Category, amount: f64) -> Applied {
        if !is_valid_amount(amount) {
            debug!(%category, amount, "ignoring non-positive subtraction");
            return Applied::Ignored;
        }
        let slot = &mut self.values[category.index()];
        *slot = (*slot - amount).max(0.0);
        debug!(%category, amount, value = *slot, "intake subtracted");
        Applied::Applied
    }

    pub fn reset(&mut self, category: Category) {
        self.values[category.index()] = 0.0;
        debug!(%category, "intake reset");
    }

    /// Zero every category, e.g. at the start of a new day.
    pub fn reset_all(&mut self) {
        self.values = Default::default();
        debug!("all intake reset");
    }

    /// [`IntakeStore::add`] with raw text input.
    pub fn add_text(&mut self, category: Category, text: &str) -> Applied {
        match parse_amount(text) {
            Some(amount) => self.add(category, amount),
            None => Applied::Ignored,
        }
    }

    /// [`IntakeStore::subtract`] with raw text input.
    pub fn subtract_text(&mut self, category: Category, text: &str) -> Applied {
        match parse_amount(text) {
            Some(amount) => self.subtract(category, amount),
            None => Applied::Ignored,
        }
    }
}

/// One category's value inside an [`IntakeSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntakeEntry {
    pub category: Category,
    pub amount_ml: f64,
}

/// Read-only view of the store, in declared category order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeSnapshot {
    pub entries: Vec<IntakeEntry>,
}

impl IntakeSnapshot {
    pub fn get(&self, category: Category) -> f64 {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.amount_ml)
            .unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount_ml).sum()
    }
}

impl From<&IntakeStore> for IntakeSnapshot {
    fn from(store: &IntakeStore) -> Self {
        store.snapshot()
    }
}
