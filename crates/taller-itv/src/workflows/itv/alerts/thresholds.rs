use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const DEFAULT_THRESHOLD_DAYS: [i64; 4] = [1, 3, 7, 14];

/// Days-before-due values at which a preventive reminder fires. Never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<i64>", into = "Vec<i64>")]
pub struct AlertThresholdSet {
    days: BTreeSet<i64>,
}

impl AlertThresholdSet {
    pub fn new(days: impl IntoIterator<Item = i64>) -> Self {
        Self {
            days: days.into_iter().filter(|day| *day >= 0).collect(),
        }
    }

    /// Workshop thresholds when configured and non-empty, otherwise `fallback`.
    pub fn resolve(configured: Option<&[i64]>, fallback: &AlertThresholdSet) -> Self {
        match configured.map(|days| Self::new(days.iter().copied())) {
            Some(set) if !set.is_empty() => set,
            _ => fallback.clone(),
        }
    }

    pub fn contains(&self, days_remaining: i64) -> bool {
        self.days.contains(&days_remaining)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Ascending list of thresholds.
    pub fn days(&self) -> Vec<i64> {
        self.days.iter().copied().collect()
    }
}

impl Default for AlertThresholdSet {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_DAYS)
    }
}

impl From<Vec<i64>> for AlertThresholdSet {
    fn from(days: Vec<i64>) -> Self {
        Self::new(days)
    }
}

impl From<AlertThresholdSet> for Vec<i64> {
    fn from(set: AlertThresholdSet) -> Self {
        set.days()
    }
}
