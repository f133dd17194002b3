mod policy;
mod schedule;

pub use schedule::days_until;

use super::domain::{ComplianceState, Locale, Vehicle};
use super::labels;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inspection status of one vehicle on one day. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceStatus {
    pub state: ComplianceState,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
}

impl ComplianceStatus {
    fn unscheduled(state: ComplianceState, label: String) -> Self {
        Self {
            state,
            label,
            next_due_date: None,
            days_remaining: None,
        }
    }
}

/// Stateless evaluator deriving inspection status from a vehicle and the current date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplianceEvaluator {
    locale: Locale,
}

impl ComplianceEvaluator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn evaluate(&self, vehicle: &Vehicle, today: NaiveDate) -> ComplianceStatus {
        let model_year = vehicle.model_year();

        let last_inspection = match vehicle.last_inspection_date {
            Some(date) => date,
            None => {
                if let Some(first_due) = model_year.and_then(schedule::first_due_date) {
                    if today < first_due {
                        return ComplianceStatus::unscheduled(
                            ComplianceState::Exempt,
                            labels::exempt_until(self.locale, first_due.year()),
                        );
                    }
                }
                return ComplianceStatus::unscheduled(
                    ComplianceState::NoData,
                    labels::status_label(self.locale, ComplianceState::NoData, 0),
                );
            }
        };

        // Age is taken at evaluation time, not at the last inspection.
        let age = today.year() - model_year.unwrap_or(schedule::FALLBACK_MODEL_YEAR);
        let Some(interval) = schedule::inspection_interval_years(age) else {
            return ComplianceStatus::unscheduled(
                ComplianceState::Exempt,
                labels::exempt_new_vehicle(self.locale),
            );
        };

        let next_due = schedule::add_years(last_inspection, interval);
        let days_remaining = schedule::days_until(next_due, today);
        let state = policy::classify(days_remaining);

        ComplianceStatus {
            state,
            label: labels::status_label(self.locale, state, days_remaining),
            next_due_date: Some(next_due),
            days_remaining: Some(days_remaining),
        }
    }
}

/// Evaluate with the default (Spanish) labels.
pub fn evaluate(vehicle: &Vehicle, today: NaiveDate) -> ComplianceStatus {
    ComplianceEvaluator::default().evaluate(vehicle, today)
}
