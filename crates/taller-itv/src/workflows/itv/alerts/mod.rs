mod thresholds;

pub use thresholds::AlertThresholdSet;

use super::domain::{AlertSeverity, Locale, Vehicle, VehicleId};
use super::evaluation::ComplianceEvaluator;
use super::labels;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Alert produced by a scan; handed to the toast and push transports, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub vehicle_id: VehicleId,
    pub plate: String,
    pub severity: AlertSeverity,
    pub days_remaining: i64,
    pub due_date: NaiveDate,
    pub message: String,
    pub push_title: String,
    pub push_body: String,
}

/// Walks the fleet once and emits at most one alert per vehicle.
///
/// Expired inspections always produce a critical alert. Preventive alerts fire only on
/// the exact day the remaining days equal a configured threshold, so a vehicle scanned
/// daily is reminded once per threshold rather than every day below it. Nothing is
/// remembered between scans: scanning twice on the same day repeats the alerts.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertScanner {
    evaluator: ComplianceEvaluator,
}

impl AlertScanner {
    pub fn new(locale: Locale) -> Self {
        Self {
            evaluator: ComplianceEvaluator::new(locale),
        }
    }

    pub fn evaluator(&self) -> &ComplianceEvaluator {
        &self.evaluator
    }

    pub fn scan(
        &self,
        vehicles: &[Vehicle],
        thresholds: &AlertThresholdSet,
        today: NaiveDate,
    ) -> Vec<AlertEvent> {
        vehicles
            .iter()
            .filter_map(|vehicle| self.check(vehicle, thresholds, today))
            .collect()
    }

    fn check(
        &self,
        vehicle: &Vehicle,
        thresholds: &AlertThresholdSet,
        today: NaiveDate,
    ) -> Option<AlertEvent> {
        let status = self.evaluator.evaluate(vehicle, today);
        if !status.state.is_scheduled() {
            return None;
        }
        let due_date = status.next_due_date?;
        let days_remaining = super::evaluation::days_until(due_date, today);
        let locale = self.evaluator.locale();

        let (severity, text) = if days_remaining < 0 {
            (AlertSeverity::Critical, labels::expired_alert(locale, vehicle))
        } else if thresholds.contains(days_remaining) {
            (
                AlertSeverity::Info,
                labels::preventive_alert(locale, vehicle, days_remaining),
            )
        } else {
            return None;
        };

        Some(AlertEvent {
            vehicle_id: vehicle.id.clone(),
            plate: vehicle.plate.clone(),
            severity,
            days_remaining,
            due_date,
            message: text.message,
            push_title: text.push_title,
            push_body: text.push_body,
        })
    }
}
