use std::cmp::Ordering;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::alerts::{AlertEvent, AlertScanner, AlertThresholdSet};
use super::domain::{AlertSeverity, Vehicle, VehicleId, WorkshopSettings};
use super::evaluation::{ComplianceEvaluator, ComplianceStatus};
use super::repository::{FleetRepository, NotificationTransport, RepositoryError};
use crate::config::AlertConfig;

/// Vehicle identity paired with its status on the evaluated day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleStatusView {
    pub vehicle_id: VehicleId,
    pub plate: String,
    pub make: String,
    pub model: String,
    #[serde(flatten)]
    pub status: ComplianceStatus,
}

impl VehicleStatusView {
    fn new(vehicle: &Vehicle, status: ComplianceStatus) -> Self {
        Self {
            vehicle_id: vehicle.id.clone(),
            plate: vehicle.plate.clone(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            status,
        }
    }
}

/// Outcome of one alert scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub today: NaiveDate,
    pub thresholds: Vec<i64>,
    pub vehicles_evaluated: usize,
    pub alerts: Vec<AlertEvent>,
    pub push_failures: usize,
}

impl ScanReport {
    pub fn critical_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|alert| alert.severity == AlertSeverity::Critical)
            .count()
    }
}

/// Service composing the data store, the alert scanner, and the notification transport.
pub struct ItvAlertService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    scanner: AlertScanner,
    default_thresholds: AlertThresholdSet,
}

impl<R, N> ItvAlertService<R, N>
where
    R: FleetRepository + 'static,
    N: NotificationTransport + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, config: AlertConfig) -> Self {
        Self {
            repository,
            notifier,
            scanner: AlertScanner::new(config.locale),
            default_thresholds: config.default_thresholds,
        }
    }

    fn evaluator(&self) -> &ComplianceEvaluator {
        self.scanner.evaluator()
    }

    /// Status of a vehicle that need not be stored, e.g. a form preview.
    pub fn evaluate(&self, vehicle: &Vehicle, today: NaiveDate) -> ComplianceStatus {
        self.evaluator().evaluate(vehicle, today)
    }

    /// Status of a single stored vehicle.
    pub fn evaluate_vehicle(
        &self,
        vehicle_id: &VehicleId,
        today: NaiveDate,
    ) -> Result<VehicleStatusView, ItvServiceError> {
        let vehicle = self
            .repository
            .fetch_vehicle(vehicle_id)?
            .ok_or_else(|| ItvServiceError::VehicleNotFound(vehicle_id.clone()))?;
        let status = self.evaluate(&vehicle, today);
        Ok(VehicleStatusView::new(&vehicle, status))
    }

    /// Status of every vehicle, soonest due first; unscheduled vehicles trail.
    pub fn fleet_status(&self, today: NaiveDate) -> Result<Vec<VehicleStatusView>, ItvServiceError> {
        let vehicles = self.repository.fetch_vehicles()?;
        let mut views: Vec<VehicleStatusView> = vehicles
            .iter()
            .map(|vehicle| VehicleStatusView::new(vehicle, self.evaluate(vehicle, today)))
            .collect();

        views.sort_by(|a, b| {
            match (a.status.next_due_date, b.status.next_due_date) {
                (Some(left), Some(right)) => left.cmp(&right),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(|| a.plate.cmp(&b.plate))
        });

        Ok(views)
    }

    /// Fetch the fleet and settings, scan, and dispatch every alert.
    ///
    /// A failed fetch aborts the scan and is returned to the caller. Push failures are
    /// logged and counted but never abort the scan.
    pub fn run_scan(&self, today: NaiveDate) -> Result<ScanReport, ItvServiceError> {
        let vehicles = self.repository.fetch_vehicles()?;
        let settings = self.repository.fetch_settings()?;
        let thresholds = AlertThresholdSet::resolve(
            settings.alert_thresholds.as_deref(),
            &self.default_thresholds,
        );

        let alerts = self.scanner.scan(&vehicles, &thresholds, today);

        let mut push_failures = 0;
        for alert in &alerts {
            debug!(
                vehicle = %alert.vehicle_id,
                severity = alert.severity.label(),
                days = alert.days_remaining,
                "dispatching itv alert"
            );
            self.notifier.show_toast(&alert.message, alert.severity);
            if let Err(err) = self.notifier.send_push(&alert.push_title, &alert.push_body) {
                push_failures += 1;
                warn!(vehicle = %alert.vehicle_id, error = %err, "push notification dropped");
            }
        }

        let report = ScanReport {
            today,
            thresholds: thresholds.days(),
            vehicles_evaluated: vehicles.len(),
            alerts,
            push_failures,
        };

        info!(
            %today,
            vehicles = report.vehicles_evaluated,
            alerts = report.alerts.len(),
            critical = report.critical_count(),
            "itv alert scan completed"
        );

        Ok(report)
    }

    pub fn register_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, ItvServiceError> {
        self.repository.upsert_vehicle(vehicle.clone())?;
        Ok(vehicle)
    }

    pub fn settings(&self) -> Result<WorkshopSettings, ItvServiceError> {
        Ok(self.repository.fetch_settings()?)
    }

    /// Replace the workshop's preventive thresholds; an empty list restores the default.
    pub fn update_thresholds(&self, days: Vec<i64>) -> Result<AlertThresholdSet, ItvServiceError> {
        if let Some(negative) = days.iter().copied().find(|day| *day < 0) {
            return Err(ItvServiceError::InvalidThreshold(negative));
        }

        let mut settings = self.repository.fetch_settings()?;
        let stored = AlertThresholdSet::new(days);
        settings.alert_thresholds = if stored.is_empty() {
            None
        } else {
            Some(stored.days())
        };
        self.repository.save_settings(settings)?;

        Ok(if stored.is_empty() {
            self.default_thresholds.clone()
        } else {
            stored
        })
    }
}

/// Error raised by the ITV service.
#[derive(Debug, thiserror::Error)]
pub enum ItvServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),
    #[error("alert thresholds must be non-negative (found {0})")]
    InvalidThreshold(i64),
}
