use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use crate::config::AlertConfig;
use crate::workflows::itv::domain::{
    AlertSeverity, Locale, Vehicle, VehicleId, WorkshopSettings,
};
use crate::workflows::itv::repository::{
    FleetRepository, NotificationError, NotificationTransport, RepositoryError,
};
use crate::workflows::itv::service::ItvAlertService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn vehicle(
    id: &str,
    manufacture_year: Option<i32>,
    last_inspection: Option<NaiveDate>,
) -> Vehicle {
    Vehicle {
        id: VehicleId(id.to_string()),
        plate: format!("PL-{id}"),
        make: "Seat".to_string(),
        model: "Ibiza".to_string(),
        manufacture_year,
        last_inspection_date: last_inspection,
    }
}

/// Old enough for yearly inspections; due exactly `days` after `today`.
pub(super) fn vehicle_due_in(id: &str, today: NaiveDate, days: i64) -> Vehicle {
    let due = today + chrono::Duration::days(days);
    let last = NaiveDate::from_ymd_opt(due.year() - 1, due.month(), due.day())
        .expect("fixtures avoid leap days");
    vehicle(id, Some(2005), Some(last))
}

pub(super) fn english() -> AlertConfig {
    AlertConfig {
        locale: Locale::English,
        ..AlertConfig::default()
    }
}

pub(super) fn build_service(
    vehicles: Vec<Vehicle>,
    settings: WorkshopSettings,
) -> (
    ItvAlertService<MemoryFleet, MemoryNotifier>,
    Arc<MemoryFleet>,
    Arc<MemoryNotifier>,
) {
    let fleet = Arc::new(MemoryFleet::seeded(vehicles, settings));
    let notifier = Arc::new(MemoryNotifier::default());
    let service = ItvAlertService::new(fleet.clone(), notifier.clone(), english());
    (service, fleet, notifier)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default)]
pub(super) struct MemoryFleet {
    vehicles: Mutex<BTreeMap<VehicleId, Vehicle>>,
    settings: Mutex<WorkshopSettings>,
}

impl MemoryFleet {
    pub(super) fn seeded(vehicles: Vec<Vehicle>, settings: WorkshopSettings) -> Self {
        Self {
            vehicles: Mutex::new(
                vehicles
                    .into_iter()
                    .map(|vehicle| (vehicle.id.clone(), vehicle))
                    .collect(),
            ),
            settings: Mutex::new(settings),
        }
    }

    pub(super) fn fetch_all_ids(&self) -> Vec<String> {
        let guard = self.vehicles.lock().expect("fleet mutex poisoned");
        guard.keys().map(|id| id.0.clone()).collect()
    }

    pub(super) fn stored_settings(&self) -> WorkshopSettings {
        self.settings.lock().expect("settings mutex poisoned").clone()
    }
}

impl FleetRepository for MemoryFleet {
    fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        let guard = self.vehicles.lock().expect("fleet mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn fetch_vehicle(&self, id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        let guard = self.vehicles.lock().expect("fleet mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn upsert_vehicle(&self, vehicle: Vehicle) -> Result<(), RepositoryError> {
        let mut guard = self.vehicles.lock().expect("fleet mutex poisoned");
        guard.insert(vehicle.id.clone(), vehicle);
        Ok(())
    }

    fn fetch_settings(&self) -> Result<WorkshopSettings, RepositoryError> {
        Ok(self.stored_settings())
    }

    fn save_settings(&self, settings: WorkshopSettings) -> Result<(), RepositoryError> {
        *self.settings.lock().expect("settings mutex poisoned") = settings;
        Ok(())
    }
}

pub(super) struct OfflineFleet;

impl FleetRepository for OfflineFleet {
    fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection reset".to_string()))
    }

    fn fetch_vehicle(&self, _id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection reset".to_string()))
    }

    fn upsert_vehicle(&self, _vehicle: Vehicle) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch_settings(&self) -> Result<WorkshopSettings, RepositoryError> {
        Err(RepositoryError::Unavailable("connection reset".to_string()))
    }

    fn save_settings(&self, _settings: WorkshopSettings) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    toasts: Mutex<Vec<(String, AlertSeverity)>>,
    pushes: Mutex<Vec<(String, String)>>,
    pub(super) fail_pushes: bool,
}

impl MemoryNotifier {
    pub(super) fn failing() -> Self {
        Self {
            fail_pushes: true,
            ..Self::default()
        }
    }

    pub(super) fn toasts(&self) -> Vec<(String, AlertSeverity)> {
        self.toasts.lock().expect("toast mutex poisoned").clone()
    }

    pub(super) fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.lock().expect("push mutex poisoned").clone()
    }
}

impl NotificationTransport for MemoryNotifier {
    fn show_toast(&self, message: &str, severity: AlertSeverity) {
        self.toasts
            .lock()
            .expect("toast mutex poisoned")
            .push((message.to_string(), severity));
    }

    fn send_push(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        if self.fail_pushes {
            return Err(NotificationError::Transport("service worker gone".to_string()));
        }
        self.pushes
            .lock()
            .expect("push mutex poisoned")
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}
