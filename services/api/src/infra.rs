use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use taller_itv::workflows::itv::{
    AlertSeverity, FleetRepository, FleetSnapshot, NotificationError, NotificationTransport,
    RepositoryError, Vehicle, VehicleId, WorkshopSettings,
};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn poisoned(store: &str) -> RepositoryError {
    RepositoryError::Unavailable(format!("{store} mutex poisoned"))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryFleetRepository {
    vehicles: Arc<Mutex<BTreeMap<VehicleId, Vehicle>>>,
    settings: Arc<Mutex<WorkshopSettings>>,
}

impl InMemoryFleetRepository {
    pub(crate) fn from_snapshot(snapshot: FleetSnapshot) -> Self {
        let vehicles = snapshot
            .vehicles
            .into_iter()
            .map(|vehicle| (vehicle.id.clone(), vehicle))
            .collect();
        Self {
            vehicles: Arc::new(Mutex::new(vehicles)),
            settings: Arc::new(Mutex::new(snapshot.settings)),
        }
    }
}

impl FleetRepository for InMemoryFleetRepository {
    fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        let guard = self.vehicles.lock().map_err(|_| poisoned("fleet"))?;
        Ok(guard.values().cloned().collect())
    }

    fn fetch_vehicle(&self, id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        let guard = self.vehicles.lock().map_err(|_| poisoned("fleet"))?;
        Ok(guard.get(id).cloned())
    }

    fn upsert_vehicle(&self, vehicle: Vehicle) -> Result<(), RepositoryError> {
        let mut guard = self.vehicles.lock().map_err(|_| poisoned("fleet"))?;
        guard.insert(vehicle.id.clone(), vehicle);
        Ok(())
    }

    fn fetch_settings(&self) -> Result<WorkshopSettings, RepositoryError> {
        let guard = self.settings.lock().map_err(|_| poisoned("settings"))?;
        Ok(guard.clone())
    }

    fn save_settings(&self, settings: WorkshopSettings) -> Result<(), RepositoryError> {
        let mut guard = self.settings.lock().map_err(|_| poisoned("settings"))?;
        *guard = settings;
        Ok(())
    }
}

/// Notification delivered through [`InMemoryNotificationTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DeliveredNotification {
    Toast {
        message: String,
        severity: AlertSeverity,
    },
    Push {
        title: String,
        body: String,
    },
}

/// Keeps every notification in memory and mirrors it to the log.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationTransport {
    events: Arc<Mutex<Vec<DeliveredNotification>>>,
}

impl InMemoryNotificationTransport {
    pub(crate) fn events(&self) -> Vec<DeliveredNotification> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl NotificationTransport for InMemoryNotificationTransport {
    fn show_toast(&self, message: &str, severity: AlertSeverity) {
        match severity {
            AlertSeverity::Critical => warn!(%message, "itv toast"),
            AlertSeverity::Info => info!(%message, "itv toast"),
        }
        if let Ok(mut guard) = self.events.lock() {
            guard.push(DeliveredNotification::Toast {
                message: message.to_string(),
                severity,
            });
        }
    }

    fn send_push(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| NotificationError::Transport("outbox mutex poisoned".to_string()))?;
        info!(%title, %body, "itv push notification");
        guard.push(DeliveredNotification::Push {
            title: title.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
