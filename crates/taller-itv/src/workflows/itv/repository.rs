use super::domain::{AlertSeverity, Vehicle, VehicleId, WorkshopSettings};

/// Access to the workshop's hosted data store.
pub trait FleetRepository: Send + Sync {
    fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError>;
    fn fetch_vehicle(&self, id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError>;
    fn upsert_vehicle(&self, vehicle: Vehicle) -> Result<(), RepositoryError>;
    fn fetch_settings(&self) -> Result<WorkshopSettings, RepositoryError>;
    fn save_settings(&self, settings: WorkshopSettings) -> Result<(), RepositoryError>;
}

/// Error enumeration for data store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("data store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hooks: an in-app toast and a best-effort push message.
pub trait NotificationTransport: Send + Sync {
    fn show_toast(&self, message: &str, severity: AlertSeverity);
    fn send_push(&self, title: &str, body: &str) -> Result<(), NotificationError>;
}

/// Push delivery error; logged by the caller, never retried.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("push transport unavailable: {0}")]
    Transport(String),
}
