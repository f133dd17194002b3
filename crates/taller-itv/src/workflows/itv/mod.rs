//! ITV due-date evaluation and preventive alert scanning.
//!
//! [`evaluation`] derives a vehicle's inspection state from its model year and last
//! inspection date for an injected `today`. [`alerts`] turns a fleet snapshot into at
//! most one alert per vehicle, and [`service`] wires both to the data store and the
//! notification transport.

pub mod alerts;
pub mod domain;
pub mod evaluation;
pub mod import;
mod labels;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use alerts::{AlertEvent, AlertScanner, AlertThresholdSet};
pub use domain::{
    AlertSeverity, ComplianceState, Locale, Vehicle, VehicleId, WorkshopSettings,
};
pub use evaluation::{days_until, evaluate, ComplianceEvaluator, ComplianceStatus};
pub use import::{FleetImportError, FleetImporter, FleetSnapshot};
pub use labels::time_label;
pub use repository::{
    FleetRepository, NotificationError, NotificationTransport, RepositoryError,
};
pub use router::itv_router;
pub use service::{ItvAlertService, ItvServiceError, ScanReport, VehicleStatusView};
