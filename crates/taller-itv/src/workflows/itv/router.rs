use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{Vehicle, VehicleId};
use super::repository::{FleetRepository, NotificationTransport, RepositoryError};
use super::service::{ItvAlertService, ItvServiceError};

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub vehicle: Vehicle,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ThresholdsRequest {
    pub days: Vec<i64>,
}

/// Router builder exposing fleet status, evaluation, and alert scan endpoints.
pub fn itv_router<R, N>(service: Arc<ItvAlertService<R, N>>) -> Router
where
    R: FleetRepository + 'static,
    N: NotificationTransport + 'static,
{
    Router::new()
        .route(
            "/api/v1/itv/vehicles",
            get(fleet_handler::<R, N>).post(register_handler::<R, N>),
        )
        .route(
            "/api/v1/itv/vehicles/:vehicle_id",
            get(vehicle_status_handler::<R, N>),
        )
        .route("/api/v1/itv/evaluate", post(evaluate_handler::<R, N>))
        .route("/api/v1/itv/scan", post(scan_handler::<R, N>))
        .route("/api/v1/itv/settings", get(settings_handler::<R, N>))
        .route(
            "/api/v1/itv/settings/thresholds",
            put(thresholds_handler::<R, N>),
        )
        .with_state(service)
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn error_response(err: ItvServiceError) -> Response {
    let status = match &err {
        ItvServiceError::VehicleNotFound(_) => StatusCode::NOT_FOUND,
        ItvServiceError::InvalidThreshold(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ItvServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    if status.is_server_error() {
        error!(error = %err, "itv request failed");
    }
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

pub(crate) async fn fleet_handler<R, N>(
    State(service): State<Arc<ItvAlertService<R, N>>>,
) -> Response
where
    R: FleetRepository + 'static,
    N: NotificationTransport + 'static,
{
    match service.fleet_status(local_today()) {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn register_handler<R, N>(
    State(service): State<Arc<ItvAlertService<R, N>>>,
    Json(vehicle): Json<Vehicle>,
) -> Response
where
    R: FleetRepository + 'static,
    N: NotificationTransport + 'static,
{
    match service.register_vehicle(vehicle) {
        Ok(vehicle) => (StatusCode::CREATED, Json(vehicle)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn vehicle_status_handler<R, N>(
    State(service): State<Arc<ItvAlertService<R, N>>>,
    Path(vehicle_id): Path<String>,
) -> Response
where
    R: FleetRepository + 'static,
    N: NotificationTransport + 'static,
{
    match service.evaluate_vehicle(&VehicleId(vehicle_id), local_today()) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn evaluate_handler<R, N>(
    State(service): State<Arc<ItvAlertService<R, N>>>,
    Json(request): Json<EvaluateRequest>,
) -> Response
where
    R: FleetRepository + 'static,
    N: NotificationTransport + 'static,
{
    let today = request.today.unwrap_or_else(local_today);
    let status = service.evaluate(&request.vehicle, today);
    (StatusCode::OK, Json(status)).into_response()
}

pub(crate) async fn scan_handler<R, N>(
    State(service): State<Arc<ItvAlertService<R, N>>>,
    request: Option<Json<ScanRequest>>,
) -> Response
where
    R: FleetRepository + 'static,
    N: NotificationTransport + 'static,
{
    // A bare POST triggers a scan for the local date.
    let request = request.map(|Json(body)| body).unwrap_or_default();
    let today = request.today.unwrap_or_else(local_today);
    match service.run_scan(today) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn settings_handler<R, N>(
    State(service): State<Arc<ItvAlertService<R, N>>>,
) -> Response
where
    R: FleetRepository + 'static,
    N: NotificationTransport + 'static,
{
    match service.settings() {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn thresholds_handler<R, N>(
    State(service): State<Arc<ItvAlertService<R, N>>>,
    Json(request): Json<ThresholdsRequest>,
) -> Response
where
    R: FleetRepository + 'static,
    N: NotificationTransport + 'static,
{
    match service.update_thresholds(request.days) {
        Ok(effective) => {
            (StatusCode::OK, Json(json!({ "thresholds": effective.days() }))).into_response()
        }
        Err(err) => error_response(err),
    }
}
