use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryFleetRepository, InMemoryNotificationTransport};
use crate::routes::with_itv_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use taller_itv::config::AppConfig;
use taller_itv::error::AppError;
use taller_itv::telemetry;
use taller_itv::workflows::itv::{
    FleetImporter, FleetRepository, ItvAlertService, NotificationTransport, ScanReport,
};
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = match args.fleet.take() {
        Some(path) => {
            let snapshot = FleetImporter::from_path(&path)?;
            info!(
                path = %path.display(),
                vehicles = snapshot.vehicles.len(),
                "seeded fleet from export"
            );
            InMemoryFleetRepository::from_snapshot(snapshot)
        }
        None => InMemoryFleetRepository::default(),
    };
    let notifier = InMemoryNotificationTransport::default();
    let itv_service = Arc::new(ItvAlertService::new(
        Arc::new(repository),
        Arc::new(notifier),
        config.alerts.clone(),
    ));
    startup_scan(itv_service.as_ref(), Local::now().date_naive());

    let app = with_itv_routes(itv_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        locale = ?config.alerts.locale,
        thresholds = ?config.alerts.default_thresholds.days(),
        "itv alert service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Scan once at boot so expiring inspections surface without a client request.
/// A failed scan is logged and the server keeps starting.
pub(crate) fn startup_scan<R, N>(
    service: &ItvAlertService<R, N>,
    today: NaiveDate,
) -> Option<ScanReport>
where
    R: FleetRepository + 'static,
    N: NotificationTransport + 'static,
{
    match service.run_scan(today) {
        Ok(report) => Some(report),
        Err(err) => {
            warn!(error = %err, %today, "startup itv scan failed");
            None
        }
    }
}
