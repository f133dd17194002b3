use crate::infra::{DeliveredNotification, InMemoryFleetRepository, InMemoryNotificationTransport};
use chrono::{Datelike, Duration, Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use taller_itv::config::{AlertConfig, AppConfig};
use taller_itv::error::AppError;
use taller_itv::workflows::itv::{
    AlertSeverity, FleetImporter, FleetSnapshot, ItvAlertService, Locale, ScanReport, Vehicle,
    VehicleId, VehicleStatusView, WorkshopSettings,
};

type CliService = ItvAlertService<InMemoryFleetRepository, InMemoryNotificationTransport>;

#[derive(Args, Debug)]
pub(crate) struct FleetArgs {
    /// Fleet export: CSV (id,plate,make,model,year,last_itv_date) or a JSON backup
    #[arg(long)]
    pub(crate) fleet: PathBuf,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Language for labels and alert text (es or en)
    #[arg(long)]
    pub(crate) locale: Option<String>,
    /// Comma-separated reminder days, replacing the export's own thresholds
    #[arg(long, value_delimiter = ',')]
    pub(crate) thresholds: Option<Vec<i64>>,
    /// Print JSON instead of a text listing
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the demo date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Language for labels and alert text (es or en)
    #[arg(long)]
    pub(crate) locale: Option<String>,
}

fn alert_config(locale: Option<&str>) -> Result<AlertConfig, AppError> {
    let mut alerts = AppConfig::load()?.alerts;
    if let Some(code) = locale {
        alerts.locale = Locale::from_code(code);
    }
    Ok(alerts)
}

fn build_service(
    snapshot: FleetSnapshot,
    alerts: AlertConfig,
) -> (CliService, Arc<InMemoryNotificationTransport>) {
    let transport = Arc::new(InMemoryNotificationTransport::default());
    let service = ItvAlertService::new(
        Arc::new(InMemoryFleetRepository::from_snapshot(snapshot)),
        transport.clone(),
        alerts,
    );
    (service, transport)
}

fn load_fleet(args: &FleetArgs) -> Result<(CliService, Arc<InMemoryNotificationTransport>), AppError> {
    let alerts = alert_config(args.locale.as_deref())?;
    let snapshot = FleetImporter::from_path(&args.fleet)?;
    let (service, transport) = build_service(snapshot, alerts);
    if let Some(days) = args.thresholds.clone() {
        service.update_thresholds(days)?;
    }
    Ok((service, transport))
}

pub(crate) fn run_fleet_status(args: FleetArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let (service, _) = load_fleet(&args)?;
    let views = service.fleet_status(today)?;

    if args.json {
        print_json(&views)?;
    } else {
        render_fleet_status(&views, today);
    }
    Ok(())
}

pub(crate) fn run_fleet_scan(args: FleetArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let (service, _) = load_fleet(&args)?;
    let report = service.run_scan(today)?;

    if args.json {
        print_json(&report)?;
    } else {
        render_scan_report(&report);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let alerts = alert_config(args.locale.as_deref())?;
    let (service, transport) = build_service(demo_snapshot(today), alerts);

    println!("ITV tracking demo");
    let views = service.fleet_status(today)?;
    render_fleet_status(&views, today);

    let report = service.run_scan(today)?;
    render_scan_report(&report);

    let events = transport.events();
    let toasts = events
        .iter()
        .filter(|event| matches!(event, DeliveredNotification::Toast { .. }))
        .count();
    println!(
        "\nNotification transport received {} toasts and {} push notifications",
        toasts,
        events.len() - toasts
    );
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
    println!("{rendered}");
    Ok(())
}

fn render_fleet_status(views: &[VehicleStatusView], today: NaiveDate) {
    println!("\nFleet inspection status on {today}");
    if views.is_empty() {
        println!("- No vehicles registered");
        return;
    }
    for view in views {
        let due = view
            .status
            .next_due_date
            .map(|date| format!(" | due {date}"))
            .unwrap_or_default();
        let days = view
            .status
            .days_remaining
            .map(|days| format!(" ({days:+} days)"))
            .unwrap_or_default();
        println!(
            "- {:<10} {} {} | {}{}{}",
            view.plate, view.make, view.model, view.status.label, due, days
        );
    }
}

fn render_scan_report(report: &ScanReport) {
    println!(
        "\nAlert scan on {} | {} vehicles | thresholds {:?}",
        report.today, report.vehicles_evaluated, report.thresholds
    );
    if report.alerts.is_empty() {
        println!("- No alerts today");
        return;
    }
    for alert in &report.alerts {
        let marker = match alert.severity {
            AlertSeverity::Critical => "!!",
            AlertSeverity::Info => "--",
        };
        println!("{marker} [{}] {}", alert.severity.label(), alert.message);
        println!("   push: {} / {}", alert.push_title, alert.push_body);
    }
    println!(
        "Summary: {} alerts ({} critical), {} push failures",
        report.alerts.len(),
        report.critical_count(),
        report.push_failures
    );
}

/// Synthetic workshop fleet covering every inspection state relative to `today`.
fn demo_snapshot(today: NaiveDate) -> FleetSnapshot {
    let year = today.year();
    let demo_vehicle = |id: &str, plate: &str, make: &str, model: &str, built: i32, last| Vehicle {
        id: VehicleId(id.to_string()),
        plate: plate.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        manufacture_year: Some(built),
        last_inspection_date: last,
    };

    FleetSnapshot {
        vehicles: vec![
            demo_vehicle(
                "demo-expired",
                "4821-HBK",
                "Seat",
                "Toledo",
                year - 14,
                Some(inspected_before_due(today, -12)),
            ),
            demo_vehicle(
                "demo-week",
                "7395-JDF",
                "Renault",
                "Megane",
                year - 12,
                Some(inspected_before_due(today, 7)),
            ),
            demo_vehicle(
                "demo-valid",
                "1178-KLP",
                "Peugeot",
                "308",
                year - 11,
                Some(inspected_before_due(today, 120)),
            ),
            demo_vehicle("demo-new", "2290-MNR", "Hyundai", "Tucson", year - 1, None),
            demo_vehicle("demo-unknown", "6604-GTS", "Opel", "Astra", year - 8, None),
        ],
        settings: WorkshopSettings {
            name: "Taller demo".to_string(),
            ..WorkshopSettings::default()
        },
    }
}

/// Last inspection date of a yearly-inspected vehicle due `days` from `today`.
fn inspected_before_due(today: NaiveDate, days: i64) -> NaiveDate {
    let due = today + Duration::days(days);
    due.with_year(due.year() - 1)
        .unwrap_or_else(|| due - Duration::days(365))
}

#[cfg(test)]
mod tests {
    use super::*;
    use taller_itv::workflows::itv::{evaluate, ComplianceState};

    #[test]
    fn demo_fleet_covers_every_state() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
        let states: Vec<ComplianceState> = demo_snapshot(today)
            .vehicles
            .iter()
            .map(|vehicle| evaluate(vehicle, today).state)
            .collect();

        assert_eq!(
            states,
            vec![
                ComplianceState::Expired,
                ComplianceState::Warning,
                ComplianceState::Valid,
                ComplianceState::Exempt,
                ComplianceState::NoData,
            ]
        );
    }

    #[test]
    fn demo_scan_raises_week_reminder_and_expiry() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
        let (service, transport) = build_service(demo_snapshot(today), AlertConfig::default());

        let report = service.run_scan(today).expect("scan runs");

        assert_eq!(report.alerts.len(), 2);
        assert_eq!(report.critical_count(), 1);
        assert_eq!(transport.events().len(), 4);
    }

    #[test]
    fn json_output_renders_scan_report() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
        let (service, _) = build_service(demo_snapshot(today), AlertConfig::default());
        let report = service.run_scan(today).expect("scan runs");

        print_json(&report).expect("report serializes");
    }
}
