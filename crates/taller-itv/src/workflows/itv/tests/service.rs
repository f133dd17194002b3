use super::common::*;
use crate::config::AlertConfig;
use crate::workflows::itv::alerts::AlertThresholdSet;
use crate::workflows::itv::domain::{AlertSeverity, ComplianceState, VehicleId, WorkshopSettings};
use crate::workflows::itv::repository::RepositoryError;
use crate::workflows::itv::service::{ItvAlertService, ItvServiceError};
use std::sync::Arc;

fn settings_with(thresholds: Option<Vec<i64>>) -> WorkshopSettings {
    WorkshopSettings {
        name: "Taller Peter".to_string(),
        alert_thresholds: thresholds,
        ..WorkshopSettings::default()
    }
}

#[test]
fn scan_dispatches_toast_and_push_per_alert() {
    let today = date(2025, 3, 1);
    let (service, _, notifier) = build_service(
        vec![
            vehicle_due_in("late", today, -2),
            vehicle_due_in("week", today, 7),
            vehicle_due_in("quiet", today, 40),
        ],
        settings_with(None),
    );

    let report = service.run_scan(today).expect("scan runs");

    assert_eq!(report.vehicles_evaluated, 3);
    assert_eq!(report.alerts.len(), 2);
    assert_eq!(report.critical_count(), 1);
    assert_eq!(report.thresholds, vec![1, 3, 7, 14]);
    assert_eq!(report.push_failures, 0);

    let toasts = notifier.toasts();
    assert_eq!(toasts.len(), 2);
    assert!(toasts
        .iter()
        .any(|(message, severity)| *severity == AlertSeverity::Critical
            && message == "URGENT! Inspection for PL-late is EXPIRED."));
    assert_eq!(notifier.pushes().len(), 2);
}

#[test]
fn scan_prefers_workshop_thresholds() {
    let today = date(2025, 3, 1);
    let (service, _, _) = build_service(
        vec![vehicle_due_in("month", today, 30), vehicle_due_in("week", today, 7)],
        settings_with(Some(vec![30])),
    );

    let report = service.run_scan(today).expect("scan runs");

    assert_eq!(report.thresholds, vec![30]);
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].vehicle_id, VehicleId("month".to_string()));
}

#[test]
fn empty_workshop_thresholds_use_configured_default() {
    let today = date(2025, 3, 1);
    let fleet = Arc::new(MemoryFleet::seeded(
        vec![vehicle_due_in("two", today, 2)],
        settings_with(Some(Vec::new())),
    ));
    let notifier = Arc::new(MemoryNotifier::default());
    let config = AlertConfig {
        default_thresholds: AlertThresholdSet::new([2]),
        ..english()
    };
    let service = ItvAlertService::new(fleet, notifier, config);

    let report = service.run_scan(today).expect("scan runs");

    assert_eq!(report.thresholds, vec![2]);
    assert_eq!(report.alerts.len(), 1);
}

#[test]
fn push_failures_do_not_abort_the_scan() {
    let today = date(2025, 3, 1);
    let fleet = Arc::new(MemoryFleet::seeded(
        vec![vehicle_due_in("a", today, -1), vehicle_due_in("b", today, 1)],
        settings_with(None),
    ));
    let notifier = Arc::new(MemoryNotifier::failing());
    let service = ItvAlertService::new(fleet, notifier.clone(), english());

    let report = service.run_scan(today).expect("scan still succeeds");

    assert_eq!(report.alerts.len(), 2);
    assert_eq!(report.push_failures, 2);
    assert_eq!(notifier.toasts().len(), 2);
    assert!(notifier.pushes().is_empty());
}

#[test]
fn fetch_failure_aborts_scan_without_notifications() {
    let notifier = Arc::new(MemoryNotifier::default());
    let service = ItvAlertService::new(Arc::new(OfflineFleet), notifier.clone(), english());

    match service.run_scan(date(2025, 3, 1)) {
        Err(ItvServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected repository failure, got {other:?}"),
    }
    assert!(notifier.toasts().is_empty());
}

#[test]
fn evaluate_vehicle_reports_unknown_ids() {
    let (service, _, _) = build_service(Vec::new(), WorkshopSettings::default());

    match service.evaluate_vehicle(&VehicleId("ghost".to_string()), date(2025, 3, 1)) {
        Err(ItvServiceError::VehicleNotFound(id)) => assert_eq!(id.0, "ghost"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn fleet_status_lists_soonest_due_first() {
    let today = date(2025, 3, 1);
    let (service, _, _) = build_service(
        vec![
            vehicle("unknown", None, None),
            vehicle_due_in("later", today, 200),
            vehicle_due_in("late", today, -3),
            vehicle_due_in("soon", today, 5),
        ],
        WorkshopSettings::default(),
    );

    let views = service.fleet_status(today).expect("fleet loads");
    let order: Vec<&str> = views.iter().map(|view| view.vehicle_id.0.as_str()).collect();

    assert_eq!(order, vec!["late", "soon", "later", "unknown"]);
    assert_eq!(views[0].status.state, ComplianceState::Expired);
    assert_eq!(views[3].status.state, ComplianceState::NoData);
}

#[test]
fn update_thresholds_persists_and_rejects_negatives() {
    let (service, fleet, _) = build_service(Vec::new(), settings_with(None));

    let effective = service
        .update_thresholds(vec![21, 7, 7])
        .expect("thresholds saved");
    assert_eq!(effective.days(), vec![7, 21]);
    assert_eq!(fleet.stored_settings().alert_thresholds, Some(vec![7, 21]));
    assert_eq!(fleet.stored_settings().name, "Taller Peter");

    let restored = service
        .update_thresholds(Vec::new())
        .expect("empty list accepted");
    assert_eq!(restored, AlertThresholdSet::default());
    assert_eq!(fleet.stored_settings().alert_thresholds, None);

    match service.update_thresholds(vec![3, -1]) {
        Err(ItvServiceError::InvalidThreshold(-1)) => {}
        other => panic!("expected invalid threshold, got {other:?}"),
    }
}

#[test]
fn registered_vehicles_become_visible() {
    let today = date(2025, 3, 1);
    let (service, _, _) = build_service(Vec::new(), WorkshopSettings::default());

    service
        .register_vehicle(vehicle_due_in("fresh", today, 3))
        .expect("vehicle stored");
    let view = service
        .evaluate_vehicle(&VehicleId("fresh".to_string()), today)
        .expect("vehicle found");

    assert_eq!(view.plate, "PL-fresh");
    assert_eq!(view.status.state, ComplianceState::Warning);
    assert_eq!(view.status.label, "Expires in 3 days");
}
