//! Human-readable text layered over the numeric inspection contract.

use super::domain::{ComplianceState, Locale, Vehicle};

pub(crate) fn exempt_until(locale: Locale, year: i32) -> String {
    match locale {
        Locale::Spanish => format!("Exento hasta {year}"),
        Locale::English => format!("Exempt until {year}"),
    }
}

pub(crate) fn exempt_new_vehicle(locale: Locale) -> String {
    match locale {
        Locale::Spanish => "Exento (Coche Nuevo)".to_string(),
        Locale::English => "Exempt (new vehicle)".to_string(),
    }
}

pub(crate) fn status_label(locale: Locale, state: ComplianceState, days_remaining: i64) -> String {
    match (state, locale) {
        (ComplianceState::Expired, Locale::Spanish) => "CADUCADA".to_string(),
        (ComplianceState::Expired, Locale::English) => "EXPIRED".to_string(),
        (ComplianceState::Warning, Locale::Spanish) => {
            format!("Caduca en {}", day_count(locale, days_remaining))
        }
        (ComplianceState::Warning, Locale::English) => {
            format!("Expires in {}", day_count(locale, days_remaining))
        }
        (ComplianceState::Valid, Locale::Spanish) => "Vigente".to_string(),
        (ComplianceState::Valid, Locale::English) => "Valid".to_string(),
        (ComplianceState::NoData, Locale::Spanish) => "Sin Datos".to_string(),
        (ComplianceState::NoData, Locale::English) => "No data".to_string(),
        (ComplianceState::Exempt, _) => exempt_new_vehicle(locale),
    }
}

/// Lead time before a due date, in weeks when it divides evenly, otherwise in days.
pub fn time_label(locale: Locale, days: i64) -> String {
    if days >= 7 && days % 7 == 0 {
        week_count(locale, days / 7)
    } else {
        day_count(locale, days)
    }
}

fn day_count(locale: Locale, days: i64) -> String {
    match (locale, days) {
        (Locale::Spanish, 1) => "1 día".to_string(),
        (Locale::Spanish, n) => format!("{n} días"),
        (Locale::English, 1) => "1 day".to_string(),
        (Locale::English, n) => format!("{n} days"),
    }
}

fn week_count(locale: Locale, weeks: i64) -> String {
    match (locale, weeks) {
        (Locale::Spanish, 1) => "1 semana".to_string(),
        (Locale::Spanish, n) => format!("{n} semanas"),
        (Locale::English, 1) => "1 week".to_string(),
        (Locale::English, n) => format!("{n} weeks"),
    }
}

/// Toast text plus push title/body for one alert.
pub(crate) struct AlertText {
    pub(crate) message: String,
    pub(crate) push_title: String,
    pub(crate) push_body: String,
}

pub(crate) fn expired_alert(locale: Locale, vehicle: &Vehicle) -> AlertText {
    let plate = &vehicle.plate;
    let make = &vehicle.make;
    match locale {
        Locale::Spanish => AlertText {
            message: format!("¡URGENTE! La ITV del vehículo {plate} está CADUCADA."),
            push_title: "¡ITV CADUCADA!".to_string(),
            push_body: format!("El coche {plate} ({make}) tiene la ITV vencida."),
        },
        Locale::English => AlertText {
            message: format!("URGENT! Inspection for {plate} is EXPIRED."),
            push_title: "Inspection EXPIRED!".to_string(),
            push_body: format!("Vehicle {plate} ({make}) has an expired inspection."),
        },
    }
}

pub(crate) fn preventive_alert(locale: Locale, vehicle: &Vehicle, days: i64) -> AlertText {
    let plate = &vehicle.plate;
    let lead = time_label(locale, days);
    match locale {
        Locale::Spanish => AlertText {
            message: format!("Recordatorio: La ITV del vehículo {plate} caduca en {lead}."),
            push_title: "Aviso Preventivo de ITV".to_string(),
            push_body: format!("La ITV del coche {plate} vencerá en {lead}."),
        },
        Locale::English => AlertText {
            message: format!("Reminder: inspection for {plate} is due in {lead}."),
            push_title: "Preventive inspection notice".to_string(),
            push_body: format!("Inspection for {plate} is due in {lead}."),
        },
    }
}
