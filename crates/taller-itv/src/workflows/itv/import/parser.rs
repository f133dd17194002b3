use super::super::domain::{Vehicle, VehicleId, WorkshopSettings};
use super::FleetImportError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<Vehicle>, FleetImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut vehicles = Vec::new();

    for (index, record) in csv_reader.deserialize::<FleetRow>().enumerate() {
        let row = record?;
        // Header is line 1.
        let line = index + 2;
        vehicles.push(row.into_vehicle(line)?);
    }

    Ok(vehicles)
}

#[derive(Debug, Deserialize)]
struct FleetRow {
    id: String,
    plate: String,
    #[serde(default)]
    make: String,
    #[serde(default)]
    model: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    year: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_itv_date: Option<String>,
}

impl FleetRow {
    fn into_vehicle(self, line: usize) -> Result<Vehicle, FleetImportError> {
        let manufacture_year = self
            .year
            .as_deref()
            .map(|raw| {
                raw.parse::<i32>().map_err(|_| FleetImportError::InvalidRow {
                    line,
                    detail: format!("year '{raw}' is not a number"),
                })
            })
            .transpose()?;

        let last_inspection_date = self
            .last_itv_date
            .as_deref()
            .map(|raw| {
                parse_date(raw).ok_or_else(|| FleetImportError::InvalidRow {
                    line,
                    detail: format!("last_itv_date '{raw}' is not a YYYY-MM-DD date"),
                })
            })
            .transpose()?;

        Ok(Vehicle {
            id: VehicleId(self.id),
            plate: self.plate,
            make: self.make,
            model: self.model,
            manufacture_year,
            last_inspection_date,
        })
    }
}

/// Accepts plain dates and the timestamp form the hosted store sometimes returns.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| raw.get(..10).and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Shape of the front-end's JSON backup export; only the fields used here.
#[derive(Debug, Deserialize)]
pub(crate) struct Backup {
    #[serde(default)]
    vehicles: Vec<BackupVehicle>,
    #[serde(default)]
    settings: Option<BackupSettings>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackupVehicle {
    id: String,
    #[serde(default)]
    plate: String,
    #[serde(default)]
    make: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_itv_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackupSettings {
    #[serde(default)]
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    website: String,
    #[serde(default)]
    itv_notification_thresholds: Option<Vec<i64>>,
}

impl Backup {
    pub(crate) fn into_parts(self) -> Result<(Vec<Vehicle>, WorkshopSettings), FleetImportError> {
        let vehicles = self
            .vehicles
            .into_iter()
            .enumerate()
            .map(|(index, vehicle)| vehicle.into_vehicle(index))
            .collect::<Result<Vec<_>, _>>()?;

        let settings = self.settings.unwrap_or_default();
        let settings = WorkshopSettings {
            name: settings.name,
            address: settings.address,
            phone: settings.phone,
            email: settings.email,
            website: settings.website,
            alert_thresholds: settings.itv_notification_thresholds,
        };

        Ok((vehicles, settings))
    }
}

impl BackupVehicle {
    fn into_vehicle(self, index: usize) -> Result<Vehicle, FleetImportError> {
        let last_inspection_date = self
            .last_itv_date
            .as_deref()
            .map(|raw| {
                parse_date(raw).ok_or_else(|| FleetImportError::InvalidRow {
                    line: index + 1,
                    detail: format!("lastItvDate '{raw}' is not a date"),
                })
            })
            .transpose()?;

        Ok(Vehicle {
            id: VehicleId(self.id),
            plate: self.plate,
            make: self.make,
            model: self.model,
            manufacture_year: self.year,
            last_inspection_date,
        })
    }
}
