mod parser;

use super::domain::{Vehicle, WorkshopSettings};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Vehicles and settings loaded from an export, ready to seed a data store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetSnapshot {
    pub vehicles: Vec<Vehicle>,
    pub settings: WorkshopSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum FleetImportError {
    #[error("failed to read fleet export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid fleet CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid backup JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid vehicle entry {line}: {detail}")]
    InvalidRow { line: usize, detail: String },
}

pub struct FleetImporter;

impl FleetImporter {
    /// CSV with headers `id,plate,make,model,year,last_itv_date`; settings stay default.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<FleetSnapshot, FleetImportError> {
        let vehicles = parser::parse_csv(reader)?;
        Ok(FleetSnapshot {
            vehicles,
            settings: WorkshopSettings::default(),
        })
    }

    /// JSON backup as exported by the workshop front-end.
    pub fn from_backup_reader<R: Read>(reader: R) -> Result<FleetSnapshot, FleetImportError> {
        let backup: parser::Backup = serde_json::from_reader(reader)?;
        let (vehicles, settings) = backup.into_parts()?;
        Ok(FleetSnapshot { vehicles, settings })
    }

    /// Picks the format from the extension: `.json` is a backup, anything else CSV.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<FleetSnapshot, FleetImportError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_backup_reader(reader)
        } else {
            Self::from_csv_reader(reader)
        }
    }
}
