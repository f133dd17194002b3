use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier assigned to a vehicle by the workshop data store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subset of the workshop's vehicle record that drives inspection scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub plate: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub manufacture_year: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub last_inspection_date: Option<NaiveDate>,
}

impl Vehicle {
    /// Model year, ignoring the zero/negative placeholders the front-end stores for "unknown".
    pub fn model_year(&self) -> Option<i32> {
        self.manufacture_year.filter(|year| *year > 0)
    }
}

/// Derived inspection state of a vehicle on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceState {
    Exempt,
    NoData,
    Expired,
    Warning,
    Valid,
}

impl ComplianceState {
    /// States that carry a next due date and therefore take part in alert scans.
    pub const fn is_scheduled(self) -> bool {
        matches!(self, Self::Expired | Self::Warning | Self::Valid)
    }
}

/// Urgency of an alert handed to the notification transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Critical,
}

impl AlertSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Critical => "Critical",
        }
    }
}

/// Language used for every human-readable string the workflow produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Spanish,
    English,
}

impl Locale {
    pub fn from_code(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Self::English,
            _ => Self::Spanish,
        }
    }
}

/// Workshop-wide settings owned by the settings collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopSettings {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub alert_thresholds: Option<Vec<i64>>,
}

pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|err| {
                serde::de::Error::custom(format!("failed to parse '{value}' as YYYY-MM-DD ({err})"))
            }),
    }
}
