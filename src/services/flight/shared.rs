use chrono::{DateTime, Local};
use rusqlite::{self, Result};

use crate::models::flight::ServiceTag;

pub(crate) fn serialize_services(services: &[ServiceTag]) -> Option<String> {
    if services.is_empty() {
        return None;
    }
    serde_json::to_string(services).ok()
}

pub(crate) fn deserialize_services(json: Option<String>) -> Vec<ServiceTag> {
    let Some(json) = json else {
        return Vec::new();
    };

    // Unknown tags in a hand-edited database are dropped, not fatal.
    serde_json::from_str(&json).unwrap_or_default()
}

pub(crate) fn to_local_datetime(value: String) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn to_optional_local_datetime(
    value: Option<String>,
) -> Result<Option<DateTime<Local>>> {
    value.map(to_local_datetime).transpose()
}
