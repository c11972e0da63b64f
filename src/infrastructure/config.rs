use crate::error::CalendarError;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CALENDAR_JSON: &str = "calendar.json";
const SUPPORTED_SCHEMA: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarConfigFile {
    schema: u64,
    timezone: String,
    upcoming_limit: usize,
    cell_preview_limit: usize,
}

impl Default for CalendarConfigFile {
    fn default() -> Self {
        Self {
            schema: SUPPORTED_SCHEMA,
            timezone: "UTC".to_string(),
            upcoming_limit: 5,
            cell_preview_limit: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSettings {
    pub timezone: Tz,
    pub upcoming_limit: usize,
    pub cell_preview_limit: usize,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            upcoming_limit: 5,
            cell_preview_limit: 2,
        }
    }
}

pub fn ensure_default_configs(config_dir: &Path) -> Result<(), CalendarError> {
    let path = config_dir.join(CALENDAR_JSON);
    if !path.exists() {
        let formatted = serde_json::to_string_pretty(&CalendarConfigFile::default())?;
        fs::write(path, format!("{formatted}\n"))?;
    }
    Ok(())
}

fn read_config(path: &Path) -> Result<serde_json::Value, CalendarError> {
    let raw = fs::read_to_string(path)?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;
    let schema = parsed
        .get("schema")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| CalendarError::InvalidConfig(format!("missing schema in {}", path.display())))?;
    if schema != SUPPORTED_SCHEMA {
        return Err(CalendarError::InvalidConfig(format!(
            "unsupported schema {} in {}",
            schema,
            path.display()
        )));
    }
    Ok(parsed)
}

pub fn load_settings(config_dir: &Path) -> Result<CalendarSettings, CalendarError> {
    let path = config_dir.join(CALENDAR_JSON);
    let file: CalendarConfigFile = serde_json::from_value(read_config(&path)?)?;

    let timezone = file.timezone.trim().parse::<Tz>().map_err(|_| {
        CalendarError::InvalidConfig(format!(
            "unknown timezone '{}' in {}",
            file.timezone,
            path.display()
        ))
    })?;
    if file.upcoming_limit == 0 {
        return Err(CalendarError::InvalidConfig(
            "upcomingLimit must be >= 1".to_string(),
        ));
    }
    if file.cell_preview_limit == 0 {
        return Err(CalendarError::InvalidConfig(
            "cellPreviewLimit must be >= 1".to_string(),
        ));
    }

    Ok(CalendarSettings {
        timezone,
        upcoming_limit: file.upcoming_limit,
        cell_preview_limit: file.cell_preview_limit,
    })
}
