use std::path::Path;

use batch_engine::{AutomationSettings, FlowReport};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::LoadError;
use crate::metadata::ConfigMetadata;
use crate::migrate::migrate;
use crate::save::{FORMAT_ID, FORMAT_VERSION, REPORT_FORMAT_ID};

/// Envelope shared by settings and report files.
#[derive(Debug, Clone, Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    #[serde(flatten)]
    payload: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct SettingsPayload {
    metadata: ConfigMetadata,
    #[serde(default)]
    settings: AutomationSettings,
}

#[derive(Debug, Clone, Deserialize)]
struct ReportPayload {
    reports: Vec<FlowReport>,
}

/// Deserialize settings from a JSON string.
///
/// Validates the format identifier and version, migrating older files.
pub fn load_settings(json: &str) -> Result<(AutomationSettings, ConfigMetadata), LoadError> {
    let payload = open_envelope(json, FORMAT_ID)?;
    let parsed: SettingsPayload =
        serde_json::from_value(payload).map_err(|e| LoadError::ParseError(e.to_string()))?;
    Ok((parsed.settings, parsed.metadata))
}

pub fn load_settings_file(path: &Path) -> Result<(AutomationSettings, ConfigMetadata), LoadError> {
    load_settings(&read(path)?)
}

/// Deserialize run reports from a JSON string.
pub fn load_reports(json: &str) -> Result<Vec<FlowReport>, LoadError> {
    let payload = open_envelope(json, REPORT_FORMAT_ID)?;
    let parsed: ReportPayload =
        serde_json::from_value(payload).map_err(|e| LoadError::ParseError(e.to_string()))?;
    Ok(parsed.reports)
}

pub fn load_reports_file(path: &Path) -> Result<Vec<FlowReport>, LoadError> {
    load_reports(&read(path)?)
}

fn open_envelope(json: &str, expected_format: &str) -> Result<Value, LoadError> {
    let raw: Envelope =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

    if raw.format != expected_format {
        return Err(LoadError::UnknownFormat(raw.format));
    }
    if raw.version > FORMAT_VERSION {
        return Err(LoadError::FutureVersion {
            file_version: raw.version,
            supported_version: FORMAT_VERSION,
        });
    }

    let payload = Value::Object(raw.payload);
    if raw.version < FORMAT_VERSION {
        migrate(payload, raw.version, FORMAT_VERSION)
    } else {
        Ok(payload)
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
