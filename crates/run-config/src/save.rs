use std::path::Path;

use batch_engine::{AutomationSettings, FlowReport};
use serde::Serialize;

use crate::errors::SaveError;
use crate::metadata::ConfigMetadata;

/// Format identifier of settings files.
pub const FORMAT_ID: &str = "sector-automation";

/// Format identifier of run report files.
pub const REPORT_FORMAT_ID: &str = "sector-automation-report";

/// Current file format version.
pub const FORMAT_VERSION: u32 = 1;

/// The top-level settings file structure.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsFile<'a> {
    pub format: &'a str,
    pub version: u32,
    pub metadata: &'a ConfigMetadata,
    pub settings: &'a AutomationSettings,
}

/// The top-level report file structure.
#[derive(Debug, Clone, Serialize)]
pub struct ReportFile<'a> {
    pub format: &'a str,
    pub version: u32,
    pub reports: &'a [FlowReport],
}

/// Serialize settings to a pretty-printed JSON string.
pub fn save_settings(
    settings: &AutomationSettings,
    metadata: &ConfigMetadata,
) -> Result<String, SaveError> {
    let file = SettingsFile {
        format: FORMAT_ID,
        version: FORMAT_VERSION,
        metadata,
        settings,
    };
    serde_json::to_string_pretty(&file).map_err(|e| SaveError::Serialize(e.to_string()))
}

pub fn save_settings_file(
    path: &Path,
    settings: &AutomationSettings,
    metadata: &ConfigMetadata,
) -> Result<(), SaveError> {
    let json = save_settings(settings, metadata)?;
    write(path, &json)
}

/// Serialize run reports to a pretty-printed JSON string.
pub fn save_reports(reports: &[FlowReport]) -> Result<String, SaveError> {
    let file = ReportFile {
        format: REPORT_FORMAT_ID,
        version: FORMAT_VERSION,
        reports,
    };
    serde_json::to_string_pretty(&file).map_err(|e| SaveError::Serialize(e.to_string()))
}

pub fn save_reports_file(path: &Path, reports: &[FlowReport]) -> Result<(), SaveError> {
    let json = save_reports(reports)?;
    write(path, &json)
}

fn write(path: &Path, contents: &str) -> Result<(), SaveError> {
    std::fs::write(path, contents).map_err(|e| SaveError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
