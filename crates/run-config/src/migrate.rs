use serde_json::Value;

use crate::errors::LoadError;

/// Apply format migrations from `from_version` to `to_version`.
///
/// Migrations operate on the raw JSON payload and run one version at a
/// time: v1→v2, v2→v3, etc. Version 1 is the only version so far.
pub fn migrate(payload: Value, from_version: u32, to_version: u32) -> Result<Value, LoadError> {
    // As the format evolves, add steps here: 1 => migrate_v1_to_v2(payload)?
    if from_version != to_version {
        return Err(LoadError::MigrationFailed {
            from: from_version,
            to: to_version,
            reason: format!("no migration path from v{from_version} to v{to_version}"),
        });
    }
    Ok(payload)
}
