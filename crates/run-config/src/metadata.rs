use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata stored alongside the settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Human-readable name of the setup, e.g. the study it belongs to.
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl ConfigMetadata {
    /// Create metadata with the given name and current timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created: now,
            modified: now,
        }
    }

    /// Mark the settings as modified now.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}
