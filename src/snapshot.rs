use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

/// What a host may persist between page loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub history: Vec<String>,
    pub current_directory: String,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Downloadable command history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryExport {
    pub commands: Vec<String>,
    /// RFC 3339, UTC.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub host: String,
}

impl HistoryExport {
    pub fn new(commands: Vec<String>, user: &str, host: &str) -> Self {
        Self {
            commands,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            user: user.to_string(),
            host: host.to_string(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
