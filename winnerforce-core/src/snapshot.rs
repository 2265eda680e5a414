//! A single read of the backend collections a view works from.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::{WinnerforceError, WinnerforceResult};
use crate::model::{Campaign, Goal, ScheduledPost};

/// Posts, campaigns and goals as fetched by one view.
///
/// Collections load independently, so any of them may be empty while the
/// others are populated. A record that does not fit its type is skipped
/// on its own; the rest of its collection still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "skip_malformed")]
    pub posts: Vec<ScheduledPost>,
    #[serde(default, deserialize_with = "skip_malformed")]
    pub campaigns: Vec<Campaign>,
    #[serde(default, deserialize_with = "skip_malformed")]
    pub goals: Vec<Goal>,
}

fn skip_malformed<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    let kind = std::any::type_name::<T>().rsplit("::").next().unwrap_or("record");

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            serde_json::from_value(value)
                .inspect_err(|e| warn!(kind, index, error = %e, "skipping malformed record"))
                .ok()
        })
        .collect())
}

impl Snapshot {
    pub fn from_json(content: &str) -> WinnerforceResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> WinnerforceResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WinnerforceError::Snapshot(format!("Could not read {}: {e}", path.display()))
        })?;

        Self::from_json(&content)
            .map_err(|e| WinnerforceError::Snapshot(format!("Invalid snapshot {}: {e}", path.display())))
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn campaign(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }
}
