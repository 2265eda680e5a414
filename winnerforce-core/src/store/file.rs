//! Key-value store persisted as a single JSON object.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{WinnerforceError, WinnerforceResult};
use crate::store::KeyValueStore;

/// Store backed by a JSON file, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> WinnerforceResult<Self> {
        let path = path.into();

        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| {
                WinnerforceError::Store(format!("Invalid store file {}: {e}", path.display()))
            })?
        } else {
            BTreeMap::new()
        };

        Ok(FileStore { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to a temp file next to the store and rename it into place, so
    /// an interrupted save leaves the previous file intact.
    fn save(&self) -> WinnerforceResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let content = serde_json::to_string_pretty(&self.values)?;
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(content.as_bytes())?;
        temp.persist(&self.path).map_err(|e| {
            WinnerforceError::Store(format!("Could not replace {}: {}", self.path.display(), e.error))
        })?;

        debug!(path = %self.path.display(), keys = self.values.len(), "store saved");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> WinnerforceResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> WinnerforceResult<()> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}
