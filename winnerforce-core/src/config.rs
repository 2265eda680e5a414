//! Global Winnerforce configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::date::{DateOnlyPolicy, DayNormalizer, DayZone};
use crate::error::{WinnerforceError, WinnerforceResult};

static DEFAULT_SNAPSHOT_PATH: &str = "~/.local/share/winnerforce/snapshot.json";
static DEFAULT_STORE_PATH: &str = "~/.local/share/winnerforce/store.json";

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_PATH)
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

/// Configuration at ~/.config/winnerforce/config.toml, overridable through
/// `WINNERFORCE_*` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WinnerforceConfig {
    /// Zone used to decide which day an instant falls on
    #[serde(default)]
    pub time_zone: DayZone,

    /// How bare YYYY-MM-DD strings are placed in time
    #[serde(default)]
    pub date_only: DateOnlyPolicy,

    #[serde(default = "default_snapshot_path")]
    pub snapshot: PathBuf,

    #[serde(default = "default_store_path")]
    pub store: PathBuf,
}

impl Default for WinnerforceConfig {
    fn default() -> Self {
        WinnerforceConfig {
            time_zone: DayZone::default(),
            date_only: DateOnlyPolicy::default(),
            snapshot: default_snapshot_path(),
            store: default_store_path(),
        }
    }
}

impl WinnerforceConfig {
    pub fn config_path() -> WinnerforceResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WinnerforceError::Config("Could not determine config directory".into()))?
            .join("winnerforce");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented default file on
    /// first use.
    pub fn load() -> WinnerforceResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> WinnerforceResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("WINNERFORCE"))
            .build()
            .map_err(|e| WinnerforceError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| WinnerforceError::Config(e.to_string()))
    }

    /// Save to `path` as TOML.
    pub fn save(&self, path: &Path) -> WinnerforceResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| WinnerforceError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| WinnerforceError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> WinnerforceResult<()> {
        let contents = format!(
            "\
# winnerforce configuration

# Zone used to place events on calendar days (\"local\" or an IANA name):
# time_zone = \"local\"

# How date-only values like 2023-06-15 are read (\"utc\" or \"local\"):
# date_only = \"utc\"

# Backend snapshot used when --snapshot is not given:
# snapshot = \"{}\"

# Where team assignments are kept:
# store = \"{}\"
",
            DEFAULT_SNAPSHOT_PATH, DEFAULT_STORE_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WinnerforceError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| WinnerforceError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn normalizer(&self) -> DayNormalizer {
        DayNormalizer::new(self.time_zone, self.date_only)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        expand(&self.snapshot)
    }

    pub fn store_path(&self) -> PathBuf {
        expand(&self.store)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
