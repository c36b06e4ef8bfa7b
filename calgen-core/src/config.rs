//! calgen configuration.
//!
//! Read from `~/.config/calgen/config.toml` when present, with `CALGEN_*`
//! environment variables layered on top (`CALGEN_PACING_MS=500`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalGenError, CalGenResult};

pub const DEFAULT_HOLIDAY_CALENDAR_ID: &str = "ja.japanese#holiday@group.v.calendar.google.com";
const DEFAULT_PACING_MS: u64 = 200;
static DEFAULT_SESSION_PATH: &str = "~/.config/calgen/session.toml";

fn default_holiday_calendar_id() -> String {
    DEFAULT_HOLIDAY_CALENDAR_ID.to_string()
}

fn default_pacing_ms() -> u64 {
    DEFAULT_PACING_MS
}

fn default_session_path() -> PathBuf {
    PathBuf::from(DEFAULT_SESSION_PATH)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalGenConfig {
    /// Public-holiday calendar consulted when skipping holidays.
    #[serde(default = "default_holiday_calendar_id")]
    pub holiday_calendar_id: String,

    /// Pause between successive create/delete calls.
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// Where the access token is stored.
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,

    /// Calendar used when no calendar id is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_calendar: Option<String>,
}

impl Default for CalGenConfig {
    fn default() -> Self {
        CalGenConfig {
            holiday_calendar_id: default_holiday_calendar_id(),
            pacing_ms: DEFAULT_PACING_MS,
            session_path: default_session_path(),
            default_calendar: None,
        }
    }
}

impl CalGenConfig {
    pub fn config_path() -> CalGenResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGenError::Config("Could not determine config directory".into()))?
            .join("calgen");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template there
    /// on first use.
    pub fn load() -> CalGenResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> CalGenResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CALGEN"))
            .build()
            .map_err(|e| CalGenError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalGenError::Config(e.to_string()))
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    /// Session path with `~` expanded.
    pub fn session_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.session_path.to_string_lossy()).into_owned())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalGenResult<()> {
        let contents = format!(
            "\
# calgen configuration

# Public-holiday calendar used by `biweekly --skip-holidays`:
# holiday_calendar_id = \"{}\"

# Milliseconds to wait between calendar API calls:
# pacing_ms = {}

# Where the access token lives:
# session_path = \"{}\"

# Calendar to register events in when --calendar is omitted:
# default_calendar = \"primary\"
",
            DEFAULT_HOLIDAY_CALENDAR_ID, DEFAULT_PACING_MS, DEFAULT_SESSION_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGenError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalGenError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
