//! Application-level configuration loading.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Where the JSON configuration is looked for by default.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable overriding [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "TRIVIA_BACK_CONFIG_PATH";
/// Default location of the question bank file.
const DEFAULT_BANK_PATH: &str = "data/quiz_data.json";
/// Default cap on the number of entries a history query returns.
const DEFAULT_HISTORY_LIMIT: u32 = 25;
/// Default capacity of the presentation event channel.
const DEFAULT_EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
/// Immutable runtime settings the application state is built with.
pub struct AppConfig {
    /// Path of the question bank JSON file.
    pub bank_path: PathBuf,
    /// Maximum number of entries returned by a history query.
    pub history_limit: u32,
    /// Capacity of the presentation event broadcast channel.
    pub event_capacity: usize,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in
    /// defaults for anything missing.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        bank = %app_config.bank_path.display(),
                        "loaded runtime configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "config did not parse; using built-in defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "no config file; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "config unreadable; using built-in defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bank_path: PathBuf::from(DEFAULT_BANK_PATH),
            history_limit: DEFAULT_HISTORY_LIMIT,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

#[derive(Debug, Deserialize)]
/// Shape of the configuration file; every key is optional.
struct RawConfig {
    bank_path: Option<PathBuf>,
    history_limit: Option<u32>,
    event_capacity: Option<usize>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            bank_path: value
                .bank_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BANK_PATH)),
            history_limit: value.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
            event_capacity: value.event_capacity.unwrap_or(DEFAULT_EVENT_CAPACITY),
        }
    }
}

/// Resolve the configuration path, honouring the environment override.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
