//! Client configuration, loadable from a YAML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for the dashboard client. Every field has a default, so an empty
/// file (or no file at all) yields a working mock setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of a deployed backend. Unset means the in-process mock.
    pub backend_url: Option<String>,

    /// Delay between job status checks.
    pub poll_interval_ms: u64,

    /// Per-step delay of the mock object store.
    pub upload_tick_ms: u64,

    /// Whether the mock backend sleeps to imitate service latency.
    pub simulate_latency: bool,

    /// Where the session token is persisted. Unset means the platform
    /// config directory.
    pub token_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            backend_url: None,
            poll_interval_ms: 3000,
            upload_tick_ms: 200,
            simulate_latency: true,
            token_path: None,
        }
    }
}

impl ClientConfig {
    /// Reads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ClientConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Validation {
                message: "poll_interval_ms must be greater than zero".to_string(),
            });
        }
        if let Some(url) = &self.backend_url {
            if url.trim().is_empty() {
                return Err(ConfigError::Validation {
                    message: "backend_url must not be blank when set".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn upload_tick(&self) -> Duration {
        Duration::from_millis(self.upload_tick_ms)
    }
}
