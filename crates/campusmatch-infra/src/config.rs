//! Client configuration loader for CampusMatch.
//!
//! Reads `config.toml` from the platform config directory
//! (`~/.config/campusmatch/` on Linux) and deserializes it into
//! [`ClientConfig`]. Falls back to defaults when the file is missing or
//! malformed. The `CAMPUSMATCH_BASE_URL` environment variable overrides
//! the configured base URL.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured base URL.
pub const BASE_URL_ENV: &str = "CAMPUSMATCH_BASE_URL";

/// Settings for talking to the CampusMatch service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the service, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout for the HTTP client.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// The per-user config directory, `{platform config dir}/campusmatch`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("campusmatch"))
}

/// Load client configuration from `{config_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
/// - `CAMPUSMATCH_BASE_URL`, when set, overrides the base URL from any
///   of the above.
pub async fn load_client_config(config_dir: &Path) -> ClientConfig {
    let config_path = config_dir.join("config.toml");

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => match toml::from_str::<ClientConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    config_path.display()
                );
                ClientConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    };

    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        config.base_url = url;
    }

    config
}
