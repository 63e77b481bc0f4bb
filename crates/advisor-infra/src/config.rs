//! Client configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.advisor/` by default) and
//! deserializes it into [`ClientConfig`]. `load_client_config` falls back to
//! defaults when the file is missing or malformed; `read_client_config`
//! reports why instead.

use std::path::{Path, PathBuf};

use thiserror::Error;

use advisor_types::config::ClientConfig;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "ADVISOR_DATA_DIR";

/// Environment variable that overrides `base_url`.
pub const BASE_URL_ENV: &str = "ADVISOR_BASE_URL";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config file at {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Path of the config file inside `data_dir`.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Read and parse `{data_dir}/config.toml`, reporting every failure.
pub async fn read_client_config(data_dir: &Path) -> Result<ClientConfig, ConfigError> {
    let path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path));
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    toml::from_str::<ClientConfig>(&content)
        .map(ClientConfig::normalized)
        .map_err(|source| ConfigError::Parse { path, source })
}

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`ClientConfig::default()`], logged at debug.
/// - Unreadable or unparsable file: the default, logged as a warning.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    match read_client_config(data_dir).await {
        Ok(config) => config,
        Err(err @ ConfigError::NotFound(_)) => {
            tracing::debug!("{err}, using defaults");
            ClientConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            ClientConfig::default()
        }
    }
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `ADVISOR_DATA_DIR` environment variable
/// 2. `~/.advisor`
/// 3. `./.advisor` when no home directory is known
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".advisor");
    }

    PathBuf::from(".advisor")
}
