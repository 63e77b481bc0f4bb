//! Client configuration.
//!
//! `ClientConfig` mirrors `{data_dir}/config.toml`. Every field has a default,
//! so an empty or missing file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Where the advisor service lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the advisor service, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Optional TCP connect timeout. Requests themselves never time out.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_user_agent() -> String {
    concat!("advisor/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            connect_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Replace the base URL when an override is present (env var or CLI flag).
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self.normalized()
    }

    /// Strip trailing slashes so paths can be appended with `format!`.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert!(config.user_agent.starts_with("advisor/"));
        assert!(config.connect_timeout_secs.is_none());
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_deserialize_with_values() {
        let config: ClientConfig = toml::from_str(
            r#"
base_url = "https://advisor.example.com"
connect_timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://advisor.example.com");
        assert_eq!(config.connect_timeout_secs, Some(5));
    }

    #[test]
    fn test_base_url_override() {
        let config = ClientConfig::default()
            .with_base_url_override(Some("http://127.0.0.1:8080/".to_string()));
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let config = ClientConfig::default().with_base_url_override(Some("  ".to_string()));
        assert_eq!(config.base_url, "http://localhost:5000");
    }
}
