//! Relay configuration and backend selection

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Which backend implementation to construct
    #[serde(default)]
    pub backend: BackendKind,

    /// Hosted backend settings
    #[serde(default)]
    pub hosted: HostedConfig,

    /// Default number of predictions returned when the request omits `top_k`
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl RelayConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(config_path: &str) -> anyhow::Result<Self> {
        if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            hosted: HostedConfig::default(),
            top_k: default_top_k(),
        }
    }
}

/// Backend implementation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Relay to a hosted inference API over HTTP
    #[default]
    Hosted,
    /// Run an in-process inference capability
    Local,
}

/// Hosted inference API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedConfig {
    /// Base URL of the hosted inference API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier appended to the endpoint
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Environment variable holding the API token.
    ///
    /// Indirection keeps the token itself out of config files.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Per-request deadline in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HostedConfig {
    /// Resolve the API token from the configured environment variable
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env).ok()
    }

    /// Per-request deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HostedConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model_id: default_model_id(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_model_id() -> String {
    "harun-767/dog-breed-classifier".to_string()
}

fn default_token_env() -> String {
    "HF_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_top_k() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_service_conventions() {
        let config = RelayConfig::default();
        assert_eq!(config.backend, BackendKind::Hosted);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.hosted.timeout_secs, 60);
        assert_eq!(config.hosted.token_env, "HF_TOKEN");
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: RelayConfig = serde_yaml::from_str(
            r#"
backend: local
top_k: 5
"#,
        )
        .unwrap();

        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.hosted.timeout_secs, 60);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = RelayConfig::load("/definitely/not/a/config.yaml").unwrap();
        assert_eq!(config.backend, BackendKind::Hosted);
    }
}
