//! Application configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Backend (auth, tables, storage) settings
    pub backend: BackendSettings,
    /// Suggestion gateway settings
    pub gateway: GatewaySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            backend: BackendSettings::default(),
            gateway: GatewaySettings::default(),
        }
    }
}

/// Settings for the hosted backend the dashboard talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL of the backend project (no trailing slash)
    pub base_url: String,
    /// Publishable API key sent with every request
    pub anon_key: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u32,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:54321".to_string(),
            anon_key: String::new(),
            request_timeout_secs: 30,
        }
    }
}

/// Settings for the AI suggestion gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Address the gateway binds to
    pub bind_addr: String,
    /// Chat-completions endpoint of the upstream model provider
    pub upstream_url: String,
    /// Model identifier sent upstream
    pub model: String,
    /// Upstream connect timeout in seconds. There is deliberately no
    /// overall timeout: relayed streams run as long as the provider
    /// keeps producing tokens.
    pub connect_timeout_secs: u32,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".to_string(),
            upstream_url: "http://localhost:11434/v1/chat/completions".to_string(),
            model: "local-model".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl GatewaySettings {
    /// API key for the upstream provider, taken from the environment.
    ///
    /// Kept out of the config file so the secret never lands on disk.
    pub fn api_key(&self) -> Option<String> {
        std::env::var("CREATORDESK_AI_KEY").ok().filter(|k| !k.is_empty())
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "creatordesk", "CreatorDesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from file.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = get_config_path();

    if !path.exists() {
        let mut config = AppConfig {
            data_dir: get_data_dir(),
            ..Default::default()
        };
        apply_env_overrides(&mut config);
        return Ok(config);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = get_data_dir();
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Apply environment overrides on top of the loaded file.
///
/// `CREATORDESK_BACKEND_URL` and `CREATORDESK_ANON_KEY` win over the file so
/// deployments can point one build at different backend projects.
fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(url) = std::env::var("CREATORDESK_BACKEND_URL") {
        if !url.is_empty() {
            config.backend.base_url = url;
        }
    }
    if let Ok(key) = std::env::var("CREATORDESK_ANON_KEY") {
        if !key.is_empty() {
            config.backend.anon_key = key;
        }
    }
    if let Ok(url) = std::env::var("CREATORDESK_UPSTREAM_URL") {
        if !url.is_empty() {
            config.gateway.upstream_url = url;
        }
    }
}

/// Save application configuration to file.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = get_config_path();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
