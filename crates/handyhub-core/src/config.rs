//! Client configuration.
//!
//! `ClientConfig` is what the core needs at runtime: base URL, optional
//! timeout and the session fallback mode. It is built from environment
//! variables with defaults.
//!
//! `Config` is the persisted preferences file at
//! `~/.config/handyhub/config.json` (store backend, fallback mode, API URL
//! override and the last email used to sign in). Environment variables win
//! over the file.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::FallbackMode;
use crate::store::{StoreBackend, APP_NAME};

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "HANDYHUB_API_URL";

/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_ENV: &str = "HANDYHUB_TIMEOUT_SECS";

/// Environment variable selecting the session fallback mode
pub const FALLBACK_ENV: &str = "HANDYHUB_FALLBACK";

/// Local development backend
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// None means requests wait for the server indefinitely
    pub timeout: Option<Duration>,
    pub fallback: FallbackMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: None,
            fallback: FallbackMode::Disabled,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset, blank and invalid
    /// values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(url) = var(API_URL_ENV) {
            config.base_url = url;
        }
        if let Some(raw) = var(TIMEOUT_ENV) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Some(Duration::from_secs(secs)),
                _ => warn!(value = %raw, "Ignoring invalid {}", TIMEOUT_ENV),
            }
        }
        if let Some(raw) = var(FALLBACK_ENV) {
            match raw.parse() {
                Ok(mode) => config.fallback = mode,
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", FALLBACK_ENV),
            }
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackMode) -> Self {
        self.fallback = fallback;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub store: StoreBackend,
    #[serde(default)]
    pub fallback: FallbackMode,
    #[serde(default)]
    pub last_email: Option<String>,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            Ok(serde_json::from_str(&contents).context("Failed to parse config file")?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Remember a successful sign-in
    pub fn record_login(&mut self, email: &str) {
        self.last_email = Some(email.to_string());
        self.last_login_at = Some(Utc::now());
    }

    /// Runtime configuration: environment first, then this file, then defaults
    pub fn client_config(&self) -> ClientConfig {
        self.client_config_with(|key| std::env::var(key).ok())
    }

    fn client_config_with<F>(&self, lookup: F) -> ClientConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_set = |key: &str| lookup(key).is_some_and(|v| !v.trim().is_empty());
        let mut config = ClientConfig::from_lookup(&lookup);
        if !is_set(API_URL_ENV) {
            if let Some(url) = self.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
                config.base_url = url.trim().to_string();
            }
        }
        let env_fallback = lookup(FALLBACK_ENV).and_then(|v| v.parse::<FallbackMode>().ok());
        if env_fallback.is_none() {
            config.fallback = self.fallback;
        }
        config
    }
}
