//! Configuration management
//!
//! Settings live in `settings.json` in the payline directory:
//! ```json
//! {
//!   "api": { "baseUrl": "http://localhost:3000", "timeoutSecs": 30 }
//! }
//! ```
//! Keys this crate does not manage are kept as-is when saving.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::adapters::http::{API_URL_ENV, DEFAULT_BASE_URL};

const SETTINGS_FILENAME: &str = "settings.json";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            other: HashMap::new(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Payline configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL as stored in settings
    pub base_url: String,
    /// Per-request timeout; 0 disables it
    pub timeout_secs: u64,
    /// Base URL from the environment, taking precedence over settings
    pub url_override: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            url_override: None,
        }
    }
}

impl Config {
    /// Load config from the payline directory
    ///
    /// `PAYLINE_API_URL` overrides the stored base URL. A missing or corrupt
    /// settings file yields defaults.
    pub fn load(payline_dir: &Path) -> Result<Self> {
        let url_override = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());
        Self::load_with_override(payline_dir, url_override)
    }

    fn load_with_override(payline_dir: &Path, url_override: Option<String>) -> Result<Self> {
        let raw = read_settings(payline_dir)?;
        Ok(Self {
            base_url: raw.api.base_url,
            timeout_secs: raw.api.timeout_secs,
            url_override,
        })
    }

    /// Save config to the payline directory
    /// Preserves other settings this crate doesn't manage
    pub fn save(&self, payline_dir: &Path) -> Result<()> {
        let mut settings = read_settings(payline_dir)?;
        settings.api.base_url = self.base_url.clone();
        settings.api.timeout_secs = self.timeout_secs;

        std::fs::create_dir_all(payline_dir)
            .with_context(|| format!("Failed to create {}", payline_dir.display()))?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(payline_dir.join(SETTINGS_FILENAME), content)?;
        Ok(())
    }

    /// Base URL requests actually go to
    pub fn api_url(&self) -> &str {
        self.url_override.as_deref().unwrap_or(&self.base_url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Set the stored base URL; must be an absolute http(s) URL
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        let parsed = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("Unsupported URL scheme '{}': use http or https", parsed.scheme());
        }
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(())
    }
}

fn read_settings(payline_dir: &Path) -> Result<SettingsFile> {
    let settings_path = payline_dir.join(SETTINGS_FILENAME);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}
