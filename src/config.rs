use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub amadeus: AmadeusConfig,

    pub search: SearchConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human readable format.
    pub json_logs: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 5004,
            cors_allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AmadeusConfig {
    pub base_url: String,

    /// Client id. Overridden by `AMADEUS_API_KEY` or `REACT_APP_AMADEUS_API_KEY`.
    pub api_key: Option<String>,

    /// Client secret. Overridden by `AMADEUS_API_SECRET` or `REACT_APP_AMADEUS_API_SECRET`.
    #[serde(skip_serializing)]
    pub api_secret: Option<String>,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Default for AmadeusConfig {
    fn default() -> Self {
        Self {
            base_url: constants::amadeus::TEST_BASE_URL.to_string(),
            api_key: None,
            api_secret: None,
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Substitute generated hotels and offers when Amadeus fails or returns nothing.
    pub fallback_enabled: bool,

    pub max_hotels: usize,

    pub lookup_radius_km: u32,

    pub destination_cache_hours: u64,

    pub default_currency: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fallback_enabled: true,
            max_hotels: constants::limits::MAX_HOTELS,
            lookup_radius_km: 5,
            destination_cache_hours: constants::cache::DESTINATIONS_TTL_HOURS,
            default_currency: constants::DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            amadeus: AmadeusConfig::default(),
            search: SearchConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

const API_KEY_VARS: &[&str] = &["AMADEUS_API_KEY", "REACT_APP_AMADEUS_API_KEY"];
const API_SECRET_VARS: &[&str] = &["AMADEUS_API_SECRET", "REACT_APP_AMADEUS_API_SECRET"];

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = paths
            .iter()
            .find(|path| path.exists())
            .map_or_else(
                || {
                    info!("No config file found, using defaults");
                    Ok(Self::default())
                },
                |path| {
                    info!("Loading config from: {}", path.display());
                    Self::load_from_path(path)
                },
            )?;

        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Credentials from the environment win over the file. The first
    /// non-empty variable in each list is used.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_set = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(name))
                .find(|value| !value.trim().is_empty())
        };

        if let Some(key) = first_set(API_KEY_VARS) {
            self.amadeus.api_key = Some(key);
        }
        if let Some(secret) = first_set(API_SECRET_VARS) {
            self.amadeus.api_secret = Some(secret);
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("jetset").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".jetset").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.enabled && self.server.port == 0 {
            anyhow::bail!("Server port must be > 0 when the server is enabled");
        }

        if self.amadeus.base_url.trim().is_empty() {
            anyhow::bail!("Amadeus base URL cannot be empty");
        }

        url::Url::parse(&self.amadeus.base_url)
            .with_context(|| format!("Invalid Amadeus base URL: {}", self.amadeus.base_url))?;

        if self.search.max_hotels == 0 {
            anyhow::bail!("search.max_hotels must be > 0");
        }

        Ok(())
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.amadeus.api_key.is_some() && self.amadeus.api_secret.is_some()
    }
}
