//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SWCACHE_*)
//! 2. TOML config file (if SWCACHE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::worker::WorkerConfig;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SWCACHE_*)
/// 2. TOML config file (if SWCACHE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version tag naming the active cache store.
    ///
    /// Must change whenever `assets` changes so activation purges the old store.
    #[serde(default = "default_cache_name")]
    pub cache_name: String,

    /// Scope URL that relative asset paths resolve against.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Assets pre-cached on install, relative to `scope` or absolute.
    #[serde(default = "default_assets")]
    pub assets: Vec<String>,

    /// Document served when the network fails on a cache miss.
    ///
    /// Set to an empty string to disable the fallback.
    #[serde(default = "default_offline_fallback")]
    pub offline_fallback: Option<String>,

    /// Path to SQLite cache database.
    ///
    /// Set via SWCACHE_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per request.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_cache_name() -> String {
    "raod3r-cache-v1".into()
}

fn default_scope() -> String {
    "http://localhost:8000/docs/".into()
}

fn default_assets() -> Vec<String> {
    ["./", "./index.html", "./styles.css", "./reader.html", "./library.html"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_offline_fallback() -> Option<String> {
    Some("./index.html".into())
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./swcache.sqlite")
}

fn default_user_agent() -> String {
    "swcache/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_name: default_cache_name(),
            scope: default_scope(),
            assets: default_assets(),
            offline_fallback: default_offline_fallback(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration file cannot be read,
    /// environment variables cannot be parsed, or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// The layered provider stack used by [`AppConfig::load`].
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SWCACHE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("SWCACHE_")
                .ignore(&["config_file"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }

    /// Extract and validate a configuration from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve scope, assets and fallback into the manager's versioned configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the scope or any asset fails to parse.
    pub fn worker_config(&self) -> Result<WorkerConfig, ConfigError> {
        let scope = self.scope_url()?;

        let assets = self
            .assets
            .iter()
            .map(|asset| resolve(&scope, asset, "assets"))
            .collect::<Result<Vec<_>, _>>()?;

        let offline_fallback = match self.offline_fallback.as_deref() {
            Some(path) if !path.trim().is_empty() => Some(resolve(&scope, path, "offline_fallback")?),
            _ => None,
        };

        Ok(WorkerConfig { cache_name: self.cache_name.clone(), scope, assets, offline_fallback })
    }

    /// Parsed scope URL with a guaranteed trailing slash.
    pub(crate) fn scope_url(&self) -> Result<Url, ConfigError> {
        let mut scope = Url::parse(self.scope.trim())
            .map_err(|e| ConfigError::Invalid { field: "scope".into(), reason: e.to_string() })?;

        if !scope.path().ends_with('/') {
            let path = format!("{}/", scope.path());
            scope.set_path(&path);
        }
        scope.set_fragment(None);

        Ok(scope)
    }
}

fn resolve(scope: &Url, input: &str, field: &str) -> Result<Url, ConfigError> {
    crate::resolve(scope, input).map_err(|e| ConfigError::Invalid { field: field.into(), reason: e.to_string() })
}
