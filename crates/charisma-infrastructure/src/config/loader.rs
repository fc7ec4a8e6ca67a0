//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables
//! and default values using figment.

use std::env;
use std::path::{Path, PathBuf};

use charisma_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};

use super::types::parse_duration;
use crate::config::AppConfig;
use crate::constants::{
    APP_CONFIG_DIR, CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_FILENAME,
    JWT_SECRET_MIN_LENGTH, LOCAL_CONFIG_DIR,
};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first discovered one)
    /// 3. Environment variables with prefix (e.g., `CHARISMA__SERVER__PORT`)
    ///
    /// An explicit path that does not exist is a configuration error.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if !config_path.exists() {
                log_config_loaded(config_path, false);
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            figment = figment.merge(Toml::file(config_path));
            log_config_loaded(config_path, true);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Serialize a configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
        let path = path.as_ref();
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get the explicit configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(LOCAL_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(APP_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Every section is checked; the first violation is returned.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_server_config(config)?;
    validate_auth_config(config)?;
    validate_cache_config(config)?;
    validate_tasks_config(config)?;
    validate_modules_config(config)?;
    Ok(())
}

fn validate_server_config(config: &AppConfig) -> Result<()> {
    if config.server.port == 0 {
        return Err(Error::configuration("Server port cannot be 0"));
    }
    Ok(())
}

fn validate_auth_config(config: &AppConfig) -> Result<()> {
    let jwt = &config.auth.jwt;
    for (name, secret) in [
        ("access", &jwt.access_secret),
        ("refresh", &jwt.refresh_secret),
    ] {
        if secret.len() < JWT_SECRET_MIN_LENGTH {
            return Err(Error::configuration(format!(
                "JWT {name} secret must be at least {JWT_SECRET_MIN_LENGTH} characters long"
            )));
        }
    }
    if config.auth.header.trim().is_empty() {
        return Err(Error::configuration("Authentication header cannot be empty"));
    }
    if config.auth.verifier_key.trim().is_empty() {
        return Err(Error::configuration("Verifier key cannot be empty"));
    }
    for (key, raw) in [
        ("auth.jwt.access_expiry", &jwt.access_expiry),
        ("auth.jwt.refresh_expiry", &jwt.refresh_expiry),
    ] {
        if parse_duration(key, raw)?.is_zero() {
            return Err(Error::configuration(format!("{key} cannot be 0")));
        }
    }
    parse_duration("auth.jwt.clock_tolerance", &jwt.clock_tolerance)?;
    Ok(())
}

fn validate_cache_config(config: &AppConfig) -> Result<()> {
    if config.cache.default_ttl_secs == 0 {
        return Err(Error::configuration("Cache TTL cannot be 0"));
    }
    if config.cache.max_capacity == 0 {
        return Err(Error::configuration("Cache capacity cannot be 0"));
    }
    Ok(())
}

fn validate_tasks_config(config: &AppConfig) -> Result<()> {
    if config.tasks.capacity == 0 {
        return Err(Error::configuration("Task queue capacity cannot be 0"));
    }
    parse_duration("tasks.shutdown_timeout", &config.tasks.shutdown_timeout)?;
    Ok(())
}

fn validate_modules_config(config: &AppConfig) -> Result<()> {
    if config.modules.roots.iter().all(|r| r.trim().is_empty()) {
        return Err(Error::configuration("At least one module root is required"));
    }
    Ok(())
}
