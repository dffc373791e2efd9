//! Configuration module for inspire-finder
//!
//! Settings come from `config.toml` in the user's config directory,
//! overridden by `INSPIRE_FINDER_*` environment variables. Every key has a
//! default, so a missing file is not an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use crate::session::CarouselTiming;

/// Prefix of environment overrides, e.g. `INSPIRE_FINDER_PAGE_SIZE`
pub const ENV_PREFIX: &str = "INSPIRE_FINDER";

const APP_DIR: &str = "inspire-finder";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FinderConfig {
    /// Base URL of the catalog API
    pub api_base_url: String,

    /// Results per page
    pub page_size: usize,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Carousel rotation interval in milliseconds
    pub carousel_interval_ms: u64,

    /// Gap between deactivating and activating a carousel card
    pub carousel_transition_ms: u64,

    /// Maximum concept highlights
    pub highlight_concepts: usize,

    /// Maximum gem highlights
    pub highlight_gems: usize,

    /// Favorites database directory; defaults to the user data directory
    pub favorites_path: Option<PathBuf>,

    /// Root of shareable links; defaults to `api_base_url`
    pub share_base_url: Option<String>,

    /// Suppress informational output by default
    pub quiet: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            page_size: 20,
            request_timeout_secs: 15,
            carousel_interval_ms: 4500,
            carousel_transition_ms: 400,
            highlight_concepts: 4,
            highlight_gems: 8,
            favorites_path: None,
            share_base_url: None,
            quiet: false,
        }
    }
}

impl FinderConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Load configuration from the default file and the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed, or
    /// a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?, None)
    }

    /// Load configuration from `path`, layering environment overrides
    ///
    /// `env` replaces the process environment when given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed or a value fails
    /// validation.
    pub fn load_from(path: &Path, env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Same as [`Self::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Message("page_size must be greater than 0".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.carousel_interval_ms == 0 {
            return Err(ConfigError::Message(
                "carousel_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Message("api_base_url must not be empty".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn carousel_timing(&self) -> CarouselTiming {
        CarouselTiming {
            interval: Duration::from_millis(self.carousel_interval_ms),
            transition: Duration::from_millis(self.carousel_transition_ms),
        }
    }

    /// Directory of the favorites database
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the system data
    /// directory cannot be determined.
    pub fn favorites_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.favorites_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join(APP_DIR).join("favorites"))
    }

    /// Root used for shareable links
    #[must_use]
    pub fn share_base_url(&self) -> &str {
        self.share_base_url.as_deref().unwrap_or(&self.api_base_url)
    }
}
