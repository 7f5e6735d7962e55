//! Configuration module for catalog-filters
//!
//! Manages debounce timing, navigation failure policy, catalog paging and
//! TUI settings. Configuration is read from the user's config directory
//! (`~/.config/catalog-filters/config.toml` on Linux) and can be overridden
//! from the environment, e.g. `CATALOG_FILTERS__SYNC__DEBOUNCE_MS=250`.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "CATALOG_FILTERS";

/// What to do when the router refuses a navigation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationErrorPolicy {
    /// Log a warning and show a notice to the user
    #[default]
    Surface,
    /// Log at debug level only
    Drop,
}

/// Settings for the filter synchronizers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Quiet period before a text field writes to the URL
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Merge text fields that become due in the same tick into one navigation
    #[serde(default)]
    pub coalesce_commits: bool,

    /// Handling of refused navigations
    #[serde(default)]
    pub navigation_errors: NavigationErrorPolicy,
}

impl SyncSettings {
    /// Debounce window as a `Duration`
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Set the debounce window
    #[must_use]
    pub const fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Enable or disable commit coalescing
    #[must_use]
    pub const fn with_coalesce_commits(mut self, coalesce: bool) -> Self {
        self.coalesce_commits = coalesce;
        self
    }

    /// Set the navigation failure policy
    #[must_use]
    pub const fn with_navigation_errors(mut self, policy: NavigationErrorPolicy) -> Self {
        self.navigation_errors = policy;
        self
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            coalesce_commits: false,
            navigation_errors: NavigationErrorPolicy::default(),
        }
    }
}

/// Settings for the product catalog
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Products per result page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// JSON catalog to load instead of the built-in sample
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            data_file: None,
        }
    }
}

/// Settings for the interactive panel
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UiSettings {
    /// Longest wait between event loop iterations
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Show the current query string above the results
    #[serde(default = "default_true")]
    pub show_query_bar: bool,
}

impl UiSettings {
    /// Tick interval as a `Duration`
    #[must_use]
    pub const fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            show_query_bar: true,
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// Filter synchronization
    #[serde(default)]
    pub sync: SyncSettings,

    /// Product catalog
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Interactive panel
    #[serde(default)]
    pub ui: UiSettings,
}

const fn default_debounce_ms() -> u64 {
    500
}

const fn default_page_size() -> usize {
    12
}

const fn default_tick_ms() -> u64 {
    50
}

const fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("catalog-filters").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file is not an error: defaults and environment overrides apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be parsed or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, then apply environment overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed, an override has the
    /// wrong type, or the result fails validation.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` if the page size or tick interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.page_size == 0 {
            return Err(ConfigError::Message(
                "catalog.page_size must be at least 1".to_string(),
            ));
        }
        if self.ui.tick_ms == 0 {
            return Err(ConfigError::Message("ui.tick_ms must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = self.to_toml()?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }
}
