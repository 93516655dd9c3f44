//! Configuration module for `cineclass`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use super::history::DEFAULT_HISTORY_FILE;
use super::store::PrunePolicy;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// History file path (can reference `$CINECLASS`)
    #[serde(default)]
    pub history_file: String,
    /// Whether deleting the last rating of a movie also drops the movie
    #[serde(default = "default_prune")]
    pub prune_empty_movies: bool,
}

const fn default_prune() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            history_file: String::new(),
            prune_empty_movies: default_prune(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override history file path
    pub history_file: Option<String>,
}

impl Config {
    /// Get the `$CINECLASS` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/cineclass`
    /// - macOS: `~/Library/Application Support/cineclass`
    /// - Windows: `%APPDATA%\cineclass`
    #[must_use]
    pub fn get_cineclass_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cineclass")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Used when loading configuration so that fields added after the user's
    /// config file was written get populated. Only string fields that are
    /// empty here and non-empty in `defaults` are updated.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.storage.history_file.is_empty() && !defaults.storage.history_file.is_empty() {
            self.storage
                .history_file
                .clone_from(&defaults.storage.history_file);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Lets command-line arguments take precedence over config file values
    /// for one run without touching the persistent file. Only non-`None`
    /// values replace config values.
    ///
    /// # Arguments
    ///
    /// * `overrides` - A `ConfigOverrides` struct with optional override values
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(history_file) = &overrides.history_file {
            self.storage.history_file.clone_from(history_file);
        }
    }

    /// Get the user config file path
    ///
    /// Returns the full path to the configuration file:
    /// - `config.toml` for release builds
    /// - `dconfig.toml` for debug builds (allows separate debug config)
    ///
    /// The file is located in the directory returned by [`get_cineclass_dir`].
    ///
    /// [`get_cineclass_dir`]: Self::get_cineclass_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_cineclass_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand the `$CINECLASS` variable in a string
    ///
    /// Replaces occurrences of `$CINECLASS` with the actual cineclass
    /// directory path, so config values can reference the config directory
    /// without hard-coding it.
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains("$CINECLASS") {
            let cineclass_dir = Self::get_cineclass_dir();
            value.replace("$CINECLASS", cineclass_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Parses a TOML configuration string and expands `$CINECLASS` in path
    /// values. Missing fields use their serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the
    /// expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.storage.history_file = Self::expand_variables(&config.storage.history_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Loads the compiled-in default configuration bundled with the binary.
    /// The defaults differ between debug and release builds:
    /// - Debug: Uses `DefaultCLIConfigDebug.toml`
    /// - Release: Uses `DefaultCLIConfigRelease.toml`
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. This
    /// should never happen in practice since the defaults are compiled into
    /// the binary.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// Handles both startup scenarios:
    /// - Config file exists: loads it, merges missing fields from defaults,
    ///   and saves back when the merge added anything
    /// - First run: creates the config directory and writes the defaults
    ///
    /// Falls back to defaults if anything goes wrong while loading.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// Serializes the current configuration to TOML and writes it to the
    /// platform-specific config file, creating the config directory first
    /// when needed.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the directory
    /// cannot be created, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// The history file path to use, falling back to
    /// `$CINECLASS/historico.json` when unconfigured
    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        if self.storage.history_file.is_empty() {
            Self::get_cineclass_dir().join(DEFAULT_HISTORY_FILE)
        } else {
            PathBuf::from(&self.storage.history_file)
        }
    }

    /// The prune policy selected by `storage.prune_empty_movies`
    #[must_use]
    pub const fn prune_policy(&self) -> PrunePolicy {
        if self.storage.prune_empty_movies {
            PrunePolicy::PruneEmptyMovies
        } else {
            PrunePolicy::KeepEmptyMovies
        }
    }

    /// Get a configuration value by key
    ///
    /// Supported keys:
    /// - `level`: Logging level ("debug", "info", "warn", "error")
    /// - `file`: Log file path
    /// - `verbose`: Verbose logging boolean
    /// - `history_file`: History file path
    /// - `prune_empty_movies`: Prune cascade boolean
    ///
    /// # Returns
    /// - `Some(String)`: The configuration value as a string
    /// - `None`: If the key is not recognized
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "history_file" | "history-file" => Some(self.storage.history_file.clone()),
            "prune_empty_movies" | "prune-empty-movies" => {
                Some(self.storage.prune_empty_movies.to_string())
            }
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config; call [`save()`](Config::save) to
    /// persist changes. Boolean keys require literal "true" or "false".
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "history_file" | "history-file" => self.storage.history_file = value.to_string(),
            "prune_empty_movies" | "prune-empty-movies" => {
                self.storage.prune_empty_movies = value.parse::<bool>().map_err(|_| {
                    format!("Invalid boolean value for 'prune_empty_movies': '{value}'")
                })?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Resets one value to the default taken from `defaults` (typically
    /// [`from_defaults()`](Config::from_defaults)) without losing other
    /// customizations. Updates the in-memory config only.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "history_file" | "history-file" => self
                .storage
                .history_file
                .clone_from(&defaults.storage.history_file),
            "prune_empty_movies" | "prune-empty-movies" => {
                self.storage.prune_empty_movies = defaults.storage.prune_empty_movies;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file, so the next [`load()`](Config::load)
    /// recreates it from defaults. Destructive; the CLI asks for
    /// confirmation before calling this.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[storage]")?;
        writeln!(f, "  history_file = \"{}\"", self.storage.history_file)?;
        writeln!(
            f,
            "  prune_empty_movies = {}",
            self.storage.prune_empty_movies
        )?;

        Ok(())
    }
}
