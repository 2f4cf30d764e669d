//! Configuration module for `uw-planner`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

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

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
    /// Path to a TOML file overriding the built-in major requirement tables
    #[serde(default)]
    pub majors_file: String,
}

/// Planning defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Default maximum credits per term when the profile doesn't set one
    #[serde(default)]
    pub max_credits_per_term: u32,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Planning defaults
    #[serde(default)]
    pub planning: PlanningConfig,
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
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override majors-file path
    pub majors_file: Option<String>,
}

impl Config {
    /// Get the `$UW_PLANNER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/uwplanner`
    /// - macOS: `~/Library/Application Support/uwplanner`
    /// - Windows: `%APPDATA%\uwplanner`
    #[must_use]
    pub fn get_uwplanner_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("uwplanner")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Used when loading configuration so newly added fields pick up their
    /// default values while user settings are preserved. Only fields that are
    /// empty (or zero) in the current config and non-empty in defaults are
    /// updated.
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

        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }
        if self.paths.majors_file.is_empty() && !defaults.paths.majors_file.is_empty() {
            self.paths
                .majors_file
                .clone_from(&defaults.paths.majors_file);
            changed = true;
        }

        if self.planning.max_credits_per_term == 0 && defaults.planning.max_credits_per_term != 0 {
            self.planning.max_credits_per_term = defaults.planning.max_credits_per_term;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Allows command-line arguments to override configuration file values
    /// without modifying the persistent configuration file. Only non-`None`
    /// values in the overrides struct replace config values.
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

        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
        if let Some(majors_file) = &overrides.majors_file {
            self.paths.majors_file.clone_from(majors_file);
        }
    }

    /// Get the user config file path
    ///
    /// Returns the full path to the configuration file:
    /// - `config.toml` for release builds
    /// - `dconfig.toml` for debug builds (allows separate debug config)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_uwplanner_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$UW_PLANNER` variable in a string
    ///
    /// Replaces occurrences of `$UW_PLANNER` with the actual uwplanner
    /// directory path so configuration values can reference the config
    /// directory dynamically.
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains("$UW_PLANNER") {
            let uwplanner_dir = Self::get_uwplanner_dir();
            value.replace("$UW_PLANNER", uwplanner_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Parses a TOML configuration string and expands any `$UW_PLANNER`
    /// variables in path values. Missing fields use their serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the
    /// expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);
        config.paths.majors_file = Self::expand_variables(&config.paths.majors_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
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
    /// - If the config file exists: loads it and merges missing fields from
    ///   defaults (saving the updated config).
    /// - If it doesn't exist (first run): creates the config directory, saves
    ///   defaults, and returns them.
    ///
    /// Falls back to defaults on any load error.
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
    /// platform-specific config file, creating the directory if needed.
    ///
    /// # Errors
    /// Returns an error if serialization fails, the config directory cannot
    /// be created, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `reports_dir`,
    /// `majors_file`, `max_credits`.
    ///
    /// # Returns
    /// - `Some(String)`: the configuration value as a string
    /// - `None`: if the key is not recognized
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "majors_file" | "majors-file" => Some(self.paths.majors_file.clone()),
            "max_credits" | "max-credits" => Some(self.planning.max_credits_per_term.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config; call [`save()`](Self::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed (e.g., a non-boolean for `verbose`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "majors_file" | "majors-file" => self.paths.majors_file = value.to_string(),
            "max_credits" | "max-credits" => {
                self.planning.max_credits_per_term = value
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid credit value for 'max_credits': '{value}'"))?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Updates the in-memory config; call [`save()`](Self::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "majors_file" | "majors-file" => self
                .paths
                .majors_file
                .clone_from(&defaults.paths.majors_file),
            "max_credits" | "max-credits" => {
                self.planning.max_credits_per_term = defaults.planning.max_credits_per_term;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file, causing the next
    /// [`load()`](Self::load) call to recreate it from defaults. Succeeds
    /// silently when the file doesn't exist.
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

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;
        writeln!(f, "  majors_file = \"{}\"", self.paths.majors_file)?;

        writeln!(f, "\n[planning]")?;
        writeln!(
            f,
            "  max_credits_per_term = {}",
            self.planning.max_credits_per_term
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let config = Config::from_defaults();
        assert!(!config.logging.level.is_empty());
        assert!(!config.paths.reports_dir.is_empty());
        assert!(config.planning.max_credits_per_term >= 12);
    }

    #[test]
    fn test_from_toml_expands_variables() {
        let config = Config::from_toml(
            r#"
[logging]
level = "info"
file = "$UW_PLANNER/logs/planner.log"
"#,
        )
        .expect("toml should parse");

        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.file.contains("$UW_PLANNER"));
        assert!(config.logging.file.ends_with("logs/planner.log"));
    }

    #[test]
    fn test_get_set_unset_roundtrip() {
        let mut config = Config::from_defaults();
        let defaults = Config::from_defaults();

        config.set("level", "error").expect("known key");
        assert_eq!(config.get("level"), Some("error".to_string()));

        config.set("max_credits", "18").expect("known key");
        assert_eq!(config.planning.max_credits_per_term, 18);

        config.unset("level", &defaults).expect("known key");
        assert_eq!(config.logging.level, defaults.logging.level);

        assert!(config.set("unknown", "x").is_err());
        assert!(config.get("unknown").is_none());
        assert!(config.unset("unknown", &defaults).is_err());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::from_defaults();
        assert!(config.set("verbose", "maybe").is_err());
        assert!(config.set("max_credits", "a lot").is_err());
    }

    #[test]
    fn test_merge_defaults_fills_empty_fields() {
        let mut config = Config::default();
        let defaults = Config::from_defaults();

        assert!(config.merge_defaults(&defaults));
        assert_eq!(config.logging.level, defaults.logging.level);
        assert_eq!(
            config.planning.max_credits_per_term,
            defaults.planning.max_credits_per_term
        );

        // Second merge is a no-op
        assert!(!config.merge_defaults(&defaults));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::from_defaults();
        let overrides = ConfigOverrides {
            level: Some("debug".to_string()),
            verbose: Some(true),
            majors_file: Some("/tmp/majors.toml".to_string()),
            ..Default::default()
        };

        config.apply_overrides(&overrides);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.verbose);
        assert_eq!(config.paths.majors_file, "/tmp/majors.toml");
    }
}
