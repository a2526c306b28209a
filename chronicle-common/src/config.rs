//! Configuration loading and config file resolution
//!
//! Chronicle tools are configured from a single TOML file. Every field has a
//! built-in default, so a missing file (or a file with only some sections)
//! is valid.
//!
//! # Config File Priority
//!
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`CHRONICLE_CONFIG`)
//! 3. Platform config directory (`~/.config/chronicle/chronicle-import.toml` on Linux)
//! 4. Built-in defaults (fallback)
//!
//! # Example
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [dates]
//! min_year = 800
//!
//! [matching]
//! person_threshold = 0.75
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CHRONICLE_CONFIG";

/// File name looked up inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "chronicle-import.toml";

/// Complete configuration loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Fuzzy date parser bounds and confidence constants
    #[serde(default)]
    pub dates: DateConfig,

    /// Duplicate detection thresholds
    #[serde(default)]
    pub matching: MatchingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Fuzzy date parser configuration
///
/// The confidence values are hand-picked ranking constants, not probabilities.
/// They encode how much structure was recognised in the input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    /// Earliest year accepted by the year-based patterns
    pub min_year: i32,
    /// Latest year accepted by the year-based patterns
    pub max_year: i32,
    /// Full calendar dates (`1945-05-08`, `8/5/1945`, `May 8, 1945`)
    pub exact_confidence: f64,
    /// Bare year (`1945`)
    pub year_confidence: f64,
    /// Questioned year (`1945?`)
    pub questioned_year_confidence: f64,
    /// Circa year (`c. 1890`)
    pub circa_confidence: f64,
    /// Year range (`1914-1918`)
    pub range_confidence: f64,
    /// Season and year (`Spring 1871`)
    pub season_confidence: f64,
    /// Open bounds (`before 1900`, `after 1900`)
    pub before_after_confidence: f64,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            min_year: 1000,
            max_year: 2100,
            exact_confidence: 1.0,
            year_confidence: 0.8,
            questioned_year_confidence: 0.6,
            circa_confidence: 0.7,
            range_confidence: 0.7,
            season_confidence: 0.8,
            before_after_confidence: 0.5,
        }
    }
}

/// Duplicate detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum confidence for a person duplicate to be reported
    pub person_threshold: f64,
    /// Minimum confidence for an event duplicate to be reported
    pub event_threshold: f64,
    /// First and last name similarity must each exceed this for the name signal
    pub name_component_threshold: f64,
    /// Similarity assigned to a canonical name / nickname pair
    pub nickname_similarity: f64,
    /// Maximum birth year difference for the birth date signal
    pub birth_year_window: i32,
    /// Confidence of an exact normalized birth place match
    pub place_match_confidence: f64,
    /// Minimum title similarity for the event title signal
    pub event_title_threshold: f64,
    /// Location similarity must exceed this for the event date/location signal
    pub event_location_threshold: f64,
    /// Maximum distance between event start dates, in hours
    pub event_date_window_hours: i64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            person_threshold: 0.8,
            event_threshold: 0.8,
            name_component_threshold: 0.8,
            nickname_similarity: 0.9,
            birth_year_window: 2,
            place_match_confidence: 0.9,
            event_title_threshold: 0.8,
            event_location_threshold: 0.7,
            event_date_window_hours: 24,
        }
    }
}

impl TomlConfig {
    /// Load configuration following the config file priority order
    ///
    /// Falls back to built-in defaults when no file is found. A file that
    /// exists but cannot be parsed or fails validation is an error.
    pub fn load(cli_arg: Option<&Path>) -> Result<Self> {
        match resolve_config_path(cli_arg, CONFIG_ENV_VAR) {
            Some(path) => {
                let config = load_toml_config(&path)?;
                info!("Configuration loaded from {}", path.display());
                Ok(config)
            }
            None => {
                debug!("No configuration file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are within their valid ranges
    pub fn validate(&self) -> Result<()> {
        let dates = &self.dates;
        if dates.min_year > dates.max_year {
            return Err(Error::Config(format!(
                "dates.min_year ({}) must not exceed dates.max_year ({})",
                dates.min_year, dates.max_year
            )));
        }

        let unit_values = [
            ("dates.exact_confidence", dates.exact_confidence),
            ("dates.year_confidence", dates.year_confidence),
            ("dates.questioned_year_confidence", dates.questioned_year_confidence),
            ("dates.circa_confidence", dates.circa_confidence),
            ("dates.range_confidence", dates.range_confidence),
            ("dates.season_confidence", dates.season_confidence),
            ("dates.before_after_confidence", dates.before_after_confidence),
            ("matching.person_threshold", self.matching.person_threshold),
            ("matching.event_threshold", self.matching.event_threshold),
            ("matching.name_component_threshold", self.matching.name_component_threshold),
            ("matching.nickname_similarity", self.matching.nickname_similarity),
            ("matching.place_match_confidence", self.matching.place_match_confidence),
            ("matching.event_title_threshold", self.matching.event_title_threshold),
            ("matching.event_location_threshold", self.matching.event_location_threshold),
        ];
        for (name, value) in unit_values {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{} must be within 0.0-1.0, got {}",
                    name, value
                )));
            }
        }

        if self.matching.birth_year_window < 0 {
            return Err(Error::Config(format!(
                "matching.birth_year_window must not be negative, got {}",
                self.matching.birth_year_window
            )));
        }
        if self.matching.event_date_window_hours < 0 {
            return Err(Error::Config(format!(
                "matching.event_date_window_hours must not be negative, got {}",
                self.matching.event_date_window_hours
            )));
        }

        Ok(())
    }
}

/// Read and validate a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;
    TomlConfig::from_toml_str(&content)
}

/// Config file resolution following the priority order:
/// 1. Command-line argument
/// 2. Environment variable
/// 3. Platform config directory, only if the file exists
///
/// Returns `None` when built-in defaults should be used.
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path().filter(|path| path.exists())
}

/// Platform config file location (`<config_dir>/chronicle/chronicle-import.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chronicle").join(CONFIG_FILE_NAME))
}
