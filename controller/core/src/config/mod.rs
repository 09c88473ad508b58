//! TOML Configuration File Support
//!
//! Centralized configuration loading for the calculator, supporting a TOML
//! file at `~/.config/calc-keypad/config.toml`.
//!
//! # Configuration Priority
//!
//! Values are resolved with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [service]
//! url = "http://localhost:5000"
//! request_timeout_ms = 0
//!
//! [preferences]
//! path = "/home/me/.config/calc-keypad/preferences.json"
//!
//! [keypad]
//! scientific = true
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::preferences::default_preferences_path;
use crate::service::DEFAULT_SERVICE_URL;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Service section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceToml {
    /// Base URL of the evaluation service
    pub url: Option<String>,

    /// Per-request timeout in milliseconds (0 = none)
    pub request_timeout_ms: Option<u64>,
}

/// Preferences section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesToml {
    /// Preference file location
    pub path: Option<PathBuf>,
}

/// Keypad section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeypadToml {
    /// Start in the scientific layout
    pub scientific: Option<bool>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorToml {
    /// Service configuration section
    pub service: ServiceToml,

    /// Preferences configuration section
    pub preferences: PreferencesToml,

    /// Keypad configuration section
    pub keypad: KeypadToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved calculator configuration
#[derive(Clone, Debug)]
pub struct CalculatorConfig {
    /// Base URL of the evaluation service
    pub service_url: String,

    /// Per-request timeout (`None` waits forever)
    pub request_timeout: Option<Duration>,

    /// Preference file (`None` keeps preferences in memory)
    pub preferences_path: Option<PathBuf>,

    /// Start in the scientific layout
    pub scientific: bool,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            request_timeout: None,
            preferences_path: default_preferences_path(),
            scientific: false,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl CalculatorConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Check values that cannot be expressed in the types
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] when the service URL is not
    /// an `http(s)` URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.service_url.as_str();
        let rest = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"));
        match rest {
            Some(host) if !host.trim_matches('/').is_empty() => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "service url must be an http(s) URL, got {url:?}"
            ))),
        }
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/calc-keypad/config.toml` or
/// `~/.config/calc-keypad/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("calc-keypad").join("config.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if
/// the resolved values are invalid. A missing config file is not an error.
pub async fn load_config() -> Result<CalculatorConfig, ConfigError> {
    load_config_from_path(default_config_path()).await
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only
///   defaults and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub async fn load_config_from_path(
    path: Option<PathBuf>,
) -> Result<CalculatorConfig, ConfigError> {
    let mut config = CalculatorConfig::default();

    if let Some(ref config_path) = path {
        match tokio::fs::read_to_string(config_path).await {
            Ok(toml_content) => {
                let toml_config: CalculatorToml = toml::from_str(&toml_content)?;
                apply_toml_config(&mut config, &toml_config);
                config.config_file_path = Some(config_path.clone());
                config.source = ConfigSource::File;

                tracing::info!(
                    path = %config_path.display(),
                    "Loaded configuration from file"
                );
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %config_path.display(),
                    "Config file not found, using defaults"
                );
            }
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })
            }
        }
    }

    apply_env_config(&mut config, |key| std::env::var(key).ok());
    config.validate()?;

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut CalculatorConfig, toml: &CalculatorToml) {
    if let Some(ref url) = toml.service.url {
        config.service_url.clone_from(url);
    }
    if let Some(ms) = toml.service.request_timeout_ms {
        config.request_timeout = timeout_from_ms(ms);
    }
    if let Some(ref path) = toml.preferences.path {
        config.preferences_path = Some(path.clone());
    }
    if let Some(scientific) = toml.keypad.scientific {
        config.scientific = scientific;
    }
}

/// Apply environment variable overrides to the config
///
/// `lookup` resolves a variable name; the loader passes `std::env::var`.
fn apply_env_config<F>(config: &mut CalculatorConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("CALC_SERVICE_URL") {
        config.service_url = url;
        config.source = ConfigSource::Env;
    }
    if let Some(timeout) = lookup("CALC_REQUEST_TIMEOUT_MS") {
        if let Ok(ms) = timeout.parse::<u64>() {
            config.request_timeout = timeout_from_ms(ms);
            config.source = ConfigSource::Env;
        } else {
            tracing::warn!(value = %timeout, "Ignoring non-numeric CALC_REQUEST_TIMEOUT_MS");
        }
    }
    if let Some(path) = lookup("CALC_PREFERENCES") {
        config.preferences_path = Some(PathBuf::from(path));
        config.source = ConfigSource::Env;
    }
    if let Some(scientific) = lookup("CALC_SCIENTIFIC") {
        config.scientific = scientific == "1" || scientific.to_lowercase() == "true";
        config.source = ConfigSource::Env;
    }
}

fn timeout_from_ms(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Service URL override
    pub service_url: Option<String>,

    /// Request timeout override (milliseconds, 0 = none)
    pub request_timeout_ms: Option<u64>,

    /// Scientific layout override
    pub scientific: Option<bool>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set service URL override
    #[must_use]
    pub fn with_service_url(mut self, url: String) -> Self {
        self.service_url = Some(url);
        self
    }

    /// Set request timeout override
    #[must_use]
    pub fn with_request_timeout_ms(mut self, ms: u64) -> Self {
        self.request_timeout_ms = Some(ms);
        self
    }

    /// Set scientific layout override
    #[must_use]
    pub fn with_scientific(mut self, scientific: bool) -> Self {
        self.scientific = Some(scientific);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.service_url.is_none() && self.request_timeout_ms.is_none() && self.scientific.is_none()
    }

    /// Apply overrides to a configuration
    ///
    /// # Errors
    ///
    /// Returns an error when the overridden configuration is invalid.
    pub fn apply(&self, config: &mut CalculatorConfig) -> Result<(), ConfigError> {
        if let Some(ref url) = self.service_url {
            config.service_url.clone_from(url);
        }
        if let Some(ms) = self.request_timeout_ms {
            config.request_timeout = timeout_from_ms(ms);
        }
        if let Some(scientific) = self.scientific {
            config.scientific = scientific;
        }
        if !self.is_empty() {
            config.source = ConfigSource::Cli;
        }
        config.validate()
    }
}
