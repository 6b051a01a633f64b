//! Session configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tally_engine::PlayerNames;
use tracing::{debug, info, instrument};

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Settings for one game session.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct SessionConfig {
    /// Pause before the automated player moves, in milliseconds.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Whether O starts out automated.
    #[serde(default)]
    ai_enabled: bool,

    /// Display name for X.
    #[serde(default = "default_player_x_name")]
    player_x_name: String,

    /// Display name for O.
    #[serde(default = "default_player_o_name")]
    player_o_name: String,

    /// Seed for the automated player's RNG. Unset means OS entropy.
    #[serde(default)]
    rng_seed: Option<u64>,
}

fn default_ai_delay_ms() -> u64 {
    500
}

fn default_player_x_name() -> String {
    "Player X".to_string()
}

fn default_player_o_name() -> String {
    "Player O".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ai_delay_ms: default_ai_delay_ms(),
            ai_enabled: false,
            player_x_name: default_player_x_name(),
            player_o_name: default_player_o_name(),
            rng_seed: None,
        }
    }
}

impl SessionConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            ai_enabled = config.ai_enabled,
            ai_delay_ms = config.ai_delay_ms,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to render config: {}", e)))
    }

    /// Delay before the automated player moves.
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    /// Starting player names.
    pub fn player_names(&self) -> PlayerNames {
        PlayerNames::new(self.player_x_name.clone(), self.player_o_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SessionConfig::from_toml("").expect("empty config parses");
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.ai_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_config_overrides() {
        let config = SessionConfig::from_toml(
            "ai_enabled = true\nplayer_o_name = \"Robot\"\nrng_seed = 9\n",
        )
        .expect("valid config");
        assert!(*config.ai_enabled());
        assert_eq!(config.player_o_name(), "Robot");
        assert_eq!(config.player_x_name(), "Player X");
        assert_eq!(*config.rng_seed(), Some(9));
    }

    #[test]
    fn test_bad_toml_reports_error() {
        let err = SessionConfig::from_toml("ai_delay_ms = \"soon\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "ai_delay_ms = 50").expect("write");
        let config = SessionConfig::from_file(file.path()).expect("loads");
        assert_eq!(config.ai_delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = SessionConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_setters_override_and_render() {
        let config = SessionConfig::default()
            .with_ai_enabled(true)
            .with_rng_seed(Some(3));
        let rendered = config.to_toml().expect("renders");
        let reparsed = SessionConfig::from_toml(&rendered).expect("reparses");
        assert_eq!(reparsed, config);
    }
}
