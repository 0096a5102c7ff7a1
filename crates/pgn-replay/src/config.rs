//! Replay configuration, loadable from a TOML file.
//!
//! ```toml
//! max_plies = 600
//! strict_castling = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Knobs for a replay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfig {
    /// Upper bound on half-moves per game; `None` means unbounded.
    pub max_plies: Option<usize>,
    /// Require the king and rook on their home squares when castling.
    pub strict_castling: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            max_plies: None,
            strict_castling: true,
        }
    }
}

impl ReplayConfig {
    /// Parses a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ReplayConfig::default();
        assert_eq!(config.max_plies, None);
        assert!(config.strict_castling);
        assert_eq!(ReplayConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn parse_all_keys() {
        let config = ReplayConfig::from_toml_str("max_plies = 40\nstrict_castling = false\n").unwrap();
        assert_eq!(config.max_plies, Some(40));
        assert!(!config.strict_castling);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            ReplayConfig::from_toml_str("max_moves = 3"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_plies = 12").unwrap();
        let config = ReplayConfig::load(file.path()).unwrap();
        assert_eq!(config.max_plies, Some(12));
        assert!(config.strict_castling);
    }

    #[test]
    fn load_missing_file() {
        assert!(matches!(
            ReplayConfig::load("/definitely/not/here/replay.toml"),
            Err(ConfigError::ReadError(_))
        ));
    }
}
