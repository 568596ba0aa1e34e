//! Coercion options and the configuration file
//!
//! Configuration is a single JSON object. Every key is optional; absent
//! keys take the legacy-compatible defaults.
//!
//! ```json
//! {
//!   "presence": "truthy",
//!   "undeclared_columns": "reject",
//!   "log_level": "info",
//!   "require_valid": true
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;
use crate::rows::PresenceMode;

/// What the parser does with a row field the schema does not declare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndeclaredColumns {
    /// Report an error naming the field
    #[default]
    Reject,
    /// Copy the value through unchanged
    PassThrough,
}

/// Knobs shared by the validator and the parser
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionOptions {
    /// Which values count as supplied
    #[serde(default)]
    pub presence: PresenceMode,
    /// Handling of undeclared row fields during parse
    #[serde(default)]
    pub undeclared_columns: UndeclaredColumns,
}

impl CoercionOptions {
    /// Options distinguishing zero from absent
    pub fn explicit() -> Self {
        Self {
            presence: PresenceMode::Explicit,
            ..Self::default()
        }
    }

    pub fn with_undeclared_columns(mut self, policy: UndeclaredColumns) -> Self {
        self.undeclared_columns = policy;
        self
    }
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON in '{}': {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("log_level '{0}' is not allowed; use trace, info, warn or error")]
    LogLevel(Severity),
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Which values count as supplied
    #[serde(default)]
    pub presence: PresenceMode,

    /// Handling of undeclared row fields during parse
    #[serde(default)]
    pub undeclared_columns: UndeclaredColumns,

    /// Minimum severity written by the logger (default info)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,

    /// Refuse to parse rows when any column fails validation (default true)
    #[serde(default = "default_require_valid")]
    pub require_valid: bool,
}

fn default_log_level() -> Severity {
    Severity::Info
}
fn default_require_valid() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            presence: PresenceMode::default(),
            undeclared_columns: UndeclaredColumns::default(),
            log_level: default_log_level(),
            require_valid: default_require_valid(),
        }
    }
}

impl Config {
    /// Coercion options carried by this configuration
    pub fn options(&self) -> CoercionOptions {
        CoercionOptions {
            presence: self.presence,
            undeclared_columns: self.undeclared_columns,
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json(&content).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an optional path; `None` yields defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // fatal is reserved for the process itself
        if self.log_level == Severity::Fatal {
            return Err(ConfigError::LogLevel(self.log_level));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_legacy_compatible() {
        let config = Config::default();
        assert_eq!(config.options(), CoercionOptions::default());
        assert_eq!(config.log_level, Severity::Info);
        assert!(config.require_valid);
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_all_keys() {
        let config = Config::from_json(
            r#"{"presence": "explicit", "undeclared_columns": "pass_through",
                "log_level": "warn", "require_valid": false}"#,
        )
        .unwrap();
        assert_eq!(config.presence, PresenceMode::Explicit);
        assert_eq!(config.undeclared_columns, UndeclaredColumns::PassThrough);
        assert_eq!(config.log_level, Severity::Warn);
        assert!(!config.require_valid);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_json(r#"{"presense": "explicit"}"#).is_err());
    }

    #[test]
    fn test_bad_enum_value_rejected() {
        assert!(Config::from_json(r#"{"presence": "sometimes"}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rowschema.json");
        fs::write(&path, r#"{"presence": "explicit"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.options(), CoercionOptions::explicit());
    }

    #[test]
    fn test_fatal_log_level_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rowschema.json");
        fs::write(&path, r#"{"log_level": "fatal"}"#).unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::LogLevel(_))));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
