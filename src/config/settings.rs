//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;

/// Log levels accepted in `logging.level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Root of the component definition tree.
    #[serde(default)]
    pub library_path: Option<PathBuf>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Export behaviour.
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        if self.output.library_name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Library name must not be empty".to_string(),
            });
        }
        if self
            .output
            .library_name
            .contains(std::path::is_separator)
        {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Library name '{}' must not contain a path separator",
                    self.output.library_name
                ),
            });
        }
        Ok(())
    }
}

/// Where and under what name the library files are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory.
    /// Default: "build"
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// Base name of the `.lib`, `.dcm` and `.pretty` outputs.
    /// Default: "icylib"
    #[serde(default = "default_library_name")]
    pub library_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            library_name: default_library_name(),
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("build")
}

fn default_library_name() -> String {
    "icylib".to_string()
}

/// Export behaviour.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Stop at the first invalid component instead of skipping it.
    #[serde(default)]
    pub fail_fast: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.library_path.is_none());
        assert!(!config.export.fail_fast);
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "library_path": "/path/to/library",
            "output": {
                "directory": "out",
                "library_name": "parts"
            },
            "export": {
                "fail_fast": true
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.library_path, Some(PathBuf::from("/path/to/library")));
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.output.library_name, "parts");
        assert!(config.export.fail_fast);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn output_config_defaults() {
        let config = OutputConfig::default();
        assert_eq!(config.directory, PathBuf::from("build"));
        assert_eq!(config.library_name, "icylib");
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn reject_invalid_log_level() {
        let json = r#"{"logging": {"level": "verbose"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_bad_library_name() {
        let json = r#"{"output": {"library_name": "a/b"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());

        let json = r#"{"output": {"library_name": "  "}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
