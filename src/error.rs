//! Error types for icylib.
//!
//! [`ConfigError`] covers loading the configuration file. [`LibraryError`] covers
//! everything that can go wrong between reading a component definition and writing
//! its library records. All library errors are fatal to the single component or
//! package being processed; the caller decides whether to skip it or halt.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Result type for library operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Errors that can occur while loading components or emitting library records.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The package identifier has the wrong shape for its family.
    #[error("Invalid package spec '{spec}': {message}")]
    InvalidPackageSpec {
        /// The package identifier as written.
        spec: String,
        /// Description of what's wrong.
        message: String,
    },

    /// The package family token is not one we know how to lay out.
    #[error("Unsupported package family '{family}' in '{spec}'")]
    UnsupportedPackageFamily {
        /// The package identifier as written.
        spec: String,
        /// The leading family token.
        family: String,
    },

    /// The pad count cannot be spread evenly over the package sides.
    #[error("Invalid pin count {count} for '{spec}': must be a positive multiple of {sides}")]
    InvalidPinCount {
        /// The package identifier as written.
        spec: String,
        /// Pad count parsed from the identifier.
        count: u32,
        /// Number of physical sides of the family.
        sides: u32,
    },

    /// A package mapping refers to a label the component does not declare.
    #[error("Unknown pin '{label}' in package '{package}' of component '{component}'")]
    UnknownPin {
        /// Component name.
        component: String,
        /// Package name.
        package: String,
        /// The unresolved pin label.
        label: String,
    },

    /// A component name is empty or contains whitespace.
    #[error("Invalid component name '{name}'")]
    InvalidComponentName {
        /// The offending name.
        name: String,
    },

    /// The same label is declared twice in one component.
    #[error("Duplicate pin '{label}' in component '{component}'")]
    DuplicatePin {
        /// Component name.
        component: String,
        /// The repeated label.
        label: String,
    },

    /// Two package keys of one component name the same package.
    #[error("Package '{package}' is listed twice in component '{component}'")]
    DuplicatePackage {
        /// Component name.
        component: String,
        /// Package name, uppercased.
        package: String,
    },

    /// A pin label is empty or contains whitespace.
    #[error("Invalid pin label '{label}' in component '{component}'")]
    InvalidPinLabel {
        /// Component name.
        component: String,
        /// The offending label.
        label: String,
    },

    /// A mapping lists more pads than its package physically has.
    #[error("Package '{package}' of component '{component}' maps {mapped} pads but has only {available}")]
    TooManyPads {
        /// Component name.
        component: String,
        /// Package name.
        package: String,
        /// Number of entries in the mapping.
        mapped: usize,
        /// Pad count of the package.
        available: u32,
    },

    /// Failed to open or read a component file.
    #[error("Failed to read file: {path}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to create or write an output file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A component file is not valid JSON or has the wrong shape.
    #[error("Failed to parse component file: {path}")]
    ParseComponent {
        /// Path to the file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing to an output stream failed.
    #[error("Output error: {0}")]
    Io(#[from] io::Error),
}

impl LibraryError {
    /// Creates an invalid package spec error.
    pub fn invalid_package_spec(spec: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPackageSpec {
            spec: spec.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported package family error.
    pub fn unsupported_family(spec: impl Into<String>, family: impl Into<String>) -> Self {
        Self::UnsupportedPackageFamily {
            spec: spec.into(),
            family: family.into(),
        }
    }

    /// Creates an invalid pin count error.
    pub fn invalid_pin_count(spec: impl Into<String>, count: u32, sides: u32) -> Self {
        Self::InvalidPinCount {
            spec: spec.into(),
            count,
            sides,
        }
    }

    /// Creates an unknown pin error.
    pub fn unknown_pin(
        component: impl Into<String>,
        package: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self::UnknownPin {
            component: component.into(),
            package: package.into(),
            label: label.into(),
        }
    }

    /// Creates a file read error.
    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let error = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config.json"),
        };
        let msg = error.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("config.json"));
    }

    #[test]
    fn validation_error_display() {
        let error = ConfigError::ValidationError {
            message: "invalid setting".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("invalid setting"));
    }

    #[test]
    fn pin_count_error_display() {
        let err = LibraryError::invalid_pin_count("DIP-7", 7, 2);
        assert_eq!(
            err.to_string(),
            "Invalid pin count 7 for 'DIP-7': must be a positive multiple of 2"
        );
    }

    #[test]
    fn component_name_error_display() {
        let err = LibraryError::InvalidComponentName {
            name: "My Part".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid component name 'My Part'");
    }

    #[test]
    fn unknown_pin_error_display() {
        let err = LibraryError::unknown_pin("NE555", "DIP-8", "RST");
        assert_eq!(
            err.to_string(),
            "Unknown pin 'RST' in package 'DIP-8' of component 'NE555'"
        );
    }
}
