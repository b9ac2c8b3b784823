//! Loading component definitions from a library directory.
//!
//! # Directory Layout
//!
//! ```text
//! <library>/
//!   components/
//!     <manufacturer>/
//!       <component>.json
//! ```
//!
//! The component name is the file stem and the manufacturer code is the name of
//! the directory holding it. Anything else under `components/` is ignored.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::definition::ComponentDefinition;
use super::Component;
use crate::error::{LibraryError, LibraryResult};

/// A component library rooted at a directory.
#[derive(Debug, Clone)]
pub struct Library {
    base_dir: PathBuf,
}

/// A component file found in the library, not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSource {
    /// Manufacturer code (directory name).
    pub manufacturer: String,
    /// Component name (file stem).
    pub name: String,
    /// Path of the definition file.
    pub path: PathBuf,
}

impl Library {
    /// Opens a library rooted at `base_dir`.
    #[must_use]
    pub fn open(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the library root.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the directory holding the manufacturer directories.
    #[must_use]
    pub fn components_dir(&self) -> PathBuf {
        self.base_dir.join("components")
    }

    /// Lists component files, sorted by manufacturer then name.
    ///
    /// # Errors
    ///
    /// Returns an error if the components directory cannot be read.
    pub fn sources(&self) -> LibraryResult<Vec<ComponentSource>> {
        let components_dir = self.components_dir();
        if !components_dir.is_dir() {
            return Err(LibraryError::file_read(
                &components_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "components directory not found"),
            ));
        }

        let pattern = components_dir.join("*").join("*.json");
        let pattern = pattern.to_string_lossy();
        let entries = glob::glob(&pattern).map_err(|e| {
            LibraryError::file_read(
                &components_dir,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()),
            )
        })?;

        let mut sources = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                LibraryError::file_read(path, e.into_error())
            })?;
            if !path.is_file() {
                continue;
            }
            let (Some(name), Some(manufacturer)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.parent()
                    .and_then(Path::file_name)
                    .and_then(|s| s.to_str()),
            ) else {
                debug!(path = %path.display(), "Skipping component file with non-UTF-8 name");
                continue;
            };
            sources.push(ComponentSource {
                manufacturer: manufacturer.to_string(),
                name: name.to_string(),
                path: path.clone(),
            });
        }

        sources.sort_by(|a, b| {
            (a.manufacturer.as_str(), a.name.as_str()).cmp(&(b.manufacturer.as_str(), b.name.as_str()))
        });
        debug!(count = sources.len(), dir = %components_dir.display(), "Discovered component files");
        Ok(sources)
    }

    /// Loads every component, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first read, parse or validation error encountered.
    pub fn components(&self) -> LibraryResult<Vec<Component>> {
        self.sources()?.iter().map(load_component).collect()
    }
}

/// Reads, parses and validates one component file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid definition, or
/// fails component validation.
pub fn load_component(source: &ComponentSource) -> LibraryResult<Component> {
    let contents = std::fs::read_to_string(&source.path)
        .map_err(|e| LibraryError::file_read(&source.path, e))?;
    let definition =
        ComponentDefinition::from_json(&contents).map_err(|e| LibraryError::ParseComponent {
            path: source.path.clone(),
            source: e,
        })?;
    let component = Component::from_definition(&source.manufacturer, &source.name, definition)?;
    debug!(
        manufacturer = %source.manufacturer,
        component = %source.name,
        pins = component.pin_count(),
        packages = component.package_mappings().len(),
        "Loaded component definition"
    );
    Ok(component)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn discovers_sorted_sources() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "components/TI/NE555.json", "{}");
        write(tmp.path(), "components/TI/LM358.json", "{}");
        write(tmp.path(), "components/ADI/AD8605.json", "{}");
        write(tmp.path(), "components/TI/README.md", "ignored");
        write(tmp.path(), "components/stray.json", "{}");

        let lib = Library::open(tmp.path());
        let sources = lib.sources().unwrap();
        let names: Vec<(&str, &str)> = sources
            .iter()
            .map(|s| (s.manufacturer.as_str(), s.name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![("ADI", "AD8605"), ("TI", "LM358"), ("TI", "NE555")]
        );
    }

    #[test]
    fn loads_components() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "components/TI/NE555.json",
            r#"{"description": "Timer", "pins": {"left": [[{"label": "TRIG"}]]}}"#,
        );

        let components = Library::open(tmp.path()).components().unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name(), "NE555");
        assert_eq!(components[0].manufacturer(), "TI");
        assert_eq!(components[0].description(), Some("Timer"));
    }

    #[test]
    fn parse_error_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "components/TI/BROKEN.json", "{ not json");

        let err = Library::open(tmp.path()).components().unwrap_err();
        assert!(matches!(err, LibraryError::ParseComponent { ref path, .. } if path.ends_with("BROKEN.json")));
    }

    #[test]
    fn file_stem_with_space_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "components/TI/My Part.json", "{}");

        let err = Library::open(tmp.path()).components().unwrap_err();
        assert!(matches!(err, LibraryError::InvalidComponentName { ref name } if name == "My Part"));
    }

    #[test]
    fn missing_components_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Library::open(tmp.path()).sources().unwrap_err();
        assert!(matches!(err, LibraryError::FileRead { .. }));
    }
}
