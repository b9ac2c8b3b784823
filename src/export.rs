//! Library export.
//!
//! Writes a complete `KiCad` library for a set of components:
//!
//! ```text
//! <output_dir>/<name>.lib                  schematic symbols
//! <output_dir>/<name>.dcm                  symbol documentation
//! <output_dir>/<name>.pretty/IC-<pkg>.kicad_mod
//! ```
//!
//! Every component contributes its bare symbol plus one symbol per package
//! mapping. Each distinct package gets exactly one footprint, however many
//! components use it.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{LibraryError, LibraryResult};
use crate::kicad::{footprint, DocLibraryWriter, SymbolLibraryWriter};
use crate::model::Component;
use crate::package::Package;

/// Extension of the footprint directory.
const FOOTPRINT_DIR_EXT: &str = "pretty";

/// What an export produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// Path of the schematic library.
    pub symbol_library: PathBuf,
    /// Path of the documentation library.
    pub doc_library: PathBuf,
    /// Path of the footprint directory.
    pub footprint_dir: PathBuf,
    /// Number of symbols written.
    pub symbols: usize,
    /// Number of documentation records written.
    pub doc_records: usize,
    /// Number of footprint files written.
    pub footprints: usize,
}

/// Writes the schematic library, doc library and footprints for `components`.
///
/// # Errors
///
/// Returns [`LibraryError::FileWrite`] if the output directory or any output
/// file cannot be created or written.
pub fn export_library(
    components: &[Component],
    output_dir: &Path,
    library_name: &str,
) -> LibraryResult<ExportSummary> {
    fs::create_dir_all(output_dir).map_err(|e| LibraryError::file_write(output_dir, e))?;

    let symbol_library = output_dir.join(format!("{library_name}.lib"));
    let doc_library = output_dir.join(format!("{library_name}.dcm"));
    let footprint_dir = output_dir.join(format!("{library_name}.{FOOTPRINT_DIR_EXT}"));

    let symbols = write_symbol_library(components, &symbol_library)?;
    let doc_records = write_doc_library(components, &doc_library)?;
    let footprints = write_footprints(components, &footprint_dir)?;

    let summary = ExportSummary {
        symbol_library,
        doc_library,
        footprint_dir,
        symbols,
        doc_records,
        footprints,
    };

    info!(
        components = components.len(),
        symbols = summary.symbols,
        footprints = summary.footprints,
        output = %output_dir.display(),
        "Exported library"
    );

    Ok(summary)
}

fn write_symbol_library(components: &[Component], path: &Path) -> LibraryResult<usize> {
    let file = File::create(path).map_err(|e| LibraryError::file_write(path, e))?;
    let mut writer = SymbolLibraryWriter::new(BufWriter::new(file)).map_err(at(path))?;
    for component in components {
        writer.write_component(component).map_err(at(path))?;
    }
    let count = writer.symbol_count();
    writer.finish().map_err(at(path))?;

    debug!(path = %path.display(), count, "Wrote symbol library");
    Ok(count)
}

fn write_doc_library(components: &[Component], path: &Path) -> LibraryResult<usize> {
    let file = File::create(path).map_err(|e| LibraryError::file_write(path, e))?;
    let mut writer = DocLibraryWriter::new(BufWriter::new(file)).map_err(at(path))?;
    for component in components {
        writer.write_component(component).map_err(at(path))?;
    }
    let count = writer.record_count();
    writer.finish().map_err(at(path))?;

    debug!(path = %path.display(), count, "Wrote doc library");
    Ok(count)
}

fn write_footprints(components: &[Component], dir: &Path) -> LibraryResult<usize> {
    fs::create_dir_all(dir).map_err(|e| LibraryError::file_write(dir, e))?;

    let packages = distinct_packages(components);
    for (name, package) in &packages {
        let path = dir.join(format!("{}.kicad_mod", package.footprint_name()));
        let file = File::create(&path).map_err(|e| LibraryError::file_write(&path, e))?;
        let mut out = BufWriter::new(file);
        footprint::write_footprint(&mut out, package).map_err(at(&path))?;
        std::io::Write::flush(&mut out).map_err(|e| LibraryError::file_write(&path, e))?;
        debug!(package = %name, path = %path.display(), "Wrote footprint");
    }
    Ok(packages.len())
}

/// Collects the packages used by any component, first use wins.
fn distinct_packages(components: &[Component]) -> IndexMap<&str, &Package> {
    let mut packages = IndexMap::new();
    for mapping in components.iter().flat_map(Component::package_mappings) {
        packages
            .entry(mapping.package_name())
            .or_insert_with(|| mapping.package());
    }
    packages
}

/// Attaches the output path to a stream error.
fn at(path: &Path) -> impl Fn(LibraryError) -> LibraryError + '_ {
    move |err| match err {
        LibraryError::Io(source) => LibraryError::file_write(path, source),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentDefinition;

    fn component(name: &str, json: &str) -> Component {
        let def = ComponentDefinition::from_json(json).unwrap();
        Component::from_definition("ACME", name, def).unwrap()
    }

    #[test]
    fn packages_are_deduplicated_in_first_use_order() {
        let a = component(
            "A",
            r#"{"pins": {"left": [[{"label": "X"}]]},
                "packages": {"SIP-1": {"pads": ["X"]}, "DIP-2": {"pads": ["X"]}}}"#,
        );
        let b = component(
            "B",
            r#"{"pins": {"left": [[{"label": "Y"}]]},
                "packages": {"DIP-2": {"pads": ["Y"]}, "SO-2": {"pads": ["Y"]}}}"#,
        );
        let components = [a, b];
        let names: Vec<&str> = distinct_packages(&components).keys().copied().collect();
        assert_eq!(names, ["SIP-1", "DIP-2", "SO-2"]);
    }

    #[test]
    fn package_case_does_not_split_footprints() {
        let a = component(
            "A",
            r#"{"pins": {"left": [[{"label": "X"}]]}, "packages": {"dip-2": {"pads": ["X"]}}}"#,
        );
        let b = component(
            "B",
            r#"{"pins": {"left": [[{"label": "Y"}]]}, "packages": {"DIP-2": {"pads": ["Y"]}}}"#,
        );
        let components = [a, b];
        let names: Vec<&str> = distinct_packages(&components).keys().copied().collect();
        assert_eq!(names, ["DIP-2"]);

        let dir = tempfile::tempdir().unwrap();
        let summary = export_library(&components, dir.path(), "case").unwrap();
        assert_eq!(summary.footprints, 1);
        let lib = std::fs::read_to_string(summary.symbol_library).unwrap();
        assert!(lib.contains("DEF A(DIP-2) "));
    }

    #[test]
    fn stream_errors_gain_path() {
        let err = at(Path::new("out.lib"))(LibraryError::Io(std::io::Error::other("disk full")));
        assert!(matches!(err, LibraryError::FileWrite { ref path, .. } if path == Path::new("out.lib")));
    }

    #[test]
    fn writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let c = component(
            "U1",
            r#"{"pins": {"left": [[{"label": "A"}]], "right": [[{"label": "B"}]]},
                "packages": {"DIP-2": {"pads": ["A", "B"]}}}"#,
        );

        let summary = export_library(&[c], dir.path(), "test").unwrap();
        assert_eq!(summary.symbols, 2);
        assert_eq!(summary.doc_records, 1);
        assert_eq!(summary.footprints, 1);
        assert!(summary.symbol_library.is_file());
        assert!(summary.doc_library.is_file());
        assert!(dir.path().join("test.pretty/IC-DIP-2.kicad_mod").is_file());
    }
}
