//! End-to-end tests: component files on disk to a written `KiCad` library.

use std::fs;
use std::path::Path;

use icylib::error::LibraryError;
use icylib::export::export_library;
use icylib::model::{load_component, Library};
use tempfile::TempDir;

const NE555: &str = r#"{
    "description": "Precision timer",
    "datasheetUrl": "https://example.com/ne555.pdf",
    "pins": {
        "topPower": [[{"label": "VCC", "ercType": "powerIn"}]],
        "bottomPower": [[{"label": "GND", "ercType": "powerIn"}]],
        "left": [
            [{"label": "~RESET", "ercType": "input"}],
            [{"label": "TRIG", "ercType": "input"}, {"label": "THRES", "ercType": "input"}]
        ],
        "right": [
            [{"label": "OUT", "ercType": "output"}],
            [{"label": "DISCH", "ercType": "output"}],
            [{"label": "CTRL", "ercType": "input"}]
        ]
    },
    "packages": {
        "DIP-8": {"pads": ["GND", "TRIG", "OUT", "~RESET", "CTRL", "THRES", "DISCH", "VCC"]},
        "SO-8": {"pads": ["GND", "TRIG", "OUT", "~RESET", "CTRL", "THRES", "DISCH", "VCC"]}
    }
}"#;

const LM358: &str = r#"{
    "description": "Dual operational amplifier",
    "pins": {
        "topPower": [[{"label": "V+", "ercType": "powerIn"}]],
        "bottomPower": [[{"label": "V-", "ercType": "powerIn"}]],
        "left": [
            [{"label": "IN1+", "ercType": "input"}, {"label": "IN1-", "ercType": "input"}],
            [{"label": "IN2+", "ercType": "input"}, {"label": "IN2-", "ercType": "input"}]
        ],
        "right": [[{"label": "OUT1", "ercType": "output"}], [{"label": "OUT2", "ercType": "output"}]]
    },
    "packages": {
        "DIP-8": {"pads": ["OUT1", "IN1-", "IN1+", "V-", "IN2+", "IN2-", "OUT2", "V+"]}
    }
}"#;

const BROKEN: &str = r#"{
    "pins": {"left": [[{"label": "A"}]]},
    "packages": {"SIP-2": {"pads": ["A", "Z"]}}
}"#;

fn write(dir: &Path, rel: &str, contents: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn sample_library() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "components/TI/NE555.json", NE555);
    write(dir.path(), "components/TI/LM358.json", LM358);
    dir
}

#[test]
fn exports_sample_library() {
    let lib_dir = sample_library();
    let out_dir = tempfile::tempdir().unwrap();

    let components = Library::open(lib_dir.path()).components().unwrap();
    let names: Vec<&str> = components.iter().map(|c| c.name()).collect();
    assert_eq!(names, ["LM358", "NE555"]);

    let summary = export_library(&components, out_dir.path(), "demo").unwrap();
    // LM358 + 1 variant, NE555 + 2 variants
    assert_eq!(summary.symbols, 5);
    assert_eq!(summary.doc_records, 2);
    // DIP-8 is shared
    assert_eq!(summary.footprints, 2);

    let lib = fs::read_to_string(out_dir.path().join("demo.lib")).unwrap();
    assert!(lib.starts_with("EESchema-LIBRARY Version 2.3\n#encoding utf-8\n"));
    assert!(lib.ends_with("# End Library\n"));
    assert_eq!(lib.matches("ENDDEF\n").count(), 5);
    for name in ["LM358", "LM358(DIP-8)", "NE555", "NE555(DIP-8)", "NE555(SO-8)"] {
        assert!(lib.contains(&format!("DEF {name} IC 0 40 Y Y 1 F N\n")), "{name}");
    }
    assert!(lib.contains("$FPLIST\n IC-SO-8\n$ENDFPLIST\n"));
    assert!(lib.contains("X ~RESET 4 -300 "));
    assert!(lib.contains(" 1 1 W\n"));

    let dcm = fs::read_to_string(out_dir.path().join("demo.dcm")).unwrap();
    assert!(dcm.contains("$CMP NE555\nD Precision timer\n$ENDCMP NE555\n"));
    assert!(dcm.contains("$CMP LM358\nD Dual operational amplifier\n$ENDCMP LM358\n"));
    assert!(!dcm.contains("\nF "));
    assert!(dcm.ends_with("#End Doc Library\n"));

    let pretty = out_dir.path().join("demo.pretty");
    let dip = fs::read_to_string(pretty.join("IC-DIP-8.kicad_mod")).unwrap();
    assert!(dip.starts_with("(module IC-DIP-8\n"));
    assert_eq!(dip.matches("thru_hole").count(), 8);
    let so = fs::read_to_string(pretty.join("IC-SO-8.kicad_mod")).unwrap();
    assert!(so.contains("(attr smd)"));
}

#[test]
fn export_is_deterministic() {
    let lib_dir = sample_library();
    let components = Library::open(lib_dir.path()).components().unwrap();

    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    export_library(&components, first.path(), "lib").unwrap();
    export_library(&components, second.path(), "lib").unwrap();

    for rel in ["lib.lib", "lib.dcm", "lib.pretty/IC-DIP-8.kicad_mod", "lib.pretty/IC-SO-8.kicad_mod"] {
        let a = fs::read(first.path().join(rel)).unwrap();
        let b = fs::read(second.path().join(rel)).unwrap();
        assert_eq!(a, b, "{rel}");
    }
}

#[test]
fn invalid_component_is_reported_and_can_be_skipped() {
    let lib_dir = sample_library();
    write(lib_dir.path(), "components/ACME/BROKEN.json", BROKEN);
    let library = Library::open(lib_dir.path());

    let err = library.components().unwrap_err();
    assert!(matches!(err, LibraryError::UnknownPin { ref label, .. } if label == "Z"));

    let components: Vec<_> = library
        .sources()
        .unwrap()
        .iter()
        .filter_map(|source| load_component(source).ok())
        .collect();
    assert_eq!(components.len(), 2);

    let out_dir = tempfile::tempdir().unwrap();
    let summary = export_library(&components, out_dir.path(), "skip").unwrap();
    assert_eq!(summary.doc_records, 2);
}

#[test]
fn malformed_json_is_parse_error() {
    let lib_dir = tempfile::tempdir().unwrap();
    write(lib_dir.path(), "components/ACME/BAD.json", "{ pins: ");
    let err = Library::open(lib_dir.path()).components().unwrap_err();
    assert!(matches!(err, LibraryError::ParseComponent { .. }));
}

#[test]
fn missing_components_dir_is_read_error() {
    let lib_dir = tempfile::tempdir().unwrap();
    let err = Library::open(lib_dir.path()).sources().unwrap_err();
    assert!(matches!(err, LibraryError::FileRead { .. }));
}

#[test]
fn empty_library_still_writes_frames() {
    let out_dir = tempfile::tempdir().unwrap();
    let summary = export_library(&[], out_dir.path(), "empty").unwrap();
    assert_eq!(summary.symbols, 0);
    assert_eq!(summary.footprints, 0);

    let lib = fs::read_to_string(&summary.symbol_library).unwrap();
    assert_eq!(lib, "EESchema-LIBRARY Version 2.3\n#encoding utf-8\n# End Library\n");
    assert!(summary.footprint_dir.is_dir());
}

#[test]
fn records_stay_framed_with_awkward_input() {
    let lib_dir = tempfile::tempdir().unwrap();
    write(
        lib_dir.path(),
        "components/ACME/U1.json",
        r#"{"description": "first line\n$ENDCMP\nD injected", "pins": {"left": [[{"label": "A"}]]}}"#,
    );
    write(lib_dir.path(), "components/ACME/My Part.json", "{}");
    let library = Library::open(lib_dir.path());

    let err = library.components().unwrap_err();
    assert!(matches!(err, LibraryError::InvalidComponentName { ref name } if name == "My Part"));

    let components: Vec<_> = library
        .sources()
        .unwrap()
        .iter()
        .filter_map(|source| load_component(source).ok())
        .collect();
    assert_eq!(components.len(), 1);

    let out_dir = tempfile::tempdir().unwrap();
    let summary = export_library(&components, out_dir.path(), "framed").unwrap();
    let dcm = fs::read_to_string(&summary.doc_library).unwrap();
    assert_eq!(
        dcm,
        "EESchema-DOCLIB Version 2.0\n#\n\
         $CMP U1\nD first line $ENDCMP D injected\n$ENDCMP U1\n\
         #\n#End Doc Library\n"
    );
}
