//! icylib: generates `KiCad` libraries from declarative component definitions
//!
//! A component is described once, as JSON: its pins grouped by where they belong
//! on the symbol, and for each package the label on every pad. From that this
//! library produces:
//!
//! - **Schematic symbols**: a bare symbol plus one variant per package, with pins
//!   laid out in groups on two sides of a grid-aligned rectangle
//! - **Symbol documentation**: a description record per component
//! - **Footprints**: one per distinct package, with pad geometry derived from the
//!   package identifier (`DIP-14`, `SO-16-W`, `QFP-44-0.8`, ...)
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types
//! - [`model`] - Component definitions, pins and package mappings
//! - [`package`] - Package identifier parsing and pad geometry
//! - [`layout`] - Symbol layout engine
//! - [`kicad`] - Library file writers
//! - [`export`] - Writes a whole library to disk

pub mod config;
pub mod error;
pub mod export;
pub mod kicad;
pub mod layout;
pub mod model;
pub mod package;
