//! `KiCad` library file writers.
//!
//! - [`schlib`] - legacy schematic symbol library (`.lib`)
//! - [`doclib`] - symbol documentation library (`.dcm`)
//! - [`footprint`] - footprint modules (`.kicad_mod`), one file per package
//!
//! Writers render each record to a string first and then write it in a single
//! call, so an I/O failure never interleaves partial records.

pub mod doclib;
pub mod footprint;
pub mod schlib;

pub use doclib::{encode_doc, DocLibraryWriter};
pub use footprint::{encode_footprint, place_pads, write_footprint, FootprintPad, PadShape};
pub use schlib::{encode_symbol, SymbolLibraryWriter};
