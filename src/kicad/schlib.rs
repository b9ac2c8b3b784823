//! Schematic symbol library (`.lib`) writer.
//!
//! # Record Format
//!
//! ```text
//! DEF <name> IC 0 40 Y Y 1 F N
//! F0 "IC" 0 <height + 50> 60 H V L CNN
//! F1 "<name>" <width> -50 60 H V R CNN
//! $FPLIST                      (package variants only)
//!  IC-<package>
//! $ENDFPLIST
//! DRAW
//! S 0 0 <width> <height> 0 0 0 N
//! X <label> <number> <x> <y> <length> <R|L> 50 50 1 1 <type>
//! ...
//! ENDDRAW
//! ENDDEF
//! ```
//!
//! Each record is rendered to a buffer in full before any byte reaches the output,
//! so a failure never leaves half a record behind.

use std::io::Write;

use tracing::debug;

use crate::error::LibraryResult;
use crate::layout::{self, SymbolLayout};
use crate::model::Component;

/// First line of the file.
pub const HEADER: &str = "EESchema-LIBRARY Version 2.3";

/// Encoding declaration following the header.
pub const ENCODING: &str = "#encoding utf-8";

/// Last line of the file.
pub const FOOTER: &str = "# End Library";

/// Reference designator prefix used for every symbol.
const REFERENCE: &str = "IC";

/// Text size of the two field lines.
const TEXT_SIZE: i32 = 60;

/// Pin name and number text size.
const PIN_TEXT_SIZE: i32 = 50;

/// Renders one symbol record.
#[must_use]
pub fn encode_symbol(symbol: &SymbolLayout<'_>) -> String {
    let mut lines = vec![
        format!("DEF {} {REFERENCE} 0 40 Y Y 1 F N", symbol.name),
        format!(
            "F0 \"{REFERENCE}\" 0 {} {TEXT_SIZE} H V L CNN",
            symbol.height + 50
        ),
        format!(
            "F1 \"{}\" {} -50 {TEXT_SIZE} H V R CNN",
            symbol.name, symbol.width
        ),
    ];

    if let Some(ref footprint) = symbol.footprint {
        lines.push("$FPLIST".to_string());
        lines.push(format!(" {footprint}"));
        lines.push("$ENDFPLIST".to_string());
    }

    lines.push("DRAW".to_string());
    lines.push(format!("S 0 0 {} {} 0 0 0 N", symbol.width, symbol.height));
    for pin in symbol.placements() {
        lines.push(format!(
            "X {} {} {} {} {} {} {PIN_TEXT_SIZE} {PIN_TEXT_SIZE} 1 1 {}",
            pin.label,
            pin.number,
            pin.x,
            pin.y,
            pin.length,
            pin.direction.code(),
            pin.erc_type.kicad_code(),
        ));
    }
    lines.push("ENDDRAW".to_string());
    lines.push("ENDDEF".to_string());

    let mut record = lines.join("\n");
    record.push('\n');
    record
}

/// Streams symbol records into a schematic library.
#[derive(Debug)]
pub struct SymbolLibraryWriter<W: Write> {
    out: W,
    symbols: usize,
}

impl<W: Write> SymbolLibraryWriter<W> {
    /// Writes the file header and returns the writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be written.
    pub fn new(mut out: W) -> LibraryResult<Self> {
        writeln!(out, "{HEADER}")?;
        writeln!(out, "{ENCODING}")?;
        Ok(Self { out, symbols: 0 })
    }

    /// Writes one laid-out symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_symbol(&mut self, symbol: &SymbolLayout<'_>) -> LibraryResult<()> {
        let record = encode_symbol(symbol);
        self.out.write_all(record.as_bytes())?;
        self.symbols += 1;
        Ok(())
    }

    /// Writes the bare symbol of a component followed by one symbol per package
    /// variant. Returns the number of symbols written.
    ///
    /// All variants are laid out and rendered before anything is written.
    ///
    /// # Errors
    ///
    /// Returns an error if a variant cannot be laid out or the output cannot be
    /// written.
    pub fn write_component(&mut self, component: &Component) -> LibraryResult<usize> {
        let mut records = vec![encode_symbol(&layout::plan(component, None)?)];
        for mapping in component.package_mappings() {
            records.push(encode_symbol(&layout::plan(component, Some(mapping))?));
        }

        debug!(
            component = component.name(),
            symbols = records.len(),
            "Writing symbol records"
        );
        let count = records.len();
        self.out.write_all(records.concat().as_bytes())?;
        self.symbols += count;
        Ok(count)
    }

    /// Returns the number of symbols written so far.
    #[must_use]
    pub const fn symbol_count(&self) -> usize {
        self.symbols
    }

    /// Writes the footer, flushes, and returns the underlying output.
    ///
    /// # Errors
    ///
    /// Returns an error if the footer cannot be written or the flush fails.
    pub fn finish(mut self) -> LibraryResult<W> {
        writeln!(self.out, "{FOOTER}")?;
        self.out.flush()?;
        Ok(self.out)
    }
}
