//! Symbol documentation library (`.dcm`) writer.
//!
//! ```text
//! EESchema-DOCLIB Version 2.0
//! #
//! $CMP <name>
//! D <description>
//! $ENDCMP <name>
//! ...
//! #
//! #End Doc Library
//! ```

use std::io::Write;

use crate::error::LibraryResult;
use crate::model::Component;

/// First line of the file.
pub const HEADER: &str = "EESchema-DOCLIB Version 2.0";

/// Last line of the file.
pub const FOOTER: &str = "#End Doc Library";

/// Renders the three-line documentation record of one component.
///
/// Descriptions are single-line by construction (see
/// [`Component::from_definition`]), so the record never spans more lines.
#[must_use]
pub fn encode_doc(component: &Component) -> String {
    let name = component.name();
    let description = match component.description() {
        Some(description) => format!("D {description}"),
        None => "D".to_string(),
    };
    format!("$CMP {name}\n{description}\n$ENDCMP {name}\n")
}

/// Streams documentation records into a doc library.
#[derive(Debug)]
pub struct DocLibraryWriter<W: Write> {
    out: W,
    records: usize,
}

impl<W: Write> DocLibraryWriter<W> {
    /// Writes the file header and returns the writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be written.
    pub fn new(mut out: W) -> LibraryResult<Self> {
        writeln!(out, "{HEADER}")?;
        writeln!(out, "#")?;
        Ok(Self { out, records: 0 })
    }

    /// Writes the record of one component.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_component(&mut self, component: &Component) -> LibraryResult<()> {
        self.out.write_all(encode_doc(component).as_bytes())?;
        self.records += 1;
        Ok(())
    }

    /// Returns the number of records written so far.
    #[must_use]
    pub const fn record_count(&self) -> usize {
        self.records
    }

    /// Writes the footer, flushes, and returns the underlying output.
    ///
    /// # Errors
    ///
    /// Returns an error if the footer cannot be written or the flush fails.
    pub fn finish(mut self) -> LibraryResult<W> {
        writeln!(self.out, "#")?;
        writeln!(self.out, "{FOOTER}")?;
        self.out.flush()?;
        Ok(self.out)
    }
}
