//! Component pins and their electrical roles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker used in labels to request an overbar (active-low signal).
pub const INVERT_MARKER: char = '~';

/// Electrical role of a pin, used for electrical rule checking in the schematic editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErcType {
    /// Power supply input (VCC, GND).
    PowerIn,
    /// Power supply output (regulator output).
    PowerOut,
    /// Signal input.
    Input,
    /// Signal output.
    Output,
    /// Input and output.
    Bidirectional,
    /// Role not declared, or not one we recognise.
    #[default]
    Unknown,
}

impl ErcType {
    /// Resolves a component file `ercType` code.
    ///
    /// Absent and unrecognised codes map to [`ErcType::Unknown`].
    #[must_use]
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("powerIn") => Self::PowerIn,
            Some("powerOut") => Self::PowerOut,
            Some("input") => Self::Input,
            Some("output") => Self::Output,
            Some("bidirectional") => Self::Bidirectional,
            _ => Self::Unknown,
        }
    }

    /// Returns the component file code, if this role has one.
    #[must_use]
    pub const fn code(self) -> Option<&'static str> {
        match self {
            Self::PowerIn => Some("powerIn"),
            Self::PowerOut => Some("powerOut"),
            Self::Input => Some("input"),
            Self::Output => Some("output"),
            Self::Bidirectional => Some("bidirectional"),
            Self::Unknown => None,
        }
    }

    /// Returns the electrical type letter used in schematic library pin records.
    #[must_use]
    pub const fn kicad_code(self) -> char {
        match self {
            Self::PowerIn => 'W',
            Self::PowerOut => 'w',
            Self::Input => 'I',
            Self::Output => 'O',
            Self::Bidirectional => 'B',
            Self::Unknown => 'U',
        }
    }
}

impl fmt::Display for ErcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().unwrap_or("unknown"))
    }
}

/// A named pin of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pin {
    label: String,
    erc_type: ErcType,
}

impl Pin {
    /// Creates a pin.
    #[must_use]
    pub fn new(label: impl Into<String>, erc_type: ErcType) -> Self {
        Self {
            label: label.into(),
            erc_type,
        }
    }

    /// Returns the label as written, including any invert markers.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the electrical role.
    #[must_use]
    pub const fn erc_type(&self) -> ErcType {
        self.erc_type
    }

    /// Returns the number of characters the label occupies when drawn.
    ///
    /// Invert markers render as an overbar and take no horizontal space.
    #[must_use]
    pub fn display_width(&self) -> usize {
        self.label.chars().filter(|&c| c != INVERT_MARKER).count()
    }
}
