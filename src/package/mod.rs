//! Package geometry.
//!
//! A package is identified by a family code such as `DIP-14-300`, `SO-16-W` or
//! `QFP-44-0.8`. Parsing the code yields everything the footprint writer needs:
//! pad count, pitch, pad size, drill, number of physical sides and the pad numbers
//! along each side.
//!
//! # Supported Families
//!
//! | Family | Form | Sides | Mount |
//! |--------|------|-------|-------|
//! | DIP | `DIP-<count>[-<row spacing mil>]` | 2 | through-hole |
//! | SIP | `SIP-<count>` | 1 | through-hole |
//! | SO | `SO-<count>[-N\|W\|<row spacing mm>]` | 2 | SMD |
//! | QFP, TQFP | `QFP-<count>-<pitch mm>` | 4 | SMD |
//!
//! # Pad Numbering
//!
//! Pads are numbered counter-clockwise starting with pad 1 on the left side. Each
//! side's sequence is listed in drawing order: top to bottom for the left and right
//! sides, left to right for the bottom and top sides.
//!
//! ```
//! use icylib::package::{Package, PadSide};
//!
//! let dip = Package::from_spec("DIP-8").unwrap();
//! assert_eq!(dip.pads_on(PadSide::Left), Some(&[1, 2, 3, 4][..]));
//! assert_eq!(dip.pads_on(PadSide::Right), Some(&[8, 7, 6, 5][..]));
//! ```

mod family;
pub mod units;

pub use family::PackageFamily;
pub use units::Length;

use serde::Serialize;

use crate::error::LibraryResult;

/// How the package is attached to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mount {
    /// Leads go through drilled holes.
    ThroughHole,
    /// Leads sit on surface pads.
    SurfaceMount,
}

/// Orientation marker drawn on the footprint silkscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMarker {
    /// No marker.
    None,
    /// Semicircular dent at the top edge of the body (DIP, SO).
    TopDent,
    /// Dot beside pad 1 (QFP).
    Pin1Dot,
}

/// A physical side of the package outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PadSide {
    /// Left column of pads.
    Left,
    /// Bottom row of pads.
    Bottom,
    /// Right column of pads.
    Right,
    /// Top row of pads.
    Top,
}

impl PadSide {
    /// Returns true for the left and right sides, whose pads are stacked vertically.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// The ordered pad numbers along one side of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidePads {
    /// Which side.
    pub side: PadSide,
    /// Pad numbers in drawing order.
    pub pads: Vec<u32>,
}

/// Resolved geometry of a package.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    /// The identifier this package was parsed from, uppercased (e.g. `DIP-14-300`).
    pub name: String,

    /// Package family.
    pub family: PackageFamily,

    /// Total number of pads.
    pub pad_count: u32,

    /// Centre-to-centre distance between adjacent pads on one side.
    pub pitch: Length,

    /// Pad size along the side.
    pub pad_width: Length,

    /// Pad size across the side.
    pub pad_length: Length,

    /// Drill diameter. `None` means surface-mount.
    pub hole_diameter: Option<Length>,

    /// Centre-to-centre distance between opposite pad rows (2- and 4-sided only).
    pub row_spacing: Option<Length>,

    /// Silkscreen orientation marker.
    pub marker: OrientationMarker,

    /// Pad numbers per side, counter-clockwise from the left side.
    pub sides: Vec<SidePads>,
}

impl Package {
    /// Parses a package family identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::InvalidPackageSpec`](crate::error::LibraryError::InvalidPackageSpec)
    /// if the field count or a numeric field is wrong,
    /// [`LibraryError::UnsupportedPackageFamily`](crate::error::LibraryError::UnsupportedPackageFamily)
    /// for an unknown family token, and
    /// [`LibraryError::InvalidPinCount`](crate::error::LibraryError::InvalidPinCount)
    /// if the pad count does not divide evenly over the sides.
    pub fn from_spec(spec: &str) -> LibraryResult<Self> {
        family::parse(spec)
    }

    /// Returns the mount type, derived solely from the presence of a drill.
    #[must_use]
    pub const fn mount(&self) -> Mount {
        if self.hole_diameter.is_some() {
            Mount::ThroughHole
        } else {
            Mount::SurfaceMount
        }
    }

    /// Returns the number of physical sides carrying pads.
    #[must_use]
    pub fn side_count(&self) -> u32 {
        self.family.side_count()
    }

    /// Returns the number of pads on each side.
    #[must_use]
    pub fn pads_per_side(&self) -> u32 {
        self.pad_count / self.side_count()
    }

    /// Returns the pad numbers on the given side, if the package has that side.
    #[must_use]
    pub fn pads_on(&self, side: PadSide) -> Option<&[u32]> {
        self.sides
            .iter()
            .find(|s| s.side == side)
            .map(|s| s.pads.as_slice())
    }

    /// Returns the footprint name used in footprint libraries and symbol filters.
    #[must_use]
    pub fn footprint_name(&self) -> String {
        format!("IC-{}", self.name)
    }
}

/// Assigns pad numbers to sides, counter-clockwise starting at the left side.
///
/// `count` must already be a multiple of `sides`.
fn assign_sides(count: u32, sides: u32) -> Vec<SidePads> {
    let k = count / sides;
    let left = SidePads {
        side: PadSide::Left,
        pads: (1..=k).collect(),
    };
    match sides {
        1 => vec![left],
        2 => vec![
            left,
            SidePads {
                side: PadSide::Right,
                pads: (k + 1..=2 * k).rev().collect(),
            },
        ],
        _ => vec![
            left,
            SidePads {
                side: PadSide::Bottom,
                pads: (k + 1..=2 * k).collect(),
            },
            SidePads {
                side: PadSide::Right,
                pads: (2 * k + 1..=3 * k).rev().collect(),
            },
            SidePads {
                side: PadSide::Top,
                pads: (3 * k + 1..=4 * k).rev().collect(),
            },
        ],
    }
}
