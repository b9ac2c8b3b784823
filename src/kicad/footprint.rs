//! Footprint (`.kicad_mod`) writer.
//!
//! Pad placement is derived from the package alone and is independent of the
//! symbol layout. Pads are centred on the origin and evenly spaced at the package
//! pitch along each side; opposite sides sit `row_spacing` apart.
//!
//! ```text
//! (module IC-<package>
//!   (at 0 0)
//!   (attr smd)                                     (surface-mount only)
//!   (fp_arc ...) | (fp_circle ...)                 (orientation marker, if any)
//!   (pad <n> <thru_hole|smd> <rect|circle> (at x y) (size w h) [(drill d)] (layers ...))
//!   ...
//! )
//! ```
//!
//! Coordinates are millimetres with the Y axis pointing down, so pad 1 sits at
//! the top of the left column.

use std::io::Write;

use serde::Serialize;

use crate::error::LibraryResult;
use crate::package::{Length, Mount, OrientationMarker, Package, PadSide};

/// Silkscreen line width (mm).
const SILK_WIDTH: f64 = 0.15;

/// Radius of the top-dent marker (mm).
const DENT_RADIUS: f64 = 0.5;

/// Radius of the pin-1 dot (mm).
const DOT_RADIUS: f64 = 0.25;

/// Gap between pad 1 and the pin-1 dot (mm).
const DOT_CLEARANCE: f64 = 0.5;

/// Copper pad shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PadShape {
    /// Rectangular pad.
    Rect,
    /// Circular pad.
    Circle,
}

impl PadShape {
    /// Returns the footprint keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
        }
    }
}

/// A placed footprint pad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintPad {
    /// Pad number.
    pub number: u32,
    /// Centre X.
    pub x: Length,
    /// Centre Y.
    pub y: Length,
    /// Size along X.
    pub width: Length,
    /// Size along Y.
    pub height: Length,
    /// Copper shape.
    pub shape: PadShape,
}

/// Places every pad of a package, ordered by pad number.
#[must_use]
pub fn place_pads(package: &Package) -> Vec<FootprintPad> {
    let half_span = package.row_spacing.map_or(Length::ZERO, |s| s / 2.0);
    let through_hole = package.mount() == Mount::ThroughHole;

    let mut pads = Vec::with_capacity(package.pad_count as usize);
    for side in &package.sides {
        let count = side.pads.len();
        for (index, &number) in side.pads.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)] // pad counts are tiny
            let along = package.pitch * (index as f64 - (count as f64 - 1.0) / 2.0);
            let (x, y) = match side.side {
                PadSide::Left => (-half_span, along),
                PadSide::Right => (half_span, along),
                PadSide::Bottom => (along, half_span),
                PadSide::Top => (along, -half_span),
            };
            let (width, height) = if side.side.is_vertical() {
                (package.pad_length, package.pad_width)
            } else {
                (package.pad_width, package.pad_length)
            };
            let shape = if number == 1 || through_hole {
                PadShape::Rect
            } else {
                PadShape::Circle
            };
            pads.push(FootprintPad {
                number,
                x,
                y,
                width,
                height,
                shape,
            });
        }
    }

    pads.sort_by_key(|pad| pad.number);
    pads
}

/// Renders the footprint of a package.
#[must_use]
pub fn encode_footprint(package: &Package) -> String {
    let pads = place_pads(package);
    let mount = package.mount();

    let mut lines = vec![
        format!("(module {}", package.footprint_name()),
        "  (at 0 0)".to_string(),
    ];
    if mount == Mount::SurfaceMount {
        lines.push("  (attr smd)".to_string());
    }
    if let Some(marker) = encode_marker(package, &pads) {
        lines.push(marker);
    }

    let (kind, layers) = match mount {
        Mount::ThroughHole => ("thru_hole", "*.Cu *.Mask"),
        Mount::SurfaceMount => ("smd", "F.Cu F.Paste F.Mask"),
    };
    for pad in &pads {
        let drill = package
            .hole_diameter
            .map(|d| format!(" (drill {d})"))
            .unwrap_or_default();
        lines.push(format!(
            "  (pad {} {kind} {} (at {} {}) (size {} {}){drill} (layers {layers}))",
            pad.number,
            pad.shape.keyword(),
            pad.x,
            pad.y,
            pad.width,
            pad.height,
        ));
    }
    lines.push(")".to_string());

    let mut record = lines.join("\n");
    record.push('\n');
    record
}

/// Renders the silkscreen orientation marker, if the package has one.
fn encode_marker(package: &Package, pads: &[FootprintPad]) -> Option<String> {
    match package.marker {
        OrientationMarker::None => None,
        OrientationMarker::TopDent => {
            // One pitch above the first row of pads.
            let rows = f64::from(package.pads_per_side());
            let top = -(package.pitch * ((rows - 1.0) / 2.0 + 1.0));
            let radius = Length::from_mm(DENT_RADIUS);
            Some(format!(
                "  (fp_arc (start 0 {top}) (end {} {top}) (angle -180) (layer F.SilkS) (width {}))",
                -radius,
                Length::from_mm(SILK_WIDTH),
            ))
        }
        OrientationMarker::Pin1Dot => {
            let first = pads.first()?;
            let x = first.x - first.width / 2.0 - Length::from_mm(DOT_CLEARANCE);
            Some(format!(
                "  (fp_circle (center {x} {}) (end {} {}) (layer F.SilkS) (width {}))",
                first.y,
                x + Length::from_mm(DOT_RADIUS),
                first.y,
                Length::from_mm(SILK_WIDTH),
            ))
        }
    }
}

/// Writes the footprint of a package as one buffered record.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_footprint<W: Write>(out: &mut W, package: &Package) -> LibraryResult<()> {
    out.write_all(encode_footprint(package).as_bytes())?;
    Ok(())
}
