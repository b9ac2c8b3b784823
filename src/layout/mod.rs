//! Schematic symbol layout.
//!
//! Turns a component's categorised pin groups into a two-sided rectangular symbol:
//! which pin goes on which row of which edge, how wide and tall the body is, and
//! which pad number each pin carries.
//!
//! # Geometry
//!
//! All coordinates are in schematic library units (mils); every value produced is
//! a multiple of the 50-unit grid. The body spans `(0, 0)`-`(width, height)`.
//!
//! - **Left edge** (pins pointing right): top power groups, then left groups, then
//!   bottom power groups.
//! - **Right edge** (pins pointing left): right groups.
//!
//! Pin groups are separated by one blank row. When the left edge is shorter than
//! the right edge and has a gap, its last run of rows (normally the bottom power
//! pins) slides down so both edges end on the same row.
//!
//! Rows are 100 units apart, starting at `height - 100`. Blank rows take a row
//! position but draw nothing.
//!
//! # Example
//!
//! ```
//! use icylib::layout;
//! use icylib::model::{Component, ComponentDefinition};
//!
//! let def = ComponentDefinition::from_json(
//!     r#"{"pins": {"left": [[{"label": "A"}, {"label": "B"}]], "right": [[{"label": "C"}]]}}"#,
//! ).unwrap();
//! let component = Component::from_definition("ACME", "DEMO", def).unwrap();
//!
//! let symbol = layout::plan(&component, None)?;
//! assert_eq!(symbol.height, 300);
//! assert_eq!(symbol.width, 250);
//! # Ok::<(), icylib::error::LibraryError>(())
//! ```

mod slots;

pub use slots::{push_groups, rebalance, trim_trailing_blanks};

use serde::Serialize;

use crate::error::LibraryResult;
use crate::model::{Component, ErcType, PackageMapping, Pin, PinGroup};

/// Coordinate grid of the schematic library format.
pub const GRID: i32 = 50;

/// Vertical distance between rows.
pub const ROW_PITCH: i32 = 100;

/// Length of every pin stub.
pub const PIN_LENGTH: i32 = 300;

/// Horizontal space reserved per label character.
const LABEL_CHAR_WIDTH: i32 = 50;

/// Horizontal space reserved per character of the variant caption.
const CAPTION_CHAR_WIDTH: i32 = 60;

/// Fixed horizontal space between the two label columns.
const BODY_MARGIN: i32 = 150;

/// Direction a pin stub points from its connection end towards the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinDirection {
    /// Stub drawn rightwards; pin sits on the left edge.
    Right,
    /// Stub drawn leftwards; pin sits on the right edge.
    Left,
}

impl PinDirection {
    /// Returns the orientation letter used in pin records.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Right => 'R',
            Self::Left => 'L',
        }
    }
}

/// A pin assigned to a row, with the pad number it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacedPin<'a> {
    /// The pin.
    pub pin: &'a Pin,
    /// Pad number shown on the symbol.
    pub number: u32,
}

/// One edge of the symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Side<'a> {
    /// Rows from top to bottom; `None` is a blank row.
    pub rows: Vec<Option<PlacedPin<'a>>>,
    /// Widest rendered label on this edge, in characters.
    pub label_width: usize,
    /// X coordinate of the body edge the pins attach to.
    pub x: i32,
    /// Direction the stubs point.
    pub direction: PinDirection,
}

impl<'a> Side<'a> {
    /// Returns the number of rows, blanks included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the edge has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over the rendered pins, top to bottom.
    pub fn pins(&self) -> impl Iterator<Item = &PlacedPin<'a>> {
        self.rows.iter().flatten()
    }
}

/// A pin record ready to be written: connection point, stub and pad number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinPlacement<'a> {
    /// Pin label as declared.
    pub label: &'a str,
    /// Pad number.
    pub number: u32,
    /// X of the connection end of the stub.
    pub x: i32,
    /// Y of the row.
    pub y: i32,
    /// Stub length.
    pub length: i32,
    /// Stub direction.
    pub direction: PinDirection,
    /// Electrical role.
    pub erc_type: ErcType,
}

/// The laid-out symbol for one component variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolLayout<'a> {
    /// Symbol name: the component name, or `Name(Package)` for a package variant.
    pub name: String,
    /// Footprint linked to this variant, if any.
    pub footprint: Option<String>,
    /// Left edge (pins point right).
    pub left: Side<'a>,
    /// Right edge (pins point left).
    pub right: Side<'a>,
    /// Body width.
    pub width: i32,
    /// Body height.
    pub height: i32,
}

impl<'a> SymbolLayout<'a> {
    /// Returns the row count of the taller edge.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.left.len().max(self.right.len())
    }

    /// Returns the pin records of both edges, left edge first, top to bottom.
    #[must_use]
    pub fn placements(&self) -> Vec<PinPlacement<'a>> {
        let mut placements = Vec::new();
        for side in [&self.left, &self.right] {
            let x = match side.direction {
                PinDirection::Right => side.x - PIN_LENGTH,
                PinDirection::Left => side.x + PIN_LENGTH,
            };
            for (row, slot) in side.rows.iter().enumerate() {
                let Some(placed) = slot else { continue };
                placements.push(PinPlacement {
                    label: placed.pin.label(),
                    number: placed.number,
                    x,
                    y: self.height - ROW_PITCH - to_coord(row) * ROW_PITCH,
                    length: PIN_LENGTH,
                    direction: side.direction,
                    erc_type: placed.pin.erc_type(),
                });
            }
        }
        placements
    }
}

/// Lays out a component, optionally restricted to one package variant.
///
/// Without a mapping every declared pin is drawn and pins are numbered 1, 2, ...
/// down each edge independently, so the two edges repeat numbers. With a mapping
/// only bonded pins are drawn and each carries its pad number.
///
/// # Errors
///
/// Returns [`LibraryError::UnknownPin`](crate::error::LibraryError::UnknownPin)
/// if the mapping reports a pin as bonded but cannot resolve its pad. Mappings
/// owned by a [`Component`] never do.
pub fn plan<'a>(
    component: &'a Component,
    mapping: Option<&PackageMapping>,
) -> LibraryResult<SymbolLayout<'a>> {
    let groups = component.pin_groups();

    let mut left = build_side(
        &[groups.top_power(), groups.left(), groups.bottom_power()],
        mapping,
        PinDirection::Right,
    )?;
    let mut right = build_side(&[groups.right()], mapping, PinDirection::Left)?;

    left.rows = rebalance(left.rows, right.len());

    let rows = left.len().max(right.len());
    let height = to_coord(rows) * ROW_PITCH + ROW_PITCH;

    let mut width = to_coord(left.label_width) * LABEL_CHAR_WIDTH
        + to_coord(right.label_width) * LABEL_CHAR_WIDTH
        + BODY_MARGIN;
    let name = match mapping {
        Some(mapping) => {
            let caption = mapping.caption();
            width = width.max(to_coord(caption.chars().count()) * CAPTION_CHAR_WIDTH);
            caption
        }
        None => component.name().to_string(),
    };
    let width = round_up_to_grid(width);

    left.x = 0;
    right.x = width;

    Ok(SymbolLayout {
        name,
        footprint: mapping.map(|m| m.package().footprint_name()),
        left,
        right,
        width,
        height,
    })
}

/// Builds one edge from its categories, in order.
fn build_side<'a>(
    categories: &[&'a [PinGroup]],
    mapping: Option<&PackageMapping>,
    direction: PinDirection,
) -> LibraryResult<Side<'a>> {
    let mut rows = Vec::new();
    for groups in categories {
        let mut placed_groups = Vec::with_capacity(groups.len());
        for group in *groups {
            let mut placed = Vec::with_capacity(group.len());
            for pin in group {
                match mapping {
                    Some(mapping) if mapping.has_pin(pin) => placed.push(PlacedPin {
                        pin,
                        number: mapping.pad_number_for_pin(pin)?,
                    }),
                    // Not bonded on this package.
                    Some(_) => {}
                    None => placed.push(PlacedPin { pin, number: 0 }),
                }
            }
            placed_groups.push(placed);
        }
        push_groups(&mut rows, placed_groups);
    }
    trim_trailing_blanks(&mut rows);

    if mapping.is_none() {
        for (index, placed) in rows.iter_mut().flatten().enumerate() {
            #[allow(clippy::cast_possible_truncation)] // row counts are tiny
            let number = index as u32 + 1;
            placed.number = number;
        }
    }

    let label_width = rows
        .iter()
        .flatten()
        .map(|placed| placed.pin.display_width())
        .max()
        .unwrap_or(0);

    Ok(Side {
        rows,
        label_width,
        x: 0,
        direction,
    })
}

/// Rounds a coordinate up to the next grid multiple.
const fn round_up_to_grid(value: i32) -> i32 {
    (value + GRID - 1) / GRID * GRID
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // row and label counts are tiny
const fn to_coord(n: usize) -> i32 {
    n as i32
}
