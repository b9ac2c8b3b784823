//! Package family identifiers and their parsing rules.

use std::fmt;

use serde::Serialize;

use super::{assign_sides, Length, OrientationMarker, Package};
use crate::error::{LibraryError, LibraryResult};

/// Default DIP row spacing in mils.
const DIP_DEFAULT_ROW_SPACING_MIL: f64 = 300.0;

/// DIP/SIP pad pitch in mils.
const DIP_PITCH_MIL: f64 = 100.0;

/// DIP/SIP square pad size in mils.
const DIP_PAD_MIL: f64 = 55.0;

/// DIP/SIP drill diameter in mils.
const DIP_HOLE_MIL: f64 = 32.0;

/// SO row spacing for the narrow body (`N`), in mm.
const SO_NARROW_MM: f64 = 5.4;

/// SO row spacing for the wide body (`W`), in mm.
const SO_WIDE_MM: f64 = 9.3;

/// SO pad pitch in mils.
const SO_PITCH_MIL: f64 = 50.0;

/// SO pad size along the row, in mm.
const SO_PAD_WIDTH_MM: f64 = 0.60;

/// SO pad size across the row, in mm.
const SO_PAD_LENGTH_MM: f64 = 1.55;

/// QFP pad size across the row, in mm.
const QFP_PAD_LENGTH_MM: f64 = 1.5;

/// Package family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageFamily {
    /// Dual in-line, through-hole.
    Dip,
    /// Single in-line, through-hole.
    Sip,
    /// Small outline, gull-wing SMD.
    So,
    /// Quad flat package.
    Qfp,
    /// Thin quad flat package. Same footprint rules as QFP.
    Tqfp,
}

impl PackageFamily {
    /// Parses a family token (case-insensitive).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DIP" => Some(Self::Dip),
            "SIP" => Some(Self::Sip),
            "SO" => Some(Self::So),
            "QFP" => Some(Self::Qfp),
            "TQFP" => Some(Self::Tqfp),
            _ => None,
        }
    }

    /// Returns the number of physical sides carrying pads.
    #[must_use]
    pub const fn side_count(self) -> u32 {
        match self {
            Self::Sip => 1,
            Self::Dip | Self::So => 2,
            Self::Qfp | Self::Tqfp => 4,
        }
    }
}

impl fmt::Display for PackageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dip => write!(f, "DIP"),
            Self::Sip => write!(f, "SIP"),
            Self::So => write!(f, "SO"),
            Self::Qfp => write!(f, "QFP"),
            Self::Tqfp => write!(f, "TQFP"),
        }
    }
}

/// Parses a package identifier into its geometry.
pub(super) fn parse(spec: &str) -> LibraryResult<Package> {
    let fields: Vec<&str> = spec.split('-').collect();
    let family = PackageFamily::from_str_loose(fields[0])
        .ok_or_else(|| LibraryError::unsupported_family(spec, fields[0]))?;

    let allowed = match family {
        PackageFamily::Dip | PackageFamily::So => 2..=3,
        PackageFamily::Sip => 2..=2,
        PackageFamily::Qfp | PackageFamily::Tqfp => 3..=3,
    };
    if !allowed.contains(&fields.len()) {
        return Err(LibraryError::invalid_package_spec(
            spec,
            format!(
                "{family} expects {} to {} fields, got {}",
                allowed.start(),
                allowed.end(),
                fields.len()
            ),
        ));
    }

    let pad_count: u32 = fields[1].parse().map_err(|_| {
        LibraryError::invalid_package_spec(spec, format!("pad count '{}' is not a number", fields[1]))
    })?;
    let sides = family.side_count();
    if pad_count == 0 || pad_count % sides != 0 {
        return Err(LibraryError::invalid_pin_count(spec, pad_count, sides));
    }

    let third = fields.get(2).copied();
    let package = match family {
        PackageFamily::Dip => {
            let spacing_mil = match third {
                Some(field) => parse_positive(spec, field, "row spacing")?,
                None => DIP_DEFAULT_ROW_SPACING_MIL,
            };
            through_hole(spec, family, pad_count, Some(Length::from_mil(spacing_mil)))
        }
        PackageFamily::Sip => through_hole(spec, family, pad_count, None),
        PackageFamily::So => {
            let spacing_mm = match third {
                None => SO_NARROW_MM,
                Some(field) if field.eq_ignore_ascii_case("N") => SO_NARROW_MM,
                Some(field) if field.eq_ignore_ascii_case("W") => SO_WIDE_MM,
                Some(field) => parse_positive(spec, field, "row spacing")?,
            };
            Package {
                name: spec.to_ascii_uppercase(),
                family,
                pad_count,
                pitch: Length::from_mil(SO_PITCH_MIL),
                pad_width: Length::from_mm(SO_PAD_WIDTH_MM),
                pad_length: Length::from_mm(SO_PAD_LENGTH_MM),
                hole_diameter: None,
                row_spacing: Some(Length::from_mm(spacing_mm)),
                marker: OrientationMarker::TopDent,
                sides: assign_sides(pad_count, sides),
            }
        }
        PackageFamily::Qfp | PackageFamily::Tqfp => {
            // Third field is mandatory for quad packages; the field count check above
            // guarantees it is present.
            let pitch = Length::from_mm(parse_positive(spec, third.unwrap_or_default(), "pitch")?);
            let pad_length = Length::from_mm(QFP_PAD_LENGTH_MM);
            let per_side = f64::from(pad_count / sides);
            Package {
                name: spec.to_ascii_uppercase(),
                family,
                pad_count,
                pitch,
                pad_width: pitch / 2.0,
                pad_length,
                hole_diameter: None,
                row_spacing: Some(pitch * (per_side + 3.0) + pad_length),
                marker: OrientationMarker::Pin1Dot,
                sides: assign_sides(pad_count, sides),
            }
        }
    };

    Ok(package)
}

/// Builds a DIP or SIP package; both share pad, pitch and drill dimensions.
fn through_hole(
    spec: &str,
    family: PackageFamily,
    pad_count: u32,
    row_spacing: Option<Length>,
) -> Package {
    Package {
        name: spec.to_ascii_uppercase(),
        family,
        pad_count,
        pitch: Length::from_mil(DIP_PITCH_MIL),
        pad_width: Length::from_mil(DIP_PAD_MIL),
        pad_length: Length::from_mil(DIP_PAD_MIL),
        hole_diameter: Some(Length::from_mil(DIP_HOLE_MIL)),
        row_spacing,
        marker: if family == PackageFamily::Dip {
            OrientationMarker::TopDent
        } else {
            OrientationMarker::None
        },
        sides: assign_sides(pad_count, family.side_count()),
    }
}

/// Parses a strictly positive decimal field.
fn parse_positive(spec: &str, field: &str, what: &str) -> LibraryResult<f64> {
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(LibraryError::invalid_package_spec(
            spec,
            format!("{what} '{field}' is not a positive number"),
        )),
    }
}
