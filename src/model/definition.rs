//! Serde shapes of a component definition file.
//!
//! These structures map directly to the JSON stored under
//! `components/<manufacturer>/<name>.json`. They are unvalidated; see
//! [`Component::from_definition`](super::Component::from_definition) for the
//! checked in-memory form.
//!
//! # Example
//!
//! ```json
//! {
//!     "description": "Quad 2-input NAND gate",
//!     "datasheetUrl": "https://example.com/74hc00.pdf",
//!     "pins": {
//!         "topPower": [[{"label": "VCC", "ercType": "powerIn"}]],
//!         "bottomPower": [[{"label": "GND", "ercType": "powerIn"}]],
//!         "left": [[{"label": "1A", "ercType": "input"}, {"label": "1B", "ercType": "input"}]],
//!         "right": [[{"label": "1Y", "ercType": "output"}]]
//!     },
//!     "packages": {
//!         "DIP-14": {"pads": ["1A", "1B", "1Y", null, null, null, "GND",
//!                             null, null, null, null, null, null, "VCC"]}
//!     }
//! }
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

/// Root of a component definition file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Link to the datasheet.
    #[serde(default)]
    pub datasheet_url: Option<String>,

    /// Pin groups by category.
    #[serde(default)]
    pub pins: PinsDefinition,

    /// Package variants keyed by package identifier, in file order.
    #[serde(default)]
    pub packages: IndexMap<String, PackageDefinition>,
}

impl ComponentDefinition {
    /// Parses a definition from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the text is malformed or has the wrong shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The four pin categories, each an ordered list of pin groups.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinsDefinition {
    /// Power pins drawn at the top of the left edge.
    #[serde(default)]
    pub top_power: Vec<Vec<PinDefinition>>,

    /// Power pins drawn at the bottom of the left edge.
    #[serde(default)]
    pub bottom_power: Vec<Vec<PinDefinition>>,

    /// Signal pins on the left edge.
    #[serde(default)]
    pub left: Vec<Vec<PinDefinition>>,

    /// Signal pins on the right edge.
    #[serde(default)]
    pub right: Vec<Vec<PinDefinition>>,
}

/// A single pin.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinDefinition {
    /// Pin label; `~` marks an inverted signal.
    pub label: String,

    /// Electrical role code (`powerIn`, `input`, ...).
    #[serde(default)]
    pub erc_type: Option<String>,
}

/// Pad assignment for one package variant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageDefinition {
    /// Pin label per pad, pad 1 first. `null` leaves the pad unconnected.
    #[serde(default)]
    pub pads: Vec<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_definition() {
        let def = ComponentDefinition::from_json("{}").unwrap();
        assert!(def.description.is_none());
        assert!(def.pins.left.is_empty());
        assert!(def.packages.is_empty());
    }

    #[test]
    fn parse_full_definition() {
        let json = r#"{
            "description": "Timer",
            "datasheetUrl": "https://example.com/ne555.pdf",
            "pins": {
                "topPower": [[{"label": "VCC", "ercType": "powerIn"}]],
                "left": [[{"label": "TRIG"}, {"label": "THR", "ercType": "input"}]]
            },
            "packages": {
                "SO-8": {"pads": ["VCC", null, "TRIG"]},
                "DIP-8": {"pads": ["TRIG"]}
            }
        }"#;

        let def = ComponentDefinition::from_json(json).unwrap();
        assert_eq!(def.description.as_deref(), Some("Timer"));
        assert_eq!(def.datasheet_url.as_deref(), Some("https://example.com/ne555.pdf"));
        assert_eq!(def.pins.top_power[0][0].erc_type.as_deref(), Some("powerIn"));
        assert!(def.pins.left[0][0].erc_type.is_none());
        assert!(def.pins.right.is_empty());

        // File order is preserved
        let names: Vec<&str> = def.packages.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["SO-8", "DIP-8"]);
        assert_eq!(def.packages["SO-8"].pads[1], None);
    }

    #[test]
    fn reject_pin_without_label() {
        let json = r#"{"pins": {"left": [[{"ercType": "input"}]]}}"#;
        assert!(ComponentDefinition::from_json(json).is_err());
    }
}
