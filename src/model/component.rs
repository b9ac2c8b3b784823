//! Components and their categorised pin groups.

use std::collections::HashSet;

use serde::Serialize;

use super::definition::{ComponentDefinition, PinDefinition};
use super::{ErcType, PackageMapping, Pin};
use crate::error::{LibraryError, LibraryResult};
use crate::package::Package;

/// An ordered cluster of pins drawn together.
pub type PinGroup = Vec<Pin>;

/// Where a pin category is drawn on the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinCategory {
    /// Power pins at the top of the left edge.
    TopPower,
    /// Power pins at the bottom of the left edge.
    BottomPower,
    /// Signal pins on the left edge.
    Left,
    /// Signal pins on the right edge.
    Right,
}

impl PinCategory {
    /// All categories, in declaration order.
    pub const ALL: [Self; 4] = [Self::TopPower, Self::BottomPower, Self::Left, Self::Right];
}

/// The four pin categories of a component.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PinGroups {
    top_power: Vec<PinGroup>,
    bottom_power: Vec<PinGroup>,
    left: Vec<PinGroup>,
    right: Vec<PinGroup>,
}

impl PinGroups {
    /// Returns the groups of one category.
    #[must_use]
    pub fn category(&self, category: PinCategory) -> &[PinGroup] {
        match category {
            PinCategory::TopPower => &self.top_power,
            PinCategory::BottomPower => &self.bottom_power,
            PinCategory::Left => &self.left,
            PinCategory::Right => &self.right,
        }
    }

    /// Returns the top power groups.
    #[must_use]
    pub fn top_power(&self) -> &[PinGroup] {
        &self.top_power
    }

    /// Returns the bottom power groups.
    #[must_use]
    pub fn bottom_power(&self) -> &[PinGroup] {
        &self.bottom_power
    }

    /// Returns the left groups.
    #[must_use]
    pub fn left(&self) -> &[PinGroup] {
        &self.left
    }

    /// Returns the right groups.
    #[must_use]
    pub fn right(&self) -> &[PinGroup] {
        &self.right
    }

    /// Iterates over every pin with its category.
    pub fn iter(&self) -> impl Iterator<Item = (PinCategory, &Pin)> {
        PinCategory::ALL.into_iter().flat_map(move |category| {
            self.category(category)
                .iter()
                .flatten()
                .map(move |pin| (category, pin))
        })
    }
}

/// A validated component definition.
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    name: String,
    manufacturer: String,
    description: Option<String>,
    datasheet_url: Option<String>,
    pins: PinGroups,
    mappings: Vec<PackageMapping>,
    #[serde(skip)]
    labels: HashSet<String>,
}

impl Component {
    /// Builds a component from its definition file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or a label is empty or contains whitespace, if a
    /// label is repeated, if a package name does not parse or is listed twice
    /// ignoring case, if a mapping lists more pads than its package has, or if a
    /// mapping refers to a label the component does not declare.
    ///
    /// Line breaks and runs of whitespace in the description collapse to single
    /// spaces; a blank description is dropped.
    pub fn from_definition(
        manufacturer: impl Into<String>,
        name: impl Into<String>,
        definition: ComponentDefinition,
    ) -> LibraryResult<Self> {
        let name = name.into();
        if !is_token(&name) {
            return Err(LibraryError::InvalidComponentName { name });
        }
        let ComponentDefinition {
            description,
            datasheet_url,
            pins,
            packages,
        } = definition;

        let convert = |groups: Vec<Vec<PinDefinition>>| -> Vec<PinGroup> {
            groups
                .into_iter()
                .map(|group| {
                    group
                        .into_iter()
                        .map(|p| {
                            let erc = ErcType::from_code(p.erc_type.as_deref());
                            Pin::new(p.label, erc)
                        })
                        .collect()
                })
                .collect()
        };
        let pins = PinGroups {
            top_power: convert(pins.top_power),
            bottom_power: convert(pins.bottom_power),
            left: convert(pins.left),
            right: convert(pins.right),
        };

        let description = description
            .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|text| !text.is_empty());
        let labels = index_labels(&name, &pins)?;

        let mut mappings: Vec<PackageMapping> = Vec::with_capacity(packages.len());
        for (package_name, package_def) in packages {
            let package = Package::from_spec(&package_name)?;
            if package_def.pads.len() > package.pad_count as usize {
                return Err(LibraryError::TooManyPads {
                    component: name.clone(),
                    package: package_name,
                    mapped: package_def.pads.len(),
                    available: package.pad_count,
                });
            }
            if mappings.iter().any(|m| m.package_name() == package.name) {
                return Err(LibraryError::DuplicatePackage {
                    component: name,
                    package: package.name,
                });
            }
            let mapping = PackageMapping::new(name.clone(), package, package_def.pads);
            if let Some(label) = mapping.labels().find(|l| !labels.contains(*l)) {
                return Err(LibraryError::unknown_pin(&name, package_name, label));
            }
            mappings.push(mapping);
        }

        Ok(Self {
            name,
            manufacturer: manufacturer.into(),
            description,
            datasheet_url,
            pins,
            mappings,
            labels,
        })
    }

    /// Returns the component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the manufacturer code.
    #[must_use]
    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the datasheet link, if any.
    #[must_use]
    pub fn datasheet_url(&self) -> Option<&str> {
        self.datasheet_url.as_deref()
    }

    /// Returns the pin groups.
    #[must_use]
    pub const fn pin_groups(&self) -> &PinGroups {
        &self.pins
    }

    /// Returns the package mappings, in definition order.
    #[must_use]
    pub fn package_mappings(&self) -> &[PackageMapping] {
        &self.mappings
    }

    /// Returns the total number of declared pins.
    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.labels.len()
    }
}

/// Returns true for a non-empty string without whitespace.
fn is_token(text: &str) -> bool {
    !text.is_empty() && !text.chars().any(char::is_whitespace)
}

/// Collects the declared labels, rejecting bad and duplicate ones.
fn index_labels(component: &str, pins: &PinGroups) -> LibraryResult<HashSet<String>> {
    let mut labels = HashSet::new();
    for (_, pin) in pins.iter() {
        let label = pin.label();
        if !is_token(label) {
            return Err(LibraryError::InvalidPinLabel {
                component: component.to_string(),
                label: label.to_string(),
            });
        }
        if !labels.insert(label.to_string()) {
            return Err(LibraryError::DuplicatePin {
                component: component.to_string(),
                label: label.to_string(),
            });
        }
    }
    Ok(labels)
}
