//! Package mappings: which pins a package variant exposes, and on which pads.

use std::collections::HashMap;

use serde::Serialize;

use super::Pin;
use crate::error::{LibraryError, LibraryResult};
use crate::package::Package;

/// The assignment of a component's pins to the pads of one package.
///
/// Position `i` (0-based) of the pad list is pad number `i + 1`. A pin that does
/// not appear in the list does not exist on this package variant.
#[derive(Debug, Clone, Serialize)]
pub struct PackageMapping {
    component: String,
    package: Package,
    pads: Vec<Option<String>>,
    #[serde(skip)]
    pad_by_label: HashMap<String, u32>,
}

impl PackageMapping {
    /// Creates a mapping.
    ///
    /// When a label is listed on several pads, the lowest pad number is the one
    /// drawn on the symbol.
    #[must_use]
    pub fn new(component: impl Into<String>, package: Package, pads: Vec<Option<String>>) -> Self {
        let mut pad_by_label = HashMap::new();
        for (index, label) in pads.iter().enumerate() {
            if let Some(label) = label {
                #[allow(clippy::cast_possible_truncation)] // bounded by the package pad count
                let number = index as u32 + 1;
                pad_by_label.entry(label.clone()).or_insert(number);
            }
        }

        Self {
            component: component.into(),
            package,
            pads,
            pad_by_label,
        }
    }

    /// Returns the name of the component this mapping belongs to.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Returns the package.
    #[must_use]
    pub const fn package(&self) -> &Package {
        &self.package
    }

    /// Returns the package name (e.g. `DIP-14`).
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package.name
    }

    /// Returns the label per pad, pad 1 first.
    #[must_use]
    pub fn pads(&self) -> &[Option<String>] {
        &self.pads
    }

    /// Returns every label this mapping refers to, in pad order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.pads.iter().filter_map(Option::as_deref)
    }

    /// Returns true if the pin is bonded to a pad on this package.
    #[must_use]
    pub fn has_pin(&self, pin: &Pin) -> bool {
        self.pad_by_label.contains_key(pin.label())
    }

    /// Returns the pad number for a label, if the label is mapped.
    #[must_use]
    pub fn pad_of(&self, label: &str) -> Option<u32> {
        self.pad_by_label.get(label).copied()
    }

    /// Returns the pad number the pin is bonded to.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::UnknownPin`] if the pin is not on this package.
    pub fn pad_number_for_pin(&self, pin: &Pin) -> LibraryResult<u32> {
        self.pad_of(pin.label()).ok_or_else(|| {
            LibraryError::unknown_pin(&self.component, &self.package.name, pin.label())
        })
    }

    /// Returns the symbol caption for this variant, `Name(Package)`.
    #[must_use]
    pub fn caption(&self) -> String {
        format!("{}({})", self.component, self.package.name)
    }
}
