//! Component data model.
//!
//! A [`Component`] owns its [`Pin`]s, arranged in four [`PinCategory`]s of ordered
//! pin groups, and zero or more [`PackageMapping`]s that bond a subset of those pins
//! to the pads of a physical package.
//!
//! Everything here is immutable after construction. Definitions are validated once
//! when the component is built, so the layout and emit stages can rely on labels
//! being unique and every mapped label resolving to a declared pin.

mod component;
pub mod definition;
pub mod loader;
mod mapping;
mod pin;

pub use component::{Component, PinCategory, PinGroup, PinGroups};
pub use definition::ComponentDefinition;
pub use loader::{load_component, ComponentSource, Library};
pub use mapping::PackageMapping;
pub use pin::{ErcType, Pin, INVERT_MARKER};
