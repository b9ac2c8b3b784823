//! Physical lengths.
//!
//! Package dimensions come from two unit systems: through-hole families are
//! specified in mils, surface-mount families in millimetres. Everything is stored
//! in millimetres so the footprint writer never has to care.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Millimetres per mil (thousandth of an inch).
pub const MM_PER_MIL: f64 = 0.0254;

/// A physical length, stored in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Length(f64);

impl Length {
    /// Zero length.
    pub const ZERO: Self = Self(0.0);

    /// Creates a length from millimetres.
    #[must_use]
    pub const fn from_mm(mm: f64) -> Self {
        Self(mm)
    }

    /// Creates a length from mils.
    #[must_use]
    pub fn from_mil(mil: f64) -> Self {
        Self(mil * MM_PER_MIL)
    }

    /// Returns the length in millimetres.
    #[must_use]
    pub const fn mm(self) -> f64 {
        self.0
    }

    /// Returns the length in mils.
    #[must_use]
    pub fn mil(self) -> f64 {
        self.0 / MM_PER_MIL
    }
}

impl Add for Length {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Length {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f64> for Length {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self(self.0 / rhs)
    }
}

/// Formats as a millimetre value with at most four decimals and no trailing zeros.
impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 10_000.0).round() / 10_000.0;
        // Avoid printing "-0"
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        let text = format!("{rounded:.4}");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        f.write_str(text)
    }
}
