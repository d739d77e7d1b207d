//! Floating-point comparison helpers and tolerance constants.

use serde::{Deserialize, Serialize};

/// Relative tolerance used by [`are_equal`].
pub const EPSILON: f64 = 1e-9;

/// Check if two doubles are equal up to rounding error.
///
/// The tolerance scales with the magnitude of the operands, and never drops
/// below [`EPSILON`] in absolute terms.
pub fn are_equal(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = 1.0_f64.max(a.abs()).max(b.abs());
    (a - b).abs() <= EPSILON * scale
}

/// Check if two doubles differ by at most `precision`.
pub fn approx_eq(a: f64, b: f64, precision: f64) -> bool {
    (a - b).abs() <= precision
}

/// Default absolute tolerances for the geometry tests.
///
/// Component equality on [`Matrix`](crate::Matrix) and [`Vector3`](crate::Vector3)
/// is not configured here: it always goes through [`are_equal`]. These values
/// seed the per-surface and per-light tolerances, which can be overridden
/// individually. Deserializes with missing fields falling back to
/// [`Tolerance::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Slack for the triangle equal-areas containment test.
    pub area: f64,
    /// Slack for the directional light depth check. Zero means exact equality.
    pub depth: f64,
}

impl Tolerance {
    /// Default tolerances (1e-11 area, exact depth).
    pub const DEFAULT: Self = Self {
        area: 1e-11,
        depth: 0.0,
    };
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
