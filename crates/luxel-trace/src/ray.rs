//! Ray representation.

use luxel_math::Vector3;
use serde::{Deserialize, Serialize};

/// Whether a ray leaves the camera or a surface point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RayKind {
    /// Cast from the camera into the scene.
    Primary,
    /// Cast from a surface point toward a light, for shadow testing.
    Secondary,
}

/// An immutable ray: `r(t) = origin + t * direction`.
///
/// The direction is stored as given, not normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    origin: Vector3,
    direction: Vector3,
    kind: RayKind,
}

impl Ray {
    /// Create a ray of the given kind.
    pub fn new(origin: Vector3, direction: Vector3, kind: RayKind) -> Self {
        Self {
            origin,
            direction,
            kind,
        }
    }

    /// Create a camera ray.
    pub fn primary(origin: Vector3, direction: Vector3) -> Self {
        Self::new(origin, direction, RayKind::Primary)
    }

    /// Create a shadow ray.
    pub fn secondary(origin: Vector3, direction: Vector3) -> Self {
        Self::new(origin, direction, RayKind::Secondary)
    }

    /// Origin point.
    #[inline]
    pub fn origin(&self) -> Vector3 {
        self.origin
    }

    /// Direction vector.
    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Primary or secondary.
    #[inline]
    pub fn kind(&self) -> RayKind {
        self.kind
    }

    /// True for shadow rays.
    #[inline]
    pub fn is_secondary(&self) -> bool {
        self.kind == RayKind::Secondary
    }

    /// Evaluate the ray at parameter `t`.
    #[inline]
    pub fn at(&self, t: f64) -> Vector3 {
        self.origin + self.direction * t
    }
}
