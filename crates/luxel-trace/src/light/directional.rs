//! Area light spanning a segment.

use luxel_math::{approx_eq, Tolerance, Vector3};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::LightSource;
use crate::Ray;

/// An area light emitting from the segment `[origin_a, origin_b]`.
///
/// `direction` is the emission anchor: a surface point is only lit when it
/// lies on the emitting side of it, axis by axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Directional {
    intensity: f64,
    origin_a: Vector3,
    origin_b: Vector3,
    direction: Vector3,
    #[serde(default = "default_depth_tolerance")]
    depth_tolerance: f64,
}

fn default_depth_tolerance() -> f64 {
    Tolerance::DEFAULT.depth
}

impl Directional {
    /// Create an area light with an exact depth check.
    pub fn new(intensity: f64, origin_a: Vector3, origin_b: Vector3, direction: Vector3) -> Self {
        Self {
            intensity,
            origin_a,
            origin_b,
            direction,
            depth_tolerance: default_depth_tolerance(),
        }
    }

    /// Accept depth mismatches up to `tolerance` in the 3D validation step.
    pub fn with_depth_tolerance(mut self, tolerance: f64) -> Self {
        self.depth_tolerance = tolerance;
        self
    }

    /// Tolerance of the 3D depth check. Zero means exact equality.
    pub fn depth_tolerance(&self) -> f64 {
        self.depth_tolerance
    }

    /// Resolve the point on the light that lights the ray origin.
    ///
    /// The secondary ray is walked backward: its reversed direction is
    /// intersected with the edge `origin_b - origin_a` in the XY plane, giving
    /// `x` along the edge and `m` along the ray. The hit must lie within the
    /// segment, agree in Z, and the surface point must sit on the emitting
    /// side of the light.
    fn resolve(&self, ray: &Ray) -> Option<Vector3> {
        if !ray.is_secondary() {
            return None;
        }

        let a = self.origin_a;
        let ab = self.origin_b - a;
        let origin = ray.origin();
        let reversed = -ray.direction();

        let den = ab.x() * reversed.y() - ab.y() * reversed.x();
        if den == 0.0 {
            trace!("edge and ray are parallel");
            return None;
        }

        let x = -((a.x() - origin.x()) * reversed.y() - (a.y() - origin.y()) * reversed.x()) / den;
        let m = -((origin.y() - a.y()) * ab.x() - (origin.x() - a.x()) * ab.y()) / den;

        if !(0.0..=1.0).contains(&x) {
            trace!(x, "hit outside the light segment");
            return None;
        }

        let edge_z = ab.z() * x + a.z();
        let ray_z = origin.z() + reversed.z() * m;
        if !approx_eq(edge_z, ray_z, self.depth_tolerance) {
            trace!(edge_z, ray_z, "depth check failed");
            return None;
        }

        if self.faces_away(origin) {
            trace!("surface point is behind the emission direction");
            return None;
        }

        Some(reversed * m + origin)
    }

    /// Per-axis sign test of `point - direction` against `direction`.
    ///
    /// Axes where `direction` is zero are skipped.
    fn faces_away(&self, point: Vector3) -> bool {
        let offset = (point - self.direction).to_array();
        self.direction
            .to_array()
            .into_iter()
            .zip(offset)
            .any(|(d, o)| d != 0.0 && o / d < 0.0)
    }
}

impl LightSource for Directional {
    fn intensity(&self) -> f64 {
        self.intensity
    }

    fn is_lit(&self, ray: &Ray) -> bool {
        self.resolve(ray).is_some()
    }

    fn origin(&self, ray: &Ray) -> Option<Vector3> {
        self.resolve(ray)
    }

    /// `direction - ray.origin()`.
    fn direction(&self, ray: &Ray) -> Vector3 {
        self.direction - ray.origin()
    }
}
