//! Ray-sphere intersection (quadratic equation).

use luxel_math::Vector3;
use serde::{Deserialize, Serialize};

use super::Surface;
use crate::Ray;

/// A sphere defined by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    center: Vector3,
    radius: f64,
}

impl Sphere {
    /// Create a sphere. Negative radii are clamped to 0.
    pub fn new(center: Vector3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Center point.
    pub fn center(&self) -> Vector3 {
        self.center
    }

    /// Radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Ray parameter of the nearest forward intersection.
    ///
    /// Substitutes `origin + t * direction` into `|p - center|^2 = r^2` and
    /// keeps the smaller non-negative root.
    pub fn parameter(&self, ray: &Ray) -> Option<f64> {
        let oc = ray.origin() - self.center;
        let d = ray.direction();

        let a = d.dot(&d);
        let b = 2.0 * oc.dot(&d);
        let c = oc.dot(&oc) - self.radius * self.radius;

        if a == 0.0 {
            return None;
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = (-b - sqrt_disc) / (2.0 * a);
        let t2 = (-b + sqrt_disc) / (2.0 * a);

        [t1, t2].into_iter().find(|&t| t >= 0.0)
    }
}

impl Surface for Sphere {
    fn intersection(&self, ray: &Ray) -> Option<Vector3> {
        self.parameter(ray).map(|t| ray.at(t))
    }

    /// `point - center`, not normalized.
    fn normal(&self, point: Vector3) -> Vector3 {
        point - self.center
    }
}
