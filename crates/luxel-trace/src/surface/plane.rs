//! Ray-plane intersection (closed-form).

use luxel_math::Vector3;
use serde::{Deserialize, Serialize};

use super::Surface;
use crate::Ray;

/// An infinite plane `normal . p = d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    normal: Vector3,
    d: f64,
}

impl Plane {
    /// Plane from the equation `ax + by + cz = d`, with `coefficients = (a, b, c)`.
    ///
    /// The coefficients are the normal.
    pub fn from_coefficients(coefficients: Vector3, d: f64) -> Self {
        Self {
            normal: coefficients,
            d,
        }
    }

    /// Plane through `origin` with the given normal.
    pub fn from_origin_normal(origin: Vector3, normal: Vector3) -> Self {
        Self {
            normal,
            d: normal.dot(&origin),
        }
    }

    /// The plane normal, as supplied.
    pub fn normal_vector(&self) -> Vector3 {
        self.normal
    }

    /// The constant term `d`.
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Ray parameter of the intersection.
    ///
    /// `None` if the ray is parallel to the plane or the plane lies behind the
    /// ray origin.
    pub fn parameter(&self, ray: &Ray) -> Option<f64> {
        let denom = self.normal.dot(&ray.direction());

        // Ray is parallel to plane
        if denom == 0.0 {
            return None;
        }

        let t = (self.d - self.normal.dot(&ray.origin())) / denom;

        // Intersection is behind ray origin
        if t < 0.0 {
            return None;
        }

        Some(t)
    }
}

impl Surface for Plane {
    fn intersection(&self, ray: &Ray) -> Option<Vector3> {
        self.parameter(ray).map(|t| ray.at(t))
    }

    fn normal(&self, _point: Vector3) -> Vector3 {
        self.normal
    }
}
