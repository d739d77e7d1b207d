//! Point light.

use luxel_math::Vector3;
use serde::{Deserialize, Serialize};

use super::LightSource;
use crate::Ray;

/// A light emitting from a single point.
///
/// Any surface point that can cast a shadow ray toward it is lit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Punctual {
    intensity: f64,
    origin: Vector3,
}

impl Punctual {
    /// Create a point light.
    pub fn new(intensity: f64, origin: Vector3) -> Self {
        Self { intensity, origin }
    }
}

impl LightSource for Punctual {
    fn intensity(&self) -> f64 {
        self.intensity
    }

    fn is_lit(&self, ray: &Ray) -> bool {
        ray.is_secondary()
    }

    fn origin(&self, ray: &Ray) -> Option<Vector3> {
        ray.is_secondary().then_some(self.origin)
    }

    /// `origin - ray.origin()`.
    fn direction(&self, ray: &Ray) -> Vector3 {
        self.origin - ray.origin()
    }
}
