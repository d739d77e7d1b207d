//! Light sources and the shadow-ray visibility protocol.
//!
//! Lights only answer queries about secondary rays: any other ray kind is
//! reported as not lit and yields no origin.

mod directional;
mod punctual;

pub use directional::Directional;
pub use punctual::Punctual;

use luxel_math::Vector3;
use serde::{Deserialize, Serialize};

use crate::Ray;

/// Visibility and origin/direction queries for a surface point.
///
/// `ray` is the secondary ray cast from the surface point toward the light.
pub trait LightSource {
    /// Emitted intensity.
    fn intensity(&self) -> f64;

    /// True if the surface point at the ray origin receives light.
    fn is_lit(&self, ray: &Ray) -> bool;

    /// The point on the light the surface point is lit from.
    fn origin(&self, ray: &Ray) -> Option<Vector3>;

    /// Vector from the surface point at the ray origin to the light's anchor.
    fn direction(&self, ray: &Ray) -> Vector3;
}

/// The closed set of light variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    /// Point light.
    Punctual(Punctual),
    /// Area light spanning a segment.
    Directional(Directional),
}

impl LightSource for Light {
    fn intensity(&self) -> f64 {
        match self {
            Light::Punctual(light) => light.intensity(),
            Light::Directional(light) => light.intensity(),
        }
    }

    fn is_lit(&self, ray: &Ray) -> bool {
        match self {
            Light::Punctual(light) => light.is_lit(ray),
            Light::Directional(light) => light.is_lit(ray),
        }
    }

    fn origin(&self, ray: &Ray) -> Option<Vector3> {
        match self {
            Light::Punctual(light) => light.origin(ray),
            Light::Directional(light) => light.origin(ray),
        }
    }

    fn direction(&self, ray: &Ray) -> Vector3 {
        match self {
            Light::Punctual(light) => light.direction(ray),
            Light::Directional(light) => light.direction(ray),
        }
    }
}

impl From<Punctual> for Light {
    fn from(light: Punctual) -> Self {
        Light::Punctual(light)
    }
}

impl From<Directional> for Light {
    fn from(light: Directional) -> Self {
        Light::Directional(light)
    }
}
