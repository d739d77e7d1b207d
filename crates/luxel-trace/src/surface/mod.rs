//! Renderable surfaces and the intersection protocol.
//!
//! Every surface answers three questions: where a ray first hits it, which
//! ray to cast from a hit point toward a light, and what its normal is at a
//! hit point. [`Shape`] closes the set of variants for match-based dispatch;
//! [`Object`] attaches the material and color payloads a renderer shades with.

mod plane;
mod sphere;
mod triangle;

pub use plane::Plane;
pub use sphere::Sphere;
pub use triangle::Triangle;

use luxel_math::Vector3;
use serde::{Deserialize, Serialize};

use crate::Ray;

/// Intersection, secondary ray and normal queries.
pub trait Surface {
    /// Nearest forward intersection point of `ray` with this surface, if any.
    fn intersection(&self, ray: &Ray) -> Option<Vector3>;

    /// Shadow ray from `point` toward `light_origin`.
    ///
    /// The direction is `light_origin - point`, not normalized.
    fn secondary_ray(&self, point: Vector3, light_origin: Vector3) -> Ray {
        Ray::secondary(point, light_origin - point)
    }

    /// Outward normal at `point`. Not necessarily unit length.
    fn normal(&self, point: Vector3) -> Vector3;
}

/// The closed set of surface variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Infinite plane.
    Plane(Plane),
    /// Sphere.
    Sphere(Sphere),
    /// Triangle.
    Triangle(Triangle),
}

impl Surface for Shape {
    fn intersection(&self, ray: &Ray) -> Option<Vector3> {
        match self {
            Shape::Plane(plane) => plane.intersection(ray),
            Shape::Sphere(sphere) => sphere.intersection(ray),
            Shape::Triangle(triangle) => triangle.intersection(ray),
        }
    }

    fn normal(&self, point: Vector3) -> Vector3 {
        match self {
            Shape::Plane(plane) => plane.normal(point),
            Shape::Sphere(sphere) => sphere.normal(point),
            Shape::Triangle(triangle) => triangle.normal(point),
        }
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

/// A shape with its material and color.
///
/// The payloads are opaque here: they are stored and handed back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object<M, C> {
    shape: Shape,
    material: M,
    color: C,
}

impl<M, C> Object<M, C> {
    /// Create an object from a shape and its payloads.
    pub fn new(shape: Shape, material: M, color: C) -> Self {
        Self {
            shape,
            material,
            color,
        }
    }

    /// The underlying geometry.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The material payload.
    pub fn material(&self) -> &M {
        &self.material
    }

    /// The color payload.
    pub fn color(&self) -> &C {
        &self.color
    }

    /// Replace the color payload.
    pub fn set_color(&mut self, color: C) {
        self.color = color;
    }
}

impl<M, C> Surface for Object<M, C> {
    fn intersection(&self, ray: &Ray) -> Option<Vector3> {
        self.shape.intersection(ray)
    }

    fn secondary_ray(&self, point: Vector3, light_origin: Vector3) -> Ray {
        self.shape.secondary_ray(point, light_origin)
    }

    fn normal(&self, point: Vector3) -> Vector3 {
        self.shape.normal(point)
    }
}

/// The nearest intersection found by [`closest_hit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the surface that was hit.
    pub index: usize,
    /// Intersection point.
    pub point: Vector3,
    /// Surface normal at the intersection.
    pub normal: Vector3,
    /// Distance from the ray origin to the intersection.
    pub distance: f64,
}

/// Find the surface whose intersection lies nearest to the ray origin.
///
/// Linear scan; ties keep the earliest surface.
pub fn closest_hit<S: Surface>(surfaces: &[S], ray: &Ray) -> Option<Hit> {
    let mut closest: Option<Hit> = None;

    for (index, surface) in surfaces.iter().enumerate() {
        let Some(point) = surface.intersection(ray) else {
            continue;
        };
        let distance = (point - ray.origin()).norm();
        if closest.map_or(true, |hit| distance < hit.distance) {
            closest = Some(Hit {
                index,
                point,
                normal: surface.normal(point),
                distance,
            });
        }
    }

    closest
}
