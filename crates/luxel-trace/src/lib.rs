#![warn(missing_docs)]

//! Ray/surface intersection and light visibility for the luxel ray tracer.
//!
//! This crate answers the two questions a render loop asks of the geometry:
//! does this ray hit this surface (and where, with which normal), and is this
//! surface point lit by this light.
//!
//! # Architecture
//!
//! - [`Ray`] - origin, direction and [`RayKind`] (primary or secondary)
//! - [`surface`] - [`Plane`], [`Sphere`], [`Triangle`], the [`Shape`] sum type
//!   and the [`Object`] wrapper carrying material/color payloads
//! - [`light`] - [`Punctual`] and [`Directional`] lights behind the [`Light`] sum type
//! - [`closest_hit`] - linear nearest-hit search over a slice of objects
//!
//! # Example
//!
//! ```
//! use luxel_math::Vector3;
//! use luxel_trace::{Light, LightSource, Object, Punctual, Ray, Shape, Sphere, Surface};
//!
//! let sphere = Object::new(Shape::from(Sphere::new(Vector3::zero(), 1.0)), "matte", [255, 0, 0]);
//! let light_origin = Vector3::new(0.0, 10.0, 10.0);
//! let light = Light::from(Punctual::new(1.0, light_origin));
//!
//! let ray = Ray::primary(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
//! let point = sphere.intersection(&ray).unwrap();
//! assert_eq!(point, Vector3::new(0.0, 0.0, 1.0));
//!
//! let shadow = sphere.secondary_ray(point, light_origin);
//! assert!(light.is_lit(&shadow));
//! assert_eq!(light.origin(&shadow), Some(light_origin));
//! ```

mod ray;
pub mod light;
pub mod surface;

pub use light::{Directional, Light, LightSource, Punctual};
pub use ray::{Ray, RayKind};
pub use surface::{closest_hit, Hit, Object, Plane, Shape, Sphere, Surface, Triangle};
