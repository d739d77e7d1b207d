#![warn(missing_docs)]

//! Linear algebra for the luxel ray tracer.
//!
//! A small, shape-checked matrix engine and the 3D vector type built on it:
//!
//! - [`Matrix`] - dynamically sized row-major matrix with checked algebra
//!   (products, transpose, 3x3 inversion, determinants, rotations, reflection)
//! - [`Vector3`] - 1x3 value type used for points, directions and normals
//! - [`Tolerance`] - comparison tolerances shared by the geometry code
//! - [`MatrixError`] - precondition violations raised by matrix operations
//!
//! Shape errors are programming errors: they are reported as [`MatrixError`]
//! and are expected to abort the current render operation.

mod error;
mod float;
mod matrix;
mod vector;

pub use error::{MatrixError, Result};
pub use float::{approx_eq, are_equal, Tolerance, EPSILON};
pub use matrix::Matrix;
pub use vector::{is_vector3, Vector3};
