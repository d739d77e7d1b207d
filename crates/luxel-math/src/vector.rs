//! Three-component vectors for points, directions and normals.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, Result};
use crate::float::are_equal;
use crate::matrix::Matrix;

/// A (1,3) row vector with named `x`/`y`/`z` components.
///
/// The shape is fixed by construction, so the arithmetic operators are
/// infallible. Converting to and from [`Matrix`] goes through
/// [`From`]/[`TryFrom`]. Equality is tolerant, see [`are_equal`].
///
/// Serializes as `[x, y, z]`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vector3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Vector3 {
    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// X component (column 0).
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y component (column 1).
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z component (column 2).
    #[inline]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Overwrite the X component.
    pub fn set_x(&mut self, value: f64) {
        self.x = value;
    }

    /// Overwrite the Y component.
    pub fn set_y(&mut self, value: f64) {
        self.y = value;
    }

    /// Overwrite the Z component.
    pub fn set_z(&mut self, value: f64) {
        self.z = value;
    }

    /// Components as an array, in `x, y, z` order.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product `self x other`.
    #[inline]
    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero vector yields NaN components.
    pub fn normalized(&self) -> Vector3 {
        *self * (1.0 / self.norm())
    }

    /// Reflect this direction about `normal`: `I - 2 (I . N) N` on the normalized inputs.
    pub fn reflect(&self, normal: &Vector3) -> Vector3 {
        let incident = self.normalized();
        let normal = normal.normalized();
        incident - normal * (2.0 * incident.dot(&normal))
    }

    /// Component-wise rounding to the nearest integer.
    pub fn rounded(&self) -> Vector3 {
        Vector3::new(self.x.round(), self.y.round(), self.z.round())
    }
}

/// True if `matrix` has the (1,3) shape of a [`Vector3`].
pub fn is_vector3(matrix: &Matrix) -> bool {
    matrix.rows() == 1 && matrix.columns() == 3
}

impl PartialEq for Vector3 {
    fn eq(&self, other: &Self) -> bool {
        are_equal(self.x, other.x) && are_equal(self.y, other.y) && are_equal(self.z, other.z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        self * -1.0
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Vector3::new(x, y, z)
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl TryFrom<&Matrix> for Vector3 {
    type Error = MatrixError;

    /// Accepts (1,3) matrices as-is and (3,1) matrices transposed.
    fn try_from(m: &Matrix) -> Result<Self> {
        let get = |i: usize, j: usize| m.value(i, j);
        match (m.rows(), m.columns()) {
            (1, 3) => Ok(Vector3::new(get(0, 0)?, get(0, 1)?, get(0, 2)?)),
            (3, 1) => Ok(Vector3::new(get(0, 0)?, get(1, 0)?, get(2, 0)?)),
            _ => Err(MatrixError::NotVector3(
                "can't initialize a Vector3 with this size",
            )),
        }
    }
}

impl TryFrom<Matrix> for Vector3 {
    type Error = MatrixError;

    fn try_from(m: Matrix) -> Result<Self> {
        Vector3::try_from(&m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_components() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x(), 1.0);
        assert_eq!(v.y(), 2.0);
        assert_eq!(v.z(), 3.0);
        v.set_x(-1.0);
        v.set_y(-2.0);
        v.set_z(-3.0);
        assert_eq!(v, -Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_column_round_trip() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let column = Matrix::from(v).transposed().unwrap();
        assert_eq!(column.rows(), 3);
        assert_eq!(column.columns(), 1);
        let back = Vector3::try_from(&column).unwrap();
        assert_eq!(back, v);
        assert_eq!(back.to_array(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_wrong_shape() {
        for (rows, columns) in [(3, 3), (1, 2), (2, 3), (0, 0)] {
            let err = Vector3::try_from(Matrix::new(rows, columns)).unwrap_err();
            assert!(matches!(err, MatrixError::NotVector3(_)));
        }
    }

    #[test]
    fn test_is_vector3() {
        assert!(is_vector3(&Matrix::from(Vector3::zero())));
        assert!(!is_vector3(&Matrix::new(3, 1)));
    }

    #[test]
    fn test_operators_match_matrix() {
        let a = Vector3::new(1.0, -2.0, 0.5);
        let b = Vector3::new(4.0, 0.0, -1.5);
        let (ma, mb) = (Matrix::from(a), Matrix::from(b));
        assert_eq!(Matrix::from(a + b), ma.checked_add(&mb).unwrap());
        assert_eq!(Matrix::from(a - b), ma.checked_sub(&mb).unwrap());
        assert_eq!(Matrix::from(a * 3.0), ma.checked_scale(3.0).unwrap());
        assert_eq!(a.dot(&b), ma.dot(&mb).unwrap());
        assert_eq!(Matrix::from(a.cross(&b)), ma.cross(&mb).unwrap());
        assert_abs_diff_eq!(a.norm(), ma.norm().unwrap());
    }

    #[test]
    fn test_cross_right_handed() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_normalized_is_pure() {
        let v = Vector3::new(0.0, 3.0, 4.0);
        let n = v.normalized();
        assert_eq!(n, Vector3::new(0.0, 0.6, 0.8));
        assert_eq!(v, Vector3::new(0.0, 3.0, 4.0));
        assert_abs_diff_eq!(n.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reflect_matches_matrix() {
        let incident = Vector3::new(1.0, -1.0, 0.5);
        let normal = Vector3::new(0.0, 2.0, 0.0);
        let expected =
            Matrix::reflection(&Matrix::from(incident), &Matrix::from(normal)).unwrap();
        assert_eq!(Matrix::from(incident.reflect(&normal)), expected);
    }

    #[test]
    fn test_equality_tolerance() {
        assert_eq!(Vector3::new(0.1 + 0.2, 0.0, 0.0), Vector3::new(0.3, 0.0, 0.0));
        assert_ne!(Vector3::new(0.3, 0.0, 0.0), Vector3::new(0.3, 1e-6, 0.0));
        assert_ne!(Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0 + 1e-8, 0.0, 0.0));
    }

    #[test]
    fn test_equality_scales_with_magnitude() {
        let a = Vector3::new(1e6, 0.0, 0.0);
        let b = Vector3::new(1e6 + 1e-4, 0.0, 0.0);
        assert!(are_equal(a.x(), b.x()));
        assert_eq!(a, b);
        assert_eq!(Matrix::from(a), Matrix::from(b));
        assert_eq!(Vector3::new(0.49, 1.51, -0.2).rounded(), Vector3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_serde_array() {
        let v: Vector3 = serde_json::from_str("[1.5, -2.0, 0.0]").unwrap();
        assert_eq!(v, Vector3::new(1.5, -2.0, 0.0));
        assert_eq!(serde_json::to_string(&v).unwrap(), "[1.5,-2.0,0.0]");
    }
}
