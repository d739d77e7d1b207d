//! Ray-triangle intersection via the supporting plane and an equal-areas test.

use luxel_math::{approx_eq, Tolerance, Vector3};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Plane, Surface};
use crate::Ray;

/// A triangle with ordered vertices and a cached normal.
///
/// Deserializes from `{ "a", "b", "c" }` with optional `"normal"` and
/// `"area_tolerance"`; the normal is computed from the vertices when absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TriangleVertices", into = "TriangleVertices")]
pub struct Triangle {
    a: Vector3,
    b: Vector3,
    c: Vector3,
    normal: Vector3,
    area_tolerance: f64,
}

impl Triangle {
    /// Create a triangle, computing its normal as `-((C - A) x (B - A))`.
    ///
    /// Edge order and sign are fixed: shading depends on the orientation.
    pub fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        let u = c - a;
        let v = b - a;
        let normal = -u.cross(&v);

        if normal.norm() == 0.0 {
            warn!(?a, ?b, ?c, "degenerate triangle: vertices are collinear");
        }

        Self::with_normal(a, b, c, normal)
    }

    /// Create a triangle with an explicit normal.
    pub fn with_normal(a: Vector3, b: Vector3, c: Vector3, normal: Vector3) -> Self {
        Self {
            a,
            b,
            c,
            normal,
            area_tolerance: Tolerance::DEFAULT.area,
        }
    }

    /// Accept area sums off by up to `tolerance` in [`contains`](Self::contains).
    pub fn with_area_tolerance(mut self, tolerance: f64) -> Self {
        self.area_tolerance = tolerance;
        self
    }

    /// Slack of the equal-areas containment test.
    pub fn area_tolerance(&self) -> f64 {
        self.area_tolerance
    }

    /// The three vertices, in construction order.
    pub fn vertices(&self) -> [Vector3; 3] {
        [self.a, self.b, self.c]
    }

    /// The supporting plane through vertex `a`.
    pub fn plane(&self) -> Plane {
        Plane::from_origin_normal(self.a, self.normal)
    }

    /// Equal-areas containment test for a point on the supporting plane.
    ///
    /// The point is inside iff the three sub-triangles it forms with each pair
    /// of vertices add up to the full area, within [`area_tolerance`](Self::area_tolerance).
    pub fn contains(&self, point: Vector3) -> bool {
        let total = Self::area(self.a, self.b, self.c);
        let area_a = Self::area(self.a, self.b, point);
        let area_b = Self::area(self.b, self.c, point);
        let area_c = Self::area(self.a, self.c, point);

        approx_eq(area_a + area_b + area_c, total, self.area_tolerance)
    }

    /// Area of the triangle `abc` by Heron's formula.
    ///
    /// A radicand pushed below zero by rounding is clamped to zero.
    pub fn area(a: Vector3, b: Vector3, c: Vector3) -> f64 {
        let ab = (a - b).norm();
        let bc = (b - c).norm();
        let ac = (a - c).norm();

        let p = (ab + bc + ac) / 2.0;
        (p * (p - ab) * (p - bc) * (p - ac)).max(0.0).sqrt()
    }
}

impl Surface for Triangle {
    fn intersection(&self, ray: &Ray) -> Option<Vector3> {
        let point = self.plane().intersection(ray)?;
        self.contains(point).then_some(point)
    }

    fn normal(&self, _point: Vector3) -> Vector3 {
        self.normal
    }
}

/// Serialized form of a [`Triangle`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct TriangleVertices {
    a: Vector3,
    b: Vector3,
    c: Vector3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    normal: Option<Vector3>,
    #[serde(default = "default_area_tolerance")]
    area_tolerance: f64,
}

fn default_area_tolerance() -> f64 {
    Tolerance::DEFAULT.area
}

impl From<TriangleVertices> for Triangle {
    fn from(t: TriangleVertices) -> Self {
        let triangle = match t.normal {
            Some(normal) => Triangle::with_normal(t.a, t.b, t.c, normal),
            None => Triangle::new(t.a, t.b, t.c),
        };
        triangle.with_area_tolerance(t.area_tolerance)
    }
}

impl From<Triangle> for TriangleVertices {
    fn from(t: Triangle) -> Self {
        TriangleVertices {
            a: t.a,
            b: t.b,
            c: t.c,
            normal: Some(t.normal),
            area_tolerance: t.area_tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Triangle {
        Triangle::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_normal_orientation() {
        assert_eq!(unit().normal(Vector3::zero()), Vector3::new(0.0, 0.0, 1.0));

        // Swapping two vertices flips the normal.
        let flipped = Triangle::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        );
        assert_eq!(flipped.normal(Vector3::zero()), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_explicit_normal_is_kept() {
        let [a, b, c] = unit().vertices();
        let t = Triangle::with_normal(a, b, c, Vector3::new(0.0, 0.0, -3.0));
        assert_eq!(t.normal(Vector3::zero()), Vector3::new(0.0, 0.0, -3.0));
    }

    #[test]
    fn test_contains() {
        assert!(unit().contains(Vector3::new(0.25, 0.25, 0.0)));
        assert!(!unit().contains(Vector3::new(2.0, 2.0, 0.0)));
        assert!(!unit().contains(Vector3::new(0.6, 0.6, 0.0)));
    }

    #[test]
    fn test_contains_vertex_and_edge() {
        assert!(unit().contains(Vector3::new(0.0, 0.0, 0.0)));
        assert!(unit().contains(Vector3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn test_area_tolerance_widens_containment() {
        // Just past the hypotenuse: the sub-areas overshoot by 2e-6.
        let point = Vector3::new(0.5 + 1e-6, 0.5 + 1e-6, 0.0);
        assert_eq!(unit().area_tolerance(), 1e-11);
        assert!(!unit().contains(point));
        assert!(unit().with_area_tolerance(1e-4).contains(point));
    }

    #[test]
    fn test_area() {
        let area = Triangle::area(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(4.0, 0.0, 0.0),
            Vector3::new(0.0, 3.0, 0.0),
        );
        assert!((area - 6.0).abs() < 1e-12);
        let flat = Triangle::area(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(2.0, 2.0, 2.0),
        );
        assert!(flat.abs() < 1e-7);
        assert!(!flat.is_nan());
    }

    #[test]
    fn test_ray_triangle_hit() {
        let ray = Ray::primary(Vector3::new(0.25, 0.25, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(unit().intersection(&ray), Some(Vector3::new(0.25, 0.25, 0.0)));
    }

    #[test]
    fn test_ray_triangle_from_behind() {
        let ray = Ray::primary(Vector3::new(0.25, 0.25, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(unit().intersection(&ray), Some(Vector3::new(0.25, 0.25, 0.0)));
    }

    #[test]
    fn test_ray_triangle_outside() {
        let ray = Ray::primary(Vector3::new(2.0, 2.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(unit().intersection(&ray).is_none());
    }

    #[test]
    fn test_ray_triangle_parallel() {
        let ray = Ray::primary(Vector3::new(0.25, 0.25, 1.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(unit().intersection(&ray).is_none());
    }

    #[test]
    fn test_tilted_triangle() {
        let t = Triangle::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 2.0),
            Vector3::new(2.0, 2.0, 0.0),
        );
        // Hits the supporting plane x = y at (3, 3, 0.5), outside the triangle.
        let ray = Ray::primary(Vector3::new(5.0, 3.0, 0.5), Vector3::new(-1.0, 0.0, 0.0));
        assert!(t.plane().intersection(&ray).is_some());
        assert!(t.intersection(&ray).is_none());
        let ray = Ray::primary(Vector3::new(5.0, 0.5, 0.5), Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(t.intersection(&ray), Some(Vector3::new(0.5, 0.5, 0.5)));
    }

    #[test]
    fn test_serde_computes_missing_normal() {
        let t: Triangle = serde_json::from_str(r#"{ "a": [0, 0, 0], "b": [1, 0, 0], "c": [0, 1, 0] }"#).unwrap();
        assert_eq!(t, unit());
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"normal\""));
        let back: Triangle = serde_json::from_str(&json).unwrap();
        assert_eq!(back.normal(Vector3::zero()), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_serde_area_tolerance() {
        let t: Triangle = serde_json::from_str(
            r#"{ "a": [0, 0, 0], "b": [1, 0, 0], "c": [0, 1, 0], "area_tolerance": 1e-4 }"#,
        )
        .unwrap();
        assert_eq!(t.area_tolerance(), 1e-4);
        assert!(t.contains(Vector3::new(0.5 + 1e-6, 0.5 + 1e-6, 0.0)));
    }
}
