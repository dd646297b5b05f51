//! Ray-triangle intersection by Cramer's rule.

use grit_core::Triangle;
use grit_math::{Aabb, Ray, Vec3};

use crate::hit::{Intersect, ShapeHit};

/// Determinant of the 3x3 matrix with columns `c0`, `c1`, `c2`.
#[inline]
fn determinant(c0: Vec3, c1: Vec3, c2: Vec3) -> f32 {
    c0.x * (c1.y * c2.z - c2.y * c1.z) - c1.x * (c0.y * c2.z - c2.y * c0.z)
        + c2.x * (c0.y * c1.z - c1.y * c0.z)
}

impl Intersect for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<ShapeHit> {
        // A + u(B - A) + v(C - A) = O + tD, rearranged to
        // u(A - B) + v(A - C) + tD = A - O
        let c0 = self.a - self.b;
        let c1 = self.a - self.c;
        let rhs = self.a - ray.origin;

        // A degenerate triangle has det == 0; the non-finite coordinates
        // below then fail every comparison.
        let det = determinant(c0, c1, ray.direction);
        let u = determinant(rhs, c1, ray.direction) / det;
        let v = determinant(c0, rhs, ray.direction) / det;
        let t = determinant(c0, c1, rhs) / det;

        let inside = u >= 0.0 && v >= 0.0 && u + v <= 1.0;
        if !inside || !(t > 0.0 && t.is_finite()) {
            return None;
        }

        Some(ShapeHit {
            t,
            normal: (self.b - self.a).cross(self.c - self.a).normalize(),
        })
    }

    fn local_bounds(&self) -> Aabb {
        Aabb::enclosing([self.a, self.b, self.c])
    }
}
