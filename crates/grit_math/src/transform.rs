// Transform utilities for Mat4
//
// glam::Mat4 already provides transform_point3() (w=1), transform_vector3()
// (w=0) and inverse(). Everything here assumes affine matrices.

use crate::{Aabb, Ray};
use glam::{Mat4, Vec3};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Matrix that maps surface normals: the transpose of the inverse.
    fn inverse_transpose(&self) -> Mat4;

    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn inverse_transpose(&self) -> Mat4 {
        self.inverse().transpose()
    }

    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        Aabb::enclosing(
            aabb.corners()
                .into_iter()
                .map(|corner| self.transform_point3(corner)),
        )
    }
}

/// A world transform together with the matrices derived from it.
///
/// The inverse and the inverse-transpose are computed once here so that the
/// per-ray work is three matrix-vector products.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    /// Local-to-world
    pub matrix: Mat4,
    /// World-to-local
    pub inverse: Mat4,
    /// Inverse-transpose, for normals
    pub normal_matrix: Mat4,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        matrix: Mat4::IDENTITY,
        inverse: Mat4::IDENTITY,
        normal_matrix: Mat4::IDENTITY,
    };

    pub fn new(matrix: Mat4) -> Self {
        let inverse = matrix.inverse();
        Self {
            matrix,
            inverse,
            normal_matrix: inverse.transpose(),
        }
    }

    /// False for singular matrices (e.g. a zero scale), whose inverse is not finite.
    pub fn is_invertible(&self) -> bool {
        self.matrix.determinant() != 0.0 && self.inverse.is_finite()
    }

    /// Move a world ray into local space.
    ///
    /// The direction is deliberately left unnormalized: a hit at parameter `t`
    /// on the local ray is the same point as `t` on the world ray.
    pub fn ray_to_local(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.point_to_local(ray.origin),
            self.direction_to_local(ray.direction),
        )
    }

    /// w = 1: translation applies.
    pub fn point_to_local(&self, point: Vec3) -> Vec3 {
        self.inverse.transform_point3(point)
    }

    /// w = 0: translation is ignored and the length is not preserved.
    pub fn direction_to_local(&self, direction: Vec3) -> Vec3 {
        self.inverse.transform_vector3(direction)
    }

    /// Map a local normal to a unit world normal.
    pub fn normal_to_world(&self, normal: Vec3) -> Vec3 {
        self.normal_matrix.transform_vector3(normal).normalize()
    }

    pub fn point_to_world(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }

    /// World bounds of a local box.
    pub fn bounds_to_world(&self, local: &Aabb) -> Aabb {
        self.matrix.transform_aabb(local)
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat4> for AffineTransform {
    fn from(matrix: Mat4) -> Self {
        Self::new(matrix)
    }
}
