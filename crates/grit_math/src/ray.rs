use crate::Vec3;

/// A ray in 3D space: `origin + t * direction`.
///
/// The direction is not required to be unit length. Rays moved into a
/// primitive's local space keep the scaled direction so that the parameter `t`
/// means the same thing in both spaces.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Same origin, unit-length direction.
    pub fn normalized(&self) -> Self {
        Self {
            origin: self.origin,
            direction: self.direction.normalize(),
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_normalized_keeps_origin() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -4.0));
        let unit = ray.normalized();

        assert_eq!(unit.origin, ray.origin);
        assert!((unit.direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(unit.direction, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_scaled_direction_scales_parameter() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(ray.at(0.5), Vec3::Y);
    }
}
