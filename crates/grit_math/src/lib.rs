// Re-export glam for convenience
pub use glam::*;

// GRIT math types
mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::{AffineTransform, Mat4Ext};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_indexing_matches_fields() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v[0], v.x);
        assert_eq!(v[1], v.y);
        assert_eq!(v[2], v.z);
    }

    #[test]
    fn test_vec3_componentwise_product() {
        let a = Vec3::new(1.0, 0.5, 0.0);
        let b = Vec3::new(0.5, 0.5, 1.0);
        assert_eq!(a * b, Vec3::new(0.5, 0.25, 0.0));
    }
}
