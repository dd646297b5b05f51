use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box used by primitives and the uniform grid.
///
/// `Aabb::EMPTY` has `min = +inf` and `max = -inf`, so it is the identity for
/// [`Aabb::surrounding`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from two corner points in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create the AABB enclosing all given points.
    pub fn enclosing<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        points.into_iter().fold(Aabb::EMPTY, |acc, p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        })
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// Grow the box by `epsilon` on every side.
    pub fn padded(&self, epsilon: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(epsilon),
            max: self.max + Vec3::splat(epsilon),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Edge lengths along x, y and z.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns true if `p` lies strictly inside the box.
    pub fn surrounds(&self, p: Vec3) -> bool {
        p.cmpgt(self.min).all() && p.cmplt(self.max).all()
    }

    /// The 8 corners, bit `i` of the index choosing min or max on axis `i`.
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    /// Per-axis slab parameters of `ray`, sorted so that `near <= far` for
    /// every axis the ray actually crosses.
    ///
    /// A zero direction component never crosses its slab pair: the axis yields
    /// `(-inf, +inf)` when the origin lies between the planes and
    /// `(+inf, -inf)` otherwise, so no `0 * inf` NaN can appear.
    pub fn slabs(&self, ray: &Ray) -> (Vec3, Vec3) {
        let mut near = Vec3::ZERO;
        let mut far = Vec3::ZERO;
        for axis in 0..3 {
            let slab = axis_slab(
                self.min[axis],
                self.max[axis],
                ray.origin[axis],
                ray.direction[axis],
            );
            near[axis] = slab.min;
            far[axis] = slab.max;
        }
        (near, far)
    }

    /// Ray parameters where the ray enters and leaves the box (slab method).
    ///
    /// The result is empty (`min >= max`) when the ray's line misses the box.
    /// It is not clipped to positive `t`.
    pub fn hit_interval(&self, ray: &Ray) -> Interval {
        let (near, far) = self.slabs(ray);
        Interval::new(near.max_element(), far.min_element())
    }

    /// Static constants
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };
}

fn axis_slab(min: f32, max: f32, origin: f32, direction: f32) -> Interval {
    if direction == 0.0 {
        return if min <= origin && origin <= max {
            Interval::UNIVERSE
        } else {
            Interval::EMPTY
        };
    }

    let inv = 1.0 / direction;
    let t0 = (min - origin) * inv;
    let t1 = (max - origin) * inv;
    if inv < 0.0 {
        Interval::new(t1, t0)
    } else {
        Interval::new(t0, t1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> Aabb {
        Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_aabb_from_points_orders_corners() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 5.0), Vec3::new(0.0, 10.0, -5.0));

        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(aabb.max, Vec3::new(10.0, 10.0, 5.0));
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::splat(5.0));
        let box2 = Aabb::from_points(Vec3::splat(3.0), Vec3::splat(10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.min, Vec3::ZERO);
        assert_eq!(surrounding.max, Vec3::splat(10.0));
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &box1), box1);
    }

    #[test]
    fn test_aabb_empty() {
        assert!(Aabb::EMPTY.is_empty());
        assert!(!unit_cube().is_empty());
        assert!(Aabb::enclosing(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_aabb_padded() {
        let padded = unit_cube().padded(0.5);
        assert_eq!(padded.min, Vec3::splat(-1.5));
        assert_eq!(padded.max, Vec3::splat(1.5));
    }

    #[test]
    fn test_aabb_corners_cover_box() {
        let aabb = Aabb::from_points(Vec3::new(0.0, 1.0, 2.0), Vec3::new(3.0, 4.0, 5.0));
        let corners = aabb.corners();

        assert_eq!(corners[0], aabb.min);
        assert_eq!(corners[7], aabb.max);
        assert_eq!(Aabb::enclosing(corners), aabb);
    }

    #[test]
    fn test_hit_interval_through_center() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let hit = unit_cube().hit_interval(&ray);

        assert!((hit.min - 4.0).abs() < 1e-6);
        assert!((hit.max - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_hit_interval_misses() {
        // Pointing away: the interval lies behind the origin
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z);
        let hit = unit_cube().hit_interval(&ray);
        assert!(hit.max < 0.0);

        // Parallel to the z slabs but outside the x slab
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        assert!(unit_cube().hit_interval(&ray).is_empty());
    }

    #[test]
    fn test_zero_component_inside_slab_is_unbounded() {
        // Origin exactly on the x = 1 plane with zero x direction
        let ray = Ray::new(Vec3::new(1.0, 0.0, -5.0), Vec3::Z);
        let (near, far) = unit_cube().slabs(&ray);

        assert_eq!(near.x, f32::NEG_INFINITY);
        assert_eq!(far.x, f32::INFINITY);
        assert!(!near.is_nan() && !far.is_nan());
        assert!(!unit_cube().hit_interval(&ray).is_empty());
    }

    #[test]
    fn test_surrounds_is_strict() {
        let aabb = unit_cube();
        assert!(aabb.surrounds(Vec3::ZERO));
        assert!(!aabb.surrounds(Vec3::new(1.0, 0.0, 0.0)));
        assert!(!aabb.surrounds(Vec3::new(0.0, 2.0, 0.0)));
    }
}
