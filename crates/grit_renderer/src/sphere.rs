//! Ray-sphere intersection.

use grit_core::Sphere;
use grit_math::{Aabb, Ray, Vec3};

use crate::hit::{Intersect, ShapeHit};

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<ShapeHit> {
        // |O + tD - S|^2 = r^2, divided through by D.D so that local rays
        // with scaled directions need no renormalization
        let dd = ray.direction.length_squared();
        if dd == 0.0 {
            return None;
        }

        let oc = ray.origin - self.center;
        let p = 2.0 * oc.dot(ray.direction) / dd;
        let q = (oc.length_squared() - self.radius * self.radius) / dd;
        let discriminant = p * p / 4.0 - q;

        let t = if discriminant < 0.0 {
            return None;
        } else if discriminant == 0.0 {
            -p / 2.0
        } else {
            let root = discriminant.sqrt();
            let near = -p / 2.0 - root;
            if near > 0.0 {
                near
            } else {
                -p / 2.0 + root
            }
        };

        if t > 0.0 {
            Some(ShapeHit {
                t,
                normal: ray.at(t) - self.center,
            })
        } else {
            None
        }
    }

    fn local_bounds(&self) -> Aabb {
        let extent = Vec3::splat(self.radius.abs());
        Aabb::from_points(self.center - extent, self.center + extent)
    }
}
