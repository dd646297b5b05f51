//! Intersection traits and hit records.
//!
//! Shapes are tested in their own local space through [`Intersect`]. A
//! [`Primitive`] moves the world ray into that space with its precomputed
//! inverse and reports the result as [`HitInfo`]. The scene index then turns
//! the nearest one into a world-space [`Fragment`].

use grit_core::{Material, Primitive, Shape};
use grit_math::{Aabb, Ray, Vec3};

/// Result of a local-space shape test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    /// Ray parameter, strictly positive
    pub t: f32,
    /// Local normal, not necessarily unit length
    pub normal: Vec3,
}

/// Ray intersection for a shape in its local coordinates.
pub trait Intersect {
    /// Nearest strictly positive hit along `ray`, if any.
    fn intersect(&self, ray: &Ray) -> Option<ShapeHit>;

    /// Bounds in local coordinates.
    fn local_bounds(&self) -> Aabb;
}

impl Intersect for Shape {
    fn intersect(&self, ray: &Ray) -> Option<ShapeHit> {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray),
            Shape::Triangle(triangle) => triangle.intersect(ray),
        }
    }

    fn local_bounds(&self) -> Aabb {
        match self {
            Shape::Sphere(sphere) => sphere.local_bounds(),
            Shape::Triangle(triangle) => triangle.local_bounds(),
        }
    }
}

/// A hit on one primitive, still carrying the local normal.
#[derive(Debug, Clone, Copy)]
pub struct HitInfo<'a> {
    pub t: f32,
    pub normal: Vec3,
    pub material: &'a Material,
}

/// Anything that can be hit by a world-space ray.
pub trait Hittable {
    fn hit(&self, ray: &Ray) -> Option<HitInfo<'_>>;

    /// World-space bounding box.
    fn bounding_box(&self) -> Aabb;
}

impl Hittable for Primitive {
    fn hit(&self, ray: &Ray) -> Option<HitInfo<'_>> {
        let local = self.transform.ray_to_local(ray);
        self.shape.intersect(&local).map(|hit| HitInfo {
            t: hit.t,
            normal: hit.normal,
            material: &self.material,
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.transform.bounds_to_world(&self.shape.local_bounds())
    }
}

/// World-space description of the nearest surface along a ray.
#[derive(Debug, Clone, Copy)]
pub struct Fragment<'a> {
    pub t: f32,
    pub position: Vec3,
    /// Unit length
    pub normal: Vec3,
    pub material: &'a Material,
    /// Index of the primitive in the scene index
    pub primitive: usize,
}

impl<'a> Fragment<'a> {
    pub fn new(ray: &Ray, hit: HitInfo<'a>, primitive: &Primitive, index: usize) -> Self {
        Self {
            t: hit.t,
            position: ray.at(hit.t),
            normal: primitive.transform.normal_to_world(hit.normal),
            material: hit.material,
            primitive: index,
        }
    }
}

/// Nearest hit among `candidates` that is strictly closer than `t_limit`.
///
/// On equal `t` the candidate seen first wins.
pub(crate) fn closest_hit<'a, I>(
    primitives: &'a [Primitive],
    candidates: I,
    ray: &Ray,
    t_limit: f32,
) -> Option<Fragment<'a>>
where
    I: IntoIterator<Item = usize>,
{
    let mut best_t = t_limit;
    let mut best = None;

    for index in candidates {
        if let Some(hit) = primitives[index].hit(ray) {
            if hit.t < best_t {
                best_t = hit.t;
                best = Some((index, hit));
            }
        }
    }

    best.map(|(index, hit)| Fragment::new(ray, hit, &primitives[index], index))
}
