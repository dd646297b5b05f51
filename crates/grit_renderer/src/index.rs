//! Nearest-hit queries over all primitives of a scene.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use grit_core::Primitive;
use grit_math::Ray;
use serde::Deserialize;

use crate::grid::UniformGrid;
use crate::hit::{closest_hit, Fragment};

/// Which acceleration structure to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Test every primitive for every ray
    Linear,
    /// Uniform grid traversal
    #[default]
    Grid,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Linear => write!(f, "linear"),
            IndexKind::Grid => write!(f, "grid"),
        }
    }
}

impl FromStr for IndexKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(IndexKind::Linear),
            "grid" => Ok(IndexKind::Grid),
            other => Err(format!("unknown index kind '{}'", other)),
        }
    }
}

/// Brute-force scan over every primitive.
#[derive(Debug, Clone)]
pub struct LinearScan {
    primitives: Vec<Primitive>,
}

impl LinearScan {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    pub fn nearest_hit(&self, ray: &Ray, t_limit: f32) -> Option<Fragment<'_>> {
        closest_hit(&self.primitives, 0..self.primitives.len(), ray, t_limit)
    }
}

/// A read-only scene index, shared by reference across render threads.
#[derive(Debug, Clone)]
pub enum SceneIndex {
    Linear(LinearScan),
    Grid(UniformGrid),
}

/// Build the requested index; the index takes ownership of the primitives.
pub fn build_index(primitives: Vec<Primitive>, kind: IndexKind) -> SceneIndex {
    let start = Instant::now();
    let count = primitives.len();

    let index = match kind {
        IndexKind::Linear => SceneIndex::Linear(LinearScan::new(primitives)),
        IndexKind::Grid => SceneIndex::Grid(UniformGrid::new(primitives)),
    };

    log::info!(
        "Built {} index over {} primitives in {:.2?}",
        kind,
        count,
        start.elapsed()
    );
    index
}

impl SceneIndex {
    /// Nearest fragment with `t` strictly below `t_limit`.
    /// Pass `f32::INFINITY` for an unbounded query.
    pub fn nearest_hit(&self, ray: &Ray, t_limit: f32) -> Option<Fragment<'_>> {
        match self {
            SceneIndex::Linear(scan) => scan.nearest_hit(ray, t_limit),
            SceneIndex::Grid(grid) => grid.nearest_hit(ray, t_limit),
        }
    }

    /// True if anything lies along `ray` before `t_limit`.
    pub fn occluded(&self, ray: &Ray, t_limit: f32) -> bool {
        self.nearest_hit(ray, t_limit).is_some()
    }

    pub fn kind(&self) -> IndexKind {
        match self {
            SceneIndex::Linear(_) => IndexKind::Linear,
            SceneIndex::Grid(_) => IndexKind::Grid,
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        match self {
            SceneIndex::Linear(scan) => &scan.primitives,
            SceneIndex::Grid(grid) => grid.primitives(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grit_core::{Material, Shape};
    use grit_math::Vec3;

    fn wall_and_sphere() -> Vec<Primitive> {
        vec![
            Primitive::untransformed(Shape::sphere(Vec3::new(0.0, 0.0, -5.0), 1.0), Material::default()),
            Primitive::untransformed(
                Shape::triangle(
                    Vec3::new(-2.0, -2.0, -2.0),
                    Vec3::new(2.0, -2.0, -2.0),
                    Vec3::new(0.0, 2.0, -2.0),
                ),
                Material::default(),
            ),
        ]
    }

    #[test]
    fn test_index_kind_parsing() {
        assert_eq!("grid".parse::<IndexKind>().unwrap(), IndexKind::Grid);
        assert_eq!("Linear".parse::<IndexKind>().unwrap(), IndexKind::Linear);
        assert!("octree".parse::<IndexKind>().is_err());
        assert_eq!(IndexKind::default(), IndexKind::Grid);
        assert_eq!(IndexKind::Linear.to_string(), "linear");
    }

    #[test]
    fn test_both_kinds_find_the_wall() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        for kind in [IndexKind::Linear, IndexKind::Grid] {
            let index = build_index(wall_and_sphere(), kind);
            assert_eq!(index.kind(), kind);
            assert_eq!(index.primitives().len(), 2);

            let hit = index.nearest_hit(&ray, f32::INFINITY).unwrap();
            assert_eq!(hit.primitive, 1, "{kind}");
            assert!((hit.t - 2.0).abs() < 1e-4, "{kind}");
        }
    }

    #[test]
    fn test_occluded_with_limit() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        for kind in [IndexKind::Linear, IndexKind::Grid] {
            let index = build_index(wall_and_sphere(), kind);
            assert!(index.occluded(&ray, 10.0));
            assert!(!index.occluded(&ray, 1.5));
        }
    }
}
