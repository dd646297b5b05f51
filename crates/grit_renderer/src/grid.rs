//! Uniform grid acceleration structure.
//!
//! The padded bounding box of the scene is split into a fixed lattice of
//! cells. Every cell lists the primitives whose world bounds overlap it, and
//! rays walk the lattice cell by cell (3D DDA) so that only nearby primitives
//! are ever tested.

use grit_core::Primitive;
use grit_math::{Aabb, IVec3, Ray, Vec3};

use crate::hit::{closest_hit, Fragment, Hittable};

/// Cells per axis.
pub const GRID_RESOLUTION: usize = 15;

/// Margin added around the scene bounds so that no primitive touches the
/// outer planes of the lattice.
pub const GRID_PADDING: f32 = 0.001;

/// Grids that the ray leaves before this parameter are ignored.
const EXIT_EPSILON: f32 = 1e-4;

/// A uniform grid owning the primitives it indexes.
#[derive(Debug, Clone)]
pub struct UniformGrid {
    primitives: Vec<Primitive>,
    bounds: Aabb,
    resolution: usize,
    /// Primitive indices per cell, x fastest
    cells: Vec<Vec<u32>>,
}

impl UniformGrid {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self::with_resolution(primitives, GRID_RESOLUTION)
    }

    /// Build a grid with `resolution` cells along every axis.
    pub fn with_resolution(primitives: Vec<Primitive>, resolution: usize) -> Self {
        let resolution = resolution.max(1);
        let world_bounds: Vec<Aabb> = primitives.iter().map(Hittable::bounding_box).collect();

        if primitives.is_empty() {
            return Self {
                primitives,
                bounds: Aabb::EMPTY,
                resolution,
                cells: Vec::new(),
            };
        }

        let bounds = world_bounds
            .iter()
            .fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, b))
            .padded(GRID_PADDING);

        let mut grid = Self {
            primitives: Vec::new(),
            bounds,
            resolution,
            cells: vec![Vec::new(); resolution * resolution * resolution],
        };

        for (index, primitive_bounds) in world_bounds.iter().enumerate() {
            let lo = grid.cell_coords(primitive_bounds.min);
            let hi = grid.cell_coords(primitive_bounds.max);
            for z in lo.z..=hi.z {
                for y in lo.y..=hi.y {
                    for x in lo.x..=hi.x {
                        let offset = grid.cell_offset(IVec3::new(x, y, z));
                        grid.cells[offset].push(index as u32);
                    }
                }
            }
        }

        grid.primitives = primitives;
        grid.log_statistics();
        grid
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Primitive indices registered in the cell at `coords`.
    pub fn cell(&self, coords: IVec3) -> &[u32] {
        &self.cells[self.cell_offset(coords)]
    }

    /// Lattice coordinates of the cell containing `p`, clamped to the grid.
    pub fn cell_coords(&self, p: Vec3) -> IVec3 {
        let relative = (p - self.bounds.min) * self.resolution as f32 / self.bounds.size();
        let last = self.resolution as i32 - 1;
        relative
            .floor()
            .as_ivec3()
            .clamp(IVec3::ZERO, IVec3::splat(last))
    }

    fn cell_offset(&self, coords: IVec3) -> usize {
        let n = self.resolution;
        coords.x as usize + n * coords.y as usize + n * n * coords.z as usize
    }

    /// Nearest hit strictly before `t_limit`, walking the lattice from the
    /// ray origin (or its entry point) outwards.
    pub fn nearest_hit(&self, ray: &Ray, t_limit: f32) -> Option<Fragment<'_>> {
        if self.primitives.is_empty() {
            return None;
        }

        let span = self.bounds.hit_interval(ray);
        if span.is_empty() || span.max <= EXIT_EPSILON {
            return None;
        }

        let start = if self.bounds.surrounds(ray.origin) {
            ray.origin
        } else {
            ray.at(span.min)
        };
        let mut cell = self.cell_coords(start);

        let (near, far) = self.bounds.slabs(ray);
        let res = self.resolution as i32;
        let mut step = IVec3::ZERO;
        let mut stop = IVec3::splat(-1);
        let mut next = Vec3::INFINITY;
        let mut delta = Vec3::INFINITY;

        for axis in 0..3 {
            let d = ray.direction[axis];
            if d == 0.0 {
                continue;
            }
            // Time to cross one cell along this axis
            let dt = (far[axis] - near[axis]) / res as f32;
            delta[axis] = dt;
            if d > 0.0 {
                step[axis] = 1;
                stop[axis] = res;
                next[axis] = near[axis] + (cell[axis] + 1) as f32 * dt;
            } else {
                step[axis] = -1;
                stop[axis] = -1;
                next[axis] = near[axis] + (res - cell[axis]) as f32 * dt;
            }
        }

        loop {
            let t_axis = next.min_element();
            let candidates = self.cell(cell).iter().map(|&i| i as usize);
            if let Some(fragment) =
                closest_hit(&self.primitives, candidates, ray, t_axis.min(t_limit))
            {
                return Some(fragment);
            }
            if t_axis >= t_limit {
                return None;
            }

            let axis = if next.x <= next.y && next.x <= next.z {
                0
            } else if next.y <= next.z {
                1
            } else {
                2
            };

            cell[axis] += step[axis];
            if cell[axis] == stop[axis] {
                return None;
            }
            next[axis] += delta[axis];
        }
    }

    fn log_statistics(&self) {
        let occupied = self.cells.iter().filter(|c| !c.is_empty()).count();
        let references: usize = self.cells.iter().map(Vec::len).sum();
        let densest = self.cells.iter().map(Vec::len).max().unwrap_or(0);

        log::debug!(
            "Grid {}^3: {} of {} cells occupied, {} references, at most {} per cell",
            self.resolution,
            occupied,
            self.cells.len(),
            references,
            densest
        );
    }
}
