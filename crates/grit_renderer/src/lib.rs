//! GRIT Renderer - Whitted ray tracing on the CPU.
//!
//! Takes a parsed [`grit_core::Scene`] and turns it into pixels:
//!
//! - **Intersection**: local-space sphere and triangle tests behind affine
//!   transforms
//! - **Scene index**: brute-force scan or a uniform grid walked with a 3D DDA
//! - **Shading**: ambient, emission, Lambert and Blinn-Phong with hard shadows
//!   and recursive mirror reflection
//! - **Rendering**: center-out buckets traced in parallel with rayon
//!
//! # Example
//!
//! ```ignore
//! use grit_renderer::{render, CancelToken, IndexKind, RenderConfig, RenderScene};
//!
//! let config = RenderConfig::default().with_index(IndexKind::Grid);
//! let scene = grit_core::load_scene("scenes/spheres.test")?;
//! let scene = RenderScene::new(scene, &config);
//! let image = render(&scene, &config, &CancelToken::new())?;
//! image.save("spheres.png")?;
//! ```

mod bucket;
mod camera;
mod grid;
mod hit;
mod index;
mod renderer;
mod sphere;
mod tracer;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use grid::{UniformGrid, GRID_PADDING, GRID_RESOLUTION};
pub use hit::{Fragment, HitInfo, Hittable, Intersect, ShapeHit};
pub use index::{build_index, IndexKind, LinearScan, SceneIndex};
pub use renderer::{
    render, render_pixel, CancelToken, ImageBuffer, RenderConfig, RenderError, RenderResult,
    RenderScene,
};
pub use tracer::{clamp_color, reflect, shade_light, Color, Tracer, DEFAULT_MAX_DEPTH};

/// Re-export common math types from grit_math
pub use grit_math::{Aabb, Ray, Vec3};
