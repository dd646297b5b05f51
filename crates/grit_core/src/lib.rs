//! GRIT Core - Scene description for the grid ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Primitive`, `Shape`, `Material`, `Light`, `CameraDesc`
//! - **Scene files**: parsing of the line-oriented `.test` scene language,
//!   including the transform stack that produces per-primitive world matrices
//!
//! # Example
//!
//! ```ignore
//! use grit_core::load_scene;
//!
//! let scene = load_scene("scenes/cornell.test")?;
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitives.len(),
//!     scene.lights.len());
//! ```

pub mod scene;
pub mod scene_file;

// Re-export commonly used types
pub use scene::{
    CameraDesc, Light, LightKind, Material, Primitive, Scene, Shape, Sphere, Triangle,
    DEFAULT_EPSILON_BIAS,
};
pub use scene_file::{load_scene, parse_scene, LoadError, ParseError};
