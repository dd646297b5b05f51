//! Scene file support for GRIT.
//!
//! Scenes are described in a line-oriented text format: one command per line,
//! whitespace-separated numeric arguments, `#` comments.
//!
//! ## Supported Commands
//!
//! - Setup: `size`, `camera`, `output`, `maxdepth`, `maxverts`, `maxvertnorms`
//! - Geometry: `vertex`, `tri`, `sphere`
//! - Materials: `ambient`, `diffuse`, `specular`, `emission`, `shininess`
//! - Lights: `point`, `directional`, `attenuation`
//! - Transforms: `pushTransform`, `popTransform`, `translate`, `rotate`, `scale`
//!
//! Material and transform commands set state that applies to every primitive
//! declared after them.
//!
//! # Example
//!
//! ```ignore
//! use grit_core::scene_file::parse_scene;
//!
//! let scene = parse_scene("size 64 48\ncamera 0 0 5 0 0 0 0 1 0 45\nsphere 0 0 0 1\n", "demo")?;
//! assert_eq!(scene.primitives.len(), 1);
//! ```

mod loader;
mod parser;

pub use loader::*;
pub use parser::*;
