//! Loading scene files from disk.

use std::path::Path;

use thiserror::Error;

use crate::scene::Scene;
use crate::scene_file::parser::{parse_scene, ParseError};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file and return a GRIT Scene named after the file stem.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let content = std::fs::read_to_string(path)?;
    let scene = parse_scene(&content, name)?;

    log::info!(
        "Loaded scene '{}': {} spheres, {} triangles, {} lights",
        scene.name,
        scene.sphere_count(),
        scene.triangle_count(),
        scene.lights.len()
    );

    Ok(scene)
}
