//! Render settings resolution: config file, command-line flags and scene
//! commands, in that order of increasing fallback.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grit_renderer::RenderConfig;

use crate::cli::Args;

/// Output file when neither the flag nor the scene names one.
pub const DEFAULT_OUTPUT: &str = "raytrace.png";

/// Read a JSON render config; missing fields keep their defaults.
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("Invalid config {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<RenderConfig> {
    Ok(serde_json::from_str(text)?)
}

/// Config file (if any) with command-line flags applied on top.
pub fn resolve_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };

    if let Some(depth) = args.max_depth {
        config = config.with_max_depth(depth);
    }
    if let Some(index) = args.index {
        config = config.with_index(index);
    }
    if let Some(size) = args.bucket_size {
        config = config.with_bucket_size(size);
    }
    Ok(config)
}

/// The flag wins over the scene's `output` command.
pub fn output_path(flag: Option<&Path>, scene: Option<&Path>) -> PathBuf {
    flag.or(scene)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
}
