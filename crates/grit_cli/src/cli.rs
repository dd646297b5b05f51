use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use grit_renderer::IndexKind;
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "grit")]
#[command(about = "Render a scene file with a Whitted ray tracer")]
#[command(version)]
pub struct Args {
    /// Scene file to render
    pub scene: PathBuf,

    /// Output image (.png or .ppm); overrides the scene's `output` command
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Acceleration structure for ray queries: grid or linear
    #[arg(long)]
    pub index: Option<IndexKind>,

    /// Maximum number of mirror bounces
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Bucket edge length in pixels
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// Render threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// JSON file with render settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
