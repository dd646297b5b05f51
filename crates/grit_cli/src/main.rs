use anyhow::{Context, Result};
use clap::Parser;
use log::info;

mod cli;
mod logger;
mod settings;

use cli::Args;
use grit_renderer::{render, CancelToken, RenderScene};
use logger::init_logger;
use settings::{output_path, resolve_config};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the render thread pool")?;
    }

    let config = resolve_config(args)?;

    let scene = grit_core::load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    let output = output_path(args.output.as_deref(), scene.output.as_deref());

    let scene = RenderScene::new(scene, &config);
    let image = render(&scene, &config, &CancelToken::new())?;

    image
        .save(&output)
        .with_context(|| format!("Failed to write image {}", output.display()))?;
    info!("Wrote {}", output.display());

    Ok(())
}
