use std::sync::atomic::AtomicBool;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{render, render_parallel, scene};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;
mod options;
mod output;

use cli::Args;
use options::{RenderOptions, SceneKind};

/// Initialize the logger; `RUST_LOG` can still refine per-module levels.
fn init_logger(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut options = match &args.config {
        Some(path) => RenderOptions::from_json_file(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => RenderOptions::default(),
    };
    args.apply(&mut options);
    options.validate().context("invalid render options")?;

    if options.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .build_global()
            .context("failed to configure the worker pool")?;
    }

    let start = Instant::now();
    let world = match options.scene {
        SceneKind::Cover => scene::cover_scene(&mut StdRng::seed_from_u64(options.seed)),
        SceneKind::Ground => scene::ground_scene(),
    };
    log::info!("Scene {:?} built in {:?} ({} objects)", options.scene, start.elapsed(), world.len());

    let config = options.render_config();
    let camera = scene::cover_camera(options.aspect_ratio());

    let image = if options.sequential {
        render(&camera, &world, &config)
    } else {
        let cancel = AtomicBool::new(false);
        render_parallel(&camera, &world, &config, &cancel).context("render was cancelled")?
    };

    output::save(&image, &options.output)
        .with_context(|| format!("saving {}", options.output.display()))?;

    Ok(())
}
