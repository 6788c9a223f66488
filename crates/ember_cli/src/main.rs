//! `ember` - render one of the built-in scenes to an image file.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use ember_core::{ImageCache, RenderSettings};
use ember_renderer::{render, Camera};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;
mod output;
mod scenes;

use cli::Args;

fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Scene defaults, then the settings file, then individual flags.
fn resolve_settings(args: &Args) -> Result<RenderSettings> {
    let mut settings = scenes::default_settings(args.scene);

    if let Some(path) = &args.settings {
        settings = settings
            .overlay_json_file(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
    }

    if let Some(width) = args.width {
        settings.image_width = width;
    }
    if let Some(samples) = args.samples {
        settings.samples_per_pixel = samples;
    }
    if let Some(depth) = args.depth {
        settings.max_depth = depth;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    settings.validate().context("invalid render settings")?;
    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let settings = resolve_settings(&args)?;

    let start = Instant::now();
    let mut images = ImageCache::new();
    let mut scene_rng = StdRng::seed_from_u64(settings.seed);
    let world = scenes::build_world(args.scene, &mut scene_rng, &mut images);
    info!(
        "Scene built in {:.2?} ({} images, {} KB)",
        start.elapsed(),
        images.len(),
        images.total_size_bytes() / 1024
    );

    let camera = Camera::new(settings)?;
    let image = render(&camera, &world);

    output::save_image(&image, &args.output)?;
    info!("Saved {}", args.output.display());

    Ok(())
}
