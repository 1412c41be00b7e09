//! Glint - render a scene of spheres with a CPU ray tracer.

mod cli;
mod scenes;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{
    render, save_png, write_ppm, ImageBuffer, RenderConfig, Scene, SceneDescription,
};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::Args;

/// Initialize the logger with the specified level
fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn load_scene(args: &Args, seed: u64) -> Result<Scene> {
    match &args.scene_file {
        Some(path) => {
            log::info!("Loading scene from {}", path.display());
            let description = SceneDescription::load(path)
                .with_context(|| format!("Failed to read scene file {}", path.display()))?;
            description
                .build()
                .with_context(|| format!("Invalid scene in {}", path.display()))
        }
        None => {
            log::info!("Building {:?} scene", args.scene);
            let mut rng = StdRng::seed_from_u64(seed);
            args.scene
                .build(&mut rng)
                .context("Failed to build built-in scene")
        }
    }
}

fn write_output(image: &ImageBuffer, output: Option<&Path>) -> Result<()> {
    match output {
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_ppm(image, &mut writer).context("Failed to write image to stdout")?;
        }
        Some(path) if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")) => {
            save_png(image, path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
            log::info!("Saved {}", path.display());
        }
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_ppm(image, &mut writer)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Saved {}", path.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.level_filter());

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Using seed {}", seed);

    let mut scene = load_scene(&args, seed)?;

    let height = args
        .height
        .unwrap_or_else(|| ((args.width as f32 / scene.camera.aspect_ratio()) as u32).max(1));
    let config = RenderConfig {
        image_width: args.width,
        image_height: height,
        samples_per_pixel: args.samples,
        max_depth: args.max_depth,
    };
    config.validate().context("Invalid render settings")?;

    // The viewport follows the requested resolution
    scene.camera = scene.camera.with_aspect_ratio(config.aspect_ratio());
    scene.camera.initialize().context("Invalid camera")?;

    let mut rng = StdRng::seed_from_u64(seed);
    let image = render(&scene.camera, &scene.world, &config, &mut rng)?;

    write_output(&image, args.output.as_deref())
}
