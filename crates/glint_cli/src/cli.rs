use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::scenes::ScenePreset;

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

/// Render a scene of spheres to a PPM or PNG image
#[derive(Debug, Parser)]
#[command(name = "glint", version, about, long_about = None)]
pub struct Args {
    /// Built-in scene to render
    #[arg(long, value_enum, default_value_t = ScenePreset::Cover)]
    pub scene: ScenePreset,

    /// JSON scene file (overrides --scene)
    #[arg(long)]
    pub scene_file: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    pub width: u32,

    /// Image height in pixels (derived from the scene aspect ratio if omitted)
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(short, long, default_value_t = 100)]
    pub samples: u32,

    /// Maximum number of bounces per ray
    #[arg(short = 'd', long, default_value_t = 50)]
    pub max_depth: u32,

    /// Seed for the random generator; a random seed is chosen and logged if omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output path (.ppm or .png); PPM goes to stdout if omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Shortcut for --log-level debug
    #[arg(short, long)]
    pub verbose: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    pub fn level_filter(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            self.log_level.into()
        }
    }
}
