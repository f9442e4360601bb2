use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::options::{RenderOptions, SceneKind};

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

/// Command line arguments. Anything given here overrides the options file.
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "A Monte Carlo path tracer", version)]
pub struct Args {
    /// JSON render options file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output path (.ppm, .png, .jpg)
    #[arg(short, long = "out")]
    pub output: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Random seed for the scene and the render
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum bounces per path
    #[arg(long)]
    pub depth: Option<u32>,

    #[arg(long, value_enum)]
    pub scene: Option<SceneKind>,

    /// Worker threads (0 = one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Render on a single thread
    #[arg(long)]
    pub sequential: bool,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Layer the flags that were given on top of `options`.
    pub fn apply(&self, options: &mut RenderOptions) {
        if let Some(output) = &self.output {
            options.output = output.clone();
        }
        if let Some(width) = self.width {
            options.width = width;
        }
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(samples) = self.samples {
            options.samples = samples;
        }
        if let Some(seed) = self.seed {
            options.seed = seed;
        }
        if let Some(depth) = self.depth {
            options.max_depth = depth;
        }
        if let Some(scene) = self.scene {
            options.scene = scene;
        }
        if let Some(threads) = self.threads {
            options.threads = threads;
        }
        options.sequential |= self.sequential;
    }
}
