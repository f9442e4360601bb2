//! Render options: defaults, JSON loading and validation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use lumen_renderer::{RenderConfig, DEFAULT_BUCKET_SIZE, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which built-in scene to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// Random sphere field around three large spheres
    #[default]
    Cover,
    /// Just the ground sphere
    Ground,
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid options JSON")]
    Parse(#[from] serde_json::Error),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Everything the binary needs to set up a render.
///
/// Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output image; the extension picks the encoder
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Samples per pixel
    pub samples: u32,
    pub seed: u64,
    pub max_depth: u32,
    pub scene: SceneKind,
    /// Worker threads, 0 = one per core
    pub threads: usize,
    /// Render on the main thread only
    pub sequential: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        let aspect_ratio = 16.0 / 9.0;
        let width = 1920;

        Self {
            output: PathBuf::from("img.ppm"),
            width,
            height: (width as f64 / aspect_ratio) as u32,
            samples: 20,
            seed: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            scene: SceneKind::Cover,
            threads: 0,
            sequential: false,
        }
    }
}

impl RenderOptions {
    pub fn from_json_str(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| OptionsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        let checks = [
            ("width", self.width),
            ("height", self.height),
            ("samples", self.samples),
            ("max_depth", self.max_depth),
        ];
        match checks.iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(OptionsError::Zero(*field)),
            None => Ok(()),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            image_width: self.width,
            image_height: self.height,
            samples_per_pixel: self.samples,
            max_depth: self.max_depth,
            seed: self.seed,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}
