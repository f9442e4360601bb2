//! Core path tracing renderer.
//!
//! Implements backward Monte Carlo path tracing with:
//! - Recursive radiance estimation with a hard bounce limit
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma 2 correction
//!
//! A render is a pure function of camera, world and [`RenderConfig`]:
//! every bucket seeds its own RNG, so sequential and parallel renders of
//! the same config produce identical buffers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{Camera, Color, Hittable, Ray};
use lumen_math::{gen_f32, Interval};
use rand::RngCore;
use rayon::prelude::*;

/// Lower bound of the intersection search; keeps a bounce from re-hitting
/// the surface it just left (shadow acne).
pub const T_MIN: f32 = 0.001;

/// Default maximum ray bounce depth.
pub const DEFAULT_MAX_DEPTH: u32 = 50;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Seed for every random stream in the render
    pub seed: u64,
    /// Edge length of the square render buckets, in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 1920,
            image_height: 1080,
            samples_per_pixel: 20,
            max_depth: DEFAULT_MAX_DEPTH,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }

    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }
}

/// Why a light path stopped.
///
/// Absorption and depth exhaustion both contribute black, but they are
/// different events and callers can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEnd {
    /// Left the scene and picked up the background
    Escaped,
    /// A material absorbed the ray
    Absorbed,
    /// The bounce limit was reached
    DepthExhausted,
}

/// Radiance carried back along one camera path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub color: Color,
    pub end: PathEnd,
    /// Number of scattering events before the path ended
    pub bounces: u32,
}

impl PathSample {
    fn black(end: PathEnd) -> Self {
        Self {
            color: Color::ZERO,
            end,
            bounces: 0,
        }
    }
}

/// Trace a ray through the world and report how its path ended.
pub fn trace_path(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> PathSample {
    if depth == 0 {
        return PathSample::black(PathEnd::DepthExhausted);
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return PathSample {
            color: sky_gradient(ray),
            end: PathEnd::Escaped,
            bounces: 0,
        };
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let rest = trace_path(&result.scattered, world, depth - 1, rng);
            PathSample {
                color: result.attenuation * rest.color,
                end: rest.end,
                bounces: rest.bounces + 1,
            }
        }
        None => PathSample::black(PathEnd::Absorbed),
    }
}

/// Compute the color seen by a ray.
///
/// Black once `depth` reaches zero; otherwise the attenuation of every
/// bounce times the background the path finally escapes to.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    trace_path(ray, world, depth, rng).color
}

/// Background seen by rays that miss everything: white at the bottom,
/// sky blue at the top, by ray direction only.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct and clamp an averaged pixel color to [0, 1].
pub fn to_display(color: Color) -> Color {
    Color::new(
        Interval::UNIT.clamp(linear_to_gamma(color.x)),
        Interval::UNIT.clamp(linear_to_gamma(color.y)),
        Interval::UNIT.clamp(linear_to_gamma(color.z)),
    )
}

/// Render a single pixel with multi-sampling.
///
/// `y = 0` is the top row. Returns the linear average of all samples.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let span_x = (config.image_width.max(2) - 1) as f32;
    let span_y = (config.image_height.max(2) - 1) as f32;
    let row = config.image_height.saturating_sub(1 + y);

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) / span_x;
        let t = (row as f32 + gen_f32(rng)) / span_y;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    pixel_color / config.samples_per_pixel as f32
}

/// Rendered image: gamma-corrected, clamped RGB in row-major order, top
/// row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Copy a finished bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (row, line) in result
            .pixels
            .chunks_exact(bucket.width as usize)
            .enumerate()
        {
            let start = self.index(bucket.x, bucket.y + row as u32);
            self.pixels[start..start + line.len()].copy_from_slice(line);
        }
    }

    /// Iterate over rows, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }
}

/// Render the entire scene on the calling thread.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let buckets = generate_buckets(config.image_width, config.image_height, config.bucket_size);
    log_start(config, buckets.len(), "sequential");

    let start = Instant::now();
    let mut image = ImageBuffer::new(config.image_width, config.image_height);
    for bucket in &buckets {
        let result = render_bucket(bucket, camera, world, config);
        log::debug!("Bucket {}/{} done", bucket.index + 1, buckets.len());
        image.write_bucket(&result);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

/// Render the entire scene across the rayon thread pool.
///
/// `cancel` is checked before each bucket starts; once it is set no new
/// bucket begins and the render returns `None`.
pub fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> Option<ImageBuffer> {
    let buckets = generate_buckets(config.image_width, config.image_height, config.bucket_size);
    log_start(config, buckets.len(), "parallel");

    let start = Instant::now();
    let results: Option<Vec<BucketResult>> = buckets
        .par_iter()
        .map(|bucket| {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
            let result = render_bucket(bucket, camera, world, config);
            log::debug!("Bucket {}/{} done", bucket.index + 1, buckets.len());
            Some(result)
        })
        .collect();

    let Some(results) = results else {
        log::warn!("Render cancelled after {:?}", start.elapsed());
        return None;
    };

    let mut image = ImageBuffer::new(config.image_width, config.image_height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Some(image)
}

fn log_start(config: &RenderConfig, bucket_count: usize, mode: &str) {
    log::info!(
        "Rendering {}x{} @ {} spp, depth {} ({} buckets, {})",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth,
        bucket_count,
        mode
    );
}
