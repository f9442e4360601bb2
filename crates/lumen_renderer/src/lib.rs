//! Lumen Renderer - CPU Path Tracing
//!
//! A backward Monte Carlo path tracer: a thin-lens camera shoots rays
//! into a list of spheres, and diffuse, metal and glass materials decide
//! how each ray bounces until it escapes to the sky, is absorbed, or runs
//! out of bounces.

mod ray;
mod hittable;
mod material;
mod sphere;
mod camera;
mod renderer;
mod bucket;
pub mod scene;

pub use ray::Ray;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{reflect, refract, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use sphere::Sphere;
pub use camera::{Camera, CameraSettings};
pub use renderer::{
    linear_to_gamma, ray_color, render, render_parallel, render_pixel, sky_gradient, to_display,
    trace_path, ImageBuffer, PathEnd, PathSample, RenderConfig, DEFAULT_MAX_DEPTH, T_MIN,
};
pub use bucket::{bucket_seed, generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Color, Interval, Point3, Vec3};
