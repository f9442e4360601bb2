//! Thin-lens camera for ray generation.

use crate::Ray;
use lumen_math::{gen_range_f32, random_in_unit_disk, Point3, Vec3};
use rand::RngCore;

/// Construction parameters for a [`Camera`].
///
/// Set what you need with the `with_*` methods, then call [`build`](Self::build).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    look_from: Point3,
    look_at: Point3,
    vup: Vec3,

    vfov: f32,       // Vertical field of view in degrees
    aspect_ratio: f32,
    aperture: f32,   // Lens diameter; 0 disables defocus blur
    focus_dist: f32, // Distance from camera to plane of perfect focus

    time0: f32, // Shutter open
    time1: f32, // Shutter close
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Vec3::new(0.0, 0.0, -1.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            vfov: 40.0,
            aspect_ratio: 1.0,
            aperture: 0.0,
            focus_dist: 10.0,
            time0: 0.0,
            time1: 0.0,
        }
    }
}

impl CameraSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the shutter interval; rays get a time drawn from `[open, close)`.
    pub fn with_shutter(mut self, open: f32, close: f32) -> Self {
        self.time0 = open;
        self.time1 = close;
        self
    }

    /// Derive the camera basis and viewport.
    pub fn build(&self) -> Camera {
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = self.aspect_ratio * viewport_height;

        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = self.look_from;
        let horizontal = self.focus_dist * viewport_width * u;
        let vertical = self.focus_dist * viewport_height * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - self.focus_dist * w;

        Camera {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: self.aperture / 2.0,
            time0: self.time0,
            time1: self.time1,
        }
    }
}

/// Camera for generating rays into the scene.
///
/// Immutable once built; share it freely between render threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
    time0: f32,
    time1: f32,
}

impl Camera {
    /// Generate a ray through viewport coordinates `(s, t)`, both in [0, 1],
    /// with `(0, 0)` at the lower-left corner.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        // Defocus blur: jitter the origin across the lens disk
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        let direction = self.lower_left_corner + s * self.horizontal + t * self.vertical
            - self.origin
            - offset;
        let time = gen_range_f32(rng, self.time0, self.time1);

        Ray::new(self.origin + offset, direction, time)
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Camera basis `(u, v, w)`: right, up, and backwards.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

impl Default for Camera {
    fn default() -> Self {
        CameraSettings::default().build()
    }
}
