//! Lumen math - vectors, intervals and random sampling for the path tracer.

// Re-export glam for convenience
pub use glam::*;

mod interval;
pub mod sampling;

pub use interval::Interval;
pub use sampling::{
    gen_f32, gen_range_f32, random_in_unit_disk, random_in_unit_sphere, random_unit_vector,
    random_vec3, random_vec3_range,
};

/// RGB color, stored in a `Vec3` (r, g, b in x, y, z).
pub type Color = Vec3;

/// A position in world space.
pub type Point3 = Vec3;

/// Components below this magnitude count as zero for [`Vec3Ext::near_zero`].
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Extra vector queries the path tracer needs on top of glam.
pub trait Vec3Ext {
    /// True if every component is within [`NEAR_ZERO_EPSILON`] of zero.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }
}
