//! Hittable trait and HitRecord for ray-object intersection.

use std::sync::Arc;

use crate::{Material, Ray};
use lumen_math::{Interval, Point3, Vec3};

/// Record of a ray-object intersection.
///
/// Lives only as long as the geometry it was produced from; the material is
/// borrowed, never owned.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    pub p: Point3,
    /// Surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    pub material: &'a dyn Material,
    /// Ray parameter of the intersection
    pub t: f32,
    /// Whether the ray hit the outside of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the geometric outward normal.
    ///
    /// The stored normal is flipped when the ray arrives from inside, so
    /// `dot(ray.direction, normal) <= 0` always holds.
    pub fn new(
        ray: &Ray,
        t: f32,
        p: Point3,
        outward_normal: Vec3,
        material: &'a dyn Material,
    ) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p,
            normal,
            material,
            t,
            front_face,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest intersection of `ray` with this object whose parameter lies
    /// in `ray_t` (bounds inclusive), if any.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

/// An ordered list of hittable objects, tested by linear scan.
///
/// Children are shared: the same sphere may sit in several lists.
#[derive(Clone, Default)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A list holding a single object.
    pub fn from_object(object: Arc<dyn Hittable>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }

    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;
        let mut closest_so_far = ray_t.max;

        // Every hit shrinks the search interval for the objects after it
        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian, Metal, Sphere};

    fn interval() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::stationary(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.is_empty());
        assert!(world.hit(&ray, interval()).is_none());
    }

    #[test]
    fn test_list_returns_nearest_hit() {
        let near_mat: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.3)));
        let far_mat: Arc<dyn Material> = Arc::new(Metal::new(Color::ONE, 0.0));

        // Far sphere inserted first so the interval has to shrink
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, far_mat)));
        world.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.5, near_mat.clone())));

        let ray = Ray::stationary(Vec3::ZERO, Vec3::NEG_Z);
        let rec = world.hit(&ray, interval()).expect("should hit");

        assert!((rec.t - 0.5).abs() < 1e-5);
        let hit_mat = rec.material as *const dyn Material as *const ();
        let expected = Arc::as_ptr(&near_mat) as *const ();
        assert_eq!(hit_mat, expected);
    }

    #[test]
    fn test_list_respects_t_max() {
        let mat: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
        let world = HittableList::from_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -10.0),
            1.0,
            mat,
        )));

        let ray = Ray::stationary(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.hit(&ray, Interval::new(0.001, 5.0)).is_none());
        assert!(world.hit(&ray, Interval::new(0.001, 9.0)).is_some());
    }

    #[test]
    fn test_shared_child_in_two_lists() {
        let mat: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, mat));

        let a = HittableList::from_object(sphere.clone());
        let mut b = HittableList::new();
        b.add(sphere.clone());
        b.add(Arc::new(a.clone()));

        let ray = Ray::stationary(Vec3::ZERO, Vec3::NEG_Z);
        let ta = a.hit(&ray, interval()).map(|r| r.t);
        let tb = b.hit(&ray, interval()).map(|r| r.t);
        assert_eq!(ta, tb);
        assert_eq!(Arc::strong_count(&sphere), 4);
    }
}
