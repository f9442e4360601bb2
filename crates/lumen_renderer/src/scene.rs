//! Ready-made scenes and the camera that frames them.

use std::sync::Arc;

use crate::{
    Camera, CameraSettings, Color, Dielectric, HittableList, Lambertian, Material, Metal, Sphere,
};
use lumen_math::{gen_f32, Point3, Vec3};
use rand::RngCore;

fn ground() -> Sphere {
    let ground_material: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
    Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground_material)
}

/// A single huge gray sphere acting as the ground plane.
pub fn ground_scene() -> HittableList {
    HittableList::from_object(Arc::new(ground()))
}

/// The "book cover" scene: a field of small random spheres around three
/// large ones (glass, diffuse brown, polished metal).
pub fn cover_scene(rng: &mut dyn RngCore) -> HittableList {
    let mut world = ground_scene();
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Point3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                let albedo = gen_f32(rng) * gen_f32(rng);
                Arc::new(Lambertian::new(Color::splat(albedo)))
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    0.5 * (1.0 + gen_f32(rng)),
                    0.5 * (1.0 + gen_f32(rng)),
                    0.5 * (1.0 + gen_f32(rng)),
                );
                Arc::new(Metal::new(albedo, 0.5 * gen_f32(rng)))
            } else {
                glass.clone()
            };

            world.add(Arc::new(Sphere::new(center, 0.2, material)));
        }
    }

    world.add(Arc::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass)));
    world.add(Arc::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    log::debug!("Cover scene built with {} objects", world.len());
    world
}

/// Camera settings framing the cover scene from (13, 2, 3).
pub fn cover_camera_settings(aspect_ratio: f32) -> CameraSettings {
    CameraSettings::new()
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0)
        .with_aspect_ratio(aspect_ratio)
}

pub fn cover_camera(aspect_ratio: f32) -> Camera {
    cover_camera_settings(aspect_ratio).build()
}
