//! Simple path tracer example.
//!
//! Renders the cover scene at low quality and saves it as PPM.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::atomic::AtomicBool;

use lumen_renderer::{render_parallel, scene, ImageBuffer, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = RenderConfig {
        image_width: 400,
        image_height: 225,
        samples_per_pixel: 16,
        max_depth: 10,
        ..RenderConfig::default()
    };

    let start = std::time::Instant::now();
    let world = scene::cover_scene(&mut StdRng::seed_from_u64(config.seed));
    log::info!("Scene built in {:?}", start.elapsed());

    let camera = scene::cover_camera(config.aspect_ratio());
    let Some(image) = render_parallel(&camera, &world, &config, &AtomicBool::new(false)) else {
        return Ok(());
    };

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    log::info!("Saved to {}", filename);
    Ok(())
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(filename)?);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color.to_array().map(|c| (255.99 * c) as u8);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()
}
