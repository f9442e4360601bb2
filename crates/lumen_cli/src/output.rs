//! Image encoders: quantize the renderer's [0, 1] colors and frame them as
//! PPM, PNG or JPEG.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::RgbImage;
use lumen_renderer::ImageBuffer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("unsupported output format for {0} (expected .ppm, .png, .jpg or .jpeg)")]
    UnsupportedFormat(PathBuf),

    #[error("failed to write image")]
    Io(#[from] io::Error),

    #[error("failed to encode image")]
    Image(#[from] image::ImageError),
}

/// Encoders the binary can write, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Ppm,
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, OutputError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("ppm") => Ok(Self::Ppm),
            Some("png") => Ok(Self::Png),
            Some("jpg") | Some("jpeg") => Ok(Self::Jpeg),
            _ => Err(OutputError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Write ASCII PPM (P3), one pixel per line.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color.to_array().map(|c| (255.99 * c) as u8);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Quantize to 8-bit RGB.
pub fn to_rgb8(image: &ImageBuffer) -> RgbImage {
    let bytes = image
        .pixels
        .iter()
        .flat_map(|color| color.to_array().map(|c| (255.0 * c) as u8))
        .collect();

    // The buffer holds exactly width * height pixels
    RgbImage::from_raw(image.width, image.height, bytes)
        .unwrap_or_else(|| RgbImage::new(image.width, image.height))
}

/// Save the image, choosing the encoder from the path's extension.
pub fn save(image: &ImageBuffer, path: &Path) -> Result<OutputFormat, OutputError> {
    let format = OutputFormat::from_path(path)?;

    match format {
        OutputFormat::Ppm => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(image, &mut writer)?;
            writer.flush()?;
        }
        OutputFormat::Png => to_rgb8(image).save_with_format(path, image::ImageFormat::Png)?,
        OutputFormat::Jpeg => to_rgb8(image).save_with_format(path, image::ImageFormat::Jpeg)?,
    }

    log::info!("Saved {}x{} {:?} to {}", image.width, image.height, format, path.display());
    Ok(format)
}
