//! Writing rendered images to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use ember_renderer::ImageBuffer;
use image::RgbImage;

/// Save the image, choosing the format from the file extension.
pub fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => save_png(image, path),
        Some("ppm") => save_ppm(image, path),
        _ => bail!("unsupported output format for {} (use .png or .ppm)", path.display()),
    }
}

/// Save as an 8-bit gamma-corrected PNG.
pub fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    let rgb = RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .context("pixel buffer does not match image dimensions")?;
    rgb.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Save as a plain-text (P3) PPM.
pub fn save_ppm(image: &ImageBuffer, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_ppm(image, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_ppm(image: &ImageBuffer, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;

    for rgb in image.to_rgb8().chunks_exact(3) {
        writeln!(out, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    Ok(())
}
