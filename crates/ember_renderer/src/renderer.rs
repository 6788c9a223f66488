//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a hard depth limit
//! - Emission from lights and a constant background
//! - Box-filter anti-aliasing via multi-sampling
//! - Gamma 2 tone mapping to 8-bit RGB

use crate::{Camera, HitRecord, Hittable};
use ember_math::{Color, Interval, Ray};
use rand::RngCore;

/// Smallest accepted hit distance; avoids re-hitting the surface a ray leaves.
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Compute the radiance carried back along a ray.
///
/// Returns black once `depth` bounces are used up and `background` when the
/// ray leaves the scene.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: Color,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(
        ray,
        Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY),
        &mut rec,
        rng,
    ) {
        return background;
    }

    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, world, depth - 1, background, rng);
            emission + result.attenuation * scattered_color
        }
        None => emission,
    }
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

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let to_byte = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Render a single pixel: the average of `samples_per_pixel` traced rays.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let settings = camera.settings();
    let mut pixel_color = Color::ZERO;

    for _ in 0..settings.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, settings.max_depth, settings.background, rng);
    }

    pixel_color * camera.samples_scale()
}

/// Linear color image, row-major with the top row first.
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
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Gamma-corrected bytes, three per pixel, ready for an image encoder.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// Render the entire scene on the calling thread, pixel by pixel.
///
/// All randomness comes from `rng`, so a seeded generator gives a
/// reproducible image.
pub fn render_serial(camera: &Camera, world: &dyn Hittable, rng: &mut dyn RngCore) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    let mut image = ImageBuffer::new(width, height);

    for y in 0..height {
        log::trace!("Scanlines remaining: {}", height - y);
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, rng);
            image.set(x, y, color);
        }
    }

    image
}
