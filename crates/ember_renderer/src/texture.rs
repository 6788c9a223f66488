//! Textures: color lookups by surface coordinates and world position.

use std::sync::Arc;

use crate::perlin::Perlin;
use ember_core::ImageData;
use ember_math::{Color, Interval, Point3};
use rand::RngCore;

/// Color returned by an image texture that has no pixel data.
pub const NO_IMAGE_COLOR: Color = Color::new(0.0, 1.0, 1.0);

/// A color lookup over a surface.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Point3) -> Color;
}

/// A single constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(Color::new(r, g, b))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Point3) -> Color {
        self.albedo
    }
}

/// A 3-D checkerboard alternating between two child textures.
///
/// Cells are cubes of side `scale` in world space, so the pattern does not
/// depend on surface parameterization.
pub struct CheckerTexture {
    inv_scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    /// Checker between two solid colors.
    pub fn from_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Point3) -> Color {
        let cell = (self.inv_scale * p).floor();
        let sum = cell.x as i64 + cell.y as i64 + cell.z as i64;

        if sum.rem_euclid(2) == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Marble-like pattern driven by Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
}

impl NoiseTexture {
    pub fn new(scale: f32, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Point3) -> Color {
        let phase = self.scale * p.z + 10.0 * self.noise.turb(p, 7);
        Color::splat(0.5) * (1.0 + phase.sin())
    }
}

/// Nearest-pixel lookup into a decoded image.
pub struct ImageTexture {
    image: Arc<ImageData>,
}

impl ImageTexture {
    pub fn new(image: Arc<ImageData>) -> Self {
        Self { image }
    }

    /// Load an image by name through the search path.
    ///
    /// A missing or undecodable file yields a texture that renders
    /// `NO_IMAGE_COLOR` instead of failing.
    pub fn load(name: &str) -> Self {
        Self::new(Arc::new(ImageData::load_or_empty(name)))
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Point3) -> Color {
        if self.image.height() == 0 {
            return NO_IMAGE_COLOR;
        }

        let u = Interval::UNIT.clamp(u);
        // Image rows run top to bottom
        let v = 1.0 - Interval::UNIT.clamp(v);

        let i = (u * self.image.width() as f32) as u32;
        let j = (v * self.image.height() as f32) as u32;
        self.image.pixel(i, j)
    }
}
