//! Decoded image data for image-mapped textures.
//!
//! Images are decoded once, stored as linear float RGB, and shared through
//! `Arc` so every concurrent ray evaluation reads the same buffer.
//! A failed load does not abort scene construction: `ImageData::load_or_empty`
//! logs a warning and returns an image with no pixels, which textures render
//! as a diagnostic color.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ember_math::Color;
use thiserror::Error;

/// Environment variable naming an extra directory to search for images.
pub const IMAGE_DIR_ENV: &str = "RTW_IMAGES";

/// How many parent directories are searched for an `images/` folder.
const PARENT_SEARCH_DEPTH: usize = 6;

/// Color returned for pixel lookups on an image without data.
pub const MISSING_PIXEL: Color = Color::new(1.0, 0.0, 1.0);

/// Errors that can occur while loading image data.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Pixel buffer holds {actual} values, expected {expected} for {width}x{height} RGB")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type ImageResult<T> = Result<T, ImageError>;

/// A decoded RGB image in linear color space, row-major, top row first.
#[derive(Clone, Debug, Default)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageData {
    /// An image with no pixel data (zero width and height).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from linear float RGB samples, three per pixel.
    pub fn from_rgb_f32(width: u32, height: u32, samples: &[f32]) -> ImageResult<Self> {
        let expected = width as usize * height as usize * 3;
        if samples.len() != expected {
            return Err(ImageError::SizeMismatch {
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }

        let pixels = samples
            .chunks_exact(3)
            .map(|c| Color::new(c[0], c[1], c[2]))
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from sRGB-encoded bytes, three per pixel.
    pub fn from_srgb8(width: u32, height: u32, bytes: &[u8]) -> ImageResult<Self> {
        let expected = width as usize * height as usize * 3;
        if bytes.len() != expected {
            return Err(ImageError::SizeMismatch {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }

        let pixels = bytes
            .chunks_exact(3)
            .map(|c| {
                Color::new(
                    srgb_to_linear(c[0]),
                    srgb_to_linear(c[1]),
                    srgb_to_linear(c[2]),
                )
            })
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode an image file from an exact path.
    pub fn open(path: impl AsRef<Path>) -> ImageResult<Self> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self::from_srgb8(width, height, rgb.as_raw())
    }

    /// Locate `name` in the image search directories and decode it.
    pub fn load(name: &str) -> ImageResult<Self> {
        let path = find_image(name).ok_or_else(|| ImageError::NotFound(name.to_string()))?;
        let image = Self::open(&path)?;
        log::debug!(
            "Loaded image: {} ({}x{})",
            path.display(),
            image.width,
            image.height
        );
        Ok(image)
    }

    /// Like [`ImageData::load`], but a failure yields an empty image and a warning.
    pub fn load_or_empty(name: &str) -> Self {
        match Self::load(name) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Could not load image file '{}': {}", name, e);
                Self::empty()
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the image holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at (x, y), clamped to the image; magenta if there is no data.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        if self.is_empty() {
            return MISSING_PIXEL;
        }
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Color>()
    }
}

/// Cache for loaded images.
///
/// Each name is decoded once; later requests share the same buffer.
/// Failed loads are cached as empty images so the warning is logged once.
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<String, Arc<ImageData>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an image by name, using the cache if available.
    pub fn get_or_load(&mut self, name: &str) -> Arc<ImageData> {
        if let Some(image) = self.images.get(name) {
            return image.clone();
        }

        let image = Arc::new(ImageData::load_or_empty(name));
        self.images.insert(name.to_string(), image.clone());
        image
    }

    /// Check if an image is cached.
    pub fn is_cached(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Get total memory usage of cached images.
    pub fn total_size_bytes(&self) -> usize {
        self.images.values().map(|i| i.size_bytes()).sum()
    }
}

/// Candidate paths for an image name, in search order.
///
/// `$RTW_IMAGES/name`, then `name` itself, then `images/name` in the working
/// directory and each of its first six ancestors.
pub fn search_paths(name: &str) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(PARENT_SEARCH_DEPTH + 3);

    if let Some(dir) = std::env::var_os(IMAGE_DIR_ENV) {
        paths.push(PathBuf::from(dir).join(name));
    }
    paths.push(PathBuf::from(name));

    let mut prefix = PathBuf::new();
    for _ in 0..=PARENT_SEARCH_DEPTH {
        paths.push(prefix.join("images").join(name));
        prefix.push("..");
    }

    paths
}

fn find_image(name: &str) -> Option<PathBuf> {
    search_paths(name).into_iter().find(|p| p.is_file())
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
