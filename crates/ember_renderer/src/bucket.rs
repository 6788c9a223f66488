//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Each bucket draws from its own generator
//! seeded from the render seed and the bucket's index, so the image is the
//! same for a given seed no matter how buckets land on threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::renderer::{render_pixel, ImageBuffer};
use crate::{Camera, Hittable};
use ember_math::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets are rendered from the center outward, so the middle of the
/// frame finishes first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
///
/// The sort is stable, so equidistant buckets keep their row-major order
/// and the bucket order is fully determined by the image size.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let dist = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| dist(a).total_cmp(&dist(b)));
}

/// Seed for a bucket's generator, mixed so neighboring buckets decorrelate.
pub fn bucket_seed(seed: u64, index: usize) -> u64 {
    // SplitMix64 finalizer
    let mut z = seed ^ (index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(bucket: &Bucket, camera: &Camera, world: &dyn Hittable) -> BucketResult {
    let mut rng = StdRng::seed_from_u64(bucket_seed(camera.settings().seed, bucket.index));
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(camera, world, global_x, global_y, &mut rng));
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy this bucket's pixels into their place in the full image.
    pub fn write_into(&self, image: &mut ImageBuffer) {
        let mut colors = self.pixels.iter();
        for local_y in 0..self.bucket.height {
            for local_x in 0..self.bucket.width {
                if let Some(color) = colors.next() {
                    image.set(self.bucket.x + local_x, self.bucket.y + local_y, *color);
                }
            }
        }
    }
}

/// Render the scene on all cores.
pub fn render(camera: &Camera, world: &dyn Hittable) -> ImageBuffer {
    render_with_bucket_size(camera, world, DEFAULT_BUCKET_SIZE)
}

/// Render the scene on all cores with a custom bucket size.
pub fn render_with_bucket_size(
    camera: &Camera,
    world: &dyn Hittable,
    bucket_size: u32,
) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    let settings = camera.settings();
    let buckets = generate_buckets(width, height, bucket_size);
    let total = buckets.len();

    log::info!(
        "Rendering {}x{} at {} spp, depth {}, {} buckets on {} threads",
        width,
        height,
        settings.samples_per_pixel,
        settings.max_depth,
        total,
        rayon::current_num_threads()
    );
    let start = Instant::now();
    let completed = AtomicUsize::new(0);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, camera, world);
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Bucket {}/{} done", done, total);
            result
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        result.write_into(&mut image);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}
