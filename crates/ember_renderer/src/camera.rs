//! Camera for ray generation.

use crate::sampling::{gen_f32, random_in_unit_disk, sample_square};
use ember_core::{ConfigResult, RenderSettings};
use ember_math::{Point3, Ray, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// Built from validated [`RenderSettings`]; the viewport geometry is derived
/// once by `initialize()` and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Camera {
    settings: RenderSettings,
    image_height: u32,

    // Cached computed values (set by initialize())
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
    samples_scale: f32,
}

impl Camera {
    /// Validate `settings` and derive the viewport.
    pub fn new(settings: RenderSettings) -> ConfigResult<Self> {
        settings.validate()?;

        let mut camera = Self {
            image_height: 1,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
            samples_scale: 1.0,
            settings,
        };
        camera.initialize();
        Ok(camera)
    }

    fn initialize(&mut self) {
        let s = &self.settings;

        let raw_height = s.image_width as f32 / s.aspect_ratio;
        if raw_height < 1.0 {
            log::warn!(
                "Image height {:.3} for width {} and aspect {} clamped to 1",
                raw_height,
                s.image_width,
                s.aspect_ratio
            );
        }
        self.image_height = s.image_height();
        self.samples_scale = 1.0 / s.samples_per_pixel as f32;
        self.center = s.look_from;

        // Calculate viewport dimensions
        let theta = s.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * s.focus_dist;
        let viewport_width = viewport_height * (s.image_width as f32 / self.image_height as f32);

        // Calculate camera basis vectors
        self.w = (s.look_from - s.look_at).normalize();
        self.u = s.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Viewport edges; v runs down the image
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        self.pixel_delta_u = viewport_u / s.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - s.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius = s.focus_dist * (s.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The sample is jittered within the pixel, starts on the defocus disk
    /// when depth of field is enabled, and gets a random time in [0, 1).
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.settings.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        let ray_direction = pixel_sample - ray_origin;
        let ray_time = gen_f32(rng);

        Ray::new(ray_origin, ray_direction, ray_time)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn image_width(&self) -> u32 {
        self.settings.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }
}
