//! Material trait for surface scattering.

use std::sync::Arc;

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use crate::texture::{SolidColor, Texture};
use ember_math::{near_zero, Color, Point3, Ray, Vec3};
use rand::RngCore;

/// Outcome of a scattering event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Fraction of the scattered ray's radiance that reaches the incoming ray
    pub attenuation: Color,
    pub scattered: Ray,
}

impl ScatterResult {
    pub fn new(attenuation: Color, scattered: Ray) -> Self {
        Self {
            attenuation,
            scattered,
        }
    }
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;

    /// Light emitted at the given surface coordinates and point.
    ///
    /// Most materials return black (no emission).
    fn emitted(&self, _u: f32, _v: f32, _p: Point3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    texture: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a new Lambertian material with a constant albedo.
    pub fn new(albedo: Color) -> Self {
        Self::textured(Arc::new(SolidColor::new(albedo)))
    }

    pub fn textured(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        let scattered = Ray::new(rec.p, scatter_direction, ray_in.time());
        let attenuation = self.texture.value(rec.u, rec.v, rec.p);
        Some(ScatterResult::new(attenuation, scattered))
    }
}

/// Metal (specular) material.
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz can push the ray below the surface; absorb it there
        if scattered_dir.dot(rec.normal) > 0.0 {
            let scattered = Ray::new(rec.p, scattered_dir, ray_in.time());
            Some(ScatterResult::new(self.albedo, scattered))
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
pub struct Dielectric {
    /// Index of refraction relative to the enclosing medium
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn ior(&self) -> f32 {
        self.ior
    }

    /// Relative index for a ray arriving at the given side of the surface.
    fn refraction_ratio(&self, front_face: bool) -> f32 {
        if front_face {
            1.0 / self.ior
        } else {
            self.ior
        }
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let ri = self.refraction_ratio(rec.front_face);

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);

        let direction = if cannot_refract(cos_theta, ri) || reflectance(cos_theta, ri) > gen_f32(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, ri)
        };

        let scattered = Ray::new(rec.p, direction, ray_in.time());
        Some(ScatterResult::new(Color::ONE, scattered))
    }
}

/// Phase function of a participating medium: scatters uniformly in all directions.
pub struct Isotropic {
    texture: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self::textured(Arc::new(SolidColor::new(albedo)))
    }

    pub fn textured(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }
}

impl Material for Isotropic {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let scattered = Ray::new(rec.p, random_unit_vector(rng), ray_in.time());
        let attenuation = self.texture.value(rec.u, rec.v, rec.p);
        Some(ScatterResult::new(attenuation, scattered))
    }
}

/// Diffuse light emitter.
pub struct DiffuseLight {
    texture: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self::textured(Arc::new(SolidColor::new(emit)))
    }

    pub fn textured(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }
}

impl Material for DiffuseLight {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        // Lights don't scatter rays
        None
    }

    fn emitted(&self, u: f32, v: f32, p: Point3) -> Color {
        self.texture.value(u, v, p)
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with relative index `etai_over_etat`.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation for reflectance.
#[inline]
pub fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// True when Snell's law has no solution (total internal reflection).
#[inline]
pub fn cannot_refract(cos_theta: f32, refraction_ratio: f32) -> bool {
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    refraction_ratio * sin_theta > 1.0
}
