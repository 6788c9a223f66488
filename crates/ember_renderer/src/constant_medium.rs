//! Constant-density participating medium (smoke, fog) bounded by a closed shape.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    material::Isotropic,
    sampling::gen_f32,
    texture::Texture,
    Material,
};
use ember_math::{Aabb, Color, Interval, Ray, Vec3};
use rand::RngCore;

/// Offset past the entry point when searching for the exit point.
const EXIT_SEARCH_OFFSET: f32 = 0.0001;

/// A volume of uniform density filling a closed `boundary` primitive.
///
/// Rays scatter inside after an exponentially distributed free-flight
/// distance. The boundary must be convex: only one entry/exit pair is found.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    neg_inv_density: f32,
    phase_function: Arc<dyn Material>,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<dyn Hittable>, density: f32, albedo: Color) -> Self {
        Self::with_phase(boundary, density, Arc::new(Isotropic::new(albedo)))
    }

    pub fn textured(boundary: Arc<dyn Hittable>, density: f32, texture: Arc<dyn Texture>) -> Self {
        Self::with_phase(boundary, density, Arc::new(Isotropic::textured(texture)))
    }

    fn with_phase(
        boundary: Arc<dyn Hittable>,
        density: f32,
        phase_function: Arc<dyn Material>,
    ) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function,
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let mut entry = HitRecord::default();
        let mut exit = HitRecord::default();

        if !self.boundary.hit(ray, Interval::UNIVERSE, &mut entry, rng) {
            return false;
        }
        let exit_search = Interval::new(entry.t + EXIT_SEARCH_OFFSET, f32::INFINITY);
        if !self.boundary.hit(ray, exit_search, &mut exit, rng) {
            return false;
        }

        let mut t_enter = entry.t.max(ray_t.min);
        let t_exit = exit.t.min(ray_t.max);
        if t_enter >= t_exit {
            return false;
        }
        t_enter = t_enter.max(0.0);

        let ray_length = ray.direction().length();
        let distance_inside_boundary = (t_exit - t_enter) * ray_length;
        let hit_distance = self.neg_inv_density * gen_f32(rng).ln();

        if hit_distance > distance_inside_boundary {
            return false;
        }

        rec.t = t_enter + hit_distance / ray_length;
        rec.p = ray.at(rec.t);
        // A volume has no surface: normal and facing are arbitrary.
        rec.normal = Vec3::X;
        rec.front_face = true;
        rec.u = 0.0;
        rec.v = 0.0;
        rec.material = self.phase_function.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_boundary() -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(
            Vec3::ZERO,
            1.0,
            Arc::new(Lambertian::new(Color::ONE)),
        ))
    }

    #[test]
    fn test_dense_medium_scatters_near_entry() {
        let medium = ConstantMedium::new(unit_boundary(), 1.0e6, Color::ONE);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, 0.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let mut rec = HitRecord::default();
            assert!(medium.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
            assert!(rec.t >= 4.0 && rec.t < 4.01);
        }
    }

    #[test]
    fn test_thin_medium_mostly_transmits() {
        let medium = ConstantMedium::new(unit_boundary(), 1.0e-4, Color::ONE);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, 0.0);
        let mut rng = StdRng::seed_from_u64(7);

        let hits = (0..1000)
            .filter(|_| {
                let mut rec = HitRecord::default();
                medium.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng)
            })
            .count();
        // Probability of scattering over 2 units at density 1e-4 is ~0.02%.
        assert!(hits < 10);
    }

    #[test]
    fn test_hits_stay_inside_boundary() {
        let medium = ConstantMedium::new(unit_boundary(), 0.8, Color::ONE);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 2.0), 0.0);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            let mut rec = HitRecord::default();
            if medium.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng) {
                assert!(rec.p.length() <= 1.0 + 1e-4);
                assert!(rec.front_face);
            }
        }
    }

    #[test]
    fn test_ray_starting_inside_medium() {
        let medium = ConstantMedium::new(unit_boundary(), 1.0e6, Color::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::X, 0.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut rec = HitRecord::default();

        assert!(medium.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
        assert!(rec.t < 0.01);
    }

    #[test]
    fn test_miss_and_bbox() {
        let medium = ConstantMedium::new(unit_boundary(), 1.0, Color::ONE);
        let ray = Ray::new(Vec3::new(0.0, 5.0, -5.0), Vec3::Z, 0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();

        assert!(!medium.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
        assert_eq!(medium.bounding_box(), unit_boundary().bounding_box());
    }
}
