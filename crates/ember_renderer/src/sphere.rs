//! Sphere primitive for ray tracing, optionally moving over the shutter.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use ember_math::{Aabb, Interval, Point3, Ray, Vec3};
use rand::RngCore;

/// A sphere whose center moves linearly from `center0` (time 0) to
/// `center0 + motion` (time 1). Static spheres have zero motion.
pub struct Sphere {
    center0: Point3,
    motion: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a stationary sphere. Negative radii are clamped to zero.
    pub fn new(center: Point3, radius: f32, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center0: center,
            motion: Vec3::ZERO,
            radius,
            material,
            bbox,
        }
    }

    /// Create a sphere moving from `center0` at time 0 to `center1` at time 1.
    pub fn moving(
        center0: Point3,
        center1: Point3,
        radius: f32,
        material: Arc<dyn Material>,
    ) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let box0 = Aabb::from_points(center0 - rvec, center0 + rvec);
        let box1 = Aabb::from_points(center1 - rvec, center1 + rvec);

        Self {
            center0,
            motion: center1 - center0,
            radius,
            material,
            bbox: Aabb::surrounding(&box0, &box1),
        }
    }

    /// Center of the sphere at the given ray time.
    #[inline]
    pub fn center(&self, time: f32) -> Point3 {
        self.center0 + time * self.motion
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Texture coordinates for a point on the unit sphere.
    ///
    /// u is the angle around the Y axis from X=-1, v the angle from Y=-1,
    /// both normalized to [0, 1].
    fn get_sphere_uv(p: Vec3) -> (f32, f32) {
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        _rng: &mut dyn RngCore,
    ) -> bool {
        // A point has no surface and no defined normal.
        if self.radius == 0.0 {
            return false;
        }

        let center = self.center(ray.time());
        let oc = center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(root);
        let outward_normal = (rec.p - center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = Self::get_sphere_uv(outward_normal);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use ember_math::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    #[test]
    fn test_sphere_hit_front() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, gray());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, gray());
        let ray = Ray::new(Vec3::ZERO, Vec3::Y, 0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
    }

    #[test]
    fn test_sphere_far_root_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, gray());
        let ray = Ray::new(Vec3::ZERO, Vec3::X, 0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();

        // The near root (t=-2) is outside the interval, so the far one is used.
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(!rec.front_face);
        assert!((rec.normal + Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_sphere_interval_excludes_both_roots() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, gray());
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z, 0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, Interval::new(0.001, 3.5), &mut rec, &mut rng));
    }

    #[test]
    fn test_moving_sphere_follows_time() {
        let sphere = Sphere::moving(Vec3::new(0.0, 0.0, -5.0), Vec3::new(4.0, 0.0, -5.0), 1.0, gray());
        let ray = Ray::new(Vec3::new(4.0, 0.0, 0.0), -Vec3::Z, 0.0);
        let mut rng = StdRng::seed_from_u64(0);

        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));

        let late = Ray::new(ray.origin, ray.direction, 1.0);
        assert!(sphere.hit(&late, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
        assert!((rec.t - 4.0).abs() < 1e-4);

        let bbox = sphere.bounding_box();
        assert!((bbox.x.min + 1.0).abs() < 1e-5);
        assert!((bbox.x.max - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_uv() {
        let cases = [
            (Vec3::X, (0.5, 0.5)),
            (Vec3::new(-1.0, 0.0, 1e-3).normalize(), (0.0, 0.5)),
            (Vec3::Y, (0.5, 1.0)),
            (-Vec3::Y, (0.5, 0.0)),
            (Vec3::Z, (0.25, 0.5)),
            (-Vec3::Z, (0.75, 0.5)),
        ];
        for (p, (u, v)) in cases {
            let (gu, gv) = Sphere::get_sphere_uv(p);
            assert!((gu - u).abs() < 1e-3 && (gv - v).abs() < 1e-5, "{:?}", p);
        }
    }

    #[test]
    fn test_sphere_uv_seam() {
        // u = 0 and u = 1 name the same meridian; the sign of zero picks one.
        for p in [-Vec3::X, Vec3::new(-1.0, 0.0, 0.0)] {
            let (u, v) = Sphere::get_sphere_uv(p);
            assert!(u.abs() < 1e-5 || (u - 1.0).abs() < 1e-5, "{:?} -> {}", p, u);
            assert!((v - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_radius_never_hit() {
        let sphere = Sphere::new(Vec3::ZERO, 0.0, gray());
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z, 0.0);

        assert!(!sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
        assert!(!rec.normal.is_nan());
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = Sphere::new(Vec3::ZERO, -3.0, gray());
        assert_eq!(sphere.radius(), 0.0);
    }
}
