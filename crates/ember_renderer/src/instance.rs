//! Transform wrappers that place a shared primitive in the world.
//!
//! Both wrappers move the incoming ray into object space, delegate to the
//! wrapped primitive, then move the hit point and normal back to world
//! space. The world bounding box is computed once at construction.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use ember_math::{Aabb, Interval, Mat4, Mat4Ext, Quat, Ray, Vec3};
use rand::RngCore;

/// A primitive displaced by a constant offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().translate(offset);
        Self {
            object,
            offset,
            bbox,
        }
    }
}

impl Hittable for Translate {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let offset_ray = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());

        if !self.object.hit(&offset_ray, ray_t, rec, rng) {
            return false;
        }

        rec.p += self.offset;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// A primitive rotated about an axis through the origin.
pub struct Rotate {
    object: Arc<dyn Hittable>,
    to_world: Mat4,
    to_object: Mat4,
    bbox: Aabb,
}

impl Rotate {
    /// Rotate `object` by `degrees` about `axis` (right-handed).
    pub fn new(object: Arc<dyn Hittable>, axis: Vec3, degrees: f32) -> Self {
        let rotation = Quat::from_axis_angle(axis.normalize(), degrees.to_radians());
        let to_world = Mat4::from_quat(rotation);
        let to_object = to_world.inverse();
        let bbox = to_world.transform_aabb(&object.bounding_box());

        Self {
            object,
            to_world,
            to_object,
            bbox,
        }
    }

    /// Rotate about the Y axis.
    pub fn y(object: Arc<dyn Hittable>, degrees: f32) -> Self {
        Self::new(object, Vec3::Y, degrees)
    }
}

impl Hittable for Rotate {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let object_ray = Ray::new(
            self.to_object.transform_point3(ray.origin()),
            self.to_object.transform_vector3(ray.direction()),
            ray.time(),
        );

        if !self.object.hit(&object_ray, ray_t, rec, rng) {
            return false;
        }

        // Rotation preserves which side of the surface the ray is on,
        // so the front_face flag set in object space stays valid.
        rec.p = self.to_world.transform_point3(rec.p);
        rec.normal = self.to_world.transform_normal(rec.normal).normalize();
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_box, Lambertian, Material, Sphere};
    use ember_math::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    fn cube() -> Arc<dyn Hittable> {
        Arc::new(make_box(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), gray()))
    }

    #[test]
    fn test_translate_matches_offset_ray() {
        let object = cube();
        let offset = Vec3::new(3.0, -1.0, 2.0);
        let moved = Translate::new(object.clone(), offset);
        let mut rng = StdRng::seed_from_u64(0);
        let range = Interval::new(0.001, f32::INFINITY);

        let world_ray = Ray::new(Vec3::new(3.5, 0.0, 10.0), Vec3::new(0.0, 0.05, -1.0), 0.0);
        let local_ray = Ray::new(world_ray.origin - offset, world_ray.direction, 0.0);

        let mut world_rec = HitRecord::default();
        let mut local_rec = HitRecord::default();
        assert!(moved.hit(&world_ray, range, &mut world_rec, &mut rng));
        assert!(object.hit(&local_ray, range, &mut local_rec, &mut rng));

        assert!((world_rec.t - local_rec.t).abs() < 1e-5);
        assert!((world_rec.p - (local_rec.p + offset)).length() < 1e-5);
        assert_eq!(world_rec.normal, local_rec.normal);
    }

    #[test]
    fn test_translate_bbox() {
        let object = cube();
        let offset = Vec3::new(10.0, 0.0, 0.0);
        let bbox = Translate::new(object.clone(), offset).bounding_box();

        // The cube's faces are padded, so compare against its own shifted box.
        let expected = object.bounding_box();
        assert!((bbox.min() - (expected.min() + offset)).length() < 1e-5);
        assert!((bbox.max() - (expected.max() + offset)).length() < 1e-5);
        // Padding never exceeds half the minimum axis size per side.
        assert!((bbox.x.min - 10.0).abs() < 1e-4);
        assert!((bbox.x.max - 11.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotate_matches_inverse_rotated_ray() {
        let object = cube();
        let rotated = Rotate::y(object.clone(), 30.0);
        let to_world = Mat4::from_rotation_y(30.0_f32.to_radians());
        let to_object = to_world.inverse();
        let mut rng = StdRng::seed_from_u64(0);
        let range = Interval::new(0.001, f32::INFINITY);

        let world_ray = Ray::new(Vec3::new(0.6, 1.0, 10.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        let local_ray = Ray::new(
            to_object.transform_point3(world_ray.origin),
            to_object.transform_vector3(world_ray.direction),
            0.0,
        );

        let mut world_rec = HitRecord::default();
        let mut local_rec = HitRecord::default();
        assert!(rotated.hit(&world_ray, range, &mut world_rec, &mut rng));
        assert!(object.hit(&local_ray, range, &mut local_rec, &mut rng));

        assert!((world_rec.t - local_rec.t).abs() < 1e-4);
        assert!((world_rec.p - to_world.transform_point3(local_rec.p)).length() < 1e-4);
        assert!((world_rec.normal - to_world.transform_vector3(local_rec.normal)).length() < 1e-4);
        assert_eq!(world_rec.front_face, local_rec.front_face);
        assert!((world_rec.normal.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotate_quarter_turn_moves_box() {
        // A box spanning +x rotated 90 degrees about Y spans -z.
        let slab = Arc::new(make_box(Vec3::new(1.0, -0.5, -0.5), Vec3::new(3.0, 0.5, 0.5), gray()));
        let rotated = Rotate::y(slab, 90.0);
        let bbox = rotated.bounding_box();

        assert!((bbox.z.min + 3.0).abs() < 1e-3);
        assert!((bbox.z.max + 1.0).abs() < 1e-3);

        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z, 0.0);
        let mut rec = HitRecord::default();
        assert!(rotated.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
        assert!((rec.p.z + 3.0).abs() < 1e-3);
        assert!((rec.normal - (-Vec3::Z)).length() < 1e-3);
    }

    #[test]
    fn test_rotate_arbitrary_axis_sphere_unchanged() {
        // A sphere centered on the rotation axis is rotation invariant.
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::ZERO, 1.0, gray()));
        let rotated = Rotate::new(sphere.clone(), Vec3::new(1.0, 1.0, 0.0), 47.0);
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::new(0.2, 0.1, 5.0), -Vec3::Z, 0.0);

        let mut a = HitRecord::default();
        let mut b = HitRecord::default();
        assert!(rotated.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut a, &mut rng));
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut b, &mut rng));
        assert!((a.t - b.t).abs() < 1e-4);
        assert!((a.normal - b.normal).length() < 1e-4);
    }
}
