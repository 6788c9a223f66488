//! Planar quadrilateral primitive and the box shape built from six of them.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    Material,
};
use ember_math::{Aabb, Interval, Point3, Ray, Vec3};
use rand::RngCore;

/// Rays whose direction is this close to parallel with the plane are misses.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A parallelogram spanned by corner `q` and edge vectors `u` and `v`.
pub struct Quad {
    q: Point3,
    u: Vec3,
    v: Vec3,
    /// `n / (n . n)`, projects plane points onto the (u, v) basis
    w: Vec3,
    normal: Vec3,
    /// Plane constant: normal . x = d
    d: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Quad {
    pub fn new(q: Point3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let n = u.cross(v);
        let normal = n.normalize_or_zero();
        let d = normal.dot(q);
        let w = n / n.dot(n);

        let diagonal1 = Aabb::from_points(q, q + u + v);
        let diagonal2 = Aabb::from_points(q + u, q + v);

        Self {
            q,
            u,
            v,
            w,
            normal,
            d,
            material,
            bbox: Aabb::surrounding(&diagonal1, &diagonal2),
        }
    }

    /// Planar coordinates (alpha, beta) of a point on the supporting plane.
    fn planar_coordinates(&self, p: Point3) -> (f32, f32) {
        let hit_vector = p - self.q;
        let alpha = self.w.dot(hit_vector.cross(self.v));
        let beta = self.w.dot(self.u.cross(hit_vector));
        (alpha, beta)
    }
}

impl Hittable for Quad {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        _rng: &mut dyn RngCore,
    ) -> bool {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_EPSILON {
            return false;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.contains(t) {
            return false;
        }

        let intersection = ray.at(t);
        let (alpha, beta) = self.planar_coordinates(intersection);
        if !Interval::UNIT.contains(alpha) || !Interval::UNIT.contains(beta) {
            return false;
        }

        rec.t = t;
        rec.p = intersection;
        rec.u = alpha;
        rec.v = beta;
        rec.material = self.material.as_ref();
        rec.set_face_normal(ray, self.normal);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// The six faces of the axis-aligned box with opposite corners `a` and `b`.
pub fn make_box(a: Point3, b: Point3, material: Arc<dyn Material>) -> HittableList {
    let mut sides = HittableList::new();

    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    let faces = [
        (Vec3::new(min.x, min.y, max.z), dx, dy),  // front
        (Vec3::new(max.x, min.y, max.z), -dz, dy), // right
        (Vec3::new(max.x, min.y, min.z), -dx, dy), // back
        (Vec3::new(min.x, min.y, min.z), dz, dy),  // left
        (Vec3::new(min.x, max.y, max.z), dx, -dz), // top
        (Vec3::new(min.x, min.y, min.z), dx, dz),  // bottom
    ];

    for (q, u, v) in faces {
        sides.add(Arc::new(Quad::new(q, u, v, material.clone())));
    }

    sides
}
