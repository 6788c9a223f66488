//! Ember math - vectors, ranges, rays and bounding boxes.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Mat4Ext;

/// A position in 3D space.
pub type Point3 = Vec3;

/// Linear RGB color, components nominally in [0, 1].
pub type Color = Vec3;

/// Returns true if every component of `v` is within `1e-8` of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    const S: f32 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}
