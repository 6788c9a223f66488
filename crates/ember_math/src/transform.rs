// Transform utilities for Mat4
//
// glam::Mat4 already provides transform_point3(), transform_vector3() and
// inverse(); this adds the pieces instancing wrappers need on top.

use crate::Aabb;
use glam::{Mat3, Mat4, Vec3};

/// Extension trait for Mat4 used by the transform wrappers.
pub trait Mat4Ext {
    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;

    /// Transform a surface normal (inverse transpose of the upper 3x3).
    fn transform_normal(&self, normal: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let mut lo = Vec3::splat(f32::INFINITY);
        let mut hi = Vec3::splat(f32::NEG_INFINITY);

        for corner in aabb.corners() {
            let p = self.transform_point3(corner);
            lo = lo.min(p);
            hi = hi.max(p);
        }

        Aabb::from_points(lo, hi)
    }

    fn transform_normal(&self, normal: Vec3) -> Vec3 {
        let m = Mat3::from_mat4(*self).inverse().transpose();
        m * normal
    }
}
