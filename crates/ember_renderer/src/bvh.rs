//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree built once over the scene's primitives. Each node owns its
//! bounding box and exactly two children; a subtree of one primitive puts
//! that primitive in both slots. The tree is immutable after construction
//! and safe to traverse from many threads at once.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable, HittableList};
use ember_math::{Aabb, Interval, Ray};
use rand::RngCore;

/// BVH node over shared primitives.
pub enum BvhNode {
    /// Internal or leaf node with two children (possibly the same primitive).
    Node {
        left: Arc<dyn Hittable>,
        right: Arc<dyn Hittable>,
        bbox: Aabb,
    },
    /// Tree built from no primitives; never hit.
    Empty,
}

impl BvhNode {
    /// Build a BVH over the primitives of a list.
    pub fn from_list(list: HittableList) -> Self {
        Self::new(list.into_objects())
    }

    /// Build a BVH over `objects`.
    ///
    /// Median split by count along the longest axis of each node's bounds,
    /// ordering primitives by the minimum of their box on that axis.
    pub fn new(mut objects: Vec<Arc<dyn Hittable>>) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }

        let count = objects.len();
        let (root, depth) = Self::build(&mut objects);
        log::debug!("Built BVH over {} primitives (depth {})", count, depth);
        root
    }

    /// Recursive construction over a mutable slice. Returns the node and its depth.
    fn build(objects: &mut [Arc<dyn Hittable>]) -> (Self, usize) {
        let bbox = objects.iter().fold(Aabb::EMPTY, |acc, obj| {
            Aabb::surrounding(&acc, &obj.bounding_box())
        });
        let axis = bbox.longest_axis();

        let (left, right, depth): (Arc<dyn Hittable>, Arc<dyn Hittable>, usize) =
            match objects.len() {
                1 => (objects[0].clone(), objects[0].clone(), 1),
                2 => (objects[0].clone(), objects[1].clone(), 1),
                n => {
                    objects.sort_by(|a, b| box_compare(a.as_ref(), b.as_ref(), axis));

                    let (lo, hi) = objects.split_at_mut(n / 2);
                    let (left, left_depth) = Self::build(lo);
                    let (right, right_depth) = Self::build(hi);
                    (
                        Arc::new(left),
                        Arc::new(right),
                        1 + left_depth.max(right_depth),
                    )
                }
            };

        (BvhNode::Node { left, right, bbox }, depth)
    }
}

/// Order two primitives by the minimum of their bounding box on `axis`.
fn box_compare(a: &dyn Hittable, b: &dyn Hittable, axis: usize) -> Ordering {
    let a_min = a.bounding_box().axis_interval(axis).min;
    let b_min = b.bounding_box().axis_interval(axis).min;
    a_min.total_cmp(&b_min)
}

impl Hittable for BvhNode {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Node { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec, rng);

                // Only check right up to the closest hit so far
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rec, rng);

                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Node { bbox, .. } => *bbox,
        }
    }
}
