use crate::{Interval, Point3, Ray, Vec3};

/// Minimum extent of any axis. Thinner axes are padded symmetrically so the
/// slab test stays robust against flat geometry such as quads.
const MIN_AXIS_SIZE: f32 = 0.0001;

/// Axis-aligned bounding box, one interval per axis.
///
/// Boxes are immutable once built. Every constructor except the `EMPTY` and
/// `UNIVERSE` constants pads degenerate axes to `MIN_AXIS_SIZE`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points, given in any order.
    pub fn from_points(a: Point3, b: Point3) -> Self {
        Self::new(
            Interval::new(a.x.min(b.x), a.x.max(b.x)),
            Interval::new(a.y.min(b.y), a.y.max(b.y)),
            Interval::new(a.z.min(b.z), a.z.max(b.z)),
        )
    }

    /// The smallest box enclosing both `box0` and `box1`.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self::new(
            Interval::surrounding(&box0.x, &box1.x),
            Interval::surrounding(&box0.y, &box1.y),
            Interval::surrounding(&box0.z, &box1.z),
        )
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Slab test: does `r` pass through the box for some `t` in `ray_t`?
    ///
    /// A zero direction component produces infinite slab bounds, which IEEE
    /// arithmetic folds into the running range without special casing.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let ax = self.axis_interval(axis);
            let adinv = 1.0 / r.direction[axis];

            let t0 = (ax.min - r.origin[axis]) * adinv;
            let t1 = (ax.max - r.origin[axis]) * adinv;

            if t0 < t1 {
                ray_t.min = ray_t.min.max(t0);
                ray_t.max = ray_t.max.min(t1);
            } else {
                ray_t.min = ray_t.min.max(t1);
                ray_t.max = ray_t.max.min(t0);
            }

            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    ///
    /// On ties the later axis wins.
    pub fn longest_axis(&self) -> usize {
        if self.x.size() > self.y.size() {
            if self.x.size() > self.z.size() {
                0
            } else {
                2
            }
        } else if self.y.size() > self.z.size() {
            1
        } else {
            2
        }
    }

    /// Minimum corner.
    pub fn min(&self) -> Point3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Maximum corner.
    pub fn max(&self) -> Point3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min(), self.max());
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Point3 {
        (self.min() + self.max()) * 0.5
    }

    /// Translate (move) the AABB by an offset vector.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb::new(
            self.x.offset(offset.x),
            self.y.offset(offset.y),
            self.z.offset(offset.z),
        )
    }

    fn pad_to_minimums(&mut self) {
        if self.x.size() < MIN_AXIS_SIZE {
            self.x = self.x.expand(MIN_AXIS_SIZE);
        }
        if self.y.size() < MIN_AXIS_SIZE {
            self.y = self.y.expand(MIN_AXIS_SIZE);
        }
        if self.z.size() < MIN_AXIS_SIZE {
            self.z = self.z.expand(MIN_AXIS_SIZE);
        }
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Independent slab computation used as an oracle.
    fn brute_force_hit(aabb: &Aabb, r: &Ray, ray_t: Interval) -> bool {
        let mut t_enter = ray_t.min;
        let mut t_exit = ray_t.max;
        for axis in 0..3 {
            let ax = aabb.axis_interval(axis);
            let o = r.origin[axis];
            let d = r.direction[axis];
            if d == 0.0 {
                if o < ax.min || o > ax.max {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / d;
            let a = (ax.min - o) * inv;
            let b = (ax.max - o) * inv;
            t_enter = t_enter.max(a.min(b));
            t_exit = t_exit.min(a.max(b));
        }
        t_enter < t_exit
    }

    #[test]
    fn test_aabb_from_points_any_order() {
        let a = Aabb::from_points(Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(a.x, Interval::new(0.0, 10.0));
        assert_eq!(a.y, Interval::new(0.0, 10.0));
        assert_eq!(a.z, Interval::new(0.0, 10.0));
    }

    #[test]
    fn test_aabb_pads_flat_axis() {
        let flat = Aabb::from_points(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0));

        assert!(flat.z.size() >= MIN_AXIS_SIZE * 0.999);
        assert!(flat.z.contains(0.0));

        // A ray straight down the flat axis must still register.
        let ray = Ray::new(Vec3::new(0.5, 0.5, 1.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        assert!(flat.hit(&ray, Interval::new(0.0, 10.0)));
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, -2.0, 3.0), Vec3::new(10.0, 1.0, 10.0));
        let s = Aabb::surrounding(&box1, &box2);

        assert_eq!(s.x, Interval::new(0.0, 10.0));
        assert_eq!(s.y, Interval::new(-2.0, 5.0));

        // Empty is the identity for union.
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &box1), box1);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        let toward = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, 0.0);
        assert!(aabb.hit(&toward, Interval::new(0.0, 100.0)));

        let away = Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z, 0.0);
        assert!(!aabb.hit(&away, Interval::new(0.0, 100.0)));

        let beside = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Z, 0.0);
        assert!(!aabb.hit(&beside, Interval::new(0.0, 100.0)));

        // Box lies beyond the end of the query range.
        assert!(!aabb.hit(&toward, Interval::new(0.0, 3.0)));
    }

    #[test]
    fn test_aabb_hit_empty_range() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, 0.0);

        assert!(!aabb.hit(&ray, Interval::EMPTY));
        assert!(!aabb.hit(&ray, Interval::new(5.0, 5.0)));
    }

    #[test]
    fn test_aabb_hit_axis_parallel_ray_does_not_panic() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        // Zero x and y direction components: division yields infinities.
        let inside_slabs = Ray::new(Vec3::new(0.5, 0.5, -3.0), Vec3::Z, 0.0);
        assert!(aabb.hit(&inside_slabs, Interval::UNIVERSE));

        let outside_slabs = Ray::new(Vec3::new(2.0, 0.5, -3.0), Vec3::Z, 0.0);
        assert!(!aabb.hit(&outside_slabs, Interval::UNIVERSE));
    }

    #[test]
    fn test_aabb_hit_matches_brute_force() {
        let boxes = [
            Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0)),
            Aabb::from_points(Vec3::new(2.0, -1.0, 0.5), Vec3::new(4.0, 3.0, 1.5)),
            Aabb::from_points(Vec3::new(-3.0, 0.0, -3.0), Vec3::new(3.0, 0.0, 3.0)),
        ];

        // Deterministic spread of origins and directions.
        let mut checked = 0;
        for i in -3i32..=3 {
            for j in -3i32..=3 {
                for k in -2i32..=2 {
                    let origin = Vec3::new(i as f32 * 1.7, j as f32 * 1.3, -6.0 + k as f32);
                    let direction = Vec3::new(
                        (j - i) as f32 * 0.25,
                        (i + k) as f32 * 0.2,
                        1.0 + (k as f32) * 0.1,
                    );
                    let r = Ray::new(origin, direction, 0.0);
                    let range = Interval::new(0.001, 50.0);
                    for b in &boxes {
                        assert_eq!(
                            b.hit(&r, range),
                            brute_force_hit(b, &r, range),
                            "box {:?} ray {:?}",
                            b,
                            r
                        );
                        checked += 1;
                    }
                }
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_aabb_centroid() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
        assert_eq!(aabb.centroid(), Vec3::splat(5.0));
    }

    #[test]
    fn test_aabb_longest_axis() {
        assert_eq!(Aabb::from_points(Vec3::ZERO, Vec3::new(10.0, 1.0, 1.0)).longest_axis(), 0);
        assert_eq!(Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 10.0, 1.0)).longest_axis(), 1);
        assert_eq!(Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 1.0, 10.0)).longest_axis(), 2);

        // Ties go to the later axis.
        assert_eq!(Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 1.0)).longest_axis(), 1);
        assert_eq!(Aabb::from_points(Vec3::ZERO, Vec3::splat(5.0)).longest_axis(), 2);
    }

    #[test]
    fn test_aabb_translate() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        let translated = aabb.translate(Vec3::new(5.0, 0.0, 0.0));

        assert_eq!(translated.x, Interval::new(5.0, 6.0));
        assert_eq!(translated.y.min, 0.0);
    }

    #[test]
    fn test_aabb_corners() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        let corners = aabb.corners();

        assert_eq!(corners[0], Vec3::ZERO);
        assert_eq!(corners[7], Vec3::ONE);
        assert!(corners.iter().all(|c| c.min_element() >= 0.0 && c.max_element() <= 1.0));
    }
}
