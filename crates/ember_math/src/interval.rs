/// Closed range `[min, max]` over `f32`.
///
/// Ray queries narrow one of these as hits are found; bounding boxes keep
/// one per axis. `min > max` means empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    /// `[0, 1]`: texture coordinates and quad barycentrics live here.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Negative for empty intervals.
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Endpoints included.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Endpoints excluded. Hit tests use this so a root sitting exactly on
    /// `ray_t.min` is rejected.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Grow by `delta` in total, half on each end.
    pub fn expand(&self, delta: f32) -> Interval {
        let half = 0.5 * delta;
        Interval::new(self.min - half, self.max + half)
    }

    /// Slide both ends by `displacement`.
    pub fn offset(&self, displacement: f32) -> Interval {
        Interval::new(self.min + displacement, self.max + displacement)
    }

    /// Tightest interval holding both `a` and `b`.
    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_and_emptiness() {
        assert_eq!(Interval::new(-2.0, 3.0).size(), 5.0);
        assert!(!Interval::UNIT.is_empty());
        assert!(Interval::new(1.0, 0.0).is_empty());

        // A single point is a valid, zero-size interval.
        let point = Interval::new(4.0, 4.0);
        assert!(!point.is_empty());
        assert_eq!(point.size(), 0.0);
    }

    #[test]
    fn test_contains_vs_surrounds_at_endpoints() {
        let t = Interval::new(0.001, 8.0);
        for x in [0.001, 8.0] {
            assert!(t.contains(x));
            assert!(!t.surrounds(x));
        }
        assert!(t.surrounds(4.0));
        assert!(!t.contains(0.0) && !t.surrounds(8.5));
    }

    #[test]
    fn test_clamp_to_unit() {
        assert_eq!(Interval::UNIT.clamp(-0.2), 0.0);
        assert_eq!(Interval::UNIT.clamp(0.3), 0.3);
        assert_eq!(Interval::UNIT.clamp(7.0), 1.0);
    }

    #[test]
    fn test_expand_and_offset() {
        let grown = Interval::new(0.0, 10.0).expand(4.0);
        assert_eq!(grown, Interval::new(-2.0, 12.0));

        let moved = Interval::new(1.0, 5.0).offset(-3.0);
        assert_eq!(moved, Interval::new(-2.0, 2.0));
    }

    #[test]
    fn test_surrounding_ignores_empty() {
        let a = Interval::new(1.0, 2.0);
        let b = Interval::new(-3.0, 1.5);
        assert_eq!(Interval::surrounding(&a, &b), Interval::new(-3.0, 2.0));
        assert_eq!(Interval::surrounding(&Interval::EMPTY, &a), a);
        assert_eq!(Interval::default(), Interval::EMPTY);
    }

    #[test]
    fn test_empty_and_universe() {
        assert!(Interval::EMPTY.is_empty());
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(!Interval::EMPTY.contains(f32::INFINITY));

        assert!(Interval::UNIVERSE.contains(-1e30));
        assert!(Interval::UNIVERSE.surrounds(1e30));
        assert_eq!(Interval::UNIVERSE.size(), f32::INFINITY);
    }
}
