/// A closed range of ray parameters `[min, max]`.
///
/// Used for slab intersections and for clamping color channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// True when no value lies strictly inside the interval.
    pub fn is_empty(&self) -> bool {
        self.min >= self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Valid range of a color channel.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_clamp() {
        assert_eq!(Interval::UNIT.clamp(-0.5), 0.0);
        assert_eq!(Interval::UNIT.clamp(0.25), 0.25);
        assert_eq!(Interval::UNIT.clamp(3.0), 1.0);
    }

    #[test]
    fn test_interval_empty_and_universe() {
        assert!(Interval::EMPTY.is_empty());
        assert!(!Interval::UNIVERSE.is_empty());
        assert!(Interval::new(2.0, 2.0).is_empty());
        assert!(!Interval::new(1.0, 2.0).is_empty());
    }
}
