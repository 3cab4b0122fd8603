use crate::angle;
use derive_more::{Display, Into};

pub const DETENT_COUNT: usize = 12;
pub const DETENT_STEP: f64 = 360.0 / DETENT_COUNT as f64;

/// One of the twelve 30 degree rest positions, counted clockwise from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Into)]
pub struct Detent(usize);

impl Detent {
    pub fn new(index: usize) -> Self {
        Self(index % DETENT_COUNT)
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn next(self) -> Self {
        Self::new(self.0 + 1)
    }

    pub fn prev(self) -> Self {
        Self::new(self.0 + DETENT_COUNT - 1)
    }

    pub fn degrees(self) -> f64 {
        self.0 as f64 * DETENT_STEP
    }

    pub fn nearest(deg: f64) -> Self {
        Self::new((angle::snap(deg) / DETENT_STEP).round() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_both_ways() {
        assert_eq!(Detent::new(11).next(), Detent::new(0));
        assert_eq!(Detent::new(0).prev(), Detent::new(11));
        assert_eq!(Detent::new(14).index(), 2);
    }

    #[test]
    fn test_nearest() {
        assert_eq!(Detent::nearest(47.0).index(), 2);
        assert_eq!(Detent::nearest(-20.0).index(), 11);
        assert_eq!(Detent::nearest(359.0).index(), 0);
        assert_eq!(Detent::new(3).degrees(), 90.0);
    }
}
