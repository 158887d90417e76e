use std::ops::{Add, Sub};

/// A board square as signed file/rank coordinates.
///
/// Signed so that a king step off the edge is representable; bounds are checked by
/// [`crate::core::board::Board::contains`], never by wrapping arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn chebyshev(self, other: Coord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    #[inline]
    pub fn manhattan(self, other: Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev distance of at most one (includes the square itself).
    #[inline]
    pub fn touches(self, other: Coord) -> bool {
        self.chebyshev(other) <= 1
    }

    #[inline]
    pub fn transposed(self) -> Coord {
        Coord::new(self.y, self.x)
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The 8 king steps, counter-clockwise starting east.
///
/// Move enumeration (and therefore strategy tie-breaking) follows this order.
pub const KING_STEPS: [Coord; 8] = [
    Coord { x: 1, y: 0 },
    Coord { x: 1, y: 1 },
    Coord { x: 0, y: 1 },
    Coord { x: -1, y: 1 },
    Coord { x: -1, y: 0 },
    Coord { x: -1, y: -1 },
    Coord { x: 0, y: -1 },
    Coord { x: 1, y: -1 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics() {
        let a = Coord::new(1, 4);
        let b = Coord::new(3, 1);
        assert_eq!(a.chebyshev(b), 3);
        assert_eq!(a.manhattan(b), 5);
        assert!(!a.touches(b));
        assert!(a.touches(Coord::new(2, 5)));
    }
}
