//! Tile-space coordinates (2D, y-up, integer valued).

use std::ops::Add;

/// Integer tile coordinate. World positions arrive as `f32` pairs that are
/// expected to be whole numbers; `from_world` floors them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Positions that can never lie on a map. NaN and infinities land here.
    pub const OFF_MAP: TilePos = TilePos::new(i32::MIN, i32::MIN);

    #[inline]
    pub fn from_world(x: f32, y: f32) -> Self {
        if !x.is_finite() || !y.is_finite() {
            return Self::OFF_MAP;
        }
        Self {
            x: x.floor() as i32,
            y: y.floor() as i32,
        }
    }

    #[inline]
    pub fn to_world(self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }

    /// `0 <= x < side && 0 <= y < side`
    #[inline]
    pub fn in_square(self, side: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as i64) < side as i64 && (self.y as i64) < side as i64
    }

    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl Add for TilePos {
    type Output = TilePos;

    fn add(self, rhs: TilePos) -> TilePos {
        TilePos::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

/// Orthogonal adjacency directions. Diagonals are never stored; they are
/// reached by chaining two links (`left` then `up`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// y-up: `Up` is +y.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_world_floors_fractional_negatives() {
        assert_eq!(TilePos::from_world(-0.5, 3.0), TilePos::new(-1, 3));
        assert_eq!(TilePos::from_world(2.0, 7.0), TilePos::new(2, 7));
    }

    #[test]
    fn non_finite_world_coordinates_are_off_map() {
        assert_eq!(TilePos::from_world(f32::NAN, 0.0), TilePos::OFF_MAP);
        assert_eq!(TilePos::from_world(0.0, f32::NAN), TilePos::OFF_MAP);
        assert_eq!(TilePos::from_world(f32::INFINITY, 1.0), TilePos::OFF_MAP);
        assert_eq!(TilePos::from_world(1.0, f32::NEG_INFINITY), TilePos::OFF_MAP);
        assert!(!TilePos::OFF_MAP.in_square(u32::MAX));
    }

    #[test]
    fn in_square_is_half_open() {
        assert!(TilePos::new(0, 0).in_square(4));
        assert!(TilePos::new(3, 3).in_square(4));
        assert!(!TilePos::new(4, 0).in_square(4));
        assert!(!TilePos::new(0, -1).in_square(4));
        assert!(!TilePos::new(i32::MIN, i32::MAX).in_square(4));
    }

    #[test]
    fn opposite_round_trips() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            let (dx, dy) = d.offset();
            let (ox, oy) = d.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }
}
