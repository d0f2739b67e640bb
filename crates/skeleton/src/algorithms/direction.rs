//! The eight compass headings of the pixel grid.
//!
//! Indices run counter-clockwise on screen starting at south (image rows grow
//! downward): `S, SE, E, NE, N, NW, W, SW`. Adjacent indices are 45° apart, so
//! index arithmetic modulo 8 turns left or right by one step.

use strum::{Display, EnumIter};

use crate::types::GridPoint;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Direction {
    South = 0,
    SouthEast = 1,
    East = 2,
    NorthEast = 3,
    North = 4,
    NorthWest = 5,
    West = 6,
    SouthWest = 7,
}

const OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

// Indexed by [dy + 1][dx + 1].
const FROM_OFFSET: [[Option<Direction>; 3]; 3] = [
    [Some(Direction::NorthWest), Some(Direction::North), Some(Direction::NorthEast)],
    [Some(Direction::West), None, Some(Direction::East)],
    [Some(Direction::SouthWest), Some(Direction::South), Some(Direction::SouthEast)],
];

impl Direction {
    /// All headings in index order. This is also the search order used when no
    /// heading has been established yet.
    pub const ALL: [Direction; 8] = [
        Direction::South,
        Direction::SouthEast,
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Heading for any integer index, wrapped modulo 8.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(8) as usize]
    }

    pub const fn offset(self) -> (i32, i32) {
        OFFSETS[self as usize]
    }

    /// Inverse of [`Direction::offset`]; `None` unless `(dx, dy)` is a unit step.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
            return None;
        }
        FROM_OFFSET[(dy + 1) as usize][(dx + 1) as usize]
    }

    /// Direction of the unit step `from -> to`.
    pub fn between(from: GridPoint, to: GridPoint) -> Option<Self> {
        Self::from_offset(to.x - from.x, to.y - from.y)
    }

    /// Turn by `steps` multiples of 45°.
    pub fn rotate(self, steps: i32) -> Self {
        Self::from_index(i32::from(self.index()) + steps)
    }

    /// Number of 45° steps separating two headings (0..=4).
    pub fn angular_distance(self, other: Self) -> u8 {
        let d = (i32::from(self.index()) - i32::from(other.index())).rem_euclid(8);
        d.min(8 - d) as u8
    }

    /// Straight ahead first, then the two 45° neighbors.
    pub fn cone(self) -> [Self; 3] {
        [self, self.rotate(-1), self.rotate(1)]
    }

    pub const fn step(self, from: GridPoint) -> GridPoint {
        let (dx, dy) = self.offset();
        from.translate(dx, dy)
    }
}
