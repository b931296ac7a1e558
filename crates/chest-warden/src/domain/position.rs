//! World coordinates and horizontal directions.
//!
//! `BlockPos` is the coordinate key for every registry index. Its packed
//! 64-bit form provides the total order used for group-id computation, so
//! group identity is independent of set iteration order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer block coordinate in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Pack into a single i64: 26 bits x, 26 bits z, 12 bits y.
    ///
    /// Matches the host's canonical packing, which keeps the sort order
    /// stable across saves.
    pub fn packed(&self) -> i64 {
        ((self.x as i64 & 0x3FF_FFFF) << 38)
            | ((self.z as i64 & 0x3FF_FFFF) << 12)
            | (self.y as i64 & 0xFFF)
    }

    /// Chunk coordinate along x (16-block chunks, floor division).
    pub fn chunk_x(&self) -> i32 {
        self.x >> 4
    }

    /// Chunk coordinate along z.
    pub fn chunk_z(&self) -> i32 {
        self.z >> 4
    }

    /// The neighboring position one block in `dir`.
    pub fn relative(&self, dir: Direction) -> BlockPos {
        let (dx, dz) = dir.offset();
        BlockPos::new(self.x + dx, self.y, self.z + dz)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

/// A horizontal cardinal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All four horizontal directions.
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Block offset (dx, dz) for this direction.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Rotation viewed from above: North -> East -> South -> West.
    pub fn clockwise(&self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub fn counter_clockwise(&self) -> Direction {
        self.clockwise().opposite()
    }
}
