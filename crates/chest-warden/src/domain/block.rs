//! The narrow world-block vocabulary the subsystem consumes.
//!
//! The host owns world state; these types are the read-only view returned
//! through the [`WorldView`](crate::ports::outbound::WorldView) port.

use super::position::Direction;
use serde::{Deserialize, Serialize};

/// Pairing role of a chest block.
///
/// A non-`Single` chest forms one logical inventory with the partner chest
/// one block to its side (derived from facing and role).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChestPairing {
    Single,
    Left,
    Right,
}

/// Everything the subsystem needs to know about a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Block {
    Chest {
        facing: Direction,
        pairing: ChestPairing,
    },
    Barrel,
    WallSign {
        facing: Direction,
    },
    /// Any block the subsystem does not care about (including air).
    Other,
}

impl Block {
    /// True for containers that can carry a lock.
    pub fn is_lockable_container(&self) -> bool {
        matches!(self, Block::Chest { .. } | Block::Barrel)
    }

    pub fn is_chest(&self) -> bool {
        matches!(self, Block::Chest { .. })
    }

    pub fn is_wall_sign(&self) -> bool {
        matches!(self, Block::WallSign { .. })
    }
}

/// Which side of a plaque is being read or edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }
}

/// The four text lines of one plaque side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignText {
    pub lines: [String; 4],
}

impl SignText {
    pub fn new(lines: [&str; 4]) -> Self {
        Self {
            lines: lines.map(str::to_string),
        }
    }
}

/// Stored text of both plaque sides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignEntity {
    pub front: SignText,
    pub back: SignText,
}

impl SignEntity {
    pub fn side(&self, side: Side) -> &SignText {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }
}
