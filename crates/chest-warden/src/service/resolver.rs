//! Container-group and plaque resolution against the live world.
//!
//! The world is authoritative: a chest whose pairing metadata points at a
//! missing partner still resolves to a singleton group.

use crate::domain::{
    has_private_marker, Block, BlockPos, ChestPairing, Direction, SignText,
};
use crate::ports::outbound::WorldView;
use std::collections::BTreeSet;

/// Resolve the set of coordinates forming one logical inventory.
///
/// Empty for non-containers, `{pos}` for a barrel or single chest,
/// `{pos, partner}` for a paired chest whose partner is present and also
/// non-single.
pub fn container_group(world: &dyn WorldView, pos: BlockPos) -> BTreeSet<BlockPos> {
    let mut group = BTreeSet::new();
    let block = world.block_at(pos);

    if !block.is_lockable_container() {
        return group;
    }
    group.insert(pos);

    if let Block::Chest { facing, pairing } = block {
        if pairing != ChestPairing::Single {
            let offset_dir = match pairing {
                ChestPairing::Left => facing.clockwise(),
                _ => facing.counter_clockwise(),
            };
            let partner = pos.relative(offset_dir);

            if let Block::Chest {
                pairing: partner_pairing,
                ..
            } = world.block_at(partner)
            {
                if partner_pairing != ChestPairing::Single {
                    group.insert(partner);
                }
            }
        }
    }

    group
}

/// The coordinate a wall plaque is mounted against, if the position holds
/// a wall plaque at all.
pub fn attached_block(world: &dyn WorldView, sign_pos: BlockPos) -> Option<BlockPos> {
    match world.block_at(sign_pos) {
        Block::WallSign { facing } => Some(sign_pos.relative(facing.opposite())),
        _ => None,
    }
}

/// Dangling-lock check: the governing plaque still exists, is still a wall
/// plaque, still carries the private marker on either side, and is still
/// mounted against a coordinate of the record's container group.
pub fn is_valid_private_sign(
    world: &dyn WorldView,
    sign_pos: BlockPos,
    container_positions: &BTreeSet<BlockPos>,
) -> bool {
    let Some(attached) = attached_block(world, sign_pos) else {
        return false;
    };

    let Some(entity) = world.sign_at(sign_pos) else {
        return false;
    };
    if !has_private_marker(&entity.front) && !has_private_marker(&entity.back) {
        return false;
    }

    container_positions.contains(&attached)
}

/// Human-facing name of a container group, for admin output.
pub fn container_kind_name(world: &dyn WorldView, positions: &BTreeSet<BlockPos>) -> String {
    let Some(first) = positions.iter().next() else {
        return "Unknown".to_string();
    };

    match world.block_at(*first) {
        Block::Barrel => "Barrel".to_string(),
        Block::Chest { .. } if positions.len() > 1 => "Double Chest".to_string(),
        Block::Chest { .. } => "Chest".to_string(),
        _ => "Container".to_string(),
    }
}

/// Stored text of one plaque side, empty when the sign entity is missing.
pub fn stored_side_text(
    world: &dyn WorldView,
    sign_pos: BlockPos,
    side: crate::domain::Side,
) -> SignText {
    world
        .sign_at(sign_pos)
        .map(|entity| entity.side(side).clone())
        .unwrap_or_default()
}
