//! Interception shims: open, break, place-adjacent, automation, fire, and
//! explosion, plus the tick hook that applies paired-chest extensions.
//!
//! Denied breaks and placements resync the client, undoing its optimistic
//! prediction; that resync is part of the contract even though it is not
//! part of the pure decision.

use super::resolver;
use super::GuardService;
use crate::domain::{Access, Block, BlockPos, Direction};
use crate::ports::outbound::{Actor, WorldView};
use tracing::info;

impl GuardService {
    pub(crate) fn on_open_impl(
        &self,
        world: &dyn WorldView,
        actor: &Actor,
        pos: BlockPos,
    ) -> Access {
        let decision = self.can_access_impl(world, actor, pos);
        if let Some(reason) = decision.reason() {
            self.tell(actor, reason);
        }
        decision
    }

    pub(crate) fn on_break_impl(
        &self,
        world: &dyn WorldView,
        actor: &Actor,
        pos: BlockPos,
    ) -> Access {
        let block = world.block_at(pos);

        if block.is_lockable_container() {
            return self.break_container(world, actor, pos);
        }
        if block.is_wall_sign() {
            return self.break_sign(world, actor, pos);
        }

        Access::Allow
    }

    fn break_container(&self, world: &dyn WorldView, actor: &Actor, pos: BlockPos) -> Access {
        // Breaking the unlocked half of a pair still hits the lock.
        let group = resolver::container_group(world, pos);
        let Some(lock) = self.find_lock_in_group(&group) else {
            return Access::Allow;
        };

        if self.owner_ban_bypassed(&lock) {
            return Access::Allow;
        }

        if actor.id == lock.owner_id || self.is_admin(actor) {
            self.registry().write().remove(lock.primary_position());
            info!(
                player = %actor.name,
                container = %pos,
                "locked container broken by owner/admin, lock removed"
            );
            self.tell(actor, "Locked container broken. Lock has been removed.");
            return Access::Allow;
        }

        let reason = "Cannot break someone else's locked container.";
        self.tell(actor, reason);
        self.sync.resync_block(actor.id, pos);
        self.sync.resync_block_entity(actor.id, pos);
        Access::deny(reason)
    }

    fn break_sign(&self, world: &dyn WorldView, actor: &Actor, sign_pos: BlockPos) -> Access {
        let Some(attached) = resolver::attached_block(world, sign_pos) else {
            return Access::Allow;
        };

        let group = resolver::container_group(world, attached);
        let Some(lock) = self.find_lock_in_group(&group) else {
            return Access::Allow;
        };
        if lock.sign_pos != sign_pos {
            // Some other plaque on the same container; not governing.
            return Access::Allow;
        }

        if self.owner_ban_bypassed(&lock) {
            return Access::Allow;
        }

        if actor.id == lock.owner_id {
            return Access::Allow;
        }

        if self.is_admin(actor) {
            info!(admin = %actor.name, sign = %sign_pos, "admin broke governing sign");
            return Access::Allow;
        }

        let reason = "You cannot break someone else's [private] sign.";
        self.tell(actor, reason);
        self.sync.resync_block(actor.id, sign_pos);
        self.sync.resync_block_entity(actor.id, sign_pos);
        Access::deny(reason)
    }

    /// Chest placement guard: pairing with a locked chest is reserved for
    /// its owner or an admin. Permitted placements schedule the extension
    /// check for the next tick, once the host has committed the block.
    pub(crate) fn on_place_chest_impl(
        &self,
        world: &dyn WorldView,
        actor: &Actor,
        placed_pos: BlockPos,
    ) -> Access {
        for dir in Direction::HORIZONTAL {
            let adjacent = placed_pos.relative(dir);
            if !world.block_at(adjacent).is_chest() {
                continue;
            }
            let Some(lock) = self.lock_at(adjacent) else {
                continue;
            };

            if actor.id != lock.owner_id && !self.is_admin(actor) {
                let reason = "You cannot place a chest next to someone else's locked chest.";
                self.tell(actor, reason);
                self.sync.resync_inventory(actor.id);
                return Access::deny(reason);
            }

            self.queue_extension_check(placed_pos);
        }

        Access::Allow
    }

    pub(crate) fn on_place_sign_impl(
        &self,
        world: &dyn WorldView,
        actor: &Actor,
        target_pos: BlockPos,
    ) -> Access {
        if !world.block_at(target_pos).is_lockable_container() {
            return Access::Allow;
        }
        let Some(lock) = self.lock_at(target_pos) else {
            return Access::Allow;
        };

        if actor.id == lock.owner_id || self.is_admin(actor) {
            return Access::Allow;
        }

        let reason = "You cannot place a sign on someone else's locked container.";
        self.tell(actor, reason);
        self.sync.resync_inventory(actor.id);
        Access::deny(reason)
    }

    /// Automated transfer (hopper and friends): denied unconditionally for
    /// locked containers, for every actor. Owner-banned bypass still opens
    /// the container up.
    pub(crate) fn is_automation_blocked_impl(&self, world: &dyn WorldView, pos: BlockPos) -> bool {
        if !world.block_at(pos).is_lockable_container() {
            return false;
        }
        let Some(lock) = self.lock_at(pos) else {
            return false;
        };

        !self.owner_ban_bypassed(&lock)
    }

    /// Protected coordinate for fire ticks and explosions: a locked
    /// container position or the governing plaque of a live lock.
    pub(crate) fn is_protected_impl(&self, world: &dyn WorldView, pos: BlockPos) -> bool {
        let block = world.block_at(pos);

        if block.is_lockable_container() {
            if let Some(lock) = self.lock_at(pos) {
                return !self.owner_ban_bypassed(&lock);
            }
            return false;
        }

        if let Block::WallSign { .. } = block {
            let Some(attached) = resolver::attached_block(world, pos) else {
                return false;
            };
            let Some(lock) = self.lock_at(attached) else {
                return false;
            };
            if lock.sign_pos != pos {
                return false;
            }
            return !self.owner_ban_bypassed(&lock);
        }

        false
    }

    /// Apply scheduled paired-chest extensions. Runs on the tick after the
    /// placement so the resolver sees the committed pairing.
    pub(crate) fn tick_impl(&self, world: &dyn WorldView) {
        for placed_pos in self.drain_extension_checks() {
            if !world.block_at(placed_pos).is_chest() {
                continue; // Placement never committed.
            }

            let group = resolver::container_group(world, placed_pos);
            let Some(lock) = self.find_lock_in_group(&group) else {
                continue;
            };
            if group.len() <= lock.container_positions.len() {
                continue;
            }

            let old_size = lock.container_positions.len();
            let updated = lock.with_containers(group, self.now_ms());
            {
                let mut registry = self.registry().write();
                registry.remove(lock.primary_position());
                let _ = registry.add(updated);
            }

            info!(
                sign = %lock.sign_pos,
                from = old_size,
                to = old_size + 1,
                "lock extended to paired chest"
            );
        }
    }
}
