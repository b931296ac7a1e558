//! The sign-edit state machine: the only registry writer during normal
//! operation.
//!
//! A proposed edit resolves against the current registry into one of
//! {create lock, update allow-list, dissolve lock, reject edit, pass
//! through}. The edited side is judged by the proposed new text; the
//! opposite side by the plaque's currently stored text.

use super::resolver;
use super::GuardService;
use crate::domain::{
    allowed_users_from_both_sides, has_private_marker, normalize_username, Access, BlockPos,
    LockRecord, Side, SignText,
};
use crate::ports::outbound::{Actor, WorldView};
use std::collections::BTreeSet;
use tracing::{info, warn};

impl GuardService {
    pub(crate) fn handle_sign_edit_impl(
        &self,
        world: &dyn WorldView,
        actor: &Actor,
        sign_pos: BlockPos,
        proposed: &SignText,
        side: Side,
    ) -> Access {
        if !world.block_at(sign_pos).is_wall_sign() {
            return Access::Allow;
        }

        let Some(attached) = resolver::attached_block(world, sign_pos) else {
            return Access::Allow;
        };

        let group = resolver::container_group(world, attached);
        if group.is_empty() {
            return Access::Allow;
        }

        let stored_other = resolver::stored_side_text(world, sign_pos, side.opposite());
        let is_private = has_private_marker(proposed) || has_private_marker(&stored_other);

        // Any member of the group may carry the lock; searching the whole
        // group closes the pair-extension loophole where a second plaque
        // targets the other half.
        match self.find_lock_in_group(&group) {
            Some(lock) if lock.sign_pos == sign_pos => {
                self.edit_governing_sign(actor, sign_pos, proposed, &stored_other, lock, is_private)
            }
            Some(_) => {
                if is_private {
                    let reason = "This container is already protected by another [private] sign.";
                    self.tell(actor, reason);
                    Access::deny(reason)
                } else {
                    Access::Allow
                }
            }
            None => self.create_lock(actor, sign_pos, proposed, &stored_other, group, is_private),
        }
    }

    /// Owner or admin editing the lock's own governing plaque.
    fn edit_governing_sign(
        &self,
        actor: &Actor,
        sign_pos: BlockPos,
        proposed: &SignText,
        stored_other: &SignText,
        lock: LockRecord,
        is_private: bool,
    ) -> Access {
        if actor.id != lock.owner_id && !self.is_admin(actor) {
            let reason = "You cannot edit someone else's [private] sign.";
            self.tell(actor, reason);
            return Access::deny(reason);
        }

        if !is_private {
            info!(
                player = %actor.name,
                sign = %sign_pos,
                "removed [private] from sign, dissolving lock"
            );
            self.registry().write().remove(lock.primary_position());
            self.tell(actor, "Lock removed from container.");
            return Access::Allow;
        }

        let mut allowed = allowed_users_from_both_sides(proposed, stored_other);
        self.filter_owner(&mut allowed, &lock.owner_name);

        if allowed != lock.allowed {
            let mut updated = lock.with_allowed(allowed, self.now_ms());
            if actor.id == lock.owner_id {
                // Deliberate re-edit by the owner refreshes the cached name.
                updated.owner_name = actor.name.clone();
            }

            let count = updated.allowed.len();
            {
                let mut registry = self.registry().write();
                registry.remove(lock.primary_position());
                if let Err(err) = registry.add(updated) {
                    warn!(%err, sign = %sign_pos, "failed to re-add updated lock");
                }
            }

            info!(player = %actor.name, sign = %sign_pos, "updated allowed users on lock");
            self.tell(
                actor,
                &format!("Lock updated. {count} player(s) now have access."),
            );
        }

        Access::Allow
    }

    /// No lock on the group yet; a qualifying edit creates one.
    fn create_lock(
        &self,
        actor: &Actor,
        sign_pos: BlockPos,
        proposed: &SignText,
        stored_other: &SignText,
        group: BTreeSet<BlockPos>,
        is_private: bool,
    ) -> Access {
        if !is_private {
            return Access::Allow;
        }

        let mut allowed = allowed_users_from_both_sides(proposed, stored_other);
        self.filter_owner(&mut allowed, &actor.name);

        let group_size = group.len();
        let record = LockRecord::new(
            actor.id,
            actor.name.clone(),
            sign_pos,
            group,
            allowed,
            self.now_ms(),
        );

        if let Err(err) = self.registry().write().add(record) {
            warn!(%err, sign = %sign_pos, "failed to add new lock");
            let reason = "This container is already protected by another [private] sign.";
            self.tell(actor, reason);
            return Access::deny(reason);
        }

        info!(
            player = %actor.name,
            sign = %sign_pos,
            blocks = group_size,
            "created new lock"
        );
        self.tell(
            actor,
            "Container is now protected. Only you and listed players can access it.",
        );

        Access::Allow
    }

    /// The owner never appears in their own allow-list.
    fn filter_owner(&self, allowed: &mut BTreeSet<String>, owner_name: &str) {
        let prefix = &self.config.floodgate_prefix;
        let owner = normalize_username(owner_name, prefix);
        allowed.retain(|name| normalize_username(name, prefix) != owner);
    }
}
