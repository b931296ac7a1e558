//! The access decision function.

use super::resolver;
use super::GuardService;
use crate::domain::{Access, BlockPos};
use crate::ports::outbound::{Actor, WorldView};
use tracing::info;

impl GuardService {
    /// `(actor, container group) -> Allow | Deny(reason)`.
    ///
    /// Consulted by every interception path. Also removes a dangling lock
    /// the moment it is observed, so the registry converges back to the
    /// world after sign destruction the subsystem did not see.
    pub(crate) fn can_access_impl(
        &self,
        world: &dyn WorldView,
        actor: &Actor,
        pos: BlockPos,
    ) -> Access {
        // Resolve the whole group so a lock on the other half of a pair
        // still governs this coordinate.
        let group = resolver::container_group(world, pos);
        let Some(lock) = self.find_lock_in_group(&group) else {
            return Access::Allow;
        };

        if !resolver::is_valid_private_sign(world, lock.sign_pos, &lock.container_positions) {
            info!(
                container = %pos,
                sign = %lock.sign_pos,
                "removing dangling lock, sign no longer valid"
            );
            self.registry().write().remove(lock.primary_position());
            return Access::Allow;
        }

        if self.owner_ban_bypassed(&lock) {
            return Access::Allow;
        }

        if self.is_admin(actor) {
            return Access::Allow;
        }

        if actor.id == lock.owner_id {
            return Access::Allow;
        }

        if lock.is_user_allowed(&actor.name, &self.config.floodgate_prefix) {
            return Access::Allow;
        }

        Access::deny(format!(
            "Cannot open {}'s private chest. Permission denied.",
            lock.owner_name
        ))
    }
}
