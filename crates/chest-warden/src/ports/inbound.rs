//! Inbound (driving) ports.
//!
//! The API the host's event layer calls into: the sign-edit state machine,
//! the access decision function, and the six interception shims, plus the
//! admin query surface consumed by the host's command layer.

use super::outbound::{Actor, WorldView};
use crate::domain::{Access, BlockPos, Side, SignText};

/// Event-interception API.
///
/// Every method is synchronous and never blocks on I/O; persistence is
/// deferred through the dirty flag. Denies are returned, not thrown.
pub trait ContainerGuardApi {
    /// Resolve a proposed plaque text edit: create, mutate, or dissolve a
    /// lock, or reject the edit. The only registry writer in normal
    /// operation.
    fn handle_sign_edit(
        &self,
        world: &dyn WorldView,
        actor: &Actor,
        sign_pos: BlockPos,
        proposed: &SignText,
        side: Side,
    ) -> Access;

    /// Pure access decision for a container coordinate. Also enforces the
    /// dangling-lock invariant opportunistically.
    fn can_access(&self, world: &dyn WorldView, actor: &Actor, pos: BlockPos) -> Access;

    /// Use-block interaction with a container.
    fn on_open(&self, world: &dyn WorldView, actor: &Actor, pos: BlockPos) -> Access;

    /// Block destruction attempt (container or governing plaque). A denied
    /// break triggers block and block-entity resync for the actor.
    fn on_break(&self, world: &dyn WorldView, actor: &Actor, pos: BlockPos) -> Access;

    /// Chest placement at `placed_pos`. Denied when it would pair with a
    /// locked chest of another owner; otherwise schedules the paired-chest
    /// extension for the next tick.
    fn on_place_chest(&self, world: &dyn WorldView, actor: &Actor, placed_pos: BlockPos)
        -> Access;

    /// Plaque placement against the container at `target_pos`.
    fn on_place_sign(&self, world: &dyn WorldView, actor: &Actor, target_pos: BlockPos) -> Access;

    /// True when automated item transfer into/out of `pos` must be blocked.
    /// Unconditional on actor identity.
    fn is_automation_blocked(&self, world: &dyn WorldView, pos: BlockPos) -> bool;

    /// True when `pos` is a protected coordinate for fire and explosions:
    /// a locked container position or a live lock's governing plaque.
    fn is_protected(&self, world: &dyn WorldView, pos: BlockPos) -> bool;

    /// Remove protected coordinates from an explosion's block-removal list.
    fn filter_explosion(&self, world: &dyn WorldView, affected: &mut Vec<BlockPos>);

    /// Tick hook: applies paired-chest extensions scheduled by
    /// `on_place_chest`, after the host's own placement commit is visible.
    fn tick(&self, world: &dyn WorldView);
}

/// Admin query surface: thin queries against the registry.
///
/// Each returns an integer count for scripting use; human-facing output
/// goes through the `Messenger` port to `source`.
pub trait AdminQueryApi {
    /// Dissolve the lock whose group contains `pos`. Returns 1, or 0 when
    /// nothing was found.
    fn unlock(&self, world: &dyn WorldView, source: &Actor, pos: BlockPos) -> i32;

    /// Enumerate all locks, truncated per configuration. Returns the total
    /// count.
    fn list(&self, world: &dyn WorldView, source: &Actor) -> i32;

    /// Enumerate locks within `chunk_radius` chunks of `center` (radius
    /// bounded to 0..=10). Returns the count found.
    fn list_in_area(
        &self,
        world: &dyn WorldView,
        source: &Actor,
        center: BlockPos,
        chunk_radius: i32,
    ) -> i32;

    /// Describe one lock. Returns 1, or 0 when nothing was found.
    fn info(&self, world: &dyn WorldView, source: &Actor, pos: BlockPos) -> i32;
}
