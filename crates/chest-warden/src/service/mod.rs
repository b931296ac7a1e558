//! Application service: the inbound API on top of the outbound ports.
//!
//! ## Thread model
//!
//! The host is a single-threaded tick server; all registry writes happen on
//! the tick thread. The registry sits behind a `parking_lot::RwLock` so the
//! save host may call [`GuardService::serialize_locks`] from a background
//! thread and observe a stable snapshot, never a half-applied mutation.

mod access;
mod admin;
pub mod resolver;
mod shims;
mod sign_edit;

use crate::config::WardenConfig;
use crate::domain::{
    decode_locks, encode_locks, Access, BlockPos, LockRecord, LockRegistry, Side, SignText,
    WardenError, SAVE_DATA_KEY,
};
use crate::ports::inbound::{AdminQueryApi, ContainerGuardApi};
use crate::ports::outbound::{
    Actor, ClientSync, Messenger, PlayerDirectory, SaveDataHost, TimeSource, WorldView,
};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{error, info};

/// The container-lock subsystem service.
///
/// Holds the registry by shared handle; the host passes its world view per
/// call, since world state stays host-owned.
pub struct GuardService {
    config: WardenConfig,
    registry: Arc<RwLock<LockRegistry>>,
    directory: Arc<dyn PlayerDirectory>,
    messenger: Arc<dyn Messenger>,
    sync: Arc<dyn ClientSync>,
    time: Arc<dyn TimeSource>,
    /// Chest placements awaiting the paired-chest extension check. Applied
    /// on the next tick, after the host commits the placement.
    pending_extensions: Mutex<Vec<BlockPos>>,
}

impl GuardService {
    pub fn new(
        config: WardenConfig,
        directory: Arc<dyn PlayerDirectory>,
        messenger: Arc<dyn Messenger>,
        sync: Arc<dyn ClientSync>,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            config,
            registry: Arc::new(RwLock::new(LockRegistry::new())),
            directory,
            messenger,
            sync,
            time,
            pending_extensions: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &WardenConfig {
        &self.config
    }

    /// Record governing `pos`, if any.
    pub fn lock_at(&self, pos: BlockPos) -> Option<LockRecord> {
        self.registry.read().get(pos).cloned()
    }

    /// All unique records.
    pub fn all_locks(&self) -> Vec<LockRecord> {
        self.registry.read().all()
    }

    pub fn lock_count(&self) -> usize {
        self.registry.read().len()
    }

    /// True when mutations since the last flush are still unpersisted.
    pub fn is_dirty(&self) -> bool {
        self.registry.read().is_dirty()
    }

    /// Serialize the current registry snapshot to the persisted blob.
    ///
    /// Safe to call from a save thread; the read lock yields a consistent
    /// view. Records are ordered by group id for stable output.
    pub fn serialize_locks(&self) -> Result<Vec<u8>, WardenError> {
        let mut records = self.registry.read().all();
        records.sort_by_key(|r| r.group_id());
        encode_locks(&records)
    }

    /// Load the registry from the save-data host.
    ///
    /// A missing blob starts empty; a failed read or decode also starts
    /// empty and logs the condition. Load never refuses to operate.
    pub fn load_from(&self, save_data: &dyn SaveDataHost) {
        let records = match save_data.load(SAVE_DATA_KEY) {
            Ok(Some(bytes)) => match decode_locks(&bytes) {
                Ok(records) => records,
                Err(err) => {
                    error!(%err, "failed to decode saved locks, starting with empty registry");
                    Vec::new()
                }
            },
            Ok(None) => {
                info!("no saved locks found, starting with empty registry");
                Vec::new()
            }
            Err(err) => {
                error!(%err, "failed to read saved locks, starting with empty registry");
                Vec::new()
            }
        };

        let count = records.len();
        self.registry.write().replace_all(records);
        if count > 0 {
            info!(count, "loaded lock records");
        }
    }

    /// Persist the registry if dirty. Save failures are logged; the
    /// registry stays live in memory.
    pub fn flush(&self, save_data: &dyn SaveDataHost) -> Result<(), WardenError> {
        if !self.is_dirty() {
            return Ok(());
        }

        let bytes = self.serialize_locks()?;
        match save_data.store(SAVE_DATA_KEY, &bytes) {
            Ok(()) => {
                self.registry.write().clear_dirty();
                Ok(())
            }
            Err(err) => {
                error!(%err, "failed to persist lock registry");
                Err(err)
            }
        }
    }

    pub(crate) fn now_ms(&self) -> i64 {
        self.time.now_ms()
    }

    pub(crate) fn tell(&self, actor: &Actor, message: &str) {
        self.messenger.tell(actor.id, message);
    }

    /// Admin bypass: permission level meets or exceeds the configured
    /// threshold.
    pub(crate) fn is_admin(&self, actor: &Actor) -> bool {
        i32::from(actor.permission_level) >= self.config.admin_permission_level
    }

    /// The single banned-owner predicate every protection site consults.
    ///
    /// Checks the OWNER's ban state; a host that cannot determine it
    /// reports not-banned.
    pub(crate) fn owner_ban_bypassed(&self, lock: &LockRecord) -> bool {
        self.config.disable_protection_if_owner_banned && self.directory.is_banned(lock.owner_id)
    }

    /// Any record covering any member of a container group.
    pub(crate) fn find_lock_in_group<'a, I>(&self, group: I) -> Option<LockRecord>
    where
        I: IntoIterator<Item = &'a BlockPos>,
    {
        let registry = self.registry.read();
        group
            .into_iter()
            .find_map(|pos| registry.get(*pos).cloned())
    }

    pub(crate) fn registry(&self) -> &RwLock<LockRegistry> {
        &self.registry
    }

    pub(crate) fn queue_extension_check(&self, placed_pos: BlockPos) {
        self.pending_extensions.lock().push(placed_pos);
    }

    pub(crate) fn drain_extension_checks(&self) -> Vec<BlockPos> {
        std::mem::take(&mut *self.pending_extensions.lock())
    }
}

impl ContainerGuardApi for GuardService {
    fn handle_sign_edit(
        &self,
        world: &dyn WorldView,
        actor: &Actor,
        sign_pos: BlockPos,
        proposed: &SignText,
        side: Side,
    ) -> Access {
        self.handle_sign_edit_impl(world, actor, sign_pos, proposed, side)
    }

    fn can_access(&self, world: &dyn WorldView, actor: &Actor, pos: BlockPos) -> Access {
        self.can_access_impl(world, actor, pos)
    }

    fn on_open(&self, world: &dyn WorldView, actor: &Actor, pos: BlockPos) -> Access {
        self.on_open_impl(world, actor, pos)
    }

    fn on_break(&self, world: &dyn WorldView, actor: &Actor, pos: BlockPos) -> Access {
        self.on_break_impl(world, actor, pos)
    }

    fn on_place_chest(
        &self,
        world: &dyn WorldView,
        actor: &Actor,
        placed_pos: BlockPos,
    ) -> Access {
        self.on_place_chest_impl(world, actor, placed_pos)
    }

    fn on_place_sign(&self, world: &dyn WorldView, actor: &Actor, target_pos: BlockPos) -> Access {
        self.on_place_sign_impl(world, actor, target_pos)
    }

    fn is_automation_blocked(&self, world: &dyn WorldView, pos: BlockPos) -> bool {
        self.is_automation_blocked_impl(world, pos)
    }

    fn is_protected(&self, world: &dyn WorldView, pos: BlockPos) -> bool {
        self.is_protected_impl(world, pos)
    }

    fn filter_explosion(&self, world: &dyn WorldView, affected: &mut Vec<BlockPos>) {
        affected.retain(|pos| !self.is_protected_impl(world, *pos));
    }

    fn tick(&self, world: &dyn WorldView) {
        self.tick_impl(world);
    }
}

impl AdminQueryApi for GuardService {
    fn unlock(&self, world: &dyn WorldView, source: &Actor, pos: BlockPos) -> i32 {
        self.unlock_impl(world, source, pos)
    }

    fn list(&self, world: &dyn WorldView, source: &Actor) -> i32 {
        self.list_impl(world, source)
    }

    fn list_in_area(
        &self,
        world: &dyn WorldView,
        source: &Actor,
        center: BlockPos,
        chunk_radius: i32,
    ) -> i32 {
        self.list_in_area_impl(world, source, center, chunk_radius)
    }

    fn info(&self, world: &dyn WorldView, source: &Actor, pos: BlockPos) -> i32 {
        self.info_impl(world, source, pos)
    }
}
