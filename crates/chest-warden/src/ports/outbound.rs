//! Outbound (driven) ports.
//!
//! The narrow interfaces the subsystem requires from the host: world reads,
//! player identity, chat, client resync, save-data blobs, and the clock.
//! The host owns all of this state; the subsystem only consumes it.

use crate::domain::{Block, BlockPos, SignEntity, WardenError};
use uuid::Uuid;

/// Identity of the acting player, handed in by the host per event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    /// Stable 128-bit identifier.
    pub id: Uuid,
    /// Display name as the host renders it.
    pub name: String,
    /// Host permission level, 0..=4. Compared against the configured
    /// admin threshold for bypass.
    pub permission_level: u8,
}

impl Actor {
    pub fn new(id: Uuid, name: impl Into<String>, permission_level: u8) -> Self {
        Self {
            id,
            name: name.into(),
            permission_level,
        }
    }
}

/// Read-only view of world blocks and plaque text.
pub trait WorldView {
    /// Block descriptor at a position.
    fn block_at(&self, pos: BlockPos) -> Block;

    /// Stored plaque text, if the position holds a sign entity.
    fn sign_at(&self, pos: BlockPos) -> Option<SignEntity>;
}

/// Player identity service: ban-list membership.
///
/// A host that cannot determine ban state (e.g. the player is offline)
/// returns `false`.
pub trait PlayerDirectory: Send + Sync {
    fn is_banned(&self, player: Uuid) -> bool;
}

/// Advisory chat messages to a player.
///
/// Notifications are part of the observable contract but carry no state.
pub trait Messenger: Send + Sync {
    fn tell(&self, player: Uuid, message: &str);
}

/// Client-prediction resync after a denied break or placement.
pub trait ClientSync: Send + Sync {
    fn resync_block(&self, player: Uuid, pos: BlockPos);
    fn resync_block_entity(&self, player: Uuid, pos: BlockPos);
    fn resync_inventory(&self, player: Uuid);
}

/// Blob read/write at a named key on the world's save-data area.
pub trait SaveDataHost: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, WardenError>;
    fn store(&self, key: &str, bytes: &[u8]) -> Result<(), WardenError>;
}

/// Wall-clock milliseconds (for record timestamps; swappable in tests).
pub trait TimeSource: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Production time source backed by the system clock.
#[derive(Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}
