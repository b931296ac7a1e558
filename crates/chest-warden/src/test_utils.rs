//! In-memory adapters for the outbound ports, shared by unit tests and the
//! integration suite.

use crate::config::WardenConfig;
use crate::domain::{Block, BlockPos, ChestPairing, Direction, Side, SignEntity, SignText, WardenError};
use crate::ports::outbound::{
    ClientSync, Messenger, PlayerDirectory, SaveDataHost, TimeSource,
};
use crate::service::GuardService;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

/// Mutable in-memory world.
#[derive(Default)]
pub struct MemoryWorld {
    blocks: HashMap<BlockPos, Block>,
    signs: HashMap<BlockPos, SignEntity>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, pos: BlockPos, block: Block) {
        self.blocks.insert(pos, block);
    }

    /// Remove a block (and any sign entity) as if it was broken.
    pub fn clear(&mut self, pos: BlockPos) {
        self.blocks.remove(&pos);
        self.signs.remove(&pos);
    }

    pub fn put_single_chest(&mut self, pos: BlockPos, facing: Direction) {
        self.put(
            pos,
            Block::Chest {
                facing,
                pairing: ChestPairing::Single,
            },
        );
    }

    pub fn put_barrel(&mut self, pos: BlockPos) {
        self.put(pos, Block::Barrel);
    }

    /// Place both halves of a paired chest. `right` must be one block in
    /// `facing.clockwise()` from `left`, matching how the host pairs them.
    pub fn put_paired_chest(&mut self, left: BlockPos, right: BlockPos, facing: Direction) {
        assert_eq!(
            right,
            left.relative(facing.clockwise()),
            "partner must sit one block clockwise of the left half"
        );
        self.put(
            left,
            Block::Chest {
                facing,
                pairing: ChestPairing::Left,
            },
        );
        self.put(
            right,
            Block::Chest {
                facing,
                pairing: ChestPairing::Right,
            },
        );
    }

    /// Place a wall sign with stored front text and an empty back.
    pub fn put_wall_sign(&mut self, pos: BlockPos, facing: Direction, front: SignText) {
        self.put(pos, Block::WallSign { facing });
        self.signs.insert(
            pos,
            SignEntity {
                front,
                back: SignText::default(),
            },
        );
    }

    /// Overwrite the stored text of one sign side.
    pub fn set_sign_text(&mut self, pos: BlockPos, side: Side, text: SignText) {
        let entity = self.signs.entry(pos).or_default();
        match side {
            Side::Front => entity.front = text,
            Side::Back => entity.back = text,
        }
    }
}

impl crate::ports::outbound::WorldView for MemoryWorld {
    fn block_at(&self, pos: BlockPos) -> Block {
        self.blocks.get(&pos).copied().unwrap_or(Block::Other)
    }

    fn sign_at(&self, pos: BlockPos) -> Option<SignEntity> {
        self.signs.get(&pos).cloned()
    }
}

/// Ban list backed by a set.
#[derive(Default)]
pub struct MemoryDirectory {
    banned: Mutex<HashSet<Uuid>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ban(&self, player: Uuid) {
        self.banned.lock().insert(player);
    }

    pub fn unban(&self, player: Uuid) {
        self.banned.lock().remove(&player);
    }
}

impl PlayerDirectory for MemoryDirectory {
    fn is_banned(&self, player: Uuid) -> bool {
        self.banned.lock().contains(&player)
    }
}

/// Messenger that records every message per recipient.
#[derive(Default)]
pub struct RecordingMessenger {
    messages: Mutex<Vec<(Uuid, String)>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages_for(&self, player: Uuid) -> Vec<String> {
        self.messages
            .lock()
            .iter()
            .filter(|(id, _)| *id == player)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn last_message_for(&self, player: Uuid) -> Option<String> {
        self.messages_for(player).pop()
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

impl Messenger for RecordingMessenger {
    fn tell(&self, player: Uuid, message: &str) {
        self.messages.lock().push((player, message.to_string()));
    }
}

/// Resync event captured by [`RecordingSync`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncEvent {
    Block(Uuid, BlockPos),
    BlockEntity(Uuid, BlockPos),
    Inventory(Uuid),
}

/// Client-sync port that records the resyncs a deny path must issue.
#[derive(Default)]
pub struct RecordingSync {
    events: Mutex<Vec<SyncEvent>>,
}

impl RecordingSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl ClientSync for RecordingSync {
    fn resync_block(&self, player: Uuid, pos: BlockPos) {
        self.events.lock().push(SyncEvent::Block(player, pos));
    }

    fn resync_block_entity(&self, player: Uuid, pos: BlockPos) {
        self.events.lock().push(SyncEvent::BlockEntity(player, pos));
    }

    fn resync_inventory(&self, player: Uuid) {
        self.events.lock().push(SyncEvent::Inventory(player));
    }
}

/// Deterministic clock for record timestamps.
pub struct FixedClock {
    now_ms: Mutex<i64>,
}

impl FixedClock {
    pub fn at(now_ms: i64) -> Self {
        Self {
            now_ms: Mutex::new(now_ms),
        }
    }

    pub fn advance(&self, delta_ms: i64) {
        *self.now_ms.lock() += delta_ms;
    }
}

impl TimeSource for FixedClock {
    fn now_ms(&self) -> i64 {
        *self.now_ms.lock()
    }
}

/// Save-data host backed by a map, with switchable failure injection.
#[derive(Default)]
pub struct MemorySaveData {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    fail_io: Mutex<bool>,
}

impl MemorySaveData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_io(&self, fail: bool) {
        *self.fail_io.lock() = fail;
    }

    pub fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.lock().get(key).cloned()
    }

    pub fn put_blob(&self, key: &str, bytes: Vec<u8>) {
        self.blobs.lock().insert(key.to_string(), bytes);
    }
}

impl SaveDataHost for MemorySaveData {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, WardenError> {
        if *self.fail_io.lock() {
            return Err(WardenError::Persistence("injected load failure".into()));
        }
        Ok(self.blobs.lock().get(key).cloned())
    }

    fn store(&self, key: &str, bytes: &[u8]) -> Result<(), WardenError> {
        if *self.fail_io.lock() {
            return Err(WardenError::Persistence("injected store failure".into()));
        }
        self.blobs.lock().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// A fully wired service plus handles to every recording adapter.
pub struct Fixture {
    pub service: GuardService,
    pub directory: Arc<MemoryDirectory>,
    pub messenger: Arc<RecordingMessenger>,
    pub sync: Arc<RecordingSync>,
    pub clock: Arc<FixedClock>,
}

/// Build a service over in-memory adapters with the clock at `now_ms`.
pub fn fixture_with(config: WardenConfig, now_ms: i64) -> Fixture {
    let directory = Arc::new(MemoryDirectory::new());
    let messenger = Arc::new(RecordingMessenger::new());
    let sync = Arc::new(RecordingSync::new());
    let clock = Arc::new(FixedClock::at(now_ms));

    let service = GuardService::new(
        config,
        directory.clone(),
        messenger.clone(),
        sync.clone(),
        clock.clone(),
    );

    Fixture {
        service,
        directory,
        messenger,
        sync,
        clock,
    }
}

/// Default-config fixture.
pub fn fixture() -> Fixture {
    fixture_with(WardenConfig::default(), 1_000_000)
}
