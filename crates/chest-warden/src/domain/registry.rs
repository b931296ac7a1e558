//! The lock registry: both indices and the dirty flag.
//!
//! ## Data Structures
//!
//! - `by_position`: O(1) lookup by container coordinate (paired-chest
//!   records appear under both coordinates)
//! - `by_group_id`: one entry per record, keyed by the sorted coordinate
//!   list; also the deduplicated view used by `all()` and persistence
//!
//! ## Invariants Enforced
//!
//! - Exactly one record governs any coordinate (`add` rejects overlap)
//! - `remove(p)` clears every coordinate of the governed group
//! - Mutations set the dirty flag; the save host clears it after a flush

use super::errors::WardenError;
use super::position::BlockPos;
use super::record::LockRecord;
use std::collections::HashMap;

/// Mapping from container coordinates to lock records.
///
/// Mutation goes through `add`/`remove` only; an update is a remove
/// followed by an add with preserved `created_at`.
#[derive(Debug, Default)]
pub struct LockRegistry {
    by_position: HashMap<BlockPos, LockRecord>,
    by_group_id: HashMap<String, LockRecord>,
    dirty: bool,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record governing `pos`, if any.
    pub fn get(&self, pos: BlockPos) -> Option<&LockRecord> {
        self.by_position.get(&pos)
    }

    /// Record for an exact container group identity.
    pub fn get_by_group_id(&self, group_id: &str) -> Option<&LockRecord> {
        self.by_group_id.get(group_id)
    }

    pub fn is_locked(&self, pos: BlockPos) -> bool {
        self.by_position.contains_key(&pos)
    }

    /// Number of unique records.
    pub fn len(&self) -> usize {
        self.by_group_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_group_id.is_empty()
    }

    /// Insert a record under every container position and its group id.
    ///
    /// # Errors
    /// - `EmptyContainerSet` if the record covers no position
    /// - `PositionOccupied` if any position already belongs to a different
    ///   record; the caller must `remove` first
    pub fn add(&mut self, record: LockRecord) -> Result<(), WardenError> {
        if record.container_positions.is_empty() {
            return Err(WardenError::EmptyContainerSet);
        }

        for pos in &record.container_positions {
            if let Some(existing) = self.by_position.get(pos) {
                if *existing != record {
                    return Err(WardenError::PositionOccupied { pos: *pos });
                }
            }
        }

        for pos in &record.container_positions {
            self.by_position.insert(*pos, record.clone());
        }
        self.by_group_id.insert(record.group_id(), record);
        self.dirty = true;

        Ok(())
    }

    /// Remove the record governing `pos`, clearing its whole group.
    ///
    /// Returns the removed record, or `None` when the position is free.
    pub fn remove(&mut self, pos: BlockPos) -> Option<LockRecord> {
        let record = self.by_position.get(&pos)?.clone();

        for member in &record.container_positions {
            self.by_position.remove(member);
        }
        self.by_group_id.remove(&record.group_id());
        self.dirty = true;

        Some(record)
    }

    /// All unique records.
    pub fn all(&self) -> Vec<LockRecord> {
        self.by_group_id.values().cloned().collect()
    }

    /// Records with any container position within `chunk_radius` chunks of
    /// `center` on the x/z plane. Linear scan.
    pub fn in_area(&self, center: BlockPos, chunk_radius: i32) -> Vec<LockRecord> {
        self.by_group_id
            .values()
            .filter(|record| record.intersects_chunk_area(center, chunk_radius))
            .cloned()
            .collect()
    }

    /// Remove every record failing `is_valid`. Returns the removed count.
    pub fn cleanup(&mut self, mut is_valid: impl FnMut(&LockRecord) -> bool) -> usize {
        let stale: Vec<BlockPos> = self
            .by_group_id
            .values()
            .filter(|record| !is_valid(record))
            .map(|record| record.primary_position())
            .collect();

        let removed = stale.len();
        for pos in stale {
            self.remove(pos);
        }
        removed
    }

    /// Replace the whole contents from a decoded snapshot. Does not mark
    /// dirty; the snapshot already matches the persisted blob.
    pub fn replace_all(&mut self, records: Vec<LockRecord>) {
        self.by_position.clear();
        self.by_group_id.clear();
        for record in records {
            for pos in &record.container_positions {
                self.by_position.insert(*pos, record.clone());
            }
            self.by_group_id.insert(record.group_id(), record);
        }
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
