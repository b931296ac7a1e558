//! Persisted lock blob: the `Locks` compound stored on the world's
//! save-data area.
//!
//! The wire shape predates this implementation, so field names are fixed
//! (`OwnerMost`/`OwnerLeast` are the two halves of the 128-bit owner id).
//! Unknown fields are ignored on read; missing timestamps default to 0,
//! which marks a legacy record.

use super::errors::WardenError;
use super::position::BlockPos;
use super::record::LockRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Fixed key of the blob on the world's save-data area.
pub const SAVE_DATA_KEY: &str = "private_chests";

#[derive(Serialize, Deserialize, Default)]
struct LocksBlob {
    #[serde(rename = "Locks", default)]
    locks: Vec<LockTag>,
}

#[derive(Serialize, Deserialize, Default)]
struct LockTag {
    #[serde(rename = "OwnerMost", default)]
    owner_most: i64,
    #[serde(rename = "OwnerLeast", default)]
    owner_least: i64,
    #[serde(rename = "OwnerName", default = "unknown_owner")]
    owner_name: String,
    #[serde(rename = "SignPosX", default)]
    sign_x: i32,
    #[serde(rename = "SignPosY", default)]
    sign_y: i32,
    #[serde(rename = "SignPosZ", default)]
    sign_z: i32,
    #[serde(rename = "Containers", default)]
    containers: Vec<PosTag>,
    #[serde(rename = "AllowedUsers", default)]
    allowed_users: Vec<NameTag>,
    #[serde(rename = "CreatedAt", default)]
    created_at: i64,
    #[serde(rename = "LastUpdatedAt", default)]
    last_updated_at: i64,
}

#[derive(Serialize, Deserialize, Default)]
struct PosTag {
    #[serde(rename = "X", default)]
    x: i32,
    #[serde(rename = "Y", default)]
    y: i32,
    #[serde(rename = "Z", default)]
    z: i32,
}

#[derive(Serialize, Deserialize, Default)]
struct NameTag {
    #[serde(rename = "Name", default)]
    name: String,
}

fn unknown_owner() -> String {
    "Unknown".to_string()
}

impl From<&LockRecord> for LockTag {
    fn from(record: &LockRecord) -> Self {
        let (most, least) = record.owner_id.as_u64_pair();
        LockTag {
            owner_most: most as i64,
            owner_least: least as i64,
            owner_name: record.owner_name.clone(),
            sign_x: record.sign_pos.x,
            sign_y: record.sign_pos.y,
            sign_z: record.sign_pos.z,
            containers: record
                .container_positions
                .iter()
                .map(|p| PosTag {
                    x: p.x,
                    y: p.y,
                    z: p.z,
                })
                .collect(),
            allowed_users: record
                .allowed
                .iter()
                .map(|name| NameTag { name: name.clone() })
                .collect(),
            created_at: record.created_at,
            last_updated_at: record.updated_at,
        }
    }
}

impl From<LockTag> for LockRecord {
    fn from(tag: LockTag) -> Self {
        let container_positions: BTreeSet<BlockPos> = tag
            .containers
            .iter()
            .map(|p| BlockPos::new(p.x, p.y, p.z))
            .collect();
        let allowed: BTreeSet<String> = tag
            .allowed_users
            .into_iter()
            .map(|n| n.name)
            .filter(|n| !n.is_empty())
            .collect();

        LockRecord {
            owner_id: Uuid::from_u64_pair(tag.owner_most as u64, tag.owner_least as u64),
            owner_name: tag.owner_name,
            sign_pos: BlockPos::new(tag.sign_x, tag.sign_y, tag.sign_z),
            container_positions,
            allowed,
            created_at: tag.created_at,
            updated_at: tag.last_updated_at,
        }
    }
}

/// Serialize unique records into the persisted blob.
pub fn encode_locks(records: &[LockRecord]) -> Result<Vec<u8>, WardenError> {
    let blob = LocksBlob {
        locks: records.iter().map(LockTag::from).collect(),
    };
    Ok(serde_json::to_vec(&blob)?)
}

/// Decode the persisted blob back into records.
///
/// Records with no container positions are dropped; the registry cannot
/// index them and they could only have come from a corrupted blob.
pub fn decode_locks(bytes: &[u8]) -> Result<Vec<LockRecord>, WardenError> {
    let blob: LocksBlob = serde_json::from_slice(bytes)?;
    Ok(blob
        .locks
        .into_iter()
        .map(LockRecord::from)
        .filter(|record| !record.container_positions.is_empty())
        .collect())
}
