//! Lock records: one per protected container group.

use super::position::BlockPos;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Normalize a username for allow-list comparison.
///
/// Trims, lowercases, strips the configured cross-platform prefix when the
/// name begins with it (case-insensitive), and treats underscores as
/// spaces. Equality of allow-list entries is equality of normalized forms.
pub fn normalize_username(name: &str, prefix: &str) -> String {
    let mut normalized = name.trim().to_lowercase();

    if !prefix.is_empty() {
        let prefix = prefix.to_lowercase();
        if normalized.starts_with(&prefix) {
            normalized = normalized[prefix.len()..].to_string();
        }
    }

    normalized.replace('_', " ")
}

/// Compute the identity string for a set of container positions.
///
/// `""` for the empty set, `"x,y,z"` for a singleton, and both positions
/// joined with `;` sorted by packed form for a pair. The packed-form sort
/// makes the id independent of iteration order.
pub fn group_id_for(positions: &BTreeSet<BlockPos>) -> String {
    if positions.is_empty() {
        return String::new();
    }

    let mut sorted: Vec<&BlockPos> = positions.iter().collect();
    sorted.sort_by_key(|p| p.packed());

    sorted
        .iter()
        .map(|p| format!("{},{},{}", p.x, p.y, p.z))
        .collect::<Vec<_>>()
        .join(";")
}

/// Ownership record for one locked container group.
///
/// Immutable value; updates go through [`with_allowed`](Self::with_allowed)
/// or [`with_containers`](Self::with_containers), which preserve
/// `created_at` and bump `updated_at`.
///
/// Equality ignores the timestamps and the cached owner name, matching the
/// registry's notion of record identity.
#[derive(Clone, Debug)]
pub struct LockRecord {
    pub owner_id: Uuid,
    /// Display name cached at creation; re-cached on deliberate re-edit.
    pub owner_name: String,
    /// Position of the governing plaque.
    pub sign_pos: BlockPos,
    /// 1 for a single container, 2 for a paired chest.
    pub container_positions: BTreeSet<BlockPos>,
    /// Display names granted access; compared in normalized form.
    pub allowed: BTreeSet<String>,
    /// Wall-clock ms; 0 marks a legacy record with unknown creation time.
    pub created_at: i64,
    pub updated_at: i64,
}

impl PartialEq for LockRecord {
    fn eq(&self, other: &Self) -> bool {
        self.owner_id == other.owner_id
            && self.sign_pos == other.sign_pos
            && self.container_positions == other.container_positions
            && self.allowed == other.allowed
    }
}

impl Eq for LockRecord {}

impl LockRecord {
    /// Create a fresh record with both timestamps set to `now_ms`.
    pub fn new(
        owner_id: Uuid,
        owner_name: impl Into<String>,
        sign_pos: BlockPos,
        container_positions: BTreeSet<BlockPos>,
        allowed: BTreeSet<String>,
        now_ms: i64,
    ) -> Self {
        Self {
            owner_id,
            owner_name: owner_name.into(),
            sign_pos,
            container_positions,
            allowed,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Replacement record with a new allow-list.
    pub fn with_allowed(&self, allowed: BTreeSet<String>, now_ms: i64) -> Self {
        Self {
            allowed,
            updated_at: now_ms,
            ..self.clone()
        }
    }

    /// Replacement record with an expanded container group.
    pub fn with_containers(&self, container_positions: BTreeSet<BlockPos>, now_ms: i64) -> Self {
        Self {
            container_positions,
            updated_at: now_ms,
            ..self.clone()
        }
    }

    /// Group identity of this record's container positions.
    pub fn group_id(&self) -> String {
        group_id_for(&self.container_positions)
    }

    /// Lowest container position by packed form, for consistent display.
    pub fn primary_position(&self) -> BlockPos {
        *self
            .container_positions
            .iter()
            .min_by_key(|p| p.packed())
            .expect("container_positions is never empty")
    }

    /// Normalized allow-list membership test.
    pub fn is_user_allowed(&self, username: &str, prefix: &str) -> bool {
        let normalized = normalize_username(username, prefix);
        self.allowed
            .iter()
            .any(|allowed| normalize_username(allowed, prefix) == normalized)
    }

    /// True when any container position falls within `radius` chunks of
    /// `center` on the x/z plane.
    pub fn intersects_chunk_area(&self, center: BlockPos, radius: i32) -> bool {
        let min_x = center.chunk_x() - radius;
        let max_x = center.chunk_x() + radius;
        let min_z = center.chunk_z() - radius;
        let max_z = center.chunk_z() + radius;

        self.container_positions.iter().any(|pos| {
            let cx = pos.chunk_x();
            let cz = pos.chunk_z();
            cx >= min_x && cx <= max_x && cz >= min_z && cz <= max_z
        })
    }
}
