//! Admin query surface: thin queries against the registry, surfaced
//! through the host's command layer.

use super::resolver;
use super::GuardService;
use crate::domain::{BlockPos, LockRecord};
use crate::ports::outbound::{Actor, WorldView};
use chrono::{Local, TimeZone};
use tracing::info;

impl GuardService {
    pub(crate) fn unlock_impl(&self, world: &dyn WorldView, source: &Actor, pos: BlockPos) -> i32 {
        if !self.require_admin(source) {
            return 0;
        }

        let group = resolver::container_group(world, pos);
        if group.is_empty() {
            self.tell(source, &format!("No lockable container found at {pos}"));
            return 0;
        }

        let Some(lock) = self.find_lock_in_group(&group) else {
            self.tell(source, &format!("No lock found at {pos}"));
            return 0;
        };

        self.registry().write().remove(lock.primary_position());

        let kind = resolver::container_kind_name(world, &group);
        self.tell(source, &format!("Unlocked {kind} at {pos}"));
        info!(admin = %source.name, container = %pos, "admin unlocked container");

        1
    }

    pub(crate) fn list_impl(&self, world: &dyn WorldView, source: &Actor) -> i32 {
        if !self.require_admin(source) {
            return 0;
        }

        let mut locks = self.all_locks();
        let total = locks.len();
        if total == 0 {
            self.tell(source, "No private chests found.");
            return 0;
        }
        locks.sort_by_key(|lock| lock.group_id());

        self.tell(
            source,
            &format!("===== Private Chests ({total} total) ====="),
        );

        let max = self.config.list_max_entries as usize;
        let preview = self.config.list_preview_entries as usize;

        if total > max {
            for lock in locks.iter().take(preview) {
                self.send_lock_line(world, source, lock);
            }
            self.tell(
                source,
                &format!(
                    "... and {} more. Use list_in_area to filter by location.",
                    total - preview
                ),
            );
        } else {
            for lock in &locks {
                self.send_lock_line(world, source, lock);
            }
        }

        total as i32
    }

    pub(crate) fn list_in_area_impl(
        &self,
        world: &dyn WorldView,
        source: &Actor,
        center: BlockPos,
        chunk_radius: i32,
    ) -> i32 {
        if !self.require_admin(source) {
            return 0;
        }

        let radius = chunk_radius.clamp(0, 10);
        let mut locks = self.registry().read().in_area(center, radius);

        if locks.is_empty() {
            self.tell(
                source,
                &format!(
                    "No private chests found in {0}x{0} chunks around you.",
                    radius * 2
                ),
            );
            return 0;
        }
        locks.sort_by_key(|lock| lock.group_id());

        self.tell(
            source,
            &format!("===== Private Chests in Area ({} found) =====", locks.len()),
        );
        for lock in &locks {
            self.send_lock_line(world, source, lock);
        }

        locks.len() as i32
    }

    pub(crate) fn info_impl(&self, world: &dyn WorldView, source: &Actor, pos: BlockPos) -> i32 {
        if !self.require_admin(source) {
            return 0;
        }

        let group = resolver::container_group(world, pos);
        if group.is_empty() {
            self.tell(source, &format!("No lockable container found at {pos}"));
            return 0;
        }

        let Some(lock) = self.find_lock_in_group(&group) else {
            self.tell(source, &format!("No lock found at {pos}"));
            return 0;
        };

        let kind = resolver::container_kind_name(world, &lock.container_positions);

        self.tell(source, "===== Lock Information =====");
        self.tell(source, &format!("Container: {kind}"));
        self.tell(source, &format!("Location: {}", lock.primary_position()));
        self.tell(source, &format!("Owner: {}", lock.owner_name));

        if lock.allowed.is_empty() {
            self.tell(source, "Allowed Users: (none - owner only)");
        } else {
            let names: Vec<&str> = lock.allowed.iter().map(String::as_str).collect();
            self.tell(source, &format!("Allowed Users: {}", names.join(", ")));
        }

        self.tell(
            source,
            &format!("Created: {}", format_timestamp(lock.created_at)),
        );
        self.tell(
            source,
            &format!("Last Updated: {}", format_timestamp(lock.updated_at)),
        );

        1
    }

    fn require_admin(&self, source: &Actor) -> bool {
        if self.is_admin(source) {
            return true;
        }
        self.tell(source, "You do not have permission to use this command.");
        false
    }

    fn send_lock_line(&self, world: &dyn WorldView, source: &Actor, lock: &LockRecord) {
        let kind = resolver::container_kind_name(world, &lock.container_positions);
        self.tell(
            source,
            &format!(
                "- {kind} at {} | Owner: {}",
                lock.primary_position(),
                lock.owner_name
            ),
        );
    }
}

/// Render a ms-since-epoch timestamp with the local timezone; 0 marks a
/// legacy record with unknown creation time.
fn format_timestamp(timestamp_ms: i64) -> String {
    if timestamp_ms == 0 {
        return "Unknown (legacy lock)".to_string();
    }

    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S %Z").to_string(),
        None => "Unknown (legacy lock)".to_string(),
    }
}
