//! Plaque text classification.
//!
//! A plaque marks a container private when line 0 of either side, trimmed,
//! is exactly `[private]` (case-insensitive). The remaining lines carry a
//! comma-separated allow-list.

use super::block::SignText;
use std::collections::BTreeSet;

/// The literal marker that declares a container private.
pub const PRIVATE_MARKER: &str = "[private]";

/// True iff line 0, trimmed, equals `[private]` case-insensitively.
///
/// The marker must be alone on the line; `"x [private]"` does not qualify.
pub fn has_private_marker(text: &SignText) -> bool {
    text.lines[0].trim().eq_ignore_ascii_case(PRIVATE_MARKER)
}

/// Extract allowed usernames from one plaque side.
///
/// Skips line 0 when it is the private marker, otherwise reads all four
/// lines. Each line may hold several names separated by commas; empty
/// fragments and fragments containing `[private]` are dropped.
pub fn allowed_users_from_lines(text: &SignText) -> BTreeSet<String> {
    let mut users = BTreeSet::new();
    let start = usize::from(has_private_marker(text));

    for line in &text.lines[start..] {
        collect_usernames(line, &mut users);
    }

    users
}

/// Extract the combined allow-list from an edited side plus the stored
/// opposite side.
pub fn allowed_users_from_both_sides(
    edited: &SignText,
    stored_other: &SignText,
) -> BTreeSet<String> {
    let mut users = allowed_users_from_lines(edited);
    users.extend(allowed_users_from_lines(stored_other));
    users
}

fn collect_usernames(line: &str, users: &mut BTreeSet<String>) {
    for part in line.split(',') {
        let name = part.trim();
        if name.is_empty() {
            continue;
        }
        if name.to_lowercase().contains(PRIVATE_MARKER) {
            continue;
        }
        users.insert(name.to_string());
    }
}
