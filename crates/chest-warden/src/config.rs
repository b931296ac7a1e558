//! Configuration: JSON file at a fixed name under the host's config
//! directory. Invalid values are corrected and the file is rewritten.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Config file name under the host's config directory.
pub const CONFIG_FILE: &str = "private-chests.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WardenConfig {
    /// Prefix stripped during username normalization (cross-platform
    /// players carry it in front of their name).
    #[serde(rename = "floodgatePrefix")]
    pub floodgate_prefix: String,

    /// Permission level at or above which an actor bypasses every check.
    #[serde(rename = "adminPermissionLevel")]
    pub admin_permission_level: i32,

    /// Cap on the full `list` output before truncating.
    #[serde(rename = "listMaxEntries")]
    pub list_max_entries: i32,

    /// Preview size shown when `list` truncates.
    #[serde(rename = "listPreviewEntries")]
    pub list_preview_entries: i32,

    /// Treat a locked container as unlocked while its owner is banned.
    #[serde(rename = "disableProtectionIfOwnerBanned")]
    pub disable_protection_if_owner_banned: bool,
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            floodgate_prefix: ".".to_string(),
            admin_permission_level: 3,
            list_max_entries: 50,
            list_preview_entries: 20,
            disable_protection_if_owner_banned: true,
        }
    }
}

impl WardenConfig {
    /// Correct invalid values in place. Returns true when anything changed
    /// and the file needs rewriting.
    pub fn validate(&mut self) -> bool {
        let mut corrected = false;

        if !(0..=4).contains(&self.admin_permission_level) {
            warn!(
                value = self.admin_permission_level,
                "invalid adminPermissionLevel, must be 0-4; using default 3"
            );
            self.admin_permission_level = 3;
            corrected = true;
        }

        if self.list_max_entries < 1 {
            warn!(
                value = self.list_max_entries,
                "invalid listMaxEntries, must be >= 1; using default 50"
            );
            self.list_max_entries = 50;
            corrected = true;
        }

        if self.list_preview_entries < 1 {
            warn!(
                value = self.list_preview_entries,
                "invalid listPreviewEntries, must be >= 1; using default 20"
            );
            self.list_preview_entries = 20;
            corrected = true;
        }

        if self.list_preview_entries > self.list_max_entries {
            warn!(
                preview = self.list_preview_entries,
                max = self.list_max_entries,
                "listPreviewEntries cannot exceed listMaxEntries; clamping"
            );
            self.list_preview_entries = self.list_max_entries;
            corrected = true;
        }

        corrected
    }

    /// Load from `config_dir`, creating or rewriting the file as needed.
    ///
    /// An unreadable or unparseable file is replaced with defaults; the
    /// subsystem never refuses to operate over a bad config.
    pub fn load(config_dir: &Path) -> WardenConfig {
        let config_file = config_dir.join(CONFIG_FILE);

        let (mut config, mut needs_save) = if config_file.exists() {
            match fs::read_to_string(&config_file) {
                Ok(json) => match serde_json::from_str::<WardenConfig>(&json) {
                    Ok(config) => {
                        info!(path = %config_file.display(), "loaded configuration");
                        (config, false)
                    }
                    Err(err) => {
                        warn!(
                            path = %config_file.display(),
                            %err,
                            "configuration invalid, replacing with defaults"
                        );
                        (WardenConfig::default(), true)
                    }
                },
                Err(err) => {
                    warn!(
                        path = %config_file.display(),
                        %err,
                        "failed to read configuration, using defaults"
                    );
                    (WardenConfig::default(), false)
                }
            }
        } else {
            info!(
                path = %config_file.display(),
                "configuration file not found, creating default"
            );
            (WardenConfig::default(), true)
        };

        if config.validate() {
            needs_save = true;
        }

        if needs_save {
            config.save(config_dir);
        }

        config
    }

    /// Write to `config_dir`. Failures are logged and swallowed; the
    /// in-memory config stays live.
    pub fn save(&self, config_dir: &Path) {
        let config_file = config_dir.join(CONFIG_FILE);

        let write = fs::create_dir_all(config_dir).and_then(|_| {
            let json = serde_json::to_string_pretty(self).expect("config serializes");
            fs::write(&config_file, json)
        });

        match write {
            Ok(()) => info!(path = %config_file.display(), "saved configuration"),
            Err(err) => error!(path = %config_file.display(), %err, "failed to save configuration"),
        }
    }
}
