//! Watched-folder ingestion configuration types.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One directory watched for incoming files.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WatchTarget {
    /// Directory to watch. `~` expands to the home directory.
    pub directory: String,

    /// Whether this target is active.
    /// Default: true
    pub enabled: bool,
}

impl Default for WatchTarget {
    fn default() -> Self {
        Self {
            directory: String::new(),
            enabled: true,
        }
    }
}

impl WatchTarget {
    /// Creates an enabled target for `directory`.
    #[must_use]
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            enabled: true,
        }
    }

    /// Returns the directory with `~` expanded.
    #[must_use]
    pub fn expanded_directory(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.directory).into_owned())
    }
}

/// Watched-folder ingestion configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct IngestConfig {
    /// Whether folder monitoring is enabled.
    /// Default: true
    pub enabled: bool,

    /// Directories to watch. When empty, the user's `Downloads` directory is
    /// watched if it exists.
    #[serde(rename = "watchedFolders")]
    pub watched_folders: Vec<WatchTarget>,

    /// Overrides the staging directory. Defaults to `staging` under the
    /// application data directory.
    #[serde(rename = "stagingDir")]
    pub staging_dir: Option<String>,

    /// Overrides the processed directory. Defaults to `processed` under the
    /// application data directory.
    #[serde(rename = "processedDir")]
    pub processed_dir: Option<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            watched_folders: Vec::new(),
            staging_dir: None,
            processed_dir: None,
        }
    }
}

impl IngestConfig {
    /// Returns whether folder monitoring is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool { self.enabled }

    /// Returns the active watch directories, `~`-expanded.
    #[must_use]
    pub fn active_directories(&self) -> Vec<PathBuf> {
        self.watched_folders
            .iter()
            .filter(|t| t.enabled && !t.directory.trim().is_empty())
            .map(WatchTarget::expanded_directory)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_directories_skips_disabled_and_blank() {
        let config = IngestConfig {
            enabled: true,
            watched_folders: vec![
                WatchTarget::new("/tmp/watch-a"),
                WatchTarget {
                    directory: "/tmp/watch-b".into(),
                    enabled: false,
                },
                WatchTarget::new("   "),
            ],
            staging_dir: None,
            processed_dir: None,
        };

        let dirs = config.active_directories();
        assert_eq!(dirs, vec![PathBuf::from("/tmp/watch-a")]);
    }

    #[test]
    fn watch_target_expands_tilde() {
        let target = WatchTarget::new("~/Downloads");
        let expanded = target.expanded_directory();
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }
}
