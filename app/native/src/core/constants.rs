//! Application constants for Sidekick.
//!
//! This module contains global constants used throughout the application,
//! including the command-protocol scheme, well-known file names, and the
//! timing values shared by the debounce and retry machinery.

/// The application name.
pub const APP_NAME: &str = "Sidekick";

/// Application version from Cargo.toml.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scheme of the command protocol (`sidekick://action?k=v`).
pub const URI_SCHEME: &str = "sidekick";

/// Default configuration file names.
pub mod config {
    /// Primary config file name.
    pub const CONFIG_FILE: &str = "config.jsonc";

    /// Alternative config file name (JSON without comments).
    pub const CONFIG_FILE_ALT: &str = "config.json";
}

/// Well-known runtime artifacts for the singleton election and channel.
pub mod ipc {
    /// Election lock file, held exclusively by the primary for its lifetime.
    pub const LOCK_FILE: &str = "sidekick.lock";

    /// Unix socket the primary listens on for activation payloads.
    pub const SOCKET_FILE: &str = "sidekick.sock";
}

/// Timing and retry values.
pub mod timing {
    use std::time::Duration;

    /// Window within which byte-identical content from the same source is
    /// suppressed. Shared by clipboard bursts and ingestion repeats.
    pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

    /// Interval between clipboard polls.
    pub const CLIPBOARD_POLL_INTERVAL: Duration = Duration::from_millis(500);

    /// Sleep between attempts while the clipboard is busy.
    pub const CLIPBOARD_RETRY_SLEEP: Duration = Duration::from_millis(10);

    /// Total budget for one clipboard check cycle.
    pub const CLIPBOARD_RETRY_BUDGET: Duration = Duration::from_millis(100);

    /// Maximum parse attempts for a staged file that is still locked.
    pub const STAGE_MAX_ATTEMPTS: u32 = 5;

    /// Delay between staged-file parse attempts.
    pub const STAGE_RETRY_DELAY: Duration = Duration::from_secs(1);
}

/// Ingestion pipeline file-name rules.
pub mod ingest {
    /// Extensions the pipeline accepts, lowercase, without the dot.
    pub const ACCEPTED_EXTENSIONS: &[&str] = &["eml", "phone"];

    /// Transient-download suffixes that mark a file as still being written.
    /// Such files are ignored until their final rename.
    pub const TRANSIENT_SUFFIXES: &[&str] = &["tmp", "crdownload", "part", "partial"];

    /// Subdirectory holding in-flight copies of watched files.
    pub const STAGING_DIR: &str = "staging";

    /// Terminal subdirectory; presence here means the pipeline finished.
    pub const PROCESSED_DIR: &str = "processed";
}
