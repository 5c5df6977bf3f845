//! Configuration loading and persistence.
//!
//! The config file lives under the platform config directory
//! (`~/.config/sidekick/config.jsonc` on Linux) and is parsed as JSON with
//! comments. Loading never fails: unreadable or malformed files fall back to
//! defaults with a logged warning, so a broken config cannot keep the
//! application from starting.

pub mod types;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use json_comments::StripComments;
use parking_lot::RwLock;
use tracing::{debug, warn};

pub use types::{
    ClipboardConfig, CompatConfig, DEFAULT_STARTUP_URL, IngestConfig, ScriptEntry, SidekickConfig,
    WatchTarget,
};

use crate::core::Result;
use crate::core::constants::config::{CONFIG_FILE, CONFIG_FILE_ALT};

/// Directory name used under the platform config/data/runtime roots.
const APP_DIR: &str = "sidekick";

/// Returns the directory holding the config file, created on demand.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir().map_or_else(|| PathBuf::from("."), |d| d.join(APP_DIR))
}

/// Returns the application data directory (staging/processed live here).
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(|| PathBuf::from("."), |d| d.join(APP_DIR))
}

/// Returns the runtime directory for the election lock and socket.
///
/// Prefers `$XDG_RUNTIME_DIR`; falls back to the data directory.
#[must_use]
pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir().map_or_else(data_dir, |d| d.join(APP_DIR))
}

/// Returns the path of the config file, preferring `config.jsonc` and
/// accepting plain `config.json` as an alternative.
#[must_use]
pub fn config_path() -> PathBuf {
    let dir = config_dir();
    let primary = dir.join(CONFIG_FILE);
    if primary.exists() {
        return primary;
    }
    let alt = dir.join(CONFIG_FILE_ALT);
    if alt.exists() { alt } else { primary }
}

/// Loads the configuration from the default location.
///
/// Missing files yield defaults; malformed files log a warning and yield
/// defaults. Either way the result gets the empty-watch-list fallback
/// applied (watch `~/Downloads` when nothing is configured).
#[must_use]
pub fn load() -> SidekickConfig {
    let mut config = match load_from(&config_path()) {
        Ok(config) => config,
        Err(err) => {
            warn!("failed to load config, using defaults: {err}");
            SidekickConfig::default()
        }
    };
    apply_fallbacks(&mut config);
    config
}

/// Loads the configuration from `path`, stripping `//` and `/* */` comments.
pub fn load_from(path: &Path) -> Result<SidekickConfig> {
    if !path.exists() {
        debug!("no config file at {}, using defaults", path.display());
        return Ok(SidekickConfig::default());
    }
    let file = std::fs::File::open(path)?;
    let mut stripped = String::new();
    StripComments::new(file).read_to_string(&mut stripped)?;
    let config = serde_json::from_str(&stripped)?;
    Ok(config)
}

/// Writes `config` as pretty-printed JSON to `path`, creating parent
/// directories on demand.
pub fn save_to(config: &SidekickConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Fills in runtime fallbacks that are not part of the serialized form:
/// an empty watch list becomes the user's Downloads directory (when it
/// exists), and a blank startup URL reverts to the default home page.
fn apply_fallbacks(config: &mut SidekickConfig) {
    if config.ingest.watched_folders.is_empty()
        && let Some(downloads) = dirs::download_dir()
        && downloads.is_dir()
    {
        config
            .ingest
            .watched_folders
            .push(WatchTarget::new(downloads.to_string_lossy().into_owned()));
    }
    if config.startup_url.trim().is_empty() {
        config.startup_url = DEFAULT_STARTUP_URL.to_string();
    }
}

/// Returns the JSON Schema describing the config file.
#[must_use]
pub fn schema_json() -> String {
    let schema = schemars::schema_for!(SidekickConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}

/// Shared, persistable handle to the live configuration.
///
/// Dispatch paths that mutate config (`setHomePage`) go through this handle
/// so tests can point persistence at a scratch file.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<SidekickConfig>>,
    path: Option<PathBuf>,
}

impl ConfigHandle {
    /// Wraps `config`, persisting to `path` when one is given.
    #[must_use]
    pub fn new(config: SidekickConfig, path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path,
        }
    }

    /// Read access to the live config.
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, SidekickConfig> { self.inner.read() }

    /// Write access to the live config.
    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, SidekickConfig> { self.inner.write() }

    /// Persists the current state to the handle's path, if any.
    pub fn persist(&self) -> Result<()> {
        match &self.path {
            Some(path) => save_to(&self.inner.read(), path),
            None => {
                debug!("config handle has no backing file, skipping persist");
                Ok(())
            }
        }
    }
}
