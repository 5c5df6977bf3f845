//! Root configuration types.
//!
//! Contains the main `SidekickConfig` struct; loading lives in
//! [`crate::config`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::clipboard::ClipboardConfig;
use super::ingest::IngestConfig;
use super::scripts::ScriptEntry;

/// Fallback home page when nothing is configured.
pub const DEFAULT_STARTUP_URL: &str = "https://sidekick-shell.github.io/app/";

/// Compatibility switches for legacy embedder behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CompatConfig {
    /// Legacy entity-opening contract: when enabled, `openEntity` fills
    /// parameters that were not passed explicitly from fields accumulated by
    /// earlier dispatches. The canonical contract is stateless.
    #[serde(rename = "statefulEntityFields")]
    pub stateful_entity_fields: bool,
}

/// Root configuration structure for Sidekick.
///
/// This structure is designed to be extended with additional sections
/// as new features are added to the application.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SidekickConfig {
    /// Home page loaded when no URL argument and no remembered URL exist.
    #[serde(rename = "startupUrl")]
    pub startup_url: String,

    /// Last URL the host navigated to, remembered across sessions.
    /// Takes precedence over `startupUrl` when present.
    #[serde(rename = "lastUrl")]
    pub last_url: Option<String>,

    /// Clipboard monitoring configuration.
    pub clipboard: ClipboardConfig,

    /// Watched-folder ingestion configuration.
    pub ingest: IngestConfig,

    /// Named scripts the host can run on behalf of `script` commands.
    pub scripts: Vec<ScriptEntry>,

    /// Compatibility switches.
    pub compat: CompatConfig,
}

impl Default for SidekickConfig {
    fn default() -> Self {
        Self {
            startup_url: DEFAULT_STARTUP_URL.to_string(),
            last_url: None,
            clipboard: ClipboardConfig::default(),
            ingest: IngestConfig::default(),
            scripts: Vec::new(),
            compat: CompatConfig::default(),
        }
    }
}

impl SidekickConfig {
    /// Resolves the URL the host should open first.
    ///
    /// Precedence: explicit launch argument, then the remembered last URL,
    /// then the configured home page.
    #[must_use]
    pub fn initial_url(&self, arg_url: Option<&str>) -> String {
        if let Some(url) = arg_url
            && !url.trim().is_empty()
        {
            return url.trim().to_string();
        }
        if let Some(last) = &self.last_url
            && !last.trim().is_empty()
        {
            return last.clone();
        }
        self.startup_url.clone()
    }

    /// Looks up a configured script by name, case-insensitively.
    #[must_use]
    pub fn find_script(&self, name: &str) -> Option<&ScriptEntry> {
        self.scripts.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }
}
