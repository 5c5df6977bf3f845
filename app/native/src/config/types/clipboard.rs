//! Clipboard monitoring configuration types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Clipboard monitoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Whether clipboard monitoring is enabled.
    /// Default: true
    pub enabled: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self { Self { enabled: true } }
}

impl ClipboardConfig {
    /// Returns whether clipboard monitoring is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool { self.enabled }
}
