//! Named-script configuration types.
//!
//! Scripts are host-side automation entry points: the `script` command and
//! the bare `script=` fallback refer to them by name, and the host façade is
//! responsible for executing the underlying file.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One named script the host can run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScriptEntry {
    /// Name used to refer to the script in commands. Matched
    /// case-insensitively.
    pub name: String,

    /// Path of the script file.
    pub file: String,
}
