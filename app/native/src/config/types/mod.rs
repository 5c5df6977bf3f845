//! Configuration type definitions, one file per section.

pub mod clipboard;
pub mod ingest;
pub mod root;
pub mod scripts;

pub use clipboard::ClipboardConfig;
pub use ingest::{IngestConfig, WatchTarget};
pub use root::{CompatConfig, DEFAULT_STARTUP_URL, SidekickConfig};
pub use scripts::ScriptEntry;
