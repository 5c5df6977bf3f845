//! Watched-folder ingestion.
//!
//! - [`watcher`] - `notify` watchers over the configured directories
//! - [`pipeline`] - staging, retry-on-lock, parsing, relocation
//! - [`eml`] / [`phone`] - per-extension parsers producing entities

pub mod eml;
pub mod phone;
pub mod pipeline;
pub mod watcher;

pub use pipeline::{Pipeline, StageState, StagedFile};
pub use watcher::FolderWatchers;
