//! Integration tests for Sidekick.
//!
//! These tests exercise whole flows through the public crate API: election
//! plus channel forwarding, watched-folder ingestion with the real watcher,
//! and command dispatch end to end. Everything runs against temporary
//! directories; no display or network is required.
//!
//! ## Test Organization
//!
//! Tests follow the naming convention `<module>__<test_name>` to allow
//! filtering by module:
//! - `activation__*` - Election and payload forwarding tests
//! - `commands__*` - Parser/dispatcher flow tests
//! - `ingest__*` - Watcher and pipeline tests

// Allow double-underscore naming for test modules (e.g., activation__forwarding)
#![allow(non_snake_case)]
// Relax clippy lints for integration tests - these are test utilities, not production code
#![allow(
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args,
    clippy::wildcard_imports
)]

mod common;

mod activation__forwarding;
mod commands__dispatch;
mod ingest__watcher_pipeline;
