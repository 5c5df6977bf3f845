//! Sidekick - a desktop companion shell that turns activations into
//! structured host actions.
//!
//! The crate is the activation core of the application: it elects one
//! primary process per session, receives activation payloads from later
//! launches over a small cross-process channel, parses command-protocol
//! URIs, classifies clipboard text into typed entities, and ingests files
//! dropped into watched folders. The window, menus, and the embedded
//! browser live outside; they implement [`host::HostFacade`].

pub mod activation;
pub mod app;
pub mod classifier;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod core;
pub mod entity;
pub mod host;
pub mod ingest;
pub mod logging;

use tracing::{debug, info};

use crate::activation::{ActivationPayload, Election};
use crate::core::Result;
use crate::core::constants::ipc::{LOCK_FILE, SOCKET_FILE};

/// Entry point: runs the election and either becomes the primary or forwards
/// the launch arguments to the existing one.
///
/// `raw_args` are the launch arguments without the binary name; they feed
/// the activation payload on the secondary path.
pub fn run(cli: &cli::Cli, raw_args: &[String]) -> Result<()> {
    let runtime_dir = config::runtime_dir();
    let lock_path = runtime_dir.join(LOCK_FILE);
    let socket_path = runtime_dir.join(SOCKET_FILE);

    match activation::acquire(&lock_path)? {
        Election::Primary(lock) => app::run(cli, lock, &socket_path),
        Election::Secondary => {
            let payload = ActivationPayload::from_args(raw_args);
            match activation::forward(&socket_path, &payload) {
                Ok(()) => {
                    info!("forwarded {payload:?} to the primary instance");
                    Ok(())
                }
                Err(err) => {
                    // The lock holder is not answering; one more election
                    // attempt, then exit silently.
                    debug!("no primary endpoint reachable: {err}");
                    match activation::acquire(&lock_path)? {
                        Election::Primary(lock) => app::run(cli, lock, &socket_path),
                        Election::Secondary => {
                            debug!("still secondary after retry, exiting");
                            Ok(())
                        }
                    }
                }
            }
        }
    }
}
