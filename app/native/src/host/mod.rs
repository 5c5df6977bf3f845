//! The host façade seam.
//!
//! The GUI window, menus and the embedded browser live outside this crate;
//! everything the activation core wants from them goes through [`HostFacade`].
//! The binary runs with [`LoggingHost`], a stand-in that only logs; embedders
//! provide the real implementation.

#[cfg(test)]
pub mod testing;

use std::sync::Arc;

use tracing::info;

use crate::entity::ClassifiedEntity;

/// Surface the activation core consumes from the hosting shell.
///
/// All methods are invoked from the event-loop thread only.
pub trait HostFacade: Send + Sync {
    /// Navigates the embedded browser.
    fn navigate(&self, url: &str);

    /// Raises and focuses the main window.
    fn bring_to_front(&self);

    /// Runs a script in the page, fire-and-forget.
    fn execute_script_async(&self, js: &str);

    /// Runs a script in the page and waits for its JSON-encoded result.
    fn execute_script_blocking(&self, js: &str) -> String;

    /// Hands a normalized entity to the page.
    fn open_entity(&self, entity: &ClassifiedEntity);

    /// Runs a configured script by name; returns whether it was started.
    fn run_script_by_name(&self, name: &str, args: &str) -> bool;
}

/// Shared façade handle used throughout the event loop.
pub type SharedHost = Arc<dyn HostFacade>;

/// Façade stand-in that logs every call and does nothing else.
///
/// Keeps the binary useful headless: every dispatched action is visible in
/// the log, and blocking script calls report an empty result.
#[derive(Debug, Default)]
pub struct LoggingHost;

impl HostFacade for LoggingHost {
    fn navigate(&self, url: &str) {
        info!(target: "sidekick::host", "navigate: {url}");
    }

    fn bring_to_front(&self) {
        info!(target: "sidekick::host", "bring to front");
    }

    fn execute_script_async(&self, js: &str) {
        info!(target: "sidekick::host", "execute script: {js}");
    }

    fn execute_script_blocking(&self, js: &str) -> String {
        info!(target: "sidekick::host", "execute script (blocking): {js}");
        String::new()
    }

    fn open_entity(&self, entity: &ClassifiedEntity) {
        info!(
            target: "sidekick::host",
            "open entity: {} ({})",
            entity.primary_value,
            entity.kind
        );
    }

    fn run_script_by_name(&self, name: &str, args: &str) -> bool {
        info!(target: "sidekick::host", "run script {name} with args [{args}]");
        false
    }
}
