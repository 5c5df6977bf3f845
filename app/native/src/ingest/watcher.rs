//! Folder watchers feeding the ingestion pipeline.
//!
//! One `notify` watcher per configured directory, non-recursive. Watcher
//! callbacks run on notify's own thread; they only forward paths over a
//! channel, and the event loop does everything else.

use std::path::{Path, PathBuf};

use notify::event::ModifyKind;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

/// Holds watchers so the `RecommendedWatcher` instances remain active.
pub struct FolderWatchers {
    watchers: Vec<RecommendedWatcher>,
}

impl FolderWatchers {
    /// Number of directories successfully watched.
    #[must_use]
    pub fn len(&self) -> usize { self.watchers.len() }

    /// Whether no directory could be watched.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.watchers.is_empty() }
}

/// Starts a watcher per directory, sending created/renamed file paths to
/// `tx`.
///
/// A missing or unwatchable directory is logged and skipped; it never takes
/// the process down.
#[must_use]
pub fn start(directories: &[PathBuf], tx: &UnboundedSender<PathBuf>) -> FolderWatchers {
    let mut watchers = Vec::new();
    for directory in directories {
        if !directory.is_dir() {
            warn!("watched folder {} does not exist, skipping", directory.display());
            continue;
        }
        match watch_directory(directory, tx.clone()) {
            Ok(watcher) => {
                info!("watching {}", directory.display());
                watchers.push(watcher);
            }
            Err(err) => warn!("cannot watch {}: {err}", directory.display()),
        }
    }
    FolderWatchers { watchers }
}

fn watch_directory(
    directory: &Path,
    tx: UnboundedSender<PathBuf>,
) -> notify::Result<RecommendedWatcher> {
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<notify::Event>| match res {
            Ok(event) => {
                if matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(ModifyKind::Name(_))
                ) {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            }
            Err(err) => tracing::error!("watch error: {err:?}"),
        },
        Config::default(),
    )?;
    watcher.watch(directory, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
