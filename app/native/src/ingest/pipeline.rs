//! Staged processing of watched files.
//!
//! Every accepted file moves through a small state machine:
//! `Arrived -> Staged -> Parsed -> Relocated`, or `Staged -> Abandoned` when
//! the terminal move fails and the staged copy is cleaned up instead. The
//! original file is always *copied* into staging, never moved, so a crash
//! mid-pipeline leaves it discoverable in the watched folder.

use std::collections::HashMap;
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{eml, phone};
use crate::core::constants::{ingest, timing};
use crate::core::{Error, Result};
use crate::entity::ClassifiedEntity;

/// Lifecycle of one staged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    /// Seen in a watched folder and accepted.
    Arrived,
    /// Copied into the staging area.
    Staged,
    /// Parsed successfully (or given up on after retries).
    Parsed,
    /// Moved into the processed area; terminal.
    Relocated,
    /// Staged copy deleted after a failed move; terminal.
    Abandoned,
}

/// One file in flight through the pipeline.
#[derive(Debug)]
pub struct StagedFile {
    /// Where the file appeared.
    pub original_path: PathBuf,
    /// Unique in-flight copy inside the staging area.
    pub staging_path: PathBuf,
    /// Lowercase extension without the dot.
    pub extension: String,
    /// When the file was first seen.
    pub arrival_time: Instant,
    /// Parse attempts made so far.
    pub attempts: u32,
    /// Current lifecycle state.
    pub state: StageState,
}

/// The ingestion pipeline for all watched folders.
pub struct Pipeline {
    staging_dir: PathBuf,
    processed_dir: PathBuf,
    max_attempts: u32,
    retry_delay: Duration,
    debounce: Duration,
    recent: Mutex<HashMap<PathBuf, Instant>>,
}

impl Pipeline {
    /// Creates a pipeline with the standard retry and debounce timing.
    #[must_use]
    pub fn new(staging_dir: PathBuf, processed_dir: PathBuf) -> Self {
        Self::with_timing(
            staging_dir,
            processed_dir,
            timing::STAGE_MAX_ATTEMPTS,
            timing::STAGE_RETRY_DELAY,
            timing::DEBOUNCE_WINDOW,
        )
    }

    /// Creates a pipeline with explicit timing (test hook).
    #[must_use]
    pub fn with_timing(
        staging_dir: PathBuf,
        processed_dir: PathBuf,
        max_attempts: u32,
        retry_delay: Duration,
        debounce: Duration,
    ) -> Self {
        Self {
            staging_dir,
            processed_dir,
            max_attempts,
            retry_delay,
            debounce,
            recent: Mutex::new(HashMap::new()),
        }
    }

    /// Whether the pipeline handles files like `path`: accepted extension and
    /// no transient-download suffix.
    #[must_use]
    pub fn accepts(path: &Path) -> bool {
        let name = path.file_name().map(|n| n.to_string_lossy().to_lowercase());
        let Some(name) = name else { return false };
        if ingest::TRANSIENT_SUFFIXES
            .iter()
            .any(|suffix| name.ends_with(&format!(".{suffix}")))
        {
            return false;
        }
        extension_of(path)
            .is_some_and(|ext| ingest::ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
    }

    /// Runs one file through the whole pipeline.
    ///
    /// Returns the parsed entity on success; `None` for rejected, duplicate,
    /// or unparseable files. Never panics and never propagates errors - the
    /// watched folder must keep flowing no matter what one file does.
    pub async fn ingest(&self, path: &Path) -> Option<ClassifiedEntity> {
        if !Self::accepts(path) {
            debug!("ignoring {}", path.display());
            return None;
        }
        if self.is_duplicate_event(path) {
            debug!("debounced duplicate event for {}", path.display());
            return None;
        }

        let mut staged = match self.stage(path) {
            Ok(staged) => staged,
            Err(err) => {
                warn!("failed to stage {}: {err}", path.display());
                return None;
            }
        };

        let entity = if self.wait_until_readable(&mut staged).await {
            match parse_staged(&staged) {
                Ok(entity) => {
                    staged.state = StageState::Parsed;
                    Some(entity)
                }
                Err(err) => {
                    warn!("failed to parse {}: {err}", staged.staging_path.display());
                    None
                }
            }
        } else {
            warn!(
                "{} still locked after {} attempts, giving up",
                staged.staging_path.display(),
                staged.attempts
            );
            None
        };

        // Success or give-up, the staged copy leaves the staging area.
        self.relocate(&mut staged);
        entity
    }

    /// Copies `path` into the staging area under a unique name.
    fn stage(&self, path: &Path) -> Result<StagedFile> {
        std::fs::create_dir_all(&self.staging_dir)?;

        let extension = extension_of(path)
            .ok_or_else(|| Error::ingest(format!("{} has no extension", path.display())))?;
        let stem = path
            .file_stem()
            .map_or_else(|| "file".to_string(), |s| s.to_string_lossy().into_owned());
        let unique = format!("{stem}_{}.{extension}", Uuid::now_v7().simple());
        let staging_path = self.staging_dir.join(unique);

        std::fs::copy(path, &staging_path)?;
        debug!("staged {} as {}", path.display(), staging_path.display());

        Ok(StagedFile {
            original_path: path.to_path_buf(),
            staging_path,
            extension,
            arrival_time: Instant::now(),
            attempts: 0,
            state: StageState::Staged,
        })
    }

    /// Probes the staged copy until it is readable and unlocked, retrying
    /// with a fixed delay up to the attempt budget.
    async fn wait_until_readable(&self, staged: &mut StagedFile) -> bool {
        loop {
            staged.attempts += 1;
            if is_readable(&staged.staging_path) {
                return true;
            }
            if staged.attempts >= self.max_attempts {
                return false;
            }
            debug!(
                "{} locked, attempt {}/{}",
                staged.staging_path.display(),
                staged.attempts,
                self.max_attempts
            );
            tokio::time::sleep(self.retry_delay).await;
        }
    }

    /// Moves the staged copy into the processed area; deletes it when the
    /// move fails so staging never accumulates orphans.
    fn relocate(&self, staged: &mut StagedFile) {
        let file_name = staged
            .staging_path
            .file_name()
            .map_or_else(PathBuf::new, PathBuf::from);
        let target = self.processed_dir.join(file_name);

        let moved = std::fs::create_dir_all(&self.processed_dir)
            .and_then(|()| std::fs::rename(&staged.staging_path, &target));
        match moved {
            Ok(()) => {
                staged.state = StageState::Relocated;
                info!("processed {}", target.display());
            }
            Err(err) => {
                warn!("failed to move {} to processed: {err}", staged.staging_path.display());
                if let Err(err) = std::fs::remove_file(&staged.staging_path) {
                    warn!("failed to clean up staged copy: {err}");
                } else {
                    staged.state = StageState::Abandoned;
                }
            }
        }
    }

    /// Collapses watcher event bursts for the same path.
    fn is_duplicate_event(&self, path: &Path) -> bool {
        let now = Instant::now();
        let mut recent = self.recent.lock();
        recent.retain(|_, at| now.duration_since(*at) < self.debounce);
        if recent.contains_key(path) {
            return true;
        }
        recent.insert(path.to_path_buf(), now);
        false
    }
}

/// Parses a staged file according to its extension.
fn parse_staged(staged: &StagedFile) -> Result<ClassifiedEntity> {
    match staged.extension.as_str() {
        "eml" => eml::parse_to_entity(&staged.staging_path),
        "phone" => phone::parse_to_entity(&staged.staging_path),
        other => Err(Error::ingest(format!("no parser for extension {other}"))),
    }
}

/// Whether the file can be opened and shared-locked right now.
///
/// A writer still holding an exclusive advisory lock makes this fail, which
/// is what the retry loop waits out.
fn is_readable(path: &Path) -> bool {
    let Ok(file) = std::fs::File::open(path) else {
        return false;
    };
    let ret = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_SH | libc::LOCK_NB) };
    ret == 0
}

/// Lowercase extension without the dot.
fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|ext| ext.to_string_lossy().to_lowercase())
}
