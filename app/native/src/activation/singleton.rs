//! Cross-process singleton election.
//!
//! Exactly one primary process exists per machine session. Election is an
//! exclusive `flock(2)` on a named lock file: the winner keeps the descriptor
//! open for its whole lifetime and the lock is never explicitly released —
//! process exit drops it.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::Result;

/// Holds the election lock. Dropping releases it, so the primary must keep
/// this alive until exit.
#[derive(Debug)]
pub struct LockGuard {
    _file: File,
    path: PathBuf,
}

impl LockGuard {
    /// Path of the held lock file.
    #[must_use]
    pub fn path(&self) -> &Path { &self.path }
}

/// Outcome of [`acquire`].
#[derive(Debug)]
pub enum Election {
    /// This process won and is the primary for the session.
    Primary(LockGuard),
    /// Another process already holds the lock.
    Secondary,
}

impl Election {
    /// Returns whether this process is the primary.
    #[must_use]
    pub const fn is_primary(&self) -> bool { matches!(self, Self::Primary(_)) }
}

/// Runs the election against `lock_path`.
///
/// # Errors
///
/// Fails only on real IO problems (uncreatable directory, unopenable file);
/// a held lock is the normal `Secondary` outcome, not an error.
pub fn acquire(lock_path: &Path) -> Result<Election> {
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(lock_path)?;

    let ret = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if ret != 0 {
        let err = std::io::Error::last_os_error();
        if err.kind() == std::io::ErrorKind::WouldBlock {
            debug!("election lock at {} already held", lock_path.display());
            return Ok(Election::Secondary);
        }
        return Err(err.into());
    }

    // Best effort: record the winner's pid for debugging.
    let _ = file.set_len(0);
    let _ = write!(file, "{}", std::process::id());

    debug!("won election lock at {}", lock_path.display());
    Ok(Election::Primary(LockGuard {
        _file: file,
        path: lock_path.to_path_buf(),
    }))
}
