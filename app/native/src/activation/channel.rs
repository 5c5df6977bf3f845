//! The activation channel between secondary launches and the primary.
//!
//! Transport is a unix domain socket at a well-known path; the endpoint is
//! located by exact path identity, never by scanning or substring matching.
//! Delivery is copy-based: the sender serializes the payload into a buffer it
//! owns and writes it to the socket, the receiver copies the bytes out into
//! its own `String` before the connection is dropped. No pointer ever crosses
//! the process boundary.

use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use super::payload::ActivationPayload;
use crate::core::{Error, Result};

/// Receiving end of the channel, owned by the primary.
pub struct ActivationChannel {
    listener: UnixListener,
    path: PathBuf,
}

impl ActivationChannel {
    /// Binds the endpoint at `path`.
    ///
    /// A stale socket file left by a dead primary is removed first; this is
    /// safe because the caller already holds the election lock. Must be
    /// called from within the event-loop runtime.
    pub fn bind(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        let listener = UnixListener::bind(path)
            .map_err(|err| Error::ipc(format!("bind {}: {err}", path.display())))?;
        debug!("activation channel listening at {}", path.display());
        Ok(Self {
            listener,
            path: path.to_path_buf(),
        })
    }

    /// Path this channel is bound to.
    #[must_use]
    pub fn path(&self) -> &Path { &self.path }

    /// Accept loop: reads one payload line per connection and forwards the
    /// decoded payload to `tx`. Runs until the process exits.
    pub async fn serve(self, tx: UnboundedSender<ActivationPayload>) {
        loop {
            match self.listener.accept().await {
                Ok((stream, _)) => {
                    let mut line = String::new();
                    let mut reader = BufReader::new(stream);
                    match reader.read_line(&mut line).await {
                        // The read copied the sender's bytes into `line`;
                        // the connection can be dropped now.
                        Ok(_) => {
                            let payload = ActivationPayload::decode(&line);
                            debug!("activation received: {payload:?}");
                            if tx.send(payload).is_err() {
                                warn!("event loop gone, stopping activation channel");
                                return;
                            }
                        }
                        Err(err) => warn!("failed to read activation payload: {err}"),
                    }
                }
                Err(err) => warn!("activation accept failed: {err}"),
            }
        }
    }
}

/// Delivers `payload` to the primary listening at `path`.
///
/// Used by secondary launches, which have no runtime of their own; plain
/// blocking IO keeps their exit path trivial.
///
/// # Errors
///
/// Fails when no primary answers at `path` — the caller may then retry the
/// election or exit silently.
pub fn forward(path: &Path, payload: &ActivationPayload) -> Result<()> {
    let mut stream = std::os::unix::net::UnixStream::connect(path)
        .map_err(|err| Error::ipc(format!("no primary at {}: {err}", path.display())))?;
    // The buffer below is owned by this (sending) process and released only
    // after the write completes.
    let mut wire = payload.encode();
    wire.push('\n');
    stream.write_all(wire.as_bytes())?;
    stream.flush()?;
    Ok(())
}
