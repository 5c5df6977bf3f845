//! Clipboard monitoring.
//!
//! A background thread polls the system clipboard and forwards new text to
//! the event loop, where it is classified with source `"clipboard"`. Reads
//! tolerate transient OS-level locking with short bounded retries - the
//! clipboard is never waited on indefinitely.

use std::thread;
use std::time::Instant;

use arboard::Clipboard;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::core::constants::timing::{
    CLIPBOARD_POLL_INTERVAL, CLIPBOARD_RETRY_BUDGET, CLIPBOARD_RETRY_SLEEP,
};

/// Spawns the clipboard poller thread.
///
/// The thread exits when the receiving side of `tx` is gone. When the
/// clipboard is unavailable altogether (headless session), monitoring is
/// disabled with a warning instead of failing startup.
pub fn spawn(tx: UnboundedSender<String>) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("clipboard-monitor".into())
        .spawn(move || {
            let mut clipboard = match Clipboard::new() {
                Ok(clipboard) => clipboard,
                Err(err) => {
                    warn!("clipboard unavailable, monitoring disabled: {err}");
                    return;
                }
            };

            let mut last = String::new();
            loop {
                if let Some(text) = read_text_bounded(&mut clipboard)
                    && should_forward(&text, &last)
                {
                    last = text.clone();
                    if tx.send(text).is_err() {
                        debug!("event loop gone, stopping clipboard monitor");
                        return;
                    }
                }
                thread::sleep(CLIPBOARD_POLL_INTERVAL);
            }
        })
        .expect("failed to spawn clipboard monitor thread")
}

/// Reads clipboard text, retrying through transient busy states.
///
/// Sleeps ~10 ms between attempts and gives up after ~100 ms; a check cycle
/// never blocks longer than that.
fn read_text_bounded(clipboard: &mut Clipboard) -> Option<String> {
    let start = Instant::now();
    loop {
        match clipboard.get_text() {
            Ok(text) => return Some(text),
            Err(arboard::Error::ContentNotAvailable) => return None,
            Err(err) => {
                if start.elapsed() >= CLIPBOARD_RETRY_BUDGET {
                    debug!("clipboard busy, skipping this check cycle: {err}");
                    return None;
                }
                thread::sleep(CLIPBOARD_RETRY_SLEEP);
            }
        }
    }
}

/// Whether `current` is new content worth forwarding.
fn should_forward(current: &str, last: &str) -> bool {
    !current.trim().is_empty() && current != last
}
