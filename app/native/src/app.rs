//! Application wiring and the cooperative event loop.
//!
//! A current-thread tokio runtime is the single event-loop thread: every call
//! into the host façade happens here. Folder watchers and the clipboard
//! poller run on background threads and marshal their findings over channels;
//! that hand-off is the one mandatory synchronization point.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use crate::activation::singleton::LockGuard;
use crate::activation::{ActivationChannel, ActivationPayload};
use crate::classifier::Classifier;
use crate::cli::Cli;
use crate::commands::Dispatcher;
use crate::config::{self, ConfigHandle};
use crate::core::Result;
use crate::core::constants::ingest::{PROCESSED_DIR, STAGING_DIR};
use crate::entity::ClassifiedEntity;
use crate::host::{LoggingHost, SharedHost};
use crate::clipboard;
use crate::ingest::{Pipeline, watcher};

/// Everything the event loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// A payload forwarded by a secondary launch.
    Activation(ActivationPayload),
    /// New text observed on the clipboard.
    ClipboardText(String),
    /// A file appeared in a watched folder.
    FileArrived(PathBuf),
    /// A normalized entity ready for the host.
    Entity(ClassifiedEntity),
}

/// The assembled event loop.
pub struct EventLoop {
    host: SharedHost,
    dispatcher: Arc<Dispatcher>,
    classifier: Classifier,
    pipeline: Arc<Pipeline>,
    tx: UnboundedSender<AppEvent>,
}

impl EventLoop {
    /// Assembles the loop around `host` and `config`.
    #[must_use]
    pub fn new(host: SharedHost, config: ConfigHandle, tx: UnboundedSender<AppEvent>) -> Self {
        let (staging_dir, processed_dir) = resolve_pipeline_dirs(&config);
        let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&host), config));

        // Detections surface as a non-blocking status line, nothing more.
        let mut classifier = Classifier::new();
        classifier.set_observer(Arc::new(|description| {
            info!(target: "sidekick::status", "{description}");
        }));

        Self {
            host,
            dispatcher,
            classifier,
            pipeline: Arc::new(Pipeline::new(staging_dir, processed_dir)),
            tx,
        }
    }

    /// Handles one event. Must run on the event-loop thread.
    pub fn handle(&self, event: AppEvent) {
        match event {
            AppEvent::Activation(payload) => self.handle_activation(payload),
            AppEvent::ClipboardText(text) => {
                if let Some(entity) = self.classifier.classify(&text, "clipboard") {
                    // Converge on the URI dispatch path.
                    self.dispatcher.dispatch(&entity.to_command_uri());
                }
            }
            AppEvent::FileArrived(path) => {
                let pipeline = Arc::clone(&self.pipeline);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    if let Some(entity) = pipeline.ingest(&path).await {
                        let _ = tx.send(AppEvent::Entity(entity));
                    }
                });
            }
            AppEvent::Entity(entity) => self.dispatcher.open_entity(&entity),
        }
    }

    /// Re-dispatches a forwarded activation payload.
    fn handle_activation(&self, payload: ActivationPayload) {
        match payload {
            ActivationPayload::Activate => self.host.bring_to_front(),
            ActivationPayload::NavigateUrl(url) => {
                self.host.navigate(&url);
                self.host.bring_to_front();
            }
            ActivationPayload::RawCommand(uri) => {
                self.dispatcher.dispatch(&uri);
                self.host.bring_to_front();
            }
        }
    }

    /// The dispatcher, for startup-time command URIs.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher { &self.dispatcher }
}

/// Runs the primary process to completion.
///
/// Holds the election lock for the whole lifetime; it is only dropped when
/// the process exits.
pub fn run(cli: &Cli, lock: LockGuard, socket_path: &Path) -> Result<()> {
    let _lock = lock;

    let config = config::load();
    let handle = ConfigHandle::new(config, Some(config::config_path()));
    let host: SharedHost = Arc::new(LoggingHost);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_inner(cli, handle, host, socket_path))
}

async fn run_inner(
    cli: &Cli,
    config: ConfigHandle,
    host: SharedHost,
    socket_path: &Path,
) -> Result<()> {
    info!("starting sidekick {}", crate::core::constants::APP_VERSION);

    let (tx, rx) = mpsc::unbounded_channel();
    let event_loop = EventLoop::new(Arc::clone(&host), config.clone(), tx.clone());

    // Activation channel: bind while we are provably the lock holder.
    let channel = ActivationChannel::bind(socket_path)?;
    let (payload_tx, payload_rx) = mpsc::unbounded_channel();
    tokio::spawn(channel.serve(payload_tx));
    pump(payload_rx, tx.clone(), AppEvent::Activation);

    // Folder watchers.
    if config.read().ingest.is_enabled() {
        let directories = config.read().ingest.active_directories();
        let (path_tx, path_rx) = mpsc::unbounded_channel();
        let watchers = watcher::start(&directories, &path_tx);
        pump(path_rx, tx.clone(), AppEvent::FileArrived);
        // Watchers stop when dropped; keep them for the process lifetime.
        std::mem::forget(watchers);
    }

    // Clipboard monitor.
    if config.read().clipboard.is_enabled() {
        let (clip_tx, clip_rx) = mpsc::unbounded_channel();
        let _monitor = clipboard::spawn(clip_tx);
        pump(clip_rx, tx.clone(), AppEvent::ClipboardText);
    }

    // Initial navigation, then any startup command URI.
    let initial = config.read().initial_url(cli.url.as_deref());
    host.navigate(&initial);
    if let Some(uri) = cli.command_uri() {
        event_loop.dispatcher().dispatch(uri);
    }

    event_pump(event_loop, rx).await;
    Ok(())
}

/// Drains `rx` into the event loop until every sender is gone.
async fn event_pump(event_loop: EventLoop, mut rx: UnboundedReceiver<AppEvent>) {
    while let Some(event) = rx.recv().await {
        event_loop.handle(event);
    }
    warn!("all event sources closed, shutting down");
}

/// Forwards items from a typed channel into the event channel.
fn pump<T: Send + 'static>(
    mut rx: UnboundedReceiver<T>,
    tx: UnboundedSender<AppEvent>,
    map: impl Fn(T) -> AppEvent + Send + 'static,
) {
    tokio::spawn(async move {
        while let Some(item) = rx.recv().await {
            if tx.send(map(item)).is_err() {
                break;
            }
        }
    });
}

/// Resolves staging/processed directories from config overrides, defaulting
/// under the application data directory.
fn resolve_pipeline_dirs(config: &ConfigHandle) -> (PathBuf, PathBuf) {
    let data = config::data_dir();
    let cfg = config.read();
    let staging = cfg.ingest.staging_dir.as_ref().map_or_else(
        || data.join(STAGING_DIR),
        |dir| PathBuf::from(shellexpand::tilde(dir).into_owned()),
    );
    let processed = cfg.ingest.processed_dir.as_ref().map_or_else(
        || data.join(PROCESSED_DIR),
        |dir| PathBuf::from(shellexpand::tilde(dir).into_owned()),
    );
    (staging, processed)
}
