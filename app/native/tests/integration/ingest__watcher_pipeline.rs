//! Watched-folder ingestion with the real watcher and pipeline.

use std::path::Path;
use std::time::Duration;

use sidekick_lib::ingest::{Pipeline, watcher};
use tokio::sync::mpsc;

fn entries(dir: &Path) -> Vec<std::path::PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

const SAMPLE_EML: &str = "From: Jane Doe <jane@acme.com>\r\n\
    To: sales@acme.com\r\n\
    Subject: Renewal\r\n\
    \r\n\
    Hello\r\n";

#[tokio::test]
async fn dropped_eml_flows_from_watcher_to_processed() {
    let dir = tempfile::tempdir().unwrap();
    let watched = dir.path().join("inbox");
    std::fs::create_dir_all(&watched).unwrap();

    let pipeline = Pipeline::with_timing(
        dir.path().join("staging"),
        dir.path().join("processed"),
        5,
        Duration::from_millis(20),
        Duration::from_millis(200),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let watchers = watcher::start(&[watched.clone()], &tx);
    assert_eq!(watchers.len(), 1);

    let dropped = watched.join("renewal.eml");
    std::fs::write(&dropped, SAMPLE_EML).unwrap();

    // The watcher reports the new file; the pipeline takes it from there.
    // Events may arrive for intermediate names, so drain until ours shows up.
    let reported = loop {
        let candidate = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("watcher should report the drop")
            .unwrap();
        if candidate.file_name() == dropped.file_name() {
            break candidate;
        }
    };

    let entity = pipeline.ingest(&reported).await.expect("eml should parse");
    assert_eq!(entity.kind.as_str(), "email");
    assert_eq!(entity.primary_value, "jane@acme.com");
    assert_eq!(entity.field("subject"), "Renewal");
    assert_eq!(entity.source, "file");

    // Original untouched, staging drained, processed holds exactly one file.
    assert!(dropped.exists());
    assert!(entries(&dir.path().join("staging")).is_empty());
    assert_eq!(entries(&dir.path().join("processed")).len(), 1);
}

#[tokio::test]
async fn transient_download_names_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::with_timing(
        dir.path().join("staging"),
        dir.path().join("processed"),
        5,
        Duration::from_millis(20),
        Duration::from_millis(200),
    );

    let partial = dir.path().join("renewal.eml.crdownload");
    std::fs::write(&partial, SAMPLE_EML).unwrap();
    assert!(pipeline.ingest(&partial).await.is_none());
    assert!(entries(&dir.path().join("processed")).is_empty());
}

#[tokio::test]
async fn missing_watch_directory_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, _rx) = mpsc::unbounded_channel();
    let watchers = watcher::start(
        &[
            dir.path().join("not-created-yet"),
            dir.path().to_path_buf(),
        ],
        &tx,
    );
    // The bad directory is skipped, the good one is watched.
    assert_eq!(watchers.len(), 1);
}
