//! Election and payload forwarding, end to end.

use sidekick_lib::activation::{self, ActivationChannel, ActivationPayload};
use tokio::sync::mpsc;

#[tokio::test]
async fn primary_receives_payload_from_second_launch() {
    let dir = tempfile::tempdir().unwrap();
    let lock_path = dir.path().join("sidekick.lock");
    let socket_path = dir.path().join("sidekick.sock");

    // First launch: wins, listens.
    let primary = activation::acquire(&lock_path).unwrap();
    assert!(primary.is_primary());
    let channel = ActivationChannel::bind(&socket_path).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(channel.serve(tx));

    // Second launch: loses, forwards a raw command URI, exits.
    let secondary = activation::acquire(&lock_path).unwrap();
    assert!(!secondary.is_primary());
    let args = vec!["sidekick://navigate?url=https://x.test/deal/7".to_string()];
    let payload = ActivationPayload::from_args(&args);
    activation::forward(&socket_path, &payload).unwrap();

    assert_eq!(
        rx.recv().await,
        Some(ActivationPayload::RawCommand(
            "sidekick://navigate?url=https://x.test/deal/7".into()
        ))
    );
}

#[tokio::test]
async fn plain_second_launch_degrades_to_activate() {
    let dir = tempfile::tempdir().unwrap();
    let socket_path = dir.path().join("sidekick.sock");

    let channel = ActivationChannel::bind(&socket_path).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(channel.serve(tx));

    let payload = ActivationPayload::from_args(&[]);
    activation::forward(&socket_path, &payload).unwrap();

    assert_eq!(rx.recv().await, Some(ActivationPayload::Activate));
}

#[test]
fn forwarding_without_a_primary_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let socket_path = dir.path().join("nobody-home.sock");
    let result = activation::forward(&socket_path, &ActivationPayload::Activate);
    assert!(result.is_err());
}

#[test]
fn lock_lifetime_spans_the_guard() {
    let dir = tempfile::tempdir().unwrap();
    let lock_path = dir.path().join("sidekick.lock");

    let first = activation::acquire(&lock_path).unwrap();
    assert!(first.is_primary());
    assert!(!activation::acquire(&lock_path).unwrap().is_primary());

    drop(first);
    assert!(activation::acquire(&lock_path).unwrap().is_primary());
}
