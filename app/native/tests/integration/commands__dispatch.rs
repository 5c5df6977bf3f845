//! Parser-to-dispatcher flows through the public API.

use crate::common::{Call, dispatcher};
use sidekick_lib::classifier;

#[test]
fn navigate_flows_to_host_with_and_without_slashes() {
    let (dispatcher, host) = dispatcher();
    dispatcher.dispatch("sidekick://navigate?url=https://a.test");
    dispatcher.dispatch("sidekick:navigate?url=https://b.test");

    assert_eq!(
        host.calls(),
        vec![
            Call::Navigate("https://a.test".into()),
            Call::BringToFront,
            Call::Navigate("https://b.test".into()),
            Call::BringToFront,
        ]
    );
}

#[test]
fn semicolon_separated_call_produces_structured_outcome() {
    let (dispatcher, host) = dispatcher();
    host.set_blocking_response(r#"{"ok":true,"result":"done"}"#);

    let outcome = dispatcher
        .dispatch("sidekick://call?name=syncAll;args=%5B1%2C2%5D")
        .unwrap();
    assert!(outcome.ok);
    assert_eq!(outcome.result, Some(serde_json::json!("done")));
}

#[test]
fn classified_clipboard_text_converges_on_dispatch() {
    let (dispatcher, host) = dispatcher();

    let entity = classifier::classify_content("john@x.com call me", "clipboard").unwrap();
    dispatcher.dispatch(&entity.to_command_uri());

    assert_eq!(
        host.entities(),
        vec![Call::Entity {
            kind: "email".into(),
            primary: "john@x.com".into(),
            source: "clipboard".into(),
        }]
    );
}

#[test]
fn contact_block_survives_the_uri_round_trip() {
    let (dispatcher, host) = dispatcher();

    let block = "Acme Corp\n123 Main St, Springfield, 12345\njohn@acme.com\n555-123-4567";
    let entity = classifier::classify_content(block, "clipboard").unwrap();
    dispatcher.dispatch(&entity.to_command_uri());

    assert_eq!(
        host.entities(),
        vec![Call::Entity {
            kind: "contact".into(),
            primary: "Acme Corp".into(),
            source: "clipboard".into(),
        }]
    );
}

#[test]
fn malformed_and_unknown_input_never_raises() {
    let (dispatcher, host) = dispatcher();

    assert!(dispatcher.dispatch("").is_none());
    assert!(dispatcher.dispatch("sidekick:").is_none());
    assert!(dispatcher.dispatch("sidekick://???").is_none());
    assert!(dispatcher.dispatch("http://not-ours.test").is_none());
    assert!(dispatcher.dispatch("sidekick://unknownAction?x=1").is_none());
    assert!(host.calls().is_empty());
}
