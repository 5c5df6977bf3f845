//! Heuristic content classification.
//!
//! Raw text plus a source tag go in; a typed [`ClassifiedEntity`] comes out.
//! Classification is deliberately heuristic, driven by the ordered pattern
//! table in [`patterns`]:
//!
//! 1. Text with an embedded line break is a multi-line contact block,
//!    regardless of what else matches inside it (intentional product
//!    policy - see the tests pinning it down).
//! 2. Otherwise the first single-line rule with any match wins
//!    (email, then phone, then website).
//! 3. Remaining non-blank text is a plain text entity.
//!
//! The classifier also debounces: byte-identical content from the same
//! source within the debounce window is dropped without producing an entity.

pub mod contact;
pub mod patterns;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::core::constants::timing::DEBOUNCE_WINDOW;
use crate::entity::{ClassifiedEntity, EntityKind};

pub use contact::ContactBlock;

/// Callback receiving a human-readable description of each detection.
pub type DetectionObserver = Arc<dyn Fn(&str) + Send + Sync>;

/// Stateful classifier with per-source debounce.
pub struct Classifier {
    window: Duration,
    seen: Mutex<HashMap<String, (String, Instant)>>,
    observer: Option<DetectionObserver>,
}

impl Default for Classifier {
    fn default() -> Self { Self::new() }
}

impl Classifier {
    /// Creates a classifier with the standard debounce window.
    #[must_use]
    pub fn new() -> Self { Self::with_window(DEBOUNCE_WINDOW) }

    /// Creates a classifier with a custom debounce window.
    #[must_use]
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            seen: Mutex::new(HashMap::new()),
            observer: None,
        }
    }

    /// Installs the detection observer.
    pub fn set_observer(&mut self, observer: DetectionObserver) {
        self.observer = Some(observer);
    }

    /// Classifies `text`, applying the per-source debounce.
    pub fn classify(&self, text: &str, source: &str) -> Option<ClassifiedEntity> {
        self.classify_at(text, source, Instant::now())
    }

    /// Debounce-aware classification against an explicit clock (test hook).
    pub fn classify_at(&self, text: &str, source: &str, now: Instant) -> Option<ClassifiedEntity> {
        {
            let mut seen = self.seen.lock();
            if let Some((last, at)) = seen.get(source)
                && last == text
                && now.duration_since(*at) < self.window
            {
                debug!("suppressing repeat from {source} inside debounce window");
                return None;
            }
            seen.insert(source.to_string(), (text.to_string(), now));
        }

        let entity = classify_content(text, source)?;
        if let Some(observer) = &self.observer {
            observer(&entity.describe());
        }
        Some(entity)
    }
}

/// The stateless decision ladder.
///
/// Returns `None` when `text` trims to nothing.
#[must_use]
pub fn classify_content(text: &str, source: &str) -> Option<ClassifiedEntity> {
    if text.contains('\n') || text.contains('\r') {
        return Some(ContactBlock::extract(text).into_entity(source));
    }

    for (kind, pattern) in patterns::single_line_rules() {
        if let Some(first) = pattern.find(text) {
            return Some(ClassifiedEntity::new(kind, first.as_str(), source));
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(ClassifiedEntity::new(EntityKind::Text, trimmed, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_beats_phone_and_website_on_one_line() {
        let entity = classify_content("john@x.com call me", "clipboard").unwrap();
        assert_eq!(entity.kind, EntityKind::Email);
        assert_eq!(entity.primary_value, "john@x.com");
    }

    #[test]
    fn phone_wins_when_no_email_present() {
        let entity = classify_content("call 555-123-4567 now", "clipboard").unwrap();
        assert_eq!(entity.kind, EntityKind::Phone);
        assert_eq!(entity.primary_value, "555-123-4567");
    }

    #[test]
    fn website_wins_when_no_email_or_phone() {
        let entity = classify_content("see https://acme.com/about", "clipboard").unwrap();
        assert_eq!(entity.kind, EntityKind::Website);
        assert_eq!(entity.primary_value, "https://acme.com/about");
    }

    #[test]
    fn plain_text_is_trimmed() {
        let entity = classify_content("  Jane from accounting  ", "clipboard").unwrap();
        assert_eq!(entity.kind, EntityKind::Text);
        assert_eq!(entity.primary_value, "Jane from accounting");
    }

    #[test]
    fn blank_input_produces_nothing() {
        assert!(classify_content("   ", "clipboard").is_none());
        assert!(classify_content("", "clipboard").is_none());
    }

    #[test]
    fn acme_block_classifies_as_contact_with_fields() {
        let entity = classify_content(
            "Acme Corp\n123 Main St, Springfield, 12345\njohn@acme.com\n555-123-4567",
            "clipboard",
        )
        .unwrap();
        assert_eq!(entity.kind, EntityKind::Contact);
        assert_eq!(entity.field("companyName"), "Acme Corp");
        assert_eq!(entity.field("emails"), "john@acme.com");
        assert_eq!(entity.field("phoneNumbers"), "555-123-4567");
        assert!(entity.field("address").contains("123 Main St, Springfield, 12345"));
    }

    // Intentional policy: an embedded line break forces the contact path even
    // when a valid phone number (or email) is present on its own line.
    #[test]
    fn multiline_block_beats_single_line_matches() {
        let entity = classify_content("555-123-4567\njohn@x.com", "clipboard").unwrap();
        assert_eq!(entity.kind, EntityKind::Contact);
    }

    #[test]
    fn identical_repeat_inside_window_is_suppressed() {
        let classifier = Classifier::with_window(Duration::from_millis(500));
        let start = Instant::now();

        assert!(classifier.classify_at("john@x.com", "clipboard", start).is_some());
        assert!(
            classifier
                .classify_at("john@x.com", "clipboard", start + Duration::from_millis(100))
                .is_none()
        );
    }

    #[test]
    fn repeat_after_window_is_processed_again() {
        let classifier = Classifier::with_window(Duration::from_millis(500));
        let start = Instant::now();

        assert!(classifier.classify_at("john@x.com", "clipboard", start).is_some());
        assert!(
            classifier
                .classify_at("john@x.com", "clipboard", start + Duration::from_millis(600))
                .is_some()
        );
    }

    #[test]
    fn different_content_inside_window_is_processed() {
        let classifier = Classifier::with_window(Duration::from_millis(500));
        let start = Instant::now();

        assert!(classifier.classify_at("john@x.com", "clipboard", start).is_some());
        assert!(
            classifier
                .classify_at("jane@x.com", "clipboard", start + Duration::from_millis(100))
                .is_some()
        );
    }

    #[test]
    fn same_content_from_other_source_is_processed() {
        let classifier = Classifier::with_window(Duration::from_millis(500));
        let start = Instant::now();

        assert!(classifier.classify_at("john@x.com", "clipboard", start).is_some());
        assert!(
            classifier
                .classify_at("john@x.com", "file", start + Duration::from_millis(100))
                .is_some()
        );
    }

    #[test]
    fn observer_receives_detection_description() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut classifier = Classifier::new();
        classifier.set_observer(Arc::new(move |description| {
            sink.lock().push(description.to_string());
        }));

        classifier.classify("john@x.com", "clipboard");
        let messages = seen.lock();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("email"));
        assert!(messages[0].contains("clipboard"));
        assert!(messages[0].contains("john@x.com"));
    }
}
