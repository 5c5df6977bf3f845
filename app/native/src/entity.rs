//! Normalized entity records.
//!
//! Everything the classifier or the ingestion pipeline detects is reduced to
//! one [`ClassifiedEntity`] shape before it reaches the host façade, and every
//! entity can be re-expressed as a command-protocol URI so classifier- and
//! URI-triggered flows share a single dispatch path.

use std::collections::HashMap;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::core::constants::URI_SCHEME;

/// Kind of a classified entity, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// An email address.
    Email,
    /// A phone number.
    Phone,
    /// A website URL or bare domain.
    Website,
    /// A postal address.
    Address,
    /// A multi-line contact block (company, address, emails, phones).
    Contact,
    /// Free-form single-line text.
    Text,
}

impl EntityKind {
    /// Lowercase wire name, used as the command-protocol action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Website => "website",
            Self::Address => "address",
            Self::Contact => "contact",
            Self::Text => "text",
        }
    }

    /// Maps a command-protocol action to a kind. `context` is the historical
    /// alias for email entities.
    #[must_use]
    pub fn from_action(action: &str) -> Option<Self> {
        match action.to_ascii_lowercase().as_str() {
            "email" | "context" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "website" => Some(Self::Website),
            "address" => Some(Self::Address),
            "contact" => Some(Self::Contact),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized record destined for the host façade.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedEntity {
    /// What the content was recognized as.
    pub kind: EntityKind,
    /// The headline value (first email match, trimmed text, company name...).
    #[serde(rename = "primaryValue")]
    pub primary_value: String,
    /// Additional named fields. Multi-valued fields join with `;`.
    pub fields: HashMap<String, String>,
    /// Where the content came from (`clipboard`, `file`, `uri`...).
    pub source: String,
    /// Local wall-clock time of classification, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

impl ClassifiedEntity {
    /// Creates an entity stamped with the current local time.
    #[must_use]
    pub fn new(kind: EntityKind, primary_value: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            kind,
            primary_value: primary_value.into(),
            fields: HashMap::new(),
            source: source.into(),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Adds a field, skipping empty values.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.fields.insert(key.into(), value);
        }
        self
    }

    /// Returns a field value, or `""` when absent.
    #[must_use]
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map_or("", String::as_str)
    }

    /// Materializes the entity as a command-protocol URI
    /// (`sidekick://<kind>?value=<urlencoded>&source=<source>`).
    #[must_use]
    pub fn to_command_uri(&self) -> String {
        format!(
            "{URI_SCHEME}://{}?value={}&source={}",
            self.kind.as_str(),
            utf8_percent_encode(&self.primary_value, NON_ALPHANUMERIC),
            utf8_percent_encode(&self.source, NON_ALPHANUMERIC),
        )
    }

    /// Human-readable one-liner for status observers.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{} detected from {}: {}",
            self.kind, self.source, self.primary_value
        )
    }
}
