//! Headers-level `.eml` parsing.
//!
//! Only the fields the host consumes are extracted: subject, sender,
//! recipients, date, and whether text/HTML bodies are present. Full MIME
//! decoding is out of scope.

use std::path::Path;

use crate::classifier::patterns;
use crate::core::{Error, Result};
use crate::entity::{ClassifiedEntity, EntityKind};

/// Header summary of one `.eml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmlInfo {
    pub subject: String,
    pub from: String,
    pub to: String,
    pub date: Option<String>,
    pub has_html: bool,
    pub has_text: bool,
}

/// Parses the message at `path`.
pub fn parse(path: &Path) -> Result<EmlInfo> {
    let raw = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&raw);
    Ok(parse_str(&text))
}

/// Parses message text already in memory.
#[must_use]
pub fn parse_str(text: &str) -> EmlInfo {
    let headers = unfold_headers(text);
    let lower = text.to_ascii_lowercase();

    EmlInfo {
        subject: header_value(&headers, "subject").unwrap_or_default(),
        from: header_value(&headers, "from").unwrap_or_default(),
        to: header_value(&headers, "to").unwrap_or_default(),
        date: header_value(&headers, "date"),
        has_html: lower.contains("text/html"),
        has_text: lower.contains("text/plain"),
    }
}

/// Converts a parsed message into the normalized email entity.
#[must_use]
pub fn to_entity(info: &EmlInfo, path: &Path) -> ClassifiedEntity {
    // "Jane Doe <jane@acme.com>" headlines as the bare address.
    let primary = patterns::EMAIL
        .find(&info.from)
        .map_or_else(|| info.from.clone(), |m| m.as_str().to_string());
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    ClassifiedEntity::new(EntityKind::Email, primary, "file")
        .with_field("subject", info.subject.clone())
        .with_field("from", info.from.clone())
        .with_field("to", info.to.clone())
        .with_field("date", info.date.clone().unwrap_or_default())
        .with_field("fileName", file_name)
}

/// Splits the header section and unfolds continuation lines.
fn unfold_headers(text: &str) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for line in text.split(['\n']) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            // Blank line ends the header section.
            break;
        }
        if line.starts_with([' ', '\t'])
            && let Some(last) = headers.last_mut()
        {
            last.push(' ');
            last.push_str(line.trim_start());
            continue;
        }
        headers.push(line.to_string());
    }
    headers
}

/// Finds a header by name, case-insensitively.
fn header_value(headers: &[String], name: &str) -> Option<String> {
    headers.iter().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim().eq_ignore_ascii_case(name) {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

/// Convenience wrapper: parse and normalize in one step.
pub fn parse_to_entity(path: &Path) -> Result<ClassifiedEntity> {
    let info = parse(path)?;
    if info.from.is_empty() && info.subject.is_empty() {
        return Err(Error::ingest(format!(
            "{} has no recognizable mail headers",
            path.display()
        )));
    }
    Ok(to_entity(&info, path))
}
