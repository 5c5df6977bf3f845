//! `.phone` file parsing.
//!
//! A `.phone` file carries one phone number as plain text; surrounding
//! whitespace is insignificant.

use std::path::Path;

use crate::core::{Error, Result};
use crate::entity::{ClassifiedEntity, EntityKind};

/// Reads the number from `path`.
pub fn parse(path: &Path) -> Result<String> {
    let number = std::fs::read_to_string(path)?.trim().to_string();
    if number.is_empty() {
        return Err(Error::ingest(format!("{} is empty", path.display())));
    }
    Ok(number)
}

/// Builds the normalized phone entity.
#[must_use]
pub fn to_entity(number: &str, path: &Path) -> ClassifiedEntity {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    ClassifiedEntity::new(EntityKind::Phone, number, "file").with_field("fileName", file_name)
}

/// Convenience wrapper: parse and normalize in one step.
pub fn parse_to_entity(path: &Path) -> Result<ClassifiedEntity> {
    let number = parse(path)?;
    Ok(to_entity(&number, path))
}
