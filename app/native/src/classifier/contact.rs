//! Multi-line contact block extraction.
//!
//! A pasted signature or address card usually stacks a company name, an
//! address, and the person's coordinates on separate lines. This module pulls
//! those apart with the shared patterns plus a line-level address heuristic.

use super::patterns;
use crate::entity::{ClassifiedEntity, EntityKind};

/// Street-type keywords marking a line as address-like.
const STREET_KEYWORDS: &[&str] = &["Street", "Road", "Avenue", "Lane", "Drive"];

/// Country markers marking a line as address-like.
const COUNTRY_MARKERS: &[&str] = &["UK", "USA", "US"];

/// Structured fields pulled from a multi-line block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactBlock {
    /// First qualifying line, treated as the company (or person) name.
    pub company_name: Option<String>,
    /// Every email match anywhere in the block.
    pub emails: Vec<String>,
    /// Every phone match anywhere in the block.
    pub phone_numbers: Vec<String>,
    /// Every website match anywhere in the block.
    pub websites: Vec<String>,
    /// Address-like lines joined in document order.
    pub address: Option<String>,
}

impl ContactBlock {
    /// Extracts contact fields from `text`.
    #[must_use]
    pub fn extract(text: &str) -> Self {
        let lines: Vec<&str> = text
            .split(['\r', '\n'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let company_index = lines.iter().position(|line| {
            line.len() > 2 && !patterns::matches_any_pattern(line)
        });
        let company_name = company_index.map(|i| lines[i].to_string());

        let mut address_lines = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            if Some(index) == company_index {
                continue;
            }
            if patterns::matches_any_pattern(line) {
                continue;
            }
            if line.len() > 5 && is_address_like(line) {
                address_lines.push(*line);
            }
        }

        Self {
            company_name,
            emails: patterns::all_matches(&patterns::EMAIL, text),
            phone_numbers: patterns::all_matches(&patterns::PHONE, text),
            websites: patterns::all_matches(&patterns::WEBSITE, text),
            address: if address_lines.is_empty() {
                None
            } else {
                Some(address_lines.join(", "))
            },
        }
    }

    /// Builds the `Contact` entity for this block.
    #[must_use]
    pub fn into_entity(self, source: &str) -> ClassifiedEntity {
        let primary = self
            .company_name
            .clone()
            .unwrap_or_else(|| "Unknown Company".to_string());
        ClassifiedEntity::new(EntityKind::Contact, primary, source)
            .with_field("companyName", self.company_name.unwrap_or_default())
            .with_field("emails", self.emails.join(";"))
            .with_field("phoneNumbers", self.phone_numbers.join(";"))
            .with_field("websites", self.websites.join(";"))
            .with_field("address", self.address.unwrap_or_default())
    }
}

/// Line-level address heuristic: a comma, a street keyword, a country marker,
/// a UK postcode, or a US ZIP.
fn is_address_like(line: &str) -> bool {
    line.contains(',')
        || STREET_KEYWORDS.iter().any(|kw| line.contains(kw))
        || COUNTRY_MARKERS.iter().any(|marker| line.contains(marker))
        || patterns::UK_POSTCODE.is_match(line)
        || patterns::US_ZIP.is_match(line)
}
