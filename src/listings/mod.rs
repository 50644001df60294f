mod markdown;
mod sections;

pub use markdown::MarkdownListingParser;
pub use sections::{extract_with, split_sections, Section, SectionParser};

use crate::domain::PropertyRecord;

/// Extracts every well-formed listing from a profile document, in source order.
pub fn extract_properties(content: &str) -> Vec<PropertyRecord> {
    extract_with(&MarkdownListingParser, content)
}
