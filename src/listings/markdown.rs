// markdown.rs
use crate::domain::PropertyRecord;
use crate::listings::sections::{Section, SectionParser};
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

// **$450,000** | 3 bed / 2.5 bath | 1,850 sqft | Built 2023
static SUMMARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*\$([0-9,]+)\*\* \| ([0-9]+) bed / ([0-9.]+) bath \| ([0-9,]+) sqft \| Built ([0-9]{4})")
        .expect("valid summary regex")
});
static ESTIMATED_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*Estimated Value:\*\* \$([0-9,]+)").expect("valid estimate regex")
});
static VALUE_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*Value Gap:\*\* ([0-9.-]+)%").expect("valid gap regex"));
static DISTANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*Distance to home base:\*\* ([0-9.]+) mi").expect("valid distance regex")
});
static LISTING_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Listing: \[View Listing\]\((.+?)\)").expect("valid listing regex")
});
static PHOTO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[Property photo [0-9]+\]\((.+?)\)").expect("valid photo regex")
});

/// The listing layout written by the search notes in the vault.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownListingParser;

impl SectionParser for MarkdownListingParser {
    fn parse_section(&self, section: &Section<'_>) -> Option<PropertyRecord> {
        let body = section.body;
        let summary = SUMMARY.captures(body)?;

        // All or nothing: one bad number drops the section.
        let price = parse_grouped(&summary[1])?;
        let beds = summary[2].parse().ok()?;
        let baths = summary[3].parse().ok()?;
        let sqft = parse_grouped(&summary[4])?;
        let year_built = summary[5].parse().ok()?;

        Some(PropertyRecord {
            rank: section.rank,
            address: section.address.to_string(),
            price,
            beds,
            baths,
            sqft,
            year_built,
            estimated_value: first_capture(&ESTIMATED_VALUE, body).and_then(parse_grouped),
            value_gap: first_capture(&VALUE_GAP, body).and_then(|s| s.parse().ok()),
            distance_miles: first_capture(&DISTANCE, body).and_then(|s| s.parse().ok()),
            listing_url: first_capture(&LISTING_LINK, body).map(str::to_string),
            photos: PHOTO
                .captures_iter(body)
                .map(|caps| caps[1].to_string())
                .collect(),
        })
    }
}

fn first_capture<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parses numbers written with thousands separators, e.g. `1,850`.
fn parse_grouped<T: FromStr>(text: &str) -> Option<T> {
    text.replace(',', "").parse().ok()
}
