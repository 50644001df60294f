use crate::domain::PropertyRecord;
use once_cell::sync::Lazy;
use regex::Regex;

// ### #15: 1023 Liberty Ave, Livingston, TX 77351
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^### #([0-9]+): ([^\r\n]*)(?:\r?\n)?").expect("valid heading regex"));

/// A heading plus the free-form text up to the next heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section<'a> {
    pub rank: u32,
    pub address: &'a str,
    pub body: &'a str,
}

/// Turns one section into a record, or `None` when the section lacks the
/// fields a record needs.
///
/// New note layouts plug in here; ranking and rendering only ever see
/// `PropertyRecord`s.
pub trait SectionParser {
    fn parse_section(&self, section: &Section<'_>) -> Option<PropertyRecord>;
}

/// Splits a document on `### #<rank>: <address>` headings.
///
/// Text before the first heading is ignored. A heading whose rank does not
/// fit a `u32` or whose address is blank still ends the previous section but
/// yields nothing itself.
pub fn split_sections(content: &str) -> Vec<Section<'_>> {
    let headings: Vec<_> = HEADING.captures_iter(content).collect();

    headings
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let heading = caps.get(0)?;
            let body_end = headings
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(content.len(), |m| m.start());

            let rank = caps[1].parse().ok()?;
            let address = caps.get(2).map_or("", |m| m.as_str()).trim();
            if address.is_empty() {
                return None;
            }

            Some(Section {
                rank,
                address,
                body: &content[heading.end()..body_end],
            })
        })
        .collect()
}

/// Runs `parser` over every section, keeping source order and silently
/// dropping sections it rejects.
pub fn extract_with<P>(parser: &P, content: &str) -> Vec<PropertyRecord>
where
    P: SectionParser + ?Sized,
{
    split_sections(content)
        .iter()
        .filter_map(|section| parser.parse_section(section))
        .collect()
}
