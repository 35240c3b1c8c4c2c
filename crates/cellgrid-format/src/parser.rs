//! Excel-style format string parser
//!
//! Splits a format string into 1-4 ordered sections, each optionally carrying
//! a numeric condition, a color tag, a switch/case literal, and quoted
//! prefix/suffix text around the digit/date pattern.
//!
//! Parsing is permissive and never fails: malformed tags are simply left as
//! literal body text, because format strings drive live cell rendering.

use crate::section::{CondOp, Condition, Section};
use cellgrid_core::ColorTag;

/// Maximum number of sections a format string can carry
pub const MAX_SECTIONS: usize = 4;

/// Parse a format string into its sections
///
/// # Example
/// ```rust
/// use cellgrid_format::parse_format;
///
/// let sections = parse_format("[>0]#,##0.00;[<0]-#,##0.00;0");
/// assert_eq!(sections.len(), 3);
/// assert!(sections[2].is_default);
/// ```
pub fn parse_format(format: &str) -> Vec<Section> {
    if format.trim().is_empty() {
        return vec![Section::general()];
    }

    let mut sections: Vec<Section> = split_sections(format)
        .into_iter()
        .map(|chunk| parse_section(&chunk))
        .collect();

    // The last of 2+ sections is the catch-all when it has no condition
    if sections.len() >= 2 {
        let last = sections.len() - 1;
        if sections[last].condition.is_none() {
            sections[last].is_default = true;
        }
    }

    sections
}

/// Split on `;` outside of double-quoted substrings. Clauses beyond the
/// fourth fold into the fourth verbatim.
fn split_sections(format: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in format.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ';' if !in_quotes && chunks.len() < MAX_SECTIONS - 1 => {
                chunks.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    chunks.push(current);
    chunks
}

fn parse_section(text: &str) -> Section {
    let mut section = Section::default();
    let mut rest = text.trim();

    // Leading bracket tags: condition, color, switch/case literal
    while let Some(after_open) = rest.strip_prefix('[') {
        let Some(close) = after_open.find(']') else {
            break;
        };
        let content = &after_open[..close];
        let after = after_open[close + 1..].trim_start();

        if section.condition.is_none() {
            if let Some(cond) = parse_condition(content) {
                section.condition = Some(cond);
                rest = after;
                continue;
            }
        }

        if section.color.is_none() {
            if let Some(tag) = ColorTag::parse(content) {
                section.color = Some(tag);
                rest = after;
                continue;
            }
        }

        // A non-condition, non-color tag is a switch/case literal, but only
        // when a color tag follows it; otherwise the bracket is body text
        if section.case.is_none() && next_tag_is_color(after) {
            section.case = Some(content.to_string());
            rest = after;
            continue;
        }

        log::debug!("format tag [{}] not recognized, kept as literal text", content);
        break;
    }

    // Leading quoted run is the prefix
    if let Some(after_quote) = rest.strip_prefix('"') {
        if let Some(close) = after_quote.find('"') {
            section.prefix = Some(after_quote[..close].to_string());
            rest = &after_quote[close + 1..];
        }
    }

    // Trailing quoted run is the suffix
    if let Some(before_quote) = rest.strip_suffix('"') {
        if let Some(open) = before_quote.rfind('"') {
            section.suffix = Some(before_quote[open + 1..].to_string());
            rest = &rest[..open];
        }
    }

    section.body = rest.trim().to_string();
    section
}

fn parse_condition(content: &str) -> Option<Condition> {
    let (op, number) = CondOp::strip(content)?;
    let threshold: f64 = number.trim().parse().ok()?;
    Some(Condition { op, threshold })
}

fn next_tag_is_color(rest: &str) -> bool {
    let Some(after_open) = rest.strip_prefix('[') else {
        return false;
    };
    let Some(close) = after_open.find(']') else {
        return false;
    };
    ColorTag::parse(&after_open[..close]).is_some()
}
