//! Section selection and color extraction
//!
//! Given a runtime value and a parsed section list, exactly one section is
//! picked to render with, and the applicable color annotation (if any) is
//! surfaced alongside the text.

use crate::parser::parse_format;
use crate::render::render_section;
use crate::section::Section;
use cellgrid_core::CellValue;

/// The formatted result crossing back to the UI layer.
///
/// `color` is a named color or `#hex` string; applying it (inline span,
/// style property) is the caller's concern.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rendered {
    pub text: String,
    pub color: Option<String>,
    pub background_color: Option<String>,
}

/// Format a value with a format string
///
/// Never fails: unparseable values degrade to their plain string form.
///
/// # Example
/// ```rust
/// use cellgrid_core::CellValue;
/// use cellgrid_format::format_value;
///
/// let out = format_value(&CellValue::Number(1234.56), "[Red]#,##0.00");
/// assert_eq!(out.text, "1,234.56");
/// assert_eq!(out.color.as_deref(), Some("Red"));
/// ```
pub fn format_value(value: &CellValue, format: &str) -> Rendered {
    format_with_sections(value, &parse_format(format))
}

/// Format a value against an already-parsed section list.
///
/// Lets callers that format whole columns parse the format string once.
pub fn format_with_sections(value: &CellValue, sections: &[Section]) -> Rendered {
    if sections.is_empty() {
        // parse_format never produces this, but stay total
        return Rendered {
            text: value.to_display(),
            ..Default::default()
        };
    }

    let general;
    let section = match select_section(sections, value) {
        Some(section) => section,
        None => {
            // Conditions exhausted with no catch-all: plain display
            general = Section::general();
            &general
        }
    };

    // With multiple sections the section's own decoration carries the sign,
    // so negatives render their magnitude (Excel convention)
    let render_value = match value {
        CellValue::Number(n) if sections.len() > 1 && *n < 0.0 => CellValue::Number(n.abs()),
        _ => value.clone(),
    };

    Rendered {
        text: render_section(section, &render_value),
        color: extract_color(sections, value),
        background_color: None,
    }
}

/// Pick the section to render with, in priority order:
///
/// 1. A sole section always applies, condition or not.
/// 2. First section whose condition holds for the numeric value.
/// 3. The section flagged as the catch-all default.
/// 4. The positional positive/negative/zero/text convention, when no
///    section carries an explicit condition.
///
/// `None` means explicit conditions exist but none applies and no section
/// is the default.
fn select_section<'a>(sections: &'a [Section], value: &CellValue) -> Option<&'a Section> {
    if sections.len() == 1 {
        return Some(&sections[0]);
    }

    if sections.iter().any(|s| s.condition.is_some()) {
        if let Some(n) = value.as_number() {
            if let Some(section) = sections
                .iter()
                .find(|s| s.condition.map_or(false, |c| c.eval(n)))
            {
                return Some(section);
            }
        }
        return sections.iter().find(|s| s.is_default);
    }

    Some(positional_section(sections, value))
}

/// Positional Excel convention: positive;negative;zero;text
fn positional_section<'a>(sections: &'a [Section], value: &CellValue) -> &'a Section {
    let slot = match value.as_number() {
        Some(n) if n < 0.0 => 1,
        Some(n) if n == 0.0 => 2,
        Some(_) => 0,
        None => 3,
    };
    sections.get(slot).unwrap_or(&sections[0])
}

/// Extract the applicable color, by priority:
///
/// (a) the selected section's direct color tag (no condition, no case),
/// (b) the first conditional-color pair whose condition holds,
/// (c) the first switch/case color pair matching the value exactly,
/// (d) the positional section's color when no conditions exist.
fn extract_color(sections: &[Section], value: &CellValue) -> Option<String> {
    if let Some(selected) = select_section(sections, value) {
        if selected.condition.is_none() && selected.case.is_none() {
            if let Some(tag) = &selected.color {
                return Some(tag.value.clone());
            }
        }
    }

    if let Some(n) = value.as_number() {
        if let Some(section) = sections
            .iter()
            .find(|s| s.condition.map_or(false, |c| c.eval(n)) && s.color.is_some())
        {
            return section.color.as_ref().map(|tag| tag.value.clone());
        }
    }

    let text = value.to_display();
    if let Some(section) = sections
        .iter()
        .find(|s| s.case.as_deref() == Some(text.as_str()) && s.color.is_some())
    {
        return section.color.as_ref().map(|tag| tag.value.clone());
    }

    if sections.len() > 1
        && sections
            .iter()
            .all(|s| s.condition.is_none() && s.case.is_none())
    {
        if let Some(tag) = &positional_section(sections, value).color {
            return Some(tag.value.clone());
        }
    }

    None
}
