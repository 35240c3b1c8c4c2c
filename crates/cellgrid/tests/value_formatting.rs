//! Tests for Excel-style format strings applied to cell values

use cellgrid::prelude::*;
use cellgrid::CellValue;
use pretty_assertions::assert_eq;

#[test]
fn test_conditional_sections() {
    let fmt = "[>0]#,##0.00;[<0]-#,##0.00;0";
    assert_eq!(
        format_value(&CellValue::Number(1234.56), fmt).text,
        "1,234.56"
    );
    assert_eq!(
        format_value(&CellValue::Number(-1234.56), fmt).text,
        "-1,234.56"
    );
    assert_eq!(format_value(&CellValue::Number(0.0), fmt).text, "0");
}

#[test]
fn test_color_surfaces_alongside_text() {
    let out = format_value(&CellValue::Number(1234.56), "[Red]#,##0.00");
    assert_eq!(out.text, "1,234.56");
    assert_eq!(out.color.as_deref(), Some("Red"));

    let out = format_value(&CellValue::Number(0.25), "[#1E90FF]0%");
    assert_eq!(out.text, "25%");
    assert_eq!(out.color.as_deref(), Some("#1E90FF"));
}

#[test]
fn test_percent_rounding() {
    assert_eq!(format_value(&CellValue::Number(0.12345), "0.00%").text, "12.35%");
    assert_eq!(format_value(&CellValue::Number(1.0), "0.00%").text, "100.00%");
}

#[test]
fn test_prefix_and_suffix_wrap_the_body() {
    let out = format_value(&CellValue::Number(12.5), "\"approx \"0.0\" units\"");
    assert_eq!(out.text, "approx 12.5 units");
}

#[test]
fn test_date_patterns() {
    let out = format_value(&CellValue::String("2024-03-05".into()), "dd/MM/yyyy");
    assert_eq!(out.text, "05/03/2024");

    let out = format_value(
        &CellValue::String("2024-03-05T09:07:03".into()),
        "yyyy-MM-dd HH:mm:ss",
    );
    assert_eq!(out.text, "2024-03-05 09:07:03");
}

#[test]
fn test_switch_case_colors() {
    let fmt = "[OPEN][Green]General;[LATE][Red]General";

    let out = format_value(&CellValue::String("OPEN".into()), fmt);
    assert_eq!(out.text, "OPEN");
    assert_eq!(out.color.as_deref(), Some("Green"));

    let out = format_value(&CellValue::String("LATE".into()), fmt);
    assert_eq!(out.color.as_deref(), Some("Red"));

    // No case matches: text still renders, no color
    let out = format_value(&CellValue::String("CLOSED".into()), fmt);
    assert_eq!(out.text, "CLOSED");
    assert_eq!(out.color, None);
}

#[test]
fn test_non_numeric_value_degrades() {
    let out = format_value(&CellValue::String("n/a".into()), "#,##0.00");
    assert_eq!(out.text, "n/a");

    let out = format_value(&CellValue::Null, "0.00");
    assert_eq!(out.text, "");
}

#[test]
fn test_empty_format_is_plain_display() {
    assert_eq!(format_value(&CellValue::Number(42.0), "").text, "42");
    assert_eq!(format_value(&CellValue::Number(2.5), "").text, "2.5");
    assert_eq!(
        format_value(&CellValue::String("hi".into()), "").text,
        "hi"
    );
}

/// Rebuilding a quoted-prefix/body/quoted-suffix section from its parsed
/// parts parses back to an equivalent section
#[test]
fn test_prefix_body_suffix_round_trip() {
    for fmt in ["\"~\"0.0\" kg\"", "\"$ \"#,##0.00", "0.00\" net\""] {
        let sections = parse_format(fmt);
        let s = &sections[0];

        let mut rebuilt = String::new();
        if let Some(prefix) = &s.prefix {
            rebuilt.push_str(&format!("\"{}\"", prefix));
        }
        rebuilt.push_str(&s.body);
        if let Some(suffix) = &s.suffix {
            rebuilt.push_str(&format!("\"{}\"", suffix));
        }

        let reparsed = parse_format(&rebuilt);
        assert_eq!(&reparsed[0], s, "format {fmt:?} rebuilt as {rebuilt:?}");
    }
}

#[test]
fn test_parse_format_structure() {
    let sections = parse_format("[>0]#,##0.00;[<0]-#,##0.00;0");
    assert_eq!(sections.len(), 3);
    assert!(sections[0].condition.is_some());
    assert!(sections[2].condition.is_none());
    assert!(sections[2].is_default);
}
