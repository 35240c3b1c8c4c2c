//! Rendering one value through one format section
//!
//! Numeric bodies use `#`/`0` digit placeholders with optional grouping,
//! percent scaling, and a currency symbol; date bodies substitute
//! `yyyy`/`MM`/`dd`/`HH`/`mm`/`ss` tokens; anything else passes the value
//! through. Rendering degrades to the value's plain string form when the
//! value cannot be coerced; it never fails.

use crate::section::Section;
use cellgrid_core::{format_number_plain, CellValue};
use chrono::{Datelike, NaiveDateTime, Timelike};

const CURRENCY_SYMBOLS: [char; 3] = ['$', '€', '£'];

/// Render a value through one section, applying the section's prefix and
/// suffix around the formatted body.
pub fn render_section(section: &Section, value: &CellValue) -> String {
    let body = render_body(&section.body, value);

    match (&section.prefix, &section.suffix) {
        (None, None) => body,
        (prefix, suffix) => format!(
            "{}{}{}",
            prefix.as_deref().unwrap_or(""),
            body,
            suffix.as_deref().unwrap_or("")
        ),
    }
}

fn render_body(body: &str, value: &CellValue) -> String {
    if body.is_empty() || body == "General" {
        return match value {
            CellValue::Number(n) => format_number_plain(*n),
            _ => value.to_display(),
        };
    }

    if is_numeric_pattern(body) {
        return match value.as_number() {
            Some(n) if n.is_finite() => format_number(n, body),
            _ => value.to_display(),
        };
    }

    if is_date_pattern(body) {
        return match value.as_date() {
            Some(date) => format_date(&date, body),
            None => value.to_display(),
        };
    }

    // Neither digits nor date tokens: the value passes through unchanged
    value.to_display()
}

fn is_numeric_pattern(body: &str) -> bool {
    body.contains('#') || body.contains('0')
}

const DATE_TOKENS: [&str; 6] = ["yyyy", "yy", "MM", "dd", "HH", "ss"];

fn is_date_pattern(body: &str) -> bool {
    DATE_TOKENS.iter().any(|t| body.contains(t)) || body.contains("mm")
}

/// Render a number per a `#`/`0` digit pattern.
///
/// Decimal places come from the placeholders after the `.`: `0` forces a
/// digit, `#` keeps it only while significant. Grouping applies when the
/// integer part of the pattern contains `,`. A leading `-` in the pattern is
/// literal sign decoration; `%` scales by 100 and appends a percent sign; a
/// currency symbol is prepended to the grouped digits.
pub fn format_number(value: f64, pattern: &str) -> String {
    let mut pat = pattern;
    let mut value = value;

    let literal_minus = if let Some(rest) = pat.strip_prefix('-') {
        pat = rest;
        true
    } else {
        false
    };

    let currency = pat.chars().find(|c| CURRENCY_SYMBOLS.contains(c));
    let percent = pat.contains('%');
    if percent {
        value *= 100.0;
    }

    let cleaned: String = pat
        .chars()
        .filter(|c| matches!(c, '#' | '0' | ',' | '.'))
        .collect();
    let (int_pat, frac_pat) = match cleaned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (cleaned.as_str(), ""),
    };

    let grouping = int_pat.contains(',');
    let min_int = int_pat.chars().filter(|c| *c == '0').count();
    let min_dec = frac_pat.chars().filter(|c| *c == '0').count();
    let max_dec = frac_pat
        .chars()
        .filter(|c| matches!(c, '0' | '#'))
        .count()
        .min(18);

    let negative = value < 0.0;
    let magnitude = value.abs();

    // Integer-domain rounding keeps half-away-from-zero exact at the
    // pattern's width. Halfway decimals sit a few ulps below the midpoint
    // after scaling (1.005 becomes 100.4999...), so the round-up threshold
    // is lowered by that much; the tolerance is capped so values far from a
    // midpoint are never bumped.
    let factor = 10u128.pow(max_dec as u32);
    let scaled = magnitude * factor as f64;
    if !scaled.is_finite() || scaled >= u128::MAX as f64 {
        return format_number_plain(value);
    }
    let tolerance = (scaled * f64::EPSILON * 4.0).min(0.125);
    let mut units = scaled.trunc() as u128;
    if scaled.fract() >= 0.5 - tolerance {
        units += 1;
    }
    let int_part = units / factor;
    let frac_part = units % factor;

    let mut int_str = if int_part == 0 && min_int == 0 {
        String::new()
    } else {
        let s = int_part.to_string();
        if s.len() < min_int {
            format!("{}{}", "0".repeat(min_int - s.len()), s)
        } else {
            s
        }
    };
    if grouping {
        int_str = group_thousands(&int_str);
    }

    let mut frac_str = format!("{:0width$}", frac_part, width = max_dec);
    while frac_str.len() > min_dec && frac_str.ends_with('0') {
        frac_str.pop();
    }

    let mut out = String::new();
    if literal_minus || negative {
        out.push('-');
    }
    if let Some(sym) = currency {
        out.push(sym);
    }
    out.push_str(&int_str);
    if !frac_str.is_empty() {
        out.push('.');
        out.push_str(&frac_str);
    }
    if percent {
        out.push('%');
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}

/// Substitute date tokens, zero-padded to token width, in one scan.
pub fn format_date(date: &NaiveDateTime, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let bytes = pattern.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let rest = &pattern[i..];
        if rest.starts_with("yyyy") {
            out.push_str(&format!("{:04}", date.year()));
            i += 4;
        } else if rest.starts_with("yy") {
            out.push_str(&format!("{:02}", date.year().rem_euclid(100)));
            i += 2;
        } else if rest.starts_with("MM") {
            out.push_str(&format!("{:02}", date.month()));
            i += 2;
        } else if rest.starts_with("dd") {
            out.push_str(&format!("{:02}", date.day()));
            i += 2;
        } else if rest.starts_with("HH") {
            out.push_str(&format!("{:02}", date.hour()));
            i += 2;
        } else if rest.starts_with("mm") {
            out.push_str(&format!("{:02}", date.minute()));
            i += 2;
        } else if rest.starts_with("ss") {
            out.push_str(&format!("{:02}", date.second()));
            i += 2;
        } else {
            // Patterns are ASCII in practice, but stay UTF-8 safe
            let c = rest.chars().next().unwrap();
            out.push(c);
            i += c.len_utf8();
        }
    }
    out
}
