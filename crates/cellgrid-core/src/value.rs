//! Scalar cell values and their coercion rules

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// A scalar value flowing through expression evaluation and cell formatting.
///
/// Rows hold these, evaluation produces them, and the formatter consumes them.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Absent/null cell
    #[default]
    Null,
    /// Numeric value
    Number(f64),
    /// Text value
    String(String),
    /// Boolean value
    Boolean(bool),
    /// Date/time value
    Date(NaiveDateTime),
    /// Ordered sequence (e.g. an `IN` list or a whole-row snapshot)
    Array(Vec<CellValue>),
}

/// String date formats accepted when coercing text to a date, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

const DATE_ONLY_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

impl CellValue {
    /// Convert to number, if possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Boolean(true) => Some(1.0),
            CellValue::Boolean(false) => Some(0.0),
            CellValue::String(s) => {
                let t = s.trim();
                if t.is_empty() {
                    // Empty text never silently becomes 0
                    None
                } else {
                    t.parse().ok()
                }
            }
            // Milliseconds since the unix epoch, so dates order and subtract naturally
            CellValue::Date(d) => Some(d.and_utc().timestamp_millis() as f64),
            _ => None,
        }
    }

    /// Convert to date, if possible
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::String(s) => {
                let t = s.trim();
                for fmt in DATE_FORMATS {
                    if let Ok(dt) = NaiveDateTime::parse_from_str(t, fmt) {
                        return Some(dt);
                    }
                }
                for fmt in DATE_ONLY_FORMATS {
                    if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
                        return d.and_hms_opt(0, 0, 0);
                    }
                }
                None
            }
            _ => None,
        }
    }

    /// Truthiness used by logical operators: null, 0, NaN and "" are falsy,
    /// everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::String(s) => !s.is_empty(),
            CellValue::Boolean(b) => *b,
            CellValue::Date(_) => true,
            CellValue::Array(_) => true,
        }
    }

    /// Loose, coercing equality.
    ///
    /// Text compares as text; otherwise both sides are coerced to numbers when
    /// possible, and the display strings are compared as a last resort. All
    /// equality in the engine funnels through here so the policy can be
    /// tightened in one place.
    pub fn loosely_equal(&self, other: &CellValue) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::String(a), CellValue::String(b)) => a == b,
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => self.to_display() == other.to_display(),
            },
        }
    }

    /// Display form used for concatenation and pass-through rendering.
    ///
    /// Whole numbers print without a trailing `.0`.
    pub fn to_display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(n) => format_number_plain(*n),
            CellValue::String(s) => s.clone(),
            CellValue::Boolean(true) => "true".to_string(),
            CellValue::Boolean(false) => "false".to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%dT%H:%M:%S").to_string(),
            CellValue::Array(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_display()).collect();
                parts.join(",")
            }
        }
    }

    /// Check if this is a text value
    pub fn is_string(&self) -> bool {
        matches!(self, CellValue::String(_))
    }
}

/// Plain numeric display: integers without decimals, no grouping.
pub fn format_number_plain(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(d: NaiveDateTime) -> Self {
        CellValue::Date(d)
    }
}

impl<T: Into<CellValue>> From<Vec<T>> for CellValue {
    fn from(items: Vec<T>) -> Self {
        CellValue::Array(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Number(1.5).as_number(), Some(1.5));
        assert_eq!(CellValue::Boolean(true).as_number(), Some(1.0));
        assert_eq!(CellValue::String("42".into()).as_number(), Some(42.0));
        assert_eq!(CellValue::String(" 42 ".into()).as_number(), Some(42.0));
        assert_eq!(CellValue::String("".into()).as_number(), None);
        assert_eq!(CellValue::String("  ".into()).as_number(), None);
        assert_eq!(CellValue::String("abc".into()).as_number(), None);
        assert_eq!(CellValue::Null.as_number(), None);
    }

    #[test]
    fn test_as_date() {
        let d = CellValue::String("2024-03-01".into()).as_date().unwrap();
        assert_eq!(d.format("%Y-%m-%d").to_string(), "2024-03-01");

        let dt = CellValue::String("2024-03-01T10:30:00".into())
            .as_date()
            .unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "10:30");

        assert!(CellValue::Number(5.0).as_date().is_none());
        assert!(CellValue::String("not a date".into()).as_date().is_none());
    }

    #[test]
    fn test_truthiness() {
        assert!(!CellValue::Null.is_truthy());
        assert!(!CellValue::Number(0.0).is_truthy());
        assert!(!CellValue::String(String::new()).is_truthy());
        assert!(CellValue::Number(-1.0).is_truthy());
        assert!(CellValue::String("0".into()).is_truthy());
        assert!(CellValue::Array(vec![]).is_truthy());
    }

    #[test]
    fn test_loose_equality() {
        assert!(CellValue::Number(5.0).loosely_equal(&CellValue::String("5".into())));
        assert!(CellValue::Boolean(true).loosely_equal(&CellValue::Number(1.0)));
        assert!(CellValue::String("a".into()).loosely_equal(&CellValue::String("a".into())));
        assert!(!CellValue::String("5".into()).loosely_equal(&CellValue::String("5.0".into())));
        assert!(!CellValue::Number(5.0).loosely_equal(&CellValue::Number(6.0)));
    }

    #[test]
    fn test_format_number_plain_from_root() {
        use crate::format_number_plain;
        assert_eq!(format_number_plain(2.0), "2");
        assert_eq!(format_number_plain(2.5), "2.5");
        assert_eq!(format_number_plain(-3.0), "-3");
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Number(42.0).to_display(), "42");
        assert_eq!(CellValue::Number(3.14).to_display(), "3.14");
        assert_eq!(CellValue::Boolean(true).to_display(), "true");
        assert_eq!(CellValue::Null.to_display(), "");
    }
}
