//! Property tests: format parsing and rendering are total
//!
//! Format strings come from user configuration and drive live cell
//! rendering, so neither parsing nor formatting may panic or error on any
//! input. Malformed formats degrade to literal text.

use cellgrid_core::CellValue;
use cellgrid_format::{format_value, parse_format, MAX_SECTIONS};
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Null),
        any::<f64>().prop_map(CellValue::Number),
        ".*".prop_map(CellValue::String),
        any::<bool>().prop_map(CellValue::Boolean),
    ]
}

proptest! {
    #[test]
    fn parse_format_never_panics(format in ".*") {
        let sections = parse_format(&format);
        prop_assert!(!sections.is_empty());
        prop_assert!(sections.len() <= MAX_SECTIONS);
    }

    #[test]
    fn format_value_never_panics(value in arb_value(), format in ".*") {
        // Totality only; the text itself depends on the format
        let _ = format_value(&value, &format);
    }

    #[test]
    fn plain_numbers_round_trip_digits(n in -1_000_000i64..1_000_000i64) {
        let out = format_value(&CellValue::Number(n as f64), "");
        prop_assert_eq!(out.text, n.to_string());
    }

    #[test]
    fn grouped_format_keeps_all_integer_digits(n in 0i64..1_000_000_000_000_000i64) {
        let out = format_value(&CellValue::Number(n as f64), "#,##0");
        let digits: String = out.text.chars().filter(|c| c.is_ascii_digit()).collect();
        prop_assert_eq!(digits, n.to_string());
    }
}
