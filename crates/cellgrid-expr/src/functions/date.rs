//! Date functions

use crate::error::{ExprError, ExprResult};
use crate::functions::FnContext;
use cellgrid_core::CellValue;
use chrono::{Datelike, NaiveDateTime};

const MS_PER_DAY: f64 = 86_400_000.0;

fn to_date(v: &CellValue, what: &str) -> ExprResult<NaiveDateTime> {
    v.as_date().ok_or_else(|| ExprError::Type {
        detail: format!("{} is not a date: '{}'", what, v.to_display()),
    })
}

/// DATE_DIFF(date1, date2, [unit]) - unit is days, months or years.
///
/// Days are elapsed-time based (floor of the millisecond difference); months
/// and years are calendar-field arithmetic, not elapsed time.
pub fn fn_date_diff(args: &[CellValue], _ctx: &FnContext) -> ExprResult<CellValue> {
    let d1 = to_date(&args[0], "DATE_DIFF date1")?;
    let d2 = to_date(&args[1], "DATE_DIFF date2")?;
    let unit = args
        .get(2)
        .map(|v| v.to_display())
        .unwrap_or_else(|| "days".to_string());

    let diff = match unit.as_str() {
        "days" => {
            let ms = d1.and_utc().timestamp_millis() - d2.and_utc().timestamp_millis();
            (ms as f64 / MS_PER_DAY).floor()
        }
        "months" => {
            ((d1.year() - d2.year()) * 12 + (d1.month() as i32 - d2.month() as i32)) as f64
        }
        "years" => (d1.year() - d2.year()) as f64,
        _ => return Err(ExprError::UnknownUnit { unit }),
    };

    Ok(CellValue::Number(diff))
}

/// FORMAT_DATE(date, pattern) - single-pass replacement of the `YYYY`, `MM`
/// and `DD` tokens, zero-padded. No escaping.
pub fn fn_format_date(args: &[CellValue], _ctx: &FnContext) -> ExprResult<CellValue> {
    let date = to_date(&args[0], "FORMAT_DATE date")?;
    let pattern = args[1].to_display();

    let mut out = String::with_capacity(pattern.len());
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i..].starts_with(&['Y', 'Y', 'Y', 'Y']) {
            out.push_str(&format!("{:04}", date.year()));
            i += 4;
        } else if chars[i..].starts_with(&['M', 'M']) {
            out.push_str(&format!("{:02}", date.month()));
            i += 2;
        } else if chars[i..].starts_with(&['D', 'D']) {
            out.push_str(&format!("{:02}", date.day()));
            i += 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    Ok(CellValue::String(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgrid_core::Row;
    use pretty_assertions::assert_eq;

    fn ctx(row: &Row) -> FnContext<'_> {
        FnContext { row }
    }

    fn date(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    #[test]
    fn test_date_diff_days() {
        let row = Row::new();
        let out = fn_date_diff(
            &[date("2024-03-10"), date("2024-03-01")],
            &ctx(&row),
        )
        .unwrap();
        assert_eq!(out, CellValue::Number(9.0));

        // Default unit is days; partial days floor
        let out = fn_date_diff(
            &[date("2024-03-02T12:00:00"), date("2024-03-01")],
            &ctx(&row),
        )
        .unwrap();
        assert_eq!(out, CellValue::Number(1.0));
    }

    #[test]
    fn test_date_diff_months_and_years() {
        let row = Row::new();

        // Calendar-field arithmetic: day-of-month does not matter
        let out = fn_date_diff(
            &[
                date("2024-03-01"),
                date("2023-12-31"),
                CellValue::String("months".into()),
            ],
            &ctx(&row),
        )
        .unwrap();
        assert_eq!(out, CellValue::Number(3.0));

        let out = fn_date_diff(
            &[
                date("2024-01-01"),
                date("2023-12-31"),
                CellValue::String("years".into()),
            ],
            &ctx(&row),
        )
        .unwrap();
        assert_eq!(out, CellValue::Number(1.0));
    }

    #[test]
    fn test_date_diff_unknown_unit() {
        let row = Row::new();
        let err = fn_date_diff(
            &[
                date("2024-01-01"),
                date("2023-12-31"),
                CellValue::String("weeks".into()),
            ],
            &ctx(&row),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ExprError::UnknownUnit {
                unit: "weeks".into()
            }
        );
    }

    #[test]
    fn test_format_date() {
        let row = Row::new();
        let out = fn_format_date(
            &[date("2024-03-05"), CellValue::String("YYYY-MM-DD".into())],
            &ctx(&row),
        )
        .unwrap();
        assert_eq!(out, CellValue::String("2024-03-05".into()));

        let out = fn_format_date(
            &[date("2024-03-05"), CellValue::String("DD/MM/YYYY".into())],
            &ctx(&row),
        )
        .unwrap();
        assert_eq!(out, CellValue::String("05/03/2024".into()));
    }

    #[test]
    fn test_format_date_non_date() {
        let row = Row::new();
        let err = fn_format_date(
            &[CellValue::Number(5.0), CellValue::String("YYYY".into())],
            &ctx(&row),
        )
        .unwrap_err();
        assert!(matches!(err, ExprError::Type { .. }));
    }
}
