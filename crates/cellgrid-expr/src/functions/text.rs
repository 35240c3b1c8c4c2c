//! Text functions

use crate::error::ExprResult;
use crate::functions::FnContext;
use cellgrid_core::CellValue;

/// CONCAT(a, b, ...) - join all arguments as text, no separator
pub fn fn_concat(args: &[CellValue], _ctx: &FnContext) -> ExprResult<CellValue> {
    let mut out = String::new();
    for arg in args {
        out.push_str(&arg.to_display());
    }
    Ok(CellValue::String(out))
}

/// SUBSTRING(text, start, end) - zero-based, end-exclusive.
///
/// Indices clamp the way `String.prototype.substring` clamps: negatives
/// become 0, values past the end become the length, and a start greater than
/// the end swaps with it.
pub fn fn_substring(args: &[CellValue], _ctx: &FnContext) -> ExprResult<CellValue> {
    let text = args[0].to_display();
    let len = text.chars().count() as i64;

    let clamp = |v: &CellValue| -> i64 {
        let n = v.as_number().unwrap_or(0.0);
        if n.is_nan() {
            return 0;
        }
        (n.trunc() as i64).clamp(0, len)
    };

    let mut start = clamp(&args[1]);
    let mut end = clamp(&args[2]);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let out: String = text
        .chars()
        .skip(start as usize)
        .take((end - start) as usize)
        .collect();
    Ok(CellValue::String(out))
}
