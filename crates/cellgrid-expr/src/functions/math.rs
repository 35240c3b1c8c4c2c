//! Numeric functions

use crate::error::{ExprError, ExprResult};
use crate::functions::FnContext;
use cellgrid_core::CellValue;

fn to_number(v: &CellValue, what: &str) -> ExprResult<f64> {
    v.as_number().ok_or_else(|| ExprError::Type {
        detail: format!("{} must be numeric, got '{}'", what, v.to_display()),
    })
}

/// ROUND(value, [decimals]) - round half away from zero at `decimals` places
pub fn fn_round(args: &[CellValue], _ctx: &FnContext) -> ExprResult<CellValue> {
    let value = to_number(&args[0], "ROUND value")?;
    let decimals = args
        .get(1)
        .map(|v| to_number(v, "ROUND decimals"))
        .transpose()?
        .unwrap_or(0.0)
        .trunc() as i32;

    let factor = 10f64.powi(decimals);
    Ok(CellValue::Number((value * factor).round() / factor))
}

/// SUM(value, [matchValue])
///
/// With a match value, sums this row's own columns whose value equals the
/// match (a same-row aggregate, not cross-row). Without one, the first
/// argument passes through unchanged.
pub fn fn_sum(args: &[CellValue], ctx: &FnContext) -> ExprResult<CellValue> {
    match args.get(1) {
        Some(match_value) => {
            let mut total = 0.0;
            for (_, cell) in ctx.row.iter() {
                if cell.loosely_equal(match_value) {
                    total += cell.as_number().unwrap_or(0.0);
                }
            }
            Ok(CellValue::Number(total))
        }
        None => Ok(args[0].clone()),
    }
}
