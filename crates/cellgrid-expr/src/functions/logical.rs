//! Logical functions

use crate::error::{ExprError, ExprResult};
use crate::functions::FnContext;
use cellgrid_core::CellValue;

/// IIF(condition, whenTrue, whenFalse)
pub fn fn_iif(args: &[CellValue], _ctx: &FnContext) -> ExprResult<CellValue> {
    if args[0].is_truthy() {
        Ok(args[1].clone())
    } else {
        Ok(args[2].clone())
    }
}

/// IN(needle, haystack) - callable twin of the `IN` operator.
///
/// Membership is loose-equality based, matching the operator.
pub fn fn_in(args: &[CellValue], _ctx: &FnContext) -> ExprResult<CellValue> {
    match &args[1] {
        CellValue::Array(items) => Ok(CellValue::Boolean(
            items.iter().any(|item| args[0].loosely_equal(item)),
        )),
        other => Err(ExprError::Type {
            detail: format!(
                "IN requires an array haystack, got '{}'",
                other.to_display()
            ),
        }),
    }
}
