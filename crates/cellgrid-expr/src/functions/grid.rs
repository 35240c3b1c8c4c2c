//! Grid-context functions

use crate::error::ExprResult;
use crate::functions::FnContext;
use cellgrid_core::CellValue;

/// CELL(name) - the named column's value from the current row.
///
/// An absent column yields null, mirroring a plain record lookup.
pub fn fn_cell(args: &[CellValue], ctx: &FnContext) -> ExprResult<CellValue> {
    let name = args[0].to_display();
    Ok(ctx.row.get(&name).cloned().unwrap_or(CellValue::Null))
}

/// ROW() - the entire row as an array of values, in column-name order for
/// determinism.
pub fn fn_row(_args: &[CellValue], ctx: &FnContext) -> ExprResult<CellValue> {
    let values = ctx
        .row
        .sorted_columns()
        .into_iter()
        .map(|name| ctx.row.get(name).cloned().unwrap_or(CellValue::Null))
        .collect();
    Ok(CellValue::Array(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgrid_core::Row;
    use pretty_assertions::assert_eq;

    fn ctx(row: &Row) -> FnContext<'_> {
        FnContext { row }
    }

    #[test]
    fn test_cell() {
        let mut row = Row::new();
        row.insert("price", 12.5);

        let out = fn_cell(&[CellValue::String("price".into())], &ctx(&row)).unwrap();
        assert_eq!(out, CellValue::Number(12.5));

        let out = fn_cell(&[CellValue::String("missing".into())], &ctx(&row)).unwrap();
        assert_eq!(out, CellValue::Null);
    }

    #[test]
    fn test_row() {
        let mut row = Row::new();
        row.insert("b", 2.0);
        row.insert("a", 1.0);

        let out = fn_row(&[], &ctx(&row)).unwrap();
        assert_eq!(
            out,
            CellValue::Array(vec![CellValue::Number(1.0), CellValue::Number(2.0)])
        );
    }
}
