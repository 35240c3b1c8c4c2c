//! # cellgrid-expr
//!
//! Expression parser and evaluator for cellgrid computed columns.
//!
//! This crate provides:
//! - Expression parsing (text → AST)
//! - Expression evaluation (AST → value, against one row record)
//! - Built-in functions by category, held in an explicit [`FunctionRegistry`]
//!
//! ## Example
//!
//! ```rust
//! use cellgrid_core::Row;
//! use cellgrid_expr::{evaluate, parse_expression, FunctionRegistry};
//!
//! let ast = parse_expression("IIF(qty > 10, \"bulk\", \"single\")").unwrap();
//!
//! let mut row = Row::new();
//! row.insert("qty", 25.0);
//!
//! let registry = FunctionRegistry::new();
//! let result = evaluate(&ast, &row, &registry).unwrap();
//! assert_eq!(result.to_display(), "bulk");
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;

pub use ast::{BinaryOperator, Expr};
pub use error::{ExprError, ExprResult};
pub use evaluator::{evaluate, MAX_EVAL_DEPTH};
pub use functions::{
    FnContext, FunctionCategory, FunctionDef, FunctionRegistry, ParamDef, ReturnType,
};
pub use parser::{parse_expression, MAX_PARSE_DEPTH};

use cellgrid_core::ColumnInfo;

/// Column references in `expr` that are not present in the grid's column
/// metadata, in first-seen order. Used by the expression editor to flag
/// unknown references; evaluation correctness does not depend on it.
pub fn unknown_columns<'a>(expr: &'a Expr, columns: &[ColumnInfo]) -> Vec<&'a str> {
    expr.referenced_columns()
        .into_iter()
        .filter(|name| !columns.iter().any(|c| c.field == *name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_columns() {
        let columns = vec![
            ColumnInfo::new("price", "Price"),
            ColumnInfo::new("qty", "Quantity"),
        ];
        let expr = parse_expression("price * qty + discount").unwrap();
        assert_eq!(unknown_columns(&expr, &columns), vec!["discount"]);
    }
}
