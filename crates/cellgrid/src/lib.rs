//! # cellgrid
//!
//! Expression evaluation and Excel-style formatting for data-grid columns.
//!
//! Cellgrid powers two grid features:
//!
//! - **Computed columns**: a column defined by an expression over the other
//!   columns of the same row (`price * qty`, `IIF(status == "late", 1, 0)`),
//!   parsed once and evaluated per visible row.
//! - **Value formatting**: Excel-style format strings with up to four
//!   conditional sections, digit and date patterns, and color annotations
//!   (`[>0][Green]#,##0.00;[<0][Red]-#,##0.00;0`).
//!
//! Both engines are pure: they hold no grid state, take a row record and
//! give back a value or formatted text.
//!
//! ## Example
//!
//! ```rust
//! use cellgrid::prelude::*;
//!
//! let registry = FunctionRegistry::new();
//!
//! let mut row = Row::new();
//! row.insert("price", 120.0);
//! row.insert("qty", 3.0);
//!
//! let ast = parse_expression("price * qty").unwrap();
//! let total = evaluate(&ast, &row, &registry).unwrap();
//!
//! let out = format_value(&total, "$#,##0.00");
//! assert_eq!(out.text, "$360.00");
//! ```

pub mod computed;
pub mod prelude;

pub use computed::ComputedColumn;

// Re-export core types
pub use cellgrid_core::{CellValue, ColorTag, ColumnInfo, Row};

// Re-export the expression engine
pub use cellgrid_expr::{
    evaluate, parse_expression, unknown_columns, BinaryOperator, Expr, ExprError, ExprResult,
    FnContext, FunctionCategory, FunctionDef, FunctionRegistry, ParamDef, ReturnType,
    MAX_EVAL_DEPTH, MAX_PARSE_DEPTH,
};

// Re-export the format engine
pub use cellgrid_format::{
    format_date, format_number, format_value, format_with_sections, parse_format, render_section,
    CondOp, Condition, Rendered, Section, MAX_SECTIONS,
};
