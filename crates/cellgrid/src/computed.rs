//! Computed columns: expression plus format, applied row by row
//!
//! A grid's computed column pairs an expression with an optional format
//! string. The expression and format are parsed once when the column is
//! defined; each visible row then evaluates and renders against the parsed
//! forms.
//!
//! # Example
//!
//! ```rust
//! use cellgrid::prelude::*;
//!
//! let registry = FunctionRegistry::new();
//! let column = ComputedColumn::new("price * qty", "[>=100][Green]#,##0.00;#,##0.00")
//!     .unwrap();
//!
//! let mut row = Row::new();
//! row.insert("price", 19.99);
//! row.insert("qty", 10.0);
//!
//! let out = column.render(&row, &registry).unwrap();
//! assert_eq!(out.text, "199.90");
//! assert_eq!(out.color.as_deref(), Some("Green"));
//! ```

use cellgrid_core::{CellValue, Row};
use cellgrid_expr::{evaluate, parse_expression, Expr, ExprResult, FunctionRegistry};
use cellgrid_format::{format_with_sections, parse_format, Rendered, Section};

/// A computed column definition: parsed expression and parsed format.
#[derive(Debug, Clone)]
pub struct ComputedColumn {
    expr: Expr,
    sections: Vec<Section>,
}

impl ComputedColumn {
    /// Parse an expression and a format string into a column definition.
    ///
    /// Fails only on a malformed expression; format strings always parse.
    /// An empty format renders the computed value as plain text.
    pub fn new(expression: &str, format: &str) -> ExprResult<Self> {
        Ok(ComputedColumn {
            expr: parse_expression(expression)?,
            sections: parse_format(format),
        })
    }

    /// The parsed expression
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The parsed format sections
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Evaluate the expression against one row, without formatting
    pub fn evaluate(&self, row: &Row, registry: &FunctionRegistry) -> ExprResult<CellValue> {
        evaluate(&self.expr, row, registry)
    }

    /// Evaluate against one row and render through the format sections
    pub fn render(&self, row: &Row, registry: &FunctionRegistry) -> ExprResult<Rendered> {
        let value = self.evaluate(row, registry)?;
        Ok(format_with_sections(&value, &self.sections))
    }
}
