//! Prelude module - common imports for cellgrid users
//!
//! ```rust
//! use cellgrid::prelude::*;
//! ```

pub use crate::{
    // Row and value types
    CellValue,
    ColumnInfo,
    // Column definitions
    ComputedColumn,
    // Errors
    ExprError,
    ExprResult,
    // Function registry
    FunctionDef,
    FunctionRegistry,
    Rendered,
    Row,
    // Expression engine
    evaluate,
    parse_expression,
    // Format engine
    format_value,
    parse_format,
};
