//! Expression engine error types

use thiserror::Error;

/// Result type for expression operations
pub type ExprResult<T> = std::result::Result<T, ExprError>;

/// Errors that can occur during expression parsing or evaluation.
///
/// Callers evaluate per cell and should catch-and-report per invocation; one
/// bad expression must not abort evaluation of other cells or rows.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    /// Malformed expression syntax; `position` is a byte offset into the source
    #[error("Parse error at position {position}: {message}")]
    Parse { message: String, position: usize },

    /// Column reference not present in the row record
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    /// Function name not present in the registry
    #[error("Function not found: {name}")]
    FunctionNotFound { name: String },

    /// Too few arguments for a function
    #[error("Wrong number of arguments for {name}: requires {required}, got {got}")]
    Arity {
        name: String,
        required: usize,
        got: usize,
    },

    /// Operator token not part of the expression grammar; `position` is a
    /// byte offset into the source, as for `Parse`
    #[error("Unknown operator '{operator}' at position {position}")]
    UnknownOperator { operator: String, position: usize },

    /// Operand has the wrong shape for an operation
    #[error("Type error: {detail}")]
    Type { detail: String },

    /// Unrecognized DATE_DIFF unit
    #[error("Unknown unit: {unit}")]
    UnknownUnit { unit: String },

    /// Function is cataloged but has no implementation
    #[error("Function not implemented: {name}")]
    NotImplemented { name: String },

    /// Expression nesting exceeded the evaluation depth limit
    #[error("Expression nesting exceeds the maximum depth of {max}")]
    DepthExceeded { max: usize },
}
