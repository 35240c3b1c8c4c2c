//! Column metadata supplied by the grid collaborator
//!
//! Consumed read-only, for validating column references while an expression
//! is being edited (autocomplete). Evaluation itself only needs the row.

/// One grid column as seen by the expression editor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnInfo {
    /// Field key, the name used in row records and expressions
    pub field: String,
    /// Human-readable header shown in the grid
    pub header_name: String,
}

impl ColumnInfo {
    pub fn new<F: Into<String>, H: Into<String>>(field: F, header_name: H) -> Self {
        Self {
            field: field.into(),
            header_name: header_name.into(),
        }
    }
}
