//! # cellgrid-core
//!
//! Core data structures shared by the cellgrid expression and format engines:
//! - [`CellValue`] - Scalar values flowing through evaluation (numbers, strings,
//!   booleans, dates, arrays)
//! - [`Row`] - A flat column-name → value record representing one grid row
//! - [`ColumnInfo`] - Read-only column metadata supplied by the grid collaborator
//! - [`ColorTag`] - A named or hex color annotation from a format string
//!
//! ## Example
//!
//! ```rust
//! use cellgrid_core::{CellValue, Row};
//!
//! let mut row = Row::new();
//! row.insert("price", CellValue::Number(12.5));
//! row.insert("label", CellValue::String("Widget".into()));
//!
//! assert!(row.contains("price"));
//! assert_eq!(row.get("price"), Some(&CellValue::Number(12.5)));
//! ```

pub mod color;
pub mod column;
pub mod row;
pub mod value;

pub use color::ColorTag;
pub use column::ColumnInfo;
pub use row::Row;
pub use value::{format_number_plain, CellValue};
