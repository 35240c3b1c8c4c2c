//! Excel-style format strings for grid cells
//!
//! A format string is 1-4 semicolon-delimited sections. Each section can
//! carry a numeric condition (`[>0]`), a color (`[Red]`, `[#1E90FF]`), a
//! switch/case literal paired with a color (`[OPEN][Green]`), quoted
//! prefix/suffix text, and a digit or date pattern body.
//!
//! [`parse_format`] turns a format string into [`Section`]s; [`format_value`]
//! selects the applicable section for a value and renders it, surfacing any
//! color annotation in the returned [`Rendered`]. Both are total: malformed
//! input degrades to literal text, never an error.
//!
//! ```rust
//! use cellgrid_core::CellValue;
//! use cellgrid_format::format_value;
//!
//! let fmt = "[>0]#,##0.00;[<0]-#,##0.00;0";
//! assert_eq!(format_value(&CellValue::Number(1234.56), fmt).text, "1,234.56");
//! assert_eq!(format_value(&CellValue::Number(-1234.56), fmt).text, "-1,234.56");
//! assert_eq!(format_value(&CellValue::Number(0.0), fmt).text, "0");
//! ```

mod parser;
mod render;
mod section;
mod select;

pub use parser::{parse_format, MAX_SECTIONS};
pub use render::{format_date, format_number, render_section};
pub use section::{CondOp, Condition, Section};
pub use select::{format_value, format_with_sections, Rendered};
