//! Built-in expression functions and the function registry

pub mod date;
pub mod grid;
pub mod logical;
pub mod math;
pub mod text;

use crate::error::ExprResult;
use ahash::AHashMap;
use cellgrid_core::{CellValue, Row};

/// Context passed to function implementations.
///
/// Exposes the row being evaluated so same-row aggregates (`SUM`) and the
/// grid-context functions (`CELL`, `ROW`) can see it.
pub struct FnContext<'a> {
    pub row: &'a Row,
}

/// Function implementation signature
pub type FunctionImpl = fn(&[CellValue], &FnContext) -> ExprResult<CellValue>;

/// Function categories, used to group the catalog in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionCategory {
    Text,
    Numeric,
    Date,
    Logical,
    Grid,
}

/// Descriptive return-type tag; not enforced at evaluation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    Number,
    Text,
    Boolean,
    Date,
    Any,
}

/// One declared parameter.
///
/// Required parameters must precede optional ones in declaration order; the
/// evaluator trusts this when appending defaults.
#[derive(Debug, Clone)]
pub struct ParamDef {
    /// Parameter name, for editor tooltips
    pub name: &'static str,
    /// Whether the caller may omit this argument
    pub optional: bool,
    /// Value appended when the argument is omitted; an optional parameter
    /// without a default is simply absent from the final argument array
    pub default: Option<CellValue>,
}

impl ParamDef {
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            optional: false,
            default: None,
        }
    }

    pub fn optional(name: &'static str, default: Option<CellValue>) -> Self {
        Self {
            name,
            optional: true,
            default,
        }
    }
}

/// Function definition
pub struct FunctionDef {
    /// Function name, case-sensitive
    pub name: &'static str,
    /// Catalog category
    pub category: FunctionCategory,
    /// Ordered parameter declarations; arguments beyond the declared list are
    /// allowed (variadic tail, e.g. CONCAT)
    pub params: Vec<ParamDef>,
    /// Descriptive return type
    pub return_type: ReturnType,
    /// Implementation; a cataloged entry without one fails evaluation with
    /// `NotImplemented` rather than silently doing nothing
    pub implementation: Option<FunctionImpl>,
}

impl FunctionDef {
    /// Number of required arguments
    pub fn required_args(&self) -> usize {
        self.params.iter().filter(|p| !p.optional).count()
    }
}

/// Function registry.
///
/// Constructed explicitly and passed into evaluation; read-only at
/// evaluation time.
pub struct FunctionRegistry {
    functions: AHashMap<&'static str, FunctionDef>,
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: AHashMap::new(),
        };

        registry.register_text_functions();
        registry.register_math_functions();
        registry.register_date_functions();
        registry.register_logical_functions();
        registry.register_grid_functions();

        registry
    }

    /// Create an empty registry (for tests and custom catalogs)
    pub fn empty() -> Self {
        Self {
            functions: AHashMap::new(),
        }
    }

    /// Look up a function by name, case-sensitive
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    /// Register a function, replacing any existing entry with the same name
    pub fn register(&mut self, def: FunctionDef) {
        log::trace!("registering function {}", def.name);
        self.functions.insert(def.name, def);
    }

    /// Iterate the catalog (editor autocomplete)
    pub fn definitions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.functions.values()
    }

    fn register_text_functions(&mut self) {
        // CONCAT(a, b, ...)
        self.register(FunctionDef {
            name: "CONCAT",
            category: FunctionCategory::Text,
            params: vec![ParamDef::required("a"), ParamDef::required("b")],
            return_type: ReturnType::Text,
            implementation: Some(text::fn_concat),
        });

        // SUBSTRING(text, start, end)
        self.register(FunctionDef {
            name: "SUBSTRING",
            category: FunctionCategory::Text,
            params: vec![
                ParamDef::required("text"),
                ParamDef::required("start"),
                ParamDef::required("end"),
            ],
            return_type: ReturnType::Text,
            implementation: Some(text::fn_substring),
        });
    }

    fn register_math_functions(&mut self) {
        // ROUND(value, [decimals])
        self.register(FunctionDef {
            name: "ROUND",
            category: FunctionCategory::Numeric,
            params: vec![
                ParamDef::required("value"),
                ParamDef::optional("decimals", Some(CellValue::Number(0.0))),
            ],
            return_type: ReturnType::Number,
            implementation: Some(math::fn_round),
        });

        // SUM(value, [matchValue])
        self.register(FunctionDef {
            name: "SUM",
            category: FunctionCategory::Numeric,
            params: vec![
                ParamDef::required("value"),
                ParamDef::optional("matchValue", None),
            ],
            return_type: ReturnType::Number,
            implementation: Some(math::fn_sum),
        });
    }

    fn register_date_functions(&mut self) {
        // DATE_DIFF(date1, date2, [unit])
        self.register(FunctionDef {
            name: "DATE_DIFF",
            category: FunctionCategory::Date,
            params: vec![
                ParamDef::required("date1"),
                ParamDef::required("date2"),
                ParamDef::optional("unit", Some(CellValue::String("days".to_string()))),
            ],
            return_type: ReturnType::Number,
            implementation: Some(date::fn_date_diff),
        });

        // FORMAT_DATE(date, pattern)
        self.register(FunctionDef {
            name: "FORMAT_DATE",
            category: FunctionCategory::Date,
            params: vec![ParamDef::required("date"), ParamDef::required("pattern")],
            return_type: ReturnType::Text,
            implementation: Some(date::fn_format_date),
        });
    }

    fn register_logical_functions(&mut self) {
        // IIF(condition, whenTrue, whenFalse)
        self.register(FunctionDef {
            name: "IIF",
            category: FunctionCategory::Logical,
            params: vec![
                ParamDef::required("condition"),
                ParamDef::required("whenTrue"),
                ParamDef::required("whenFalse"),
            ],
            return_type: ReturnType::Any,
            implementation: Some(logical::fn_iif),
        });

        // IN(needle, haystack) - callable twin of the IN operator
        self.register(FunctionDef {
            name: "IN",
            category: FunctionCategory::Logical,
            params: vec![ParamDef::required("needle"), ParamDef::required("haystack")],
            return_type: ReturnType::Boolean,
            implementation: Some(logical::fn_in),
        });
    }

    fn register_grid_functions(&mut self) {
        // CELL(name)
        self.register(FunctionDef {
            name: "CELL",
            category: FunctionCategory::Grid,
            params: vec![ParamDef::required("name")],
            return_type: ReturnType::Any,
            implementation: Some(grid::fn_cell),
        });

        // ROW()
        self.register(FunctionDef {
            name: "ROW",
            category: FunctionCategory::Grid,
            params: vec![],
            return_type: ReturnType::Any,
            implementation: Some(grid::fn_row),
        });
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
