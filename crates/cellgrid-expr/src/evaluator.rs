//! Expression evaluator
//!
//! Walks an expression AST against one row record and a function registry,
//! producing a scalar value. Evaluation never mutates the AST, the row, or
//! the registry, so the same AST can be evaluated repeatedly and from
//! multiple logical callers.

use crate::ast::{BinaryOperator, Expr};
use crate::error::{ExprError, ExprResult};
use crate::functions::{FnContext, FunctionRegistry};
use cellgrid_core::{CellValue, Row};

/// Maximum expression nesting depth. User-supplied expressions are otherwise
/// unbounded, and blowing the stack must not be an option.
pub const MAX_EVAL_DEPTH: usize = 64;

/// Evaluate an expression AST against one row
///
/// # Example
/// ```rust
/// use cellgrid_core::Row;
/// use cellgrid_expr::{evaluate, parse_expression, FunctionRegistry};
///
/// let ast = parse_expression("2 + 3 * 4").unwrap();
/// let registry = FunctionRegistry::new();
/// let result = evaluate(&ast, &Row::new(), &registry).unwrap();
/// assert_eq!(result.as_number(), Some(14.0));
/// ```
pub fn evaluate(expr: &Expr, row: &Row, registry: &FunctionRegistry) -> ExprResult<CellValue> {
    eval_expr(expr, row, registry, 0)
}

fn eval_expr(
    expr: &Expr,
    row: &Row,
    registry: &FunctionRegistry,
    depth: usize,
) -> ExprResult<CellValue> {
    if depth >= MAX_EVAL_DEPTH {
        return Err(ExprError::DepthExceeded {
            max: MAX_EVAL_DEPTH,
        });
    }

    match expr {
        Expr::Literal(raw) => Ok(eval_literal(raw)),

        Expr::Column(name) => {
            // Key-presence check, not truthiness: a column holding null/0/false
            // is a valid column
            match row.get(name) {
                Some(value) => Ok(value.clone()),
                None => Err(ExprError::ColumnNotFound {
                    column: name.clone(),
                }),
            }
        }

        Expr::Function { name, args } => eval_function(name, args, row, registry, depth),

        Expr::BinaryOp { op, left, right } => {
            let lhs = eval_expr(left, row, registry, depth + 1)?;
            let rhs = eval_expr(right, row, registry, depth + 1)?;
            eval_binary_op(*op, lhs, rhs)
        }

        Expr::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(eval_expr(item, row, registry, depth + 1)?);
            }
            Ok(CellValue::Array(values))
        }
    }
}

/// Literal coercion: numeric-looking text becomes a number, everything else
/// stays text. Empty and whitespace-only literals stay text so they never
/// silently become 0.
fn eval_literal(raw: &str) -> CellValue {
    if raw.trim().is_empty() {
        return CellValue::String(raw.to_string());
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::String(raw.to_string()),
    }
}

fn eval_function(
    name: &str,
    args: &[Expr],
    row: &Row,
    registry: &FunctionRegistry,
    depth: usize,
) -> ExprResult<CellValue> {
    let def = registry
        .get(name)
        .ok_or_else(|| ExprError::FunctionNotFound {
            name: name.to_string(),
        })?;

    let required = def.required_args();
    if args.len() < required {
        return Err(ExprError::Arity {
            name: name.to_string(),
            required,
            got: args.len(),
        });
    }

    let mut argv = Vec::with_capacity(def.params.len().max(args.len()));
    for arg in args {
        argv.push(eval_expr(arg, row, registry, depth + 1)?);
    }

    // Fill omitted optional parameters with their declared defaults, in
    // declaration order; optionals without a default stay absent
    for param in def.params.iter().skip(argv.len()) {
        match &param.default {
            Some(default) => argv.push(default.clone()),
            None => break,
        }
    }

    let implementation = def
        .implementation
        .ok_or_else(|| ExprError::NotImplemented {
            name: name.to_string(),
        })?;

    implementation(&argv, &FnContext { row })
}

fn eval_binary_op(op: BinaryOperator, lhs: CellValue, rhs: CellValue) -> ExprResult<CellValue> {
    match op {
        // `+` concatenates when either side is text, otherwise adds
        BinaryOperator::Add => {
            if lhs.is_string() || rhs.is_string() {
                Ok(CellValue::String(format!(
                    "{}{}",
                    lhs.to_display(),
                    rhs.to_display()
                )))
            } else {
                Ok(CellValue::Number(
                    numeric_operand(&lhs, op)? + numeric_operand(&rhs, op)?,
                ))
            }
        }
        BinaryOperator::Subtract => Ok(CellValue::Number(
            numeric_operand(&lhs, op)? - numeric_operand(&rhs, op)?,
        )),
        BinaryOperator::Multiply => Ok(CellValue::Number(
            numeric_operand(&lhs, op)? * numeric_operand(&rhs, op)?,
        )),
        BinaryOperator::Divide => Ok(CellValue::Number(
            numeric_operand(&lhs, op)? / numeric_operand(&rhs, op)?,
        )),

        // Loose, coercing equality; isolated in CellValue::loosely_equal
        BinaryOperator::Equal => Ok(CellValue::Boolean(lhs.loosely_equal(&rhs))),
        BinaryOperator::NotEqual => Ok(CellValue::Boolean(!lhs.loosely_equal(&rhs))),

        BinaryOperator::LessThan => compare(&lhs, &rhs, |o| o == std::cmp::Ordering::Less),
        BinaryOperator::LessEqual => compare(&lhs, &rhs, |o| o != std::cmp::Ordering::Greater),
        BinaryOperator::GreaterThan => compare(&lhs, &rhs, |o| o == std::cmp::Ordering::Greater),
        BinaryOperator::GreaterEqual => compare(&lhs, &rhs, |o| o != std::cmp::Ordering::Less),

        // Both operands are already evaluated; pick one by truthiness and
        // return the operand value itself, not a boolean cast
        BinaryOperator::And => {
            if lhs.is_truthy() {
                Ok(rhs)
            } else {
                Ok(lhs)
            }
        }
        BinaryOperator::Or => {
            if lhs.is_truthy() {
                Ok(lhs)
            } else {
                Ok(rhs)
            }
        }

        BinaryOperator::In => match rhs {
            CellValue::Array(items) => Ok(CellValue::Boolean(
                items.iter().any(|item| lhs.loosely_equal(item)),
            )),
            other => Err(ExprError::Type {
                detail: format!(
                    "IN requires an array right operand, got '{}'",
                    other.to_display()
                ),
            }),
        },
    }
}

fn numeric_operand(value: &CellValue, op: BinaryOperator) -> ExprResult<f64> {
    value.as_number().ok_or_else(|| ExprError::Type {
        detail: format!(
            "Operand of '{}' is not numeric: '{}'",
            op.symbol(),
            value.to_display()
        ),
    })
}

/// Ordering comparison: text against text compares lexicographically,
/// everything else compares numerically after coercion.
fn compare(
    lhs: &CellValue,
    rhs: &CellValue,
    accept: fn(std::cmp::Ordering) -> bool,
) -> ExprResult<CellValue> {
    let ordering = match (lhs, rhs) {
        (CellValue::String(a), CellValue::String(b)) => Some(a.cmp(b)),
        _ => match (lhs.as_number(), rhs.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => None,
        },
    };

    // Incomparable operands (NaN, non-numeric) compare false, never error
    Ok(CellValue::Boolean(ordering.map_or(false, accept)))
}
