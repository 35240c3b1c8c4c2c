//! Expression Abstract Syntax Tree types

/// Expression AST.
///
/// Built once per expression-text change, immutable thereafter, and evaluated
/// repeatedly against different rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Raw literal token; numeric-looking text coerces to a number at
    /// evaluation time, everything else stays a string
    Literal(String),
    /// Column reference, resolved against the row record at evaluation time
    Column(String),
    /// Function call with ordered arguments
    Function { name: String, args: Vec<Expr> },
    /// Binary operation; always exactly two children
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Bracketed literal list, e.g. the right-hand side of `IN`
    Array(Vec<Expr>),
}

impl Expr {
    /// Column names referenced anywhere in this expression, in first-seen order.
    ///
    /// Used by the editor to validate references against the grid's column
    /// metadata; evaluation does not need it.
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Column(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Expr::Function { args, .. } => {
                for arg in args {
                    arg.collect_columns(out);
                }
            }
            Expr::BinaryOp { left, right, .. } => {
                left.collect_columns(out);
                right.collect_columns(out);
            }
            Expr::Array(items) => {
                for item in items {
                    item.collect_columns(out);
                }
            }
            Expr::Literal(_) => {}
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,

    // Comparison
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,

    // Logical
    And,
    Or,

    // Membership
    In,
}

impl BinaryOperator {
    /// Source-text spelling of the operator
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::In => "IN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_referenced_columns() {
        let expr = Expr::BinaryOp {
            op: BinaryOperator::Add,
            left: Box::new(Expr::Column("a".into())),
            right: Box::new(Expr::Function {
                name: "ROUND".into(),
                args: vec![Expr::Column("b".into()), Expr::Column("a".into())],
            }),
        };
        assert_eq!(expr.referenced_columns(), vec!["a", "b"]);
    }
}
