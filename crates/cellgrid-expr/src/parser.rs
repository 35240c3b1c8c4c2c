//! Expression parser
//!
//! A recursive descent parser for computed-column expressions with documented
//! operator precedence (lowest to highest, all left-associative):
//!
//! 1. Logical or: `||`
//! 2. Logical and: `&&`
//! 3. Comparison/membership: `==` `!=` `<` `<=` `>` `>=` `IN`
//! 4. Addition/subtraction: `+` `-`
//! 5. Multiplication/division: `*` `/`
//! 6. Primary: literals, column references, function calls, `[...]` lists,
//!    parentheses
//!
//! Unary minus is desugared to `0 - x` so the AST stays a pure binary tree.

use crate::ast::{BinaryOperator, Expr};
use crate::error::{ExprError, ExprResult};

/// Maximum grammar nesting depth while parsing. User-supplied expressions
/// are otherwise unbounded, and blowing the stack must not be an option.
pub const MAX_PARSE_DEPTH: usize = 256;

/// Parse an expression string into an AST
///
/// Empty or whitespace-only input parses to an empty literal rather than
/// failing, since the editor feeds partial text through freely.
///
/// # Example
/// ```rust
/// use cellgrid_expr::parse_expression;
///
/// let ast = parse_expression("price * qty").unwrap();
/// let ast = parse_expression("ROUND(total, 2)").unwrap();
/// let ast = parse_expression("status IN [\"open\", \"late\"]").unwrap();
/// ```
pub fn parse_expression(text: &str) -> ExprResult<Expr> {
    if text.trim().is_empty() {
        return Ok(Expr::Literal(String::new()));
    }

    let mut parser = ExprParser::new(text)?;
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if !matches!(parser.current_token(), Token::Eof) {
        return Err(parser.error(format!(
            "Unexpected token after expression: {}",
            parser.describe_current()
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    /// Numeric literal, kept as raw source text (coercion happens at evaluation)
    Number(String),
    /// Double-quoted string literal, quotes stripped
    String(String),
    /// Bare identifier: column reference or function name
    Identifier(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    And,
    Or,
    In,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Comma,

    // End of input
    Eof,
}

struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
    current_token: Token,
    /// Byte offset where `current_token` starts
    token_pos: usize,
    /// Current grammar nesting depth, guarded against MAX_PARSE_DEPTH
    depth: usize,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> ExprResult<Self> {
        let mut parser = Self {
            input,
            pos: 0,
            current_token: Token::Eof,
            token_pos: 0,
            depth: 0,
        };
        parser.advance_token()?;
        Ok(parser)
    }

    // === Token scanning ===

    fn advance_token(&mut self) -> ExprResult<()> {
        self.skip_whitespace();
        self.token_pos = self.pos;
        self.current_token = self.scan_token()?;
        Ok(())
    }

    fn scan_token(&mut self) -> ExprResult<Token> {
        if self.is_at_end() {
            return Ok(Token::Eof);
        }

        let c = self.peek_char().unwrap();

        // Single-character tokens
        match c {
            '+' => {
                self.advance();
                return Ok(Token::Plus);
            }
            '-' => {
                self.advance();
                return Ok(Token::Minus);
            }
            '*' => {
                self.advance();
                return Ok(Token::Star);
            }
            '/' => {
                self.advance();
                return Ok(Token::Slash);
            }
            '(' => {
                self.advance();
                return Ok(Token::LeftParen);
            }
            ')' => {
                self.advance();
                return Ok(Token::RightParen);
            }
            '[' => {
                self.advance();
                return Ok(Token::LeftBracket);
            }
            ']' => {
                self.advance();
                return Ok(Token::RightBracket);
            }
            ',' => {
                self.advance();
                return Ok(Token::Comma);
            }
            _ => {}
        }

        // Multi-character operators; a lone half of a two-character operator is
        // lexically an operator but not part of the grammar
        if c == '<' {
            self.advance();
            if self.peek_char() == Some('=') {
                self.advance();
                return Ok(Token::LessEqual);
            }
            return Ok(Token::LessThan);
        }

        if c == '>' {
            self.advance();
            if self.peek_char() == Some('=') {
                self.advance();
                return Ok(Token::GreaterEqual);
            }
            return Ok(Token::GreaterThan);
        }

        if c == '=' {
            self.advance();
            if self.peek_char() == Some('=') {
                self.advance();
                return Ok(Token::Equal);
            }
            return Err(ExprError::UnknownOperator {
                operator: "=".to_string(),
                position: self.token_pos,
            });
        }

        if c == '!' {
            self.advance();
            if self.peek_char() == Some('=') {
                self.advance();
                return Ok(Token::NotEqual);
            }
            return Err(ExprError::UnknownOperator {
                operator: "!".to_string(),
                position: self.token_pos,
            });
        }

        if c == '&' {
            self.advance();
            if self.peek_char() == Some('&') {
                self.advance();
                return Ok(Token::And);
            }
            return Err(ExprError::UnknownOperator {
                operator: "&".to_string(),
                position: self.token_pos,
            });
        }

        if c == '|' {
            self.advance();
            if self.peek_char() == Some('|') {
                self.advance();
                return Ok(Token::Or);
            }
            return Err(ExprError::UnknownOperator {
                operator: "|".to_string(),
                position: self.token_pos,
            });
        }

        // String literal
        if c == '"' {
            return self.scan_string();
        }

        // Number
        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return Ok(self.scan_number());
        }

        // Identifier
        if c.is_ascii_alphabetic() || c == '_' {
            return Ok(self.scan_identifier());
        }

        Err(self.error(format!("Unexpected character '{}'", c)))
    }

    fn scan_string(&mut self) -> ExprResult<Token> {
        let start = self.pos;
        self.advance(); // Skip opening quote

        let mut s = String::new();
        loop {
            match self.peek_char() {
                Some('"') => {
                    // "" is an escaped quote
                    if self.peek_char_at(1) == Some('"') {
                        s.push('"');
                        self.advance();
                        self.advance();
                    } else {
                        self.advance();
                        return Ok(Token::String(s));
                    }
                }
                Some(c) => {
                    s.push(c);
                    self.advance();
                }
                None => {
                    return Err(ExprError::Parse {
                        message: "Unterminated string literal".to_string(),
                        position: start,
                    });
                }
            }
        }
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;

        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        Token::Number(self.input[start..self.pos].to_string())
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;

        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let text = &self.input[start..self.pos];

        // Bare IN is the membership operator, not a column
        if text == "IN" {
            return Token::In;
        }

        Token::Identifier(text.to_string())
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn current_token(&self) -> &Token {
        &self.current_token
    }

    fn consume(&mut self) -> ExprResult<Token> {
        let token = std::mem::replace(&mut self.current_token, Token::Eof);
        self.advance_token()?;
        Ok(token)
    }

    fn expect(&mut self, expected: &Token, what: &str) -> ExprResult<()> {
        if self.current_token() == expected {
            self.consume()?;
            Ok(())
        } else {
            Err(self.error(format!("Expected {}, got {}", what, self.describe_current())))
        }
    }

    fn error(&self, message: String) -> ExprError {
        ExprError::Parse {
            message,
            position: self.token_pos,
        }
    }

    fn describe_current(&self) -> String {
        match &self.current_token {
            Token::Eof => "end of expression".to_string(),
            Token::Number(n) => format!("'{}'", n),
            Token::String(s) => format!("\"{}\"", s),
            Token::Identifier(name) => format!("'{}'", name),
            other => format!("'{}'", token_symbol(other)),
        }
    }

    // === Expression parsing with precedence ===

    fn parse_expression(&mut self) -> ExprResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_and()?;

        while matches!(self.current_token(), Token::Or) {
            self.consume()?;
            let right = self.parse_and()?;
            left = Expr::BinaryOp {
                op: BinaryOperator::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_comparison()?;

        while matches!(self.current_token(), Token::And) {
            self.consume()?;
            let right = self.parse_comparison()?;
            left = Expr::BinaryOp {
                op: BinaryOperator::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_comparison(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.current_token() {
                Token::Equal => BinaryOperator::Equal,
                Token::NotEqual => BinaryOperator::NotEqual,
                Token::LessThan => BinaryOperator::LessThan,
                Token::LessEqual => BinaryOperator::LessEqual,
                Token::GreaterThan => BinaryOperator::GreaterThan,
                Token::GreaterEqual => BinaryOperator::GreaterEqual,
                Token::In => BinaryOperator::In,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_additive()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_primary()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_primary()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> ExprResult<Expr> {
        // Every nesting level of the grammar passes through here, so this is
        // the one place the recursion guard is needed
        if self.depth >= MAX_PARSE_DEPTH {
            return Err(ExprError::DepthExceeded {
                max: MAX_PARSE_DEPTH,
            });
        }
        self.depth += 1;
        let result = self.parse_primary_inner();
        self.depth -= 1;
        result
    }

    fn parse_primary_inner(&mut self) -> ExprResult<Expr> {
        match self.current_token().clone() {
            Token::Number(raw) => {
                self.consume()?;
                Ok(Expr::Literal(raw))
            }

            Token::String(s) => {
                self.consume()?;
                Ok(Expr::Literal(s))
            }

            // Prefix minus desugars to 0 - x
            Token::Minus => {
                self.consume()?;
                let operand = self.parse_primary()?;
                Ok(Expr::BinaryOp {
                    op: BinaryOperator::Subtract,
                    left: Box::new(Expr::Literal("0".to_string())),
                    right: Box::new(operand),
                })
            }

            Token::LeftParen => {
                self.consume()?;
                let expr = self.parse_expression()?;
                self.expect(&Token::RightParen, "')'")?;
                Ok(expr)
            }

            Token::LeftBracket => self.parse_array(),

            Token::Identifier(name) => {
                self.consume()?;
                // Followed immediately by '(' it is a function call,
                // otherwise a column reference
                if matches!(self.current_token(), Token::LeftParen) {
                    self.parse_function_call(name)
                } else {
                    Ok(Expr::Column(name))
                }
            }

            // IN is an operator keyword, but IN(...) is the callable twin
            Token::In => {
                self.consume()?;
                if matches!(self.current_token(), Token::LeftParen) {
                    self.parse_function_call("IN".to_string())
                } else {
                    Err(self.error("Unexpected 'IN'".to_string()))
                }
            }

            _ => Err(self.error(format!("Unexpected {}", self.describe_current()))),
        }
    }

    fn parse_array(&mut self) -> ExprResult<Expr> {
        self.expect(&Token::LeftBracket, "'['")?;

        let mut items = Vec::new();

        if !matches!(self.current_token(), Token::RightBracket) {
            items.push(self.parse_expression()?);

            while matches!(self.current_token(), Token::Comma) {
                self.consume()?;
                items.push(self.parse_expression()?);
            }
        }

        self.expect(&Token::RightBracket, "']'")?;
        Ok(Expr::Array(items))
    }

    fn parse_function_call(&mut self, name: String) -> ExprResult<Expr> {
        self.expect(&Token::LeftParen, "'('")?;

        let mut args = Vec::new();

        if !matches!(self.current_token(), Token::RightParen) {
            args.push(self.parse_expression()?);

            while matches!(self.current_token(), Token::Comma) {
                self.consume()?;
                args.push(self.parse_expression()?);
            }
        }

        self.expect(&Token::RightParen, "')'")?;

        Ok(Expr::Function { name, args })
    }
}

fn token_symbol(token: &Token) -> &'static str {
    match token {
        Token::Plus => "+",
        Token::Minus => "-",
        Token::Star => "*",
        Token::Slash => "/",
        Token::Equal => "==",
        Token::NotEqual => "!=",
        Token::LessThan => "<",
        Token::LessEqual => "<=",
        Token::GreaterThan => ">",
        Token::GreaterEqual => ">=",
        Token::And => "&&",
        Token::Or => "||",
        Token::In => "IN",
        Token::LeftParen => "(",
        Token::RightParen => ")",
        Token::LeftBracket => "[",
        Token::RightBracket => "]",
        Token::Comma => ",",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_literals() {
        assert_eq!(
            parse_expression("42").unwrap(),
            Expr::Literal("42".to_string())
        );
        assert_eq!(
            parse_expression("3.14").unwrap(),
            Expr::Literal("3.14".to_string())
        );
        assert_eq!(
            parse_expression("\"hello\"").unwrap(),
            Expr::Literal("hello".to_string())
        );
        assert_eq!(
            parse_expression("\"say \"\"hi\"\"\"").unwrap(),
            Expr::Literal("say \"hi\"".to_string())
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_expression("").unwrap(), Expr::Literal(String::new()));
        assert_eq!(
            parse_expression("   ").unwrap(),
            Expr::Literal(String::new())
        );
    }

    #[test]
    fn test_parse_column() {
        assert_eq!(
            parse_expression("price").unwrap(),
            Expr::Column("price".to_string())
        );
        assert_eq!(
            parse_expression("unit_price2").unwrap(),
            Expr::Column("unit_price2".to_string())
        );
    }

    #[test]
    fn test_precedence_mul_over_add() {
        // 2 + 3 * 4 parses as 2 + (3 * 4)
        let ast = parse_expression("2 + 3 * 4").unwrap();
        if let Expr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOperator::Add);
            assert_eq!(*left, Expr::Literal("2".to_string()));
            assert!(matches!(
                *right,
                Expr::BinaryOp {
                    op: BinaryOperator::Multiply,
                    ..
                }
            ));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_precedence_comparison_over_logical() {
        // a > 1 && b < 2 parses as (a > 1) && (b < 2)
        let ast = parse_expression("a > 1 && b < 2").unwrap();
        if let Expr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOperator::And);
            assert!(matches!(
                *left,
                Expr::BinaryOp {
                    op: BinaryOperator::GreaterThan,
                    ..
                }
            ));
            assert!(matches!(
                *right,
                Expr::BinaryOp {
                    op: BinaryOperator::LessThan,
                    ..
                }
            ));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_left_associativity() {
        // 10 - 4 - 3 parses as (10 - 4) - 3
        let ast = parse_expression("10 - 4 - 3").unwrap();
        if let Expr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOperator::Subtract);
            assert!(matches!(
                *left,
                Expr::BinaryOp {
                    op: BinaryOperator::Subtract,
                    ..
                }
            ));
            assert_eq!(*right, Expr::Literal("3".to_string()));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_parentheses() {
        let ast = parse_expression("(2 + 3) * 4").unwrap();
        if let Expr::BinaryOp { op, left, .. } = ast {
            assert_eq!(op, BinaryOperator::Multiply);
            assert!(matches!(
                *left,
                Expr::BinaryOp {
                    op: BinaryOperator::Add,
                    ..
                }
            ));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_function_call() {
        let ast = parse_expression("ROUND(3.14159, 2)").unwrap();
        if let Expr::Function { name, args } = ast {
            assert_eq!(name, "ROUND");
            assert_eq!(args.len(), 2);
        } else {
            panic!("Expected Function");
        }
    }

    #[test]
    fn test_nested_function_call() {
        let ast = parse_expression("IIF(qty > 0, CONCAT(name, \"!\"), \"none\")").unwrap();
        if let Expr::Function { name, args } = ast {
            assert_eq!(name, "IIF");
            assert_eq!(args.len(), 3);
            assert!(matches!(&args[1], Expr::Function { name, .. } if name == "CONCAT"));
        } else {
            panic!("Expected Function");
        }
    }

    #[test]
    fn test_function_vs_column() {
        // Identifier followed by '(' is a call; otherwise a column
        assert!(matches!(
            parse_expression("ROW()").unwrap(),
            Expr::Function { .. }
        ));
        assert!(matches!(
            parse_expression("ROW").unwrap(),
            Expr::Column(_)
        ));
    }

    #[test]
    fn test_in_with_array() {
        let ast = parse_expression("5 IN [1, 2, 5]").unwrap();
        if let Expr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOperator::In);
            assert_eq!(*left, Expr::Literal("5".to_string()));
            if let Expr::Array(items) = *right {
                assert_eq!(items.len(), 3);
            } else {
                panic!("Expected Array");
            }
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_in_as_function_call() {
        let ast = parse_expression("IN(5, [1, 2, 5])").unwrap();
        if let Expr::Function { name, args } = ast {
            assert_eq!(name, "IN");
            assert_eq!(args.len(), 2);
        } else {
            panic!("Expected Function");
        }

        // Bare IN without arguments or operands stays an error
        assert!(parse_expression("IN").is_err());
    }

    #[test]
    fn test_unary_minus_desugars() {
        let ast = parse_expression("-5").unwrap();
        if let Expr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOperator::Subtract);
            assert_eq!(*left, Expr::Literal("0".to_string()));
            assert_eq!(*right, Expr::Literal("5".to_string()));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_parse_errors() {
        // Unbalanced parens
        let err = parse_expression("(1 + 2").unwrap_err();
        assert!(matches!(err, ExprError::Parse { .. }));

        // Trailing operator
        let err = parse_expression("1 +").unwrap_err();
        assert!(matches!(err, ExprError::Parse { .. }));

        // Error position points at the offending token
        let err = parse_expression("1 + )").unwrap_err();
        if let ExprError::Parse { position, .. } = err {
            assert_eq!(position, 4);
        } else {
            panic!("Expected Parse error");
        }
    }

    #[test]
    fn test_lone_operator_halves() {
        // The position points at the offending operator
        assert_eq!(
            parse_expression("a = 1").unwrap_err(),
            ExprError::UnknownOperator {
                operator: "=".to_string(),
                position: 2
            }
        );
        assert_eq!(
            parse_expression("a & b").unwrap_err(),
            ExprError::UnknownOperator {
                operator: "&".to_string(),
                position: 2
            }
        );
        assert_eq!(
            parse_expression("a | b").unwrap_err(),
            ExprError::UnknownOperator {
                operator: "|".to_string(),
                position: 2
            }
        );
    }

    #[test]
    fn test_deep_nesting_is_an_error_not_a_crash() {
        let text = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(
            parse_expression(&text).unwrap_err(),
            ExprError::DepthExceeded {
                max: MAX_PARSE_DEPTH
            }
        );

        // Nesting under the cap parses fine
        let text = format!("{}1{}", "(".repeat(64), ")".repeat(64));
        assert!(parse_expression(&text).is_ok());
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse_expression("\"abc").unwrap_err();
        assert!(matches!(err, ExprError::Parse { position: 0, .. }));
    }
}
