//! Parsed format sections

use cellgrid_core::ColorTag;

/// Comparison operator inside a `[<op><number>]` condition tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CondOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl CondOp {
    /// Parse the operator prefix of a condition tag, returning the operator
    /// and the rest of the tag content.
    pub fn strip(content: &str) -> Option<(CondOp, &str)> {
        // Two-character operators first
        if let Some(rest) = content.strip_prefix(">=") {
            return Some((CondOp::Ge, rest));
        }
        if let Some(rest) = content.strip_prefix("<=") {
            return Some((CondOp::Le, rest));
        }
        if let Some(rest) = content.strip_prefix("<>") {
            return Some((CondOp::Ne, rest));
        }
        if let Some(rest) = content.strip_prefix('>') {
            return Some((CondOp::Gt, rest));
        }
        if let Some(rest) = content.strip_prefix('<') {
            return Some((CondOp::Lt, rest));
        }
        if let Some(rest) = content.strip_prefix('=') {
            return Some((CondOp::Eq, rest));
        }
        None
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CondOp::Gt => ">",
            CondOp::Ge => ">=",
            CondOp::Lt => "<",
            CondOp::Le => "<=",
            CondOp::Eq => "=",
            CondOp::Ne => "<>",
        }
    }
}

/// Numeric condition selecting when a section applies
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub op: CondOp,
    pub threshold: f64,
}

impl Condition {
    /// Whether the condition holds for a numeric value
    pub fn eval(&self, value: f64) -> bool {
        match self.op {
            CondOp::Gt => value > self.threshold,
            CondOp::Ge => value >= self.threshold,
            CondOp::Lt => value < self.threshold,
            CondOp::Le => value <= self.threshold,
            CondOp::Eq => value == self.threshold,
            CondOp::Ne => value != self.threshold,
        }
    }
}

/// One semicolon-delimited clause of a format string.
///
/// Sections preserve source order; selection among them is order-sensitive.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Numeric condition from a leading `[<op><number>]` tag
    pub condition: Option<Condition>,
    /// Color annotation from a leading `[Color]` or `[#hex]` tag
    pub color: Option<ColorTag>,
    /// Switch/case literal from a `[<literal>]` tag paired with a color tag,
    /// matched by exact string equality against the value
    pub case: Option<String>,
    /// Literal text from a leading quoted run
    pub prefix: Option<String>,
    /// Literal text from a trailing quoted run
    pub suffix: Option<String>,
    /// The remaining digit/date pattern
    pub body: String,
    /// Catch-all marker: the last of 2+ sections when it carries no condition
    pub is_default: bool,
}

impl Section {
    /// The section an empty format string parses to
    pub fn general() -> Self {
        Section {
            body: "General".to_string(),
            is_default: true,
            ..Default::default()
        }
    }
}
