use super::CmpOp;
use crate::error::char_offset;

// ---------------------------------------------------------------------------
// Source positions
// ---------------------------------------------------------------------------

/// Where a token started, recorded as the number of input bytes that were
/// still unparsed at that point. Combined with the full rule text this gives
/// an absolute position without threading the original input through every
/// grammar function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

impl Mark {
    pub(crate) fn here(input: &&str) -> Self {
        Mark(input.len())
    }

    /// Character offset of this mark within `text`.
    pub fn offset_in(self, text: &str) -> usize {
        char_offset(text, text.len().saturating_sub(self.0))
    }
}

// ---------------------------------------------------------------------------
// Syntax tree (unbound)
// ---------------------------------------------------------------------------

/// `$name$` as written in the rule text.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnName {
    pub name: String,
    pub at: Mark,
}

/// An operand before binding; literal kinds are already classified.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxOperand {
    Column(ColumnName),
    /// Number literal text; `fractional` when it carries a `.` or exponent.
    Number {
        text: String,
        fractional: bool,
        at: Mark,
    },
    Str {
        value: String,
        at: Mark,
    },
    /// `[ "a", "b" ]`
    List {
        values: Vec<String>,
        at: Mark,
    },
}

impl SyntaxOperand {
    pub fn at(&self) -> Mark {
        match self {
            SyntaxOperand::Column(c) => c.at,
            SyntaxOperand::Number { at, .. }
            | SyntaxOperand::Str { at, .. }
            | SyntaxOperand::List { at, .. } => *at,
        }
    }
}

/// Relation between the two operands of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Cmp(CmpOp),
    Like,
    In,
}

/// Parsed rule, column names not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Xor(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    Comparison {
        op: RelOp,
        left: SyntaxOperand,
        right: SyntaxOperand,
        /// Position of the operator token.
        at: Mark,
    },
    Missing(ColumnName),
}
