//! The fixed operator set of the rule language.

/// What an operator does, grouped the way the evaluator dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// Binary boolean connective (`AND`, `OR`, `XOR`).
    Connective,
    /// Unary negation (`NOT`).
    Negation,
    /// Ordered comparison of a column against a column or literal.
    Comparison,
    /// Wildcard match (`LIKE`).
    Pattern,
    /// Membership in a string list (`IN`).
    Membership,
    /// Missing-value test (`MISSING`).
    MissingTest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    pub symbol: &'static str,
    pub arity: u8,
    pub kind: OperatorKind,
    pub description: &'static str,
}

pub const AND: &str = "AND";
pub const OR: &str = "OR";
pub const XOR: &str = "XOR";
pub const NOT: &str = "NOT";
pub const LIKE: &str = "LIKE";
pub const IN: &str = "IN";
pub const MISSING: &str = "MISSING";

pub const OPERATORS: &[Operator] = &[
    Operator {
        symbol: ">",
        arity: 2,
        kind: OperatorKind::Comparison,
        description: "greater than",
    },
    Operator {
        symbol: ">=",
        arity: 2,
        kind: OperatorKind::Comparison,
        description: "greater than or equal",
    },
    Operator {
        symbol: "<",
        arity: 2,
        kind: OperatorKind::Comparison,
        description: "less than",
    },
    Operator {
        symbol: "<=",
        arity: 2,
        kind: OperatorKind::Comparison,
        description: "less than or equal",
    },
    Operator {
        symbol: "=",
        arity: 2,
        kind: OperatorKind::Comparison,
        description: "equal",
    },
    Operator {
        symbol: LIKE,
        arity: 2,
        kind: OperatorKind::Pattern,
        description: "wildcard match, `*` any run and `?` one character",
    },
    Operator {
        symbol: IN,
        arity: 2,
        kind: OperatorKind::Membership,
        description: "value is one of a string list",
    },
    Operator {
        symbol: AND,
        arity: 2,
        kind: OperatorKind::Connective,
        description: "both sides hold",
    },
    Operator {
        symbol: XOR,
        arity: 2,
        kind: OperatorKind::Connective,
        description: "exactly one side holds",
    },
    Operator {
        symbol: OR,
        arity: 2,
        kind: OperatorKind::Connective,
        description: "either side holds",
    },
    Operator {
        symbol: NOT,
        arity: 1,
        kind: OperatorKind::Negation,
        description: "negation",
    },
    Operator {
        symbol: MISSING,
        arity: 1,
        kind: OperatorKind::MissingTest,
        description: "cell holds no value",
    },
];

impl Operator {
    /// Look an operator up by symbol; keywords match case-insensitively.
    pub fn lookup(symbol: &str) -> Option<&'static Operator> {
        OPERATORS
            .iter()
            .find(|op| op.symbol.eq_ignore_ascii_case(symbol))
    }
}
