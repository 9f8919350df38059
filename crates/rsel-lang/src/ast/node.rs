use std::cmp::Ordering;

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// Ordered comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Eq => "=",
        }
    }

    /// The operator that holds after swapping the operands.
    pub fn mirror(self) -> Self {
        match self {
            CmpOp::Gt => CmpOp::Lt,
            CmpOp::Ge => CmpOp::Le,
            CmpOp::Lt => CmpOp::Gt,
            CmpOp::Le => CmpOp::Ge,
            CmpOp::Eq => CmpOp::Eq,
        }
    }

    /// Whether `left <op> right` holds given `left.cmp(right)`.
    pub fn holds(self, ord: Ordering) -> bool {
        match self {
            CmpOp::Gt => ord.is_gt(),
            CmpOp::Ge => ord.is_ge(),
            CmpOp::Lt => ord.is_lt(),
            CmpOp::Le => ord.is_le(),
            CmpOp::Eq => ord.is_eq(),
        }
    }
}

// ---------------------------------------------------------------------------
// Operands
// ---------------------------------------------------------------------------

/// A literal value, its kind fixed at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
}

/// Right-hand side of a comparison. The left side is always a column.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Column(usize),
    Literal(Literal),
}

/// The three shapes of a `LIKE` test.
#[derive(Debug, Clone, PartialEq)]
pub enum LikeForm {
    /// `$c$ LIKE "pat"`: fixed pattern, subject from the column.
    FixedPattern { column: usize, pattern: String },
    /// `"value" LIKE $c$`: fixed subject, pattern from the column.
    FixedValue { value: String, column: usize },
    /// `$a$ LIKE $b$`: subject from `subject`, pattern from `pattern`.
    Columns { subject: usize, pattern: usize },
}

// ---------------------------------------------------------------------------
// Bound AST
// ---------------------------------------------------------------------------

/// A rule bound to a schema: every column is a valid index and every
/// comparison is kind-compatible.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
    Xor(Box<Node>, Box<Node>),
    Not(Box<Node>),
    Compare {
        op: CmpOp,
        column: usize,
        operand: Operand,
    },
    Like(LikeForm),
    In {
        column: usize,
        values: Vec<String>,
    },
    Missing(usize),
}

impl Node {
    /// Column indices referenced anywhere in this tree, in visit order.
    pub fn columns(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns(&self, out: &mut Vec<usize>) {
        match self {
            Node::And(l, r) | Node::Or(l, r) | Node::Xor(l, r) => {
                l.collect_columns(out);
                r.collect_columns(out);
            }
            Node::Not(inner) => inner.collect_columns(out),
            Node::Compare {
                column, operand, ..
            } => {
                out.push(*column);
                if let Operand::Column(other) = operand {
                    out.push(*other);
                }
            }
            Node::Like(LikeForm::FixedPattern { column, .. })
            | Node::Like(LikeForm::FixedValue { column, .. }) => out.push(*column),
            Node::Like(LikeForm::Columns { subject, pattern }) => {
                out.push(*subject);
                out.push(*pattern);
            }
            Node::In { column, .. } | Node::Missing(column) => out.push(*column),
        }
    }
}
