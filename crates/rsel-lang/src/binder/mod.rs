use crate::ast::*;
use crate::error::RuleError;
use crate::schema::{Schema, Unresolved, ValueKind};


/// Resolve column names against `schema` and check operand kinds,
/// producing a bound [`Node`].
///
/// `text` must be the rule text `expr` was parsed from; it is used to turn
/// token positions into character offsets.
pub fn bind(expr: &Expr, text: &str, schema: &Schema) -> Result<Node, RuleError> {
    if schema.is_empty() {
        return Err(RuleError::SchemaUnavailable);
    }
    Binder { text, schema }.node(expr)
}

struct Binder<'a> {
    text: &'a str,
    schema: &'a Schema,
}

impl Binder<'_> {
    fn node(&self, expr: &Expr) -> Result<Node, RuleError> {
        match expr {
            Expr::And(l, r) => Ok(Node::And(Box::new(self.node(l)?), Box::new(self.node(r)?))),
            Expr::Or(l, r) => Ok(Node::Or(Box::new(self.node(l)?), Box::new(self.node(r)?))),
            Expr::Xor(l, r) => Ok(Node::Xor(Box::new(self.node(l)?), Box::new(self.node(r)?))),
            Expr::Not(inner) => Ok(Node::Not(Box::new(self.node(inner)?))),
            Expr::Missing(col) => Ok(Node::Missing(self.column(col)?)),
            Expr::Comparison {
                op,
                left,
                right,
                at,
            } => match op {
                RelOp::Cmp(cmp) => self.compare(*cmp, left, right, *at),
                RelOp::Like => self.like(left, right, *at),
                RelOp::In => self.membership(left, right),
            },
        }
    }

    // -----------------------------------------------------------------------
    // Comparisons
    // -----------------------------------------------------------------------

    fn compare(
        &self,
        op: CmpOp,
        left: &SyntaxOperand,
        right: &SyntaxOperand,
        at: Mark,
    ) -> Result<Node, RuleError> {
        self.reject_list(left)?;
        self.reject_list(right)?;
        match (left, right) {
            (SyntaxOperand::Column(a), SyntaxOperand::Column(b)) => {
                let (ia, ka) = self.typed_column(a)?;
                let (ib, kb) = self.typed_column(b)?;
                if ka.comparator() != kb.comparator() {
                    return Err(self.mismatch(
                        at,
                        format!(
                            "cannot compare {ka} column `{}` with {kb} column `{}`",
                            a.name, b.name
                        ),
                    ));
                }
                Ok(Node::Compare {
                    op,
                    column: ia,
                    operand: Operand::Column(ib),
                })
            }
            (SyntaxOperand::Column(c), lit) => {
                let (column, kind) = self.typed_column(c)?;
                let literal = self.literal_for(lit, kind, &c.name)?;
                Ok(Node::Compare {
                    op,
                    column,
                    operand: Operand::Literal(literal),
                })
            }
            (lit, SyntaxOperand::Column(c)) => {
                let (column, kind) = self.typed_column(c)?;
                let literal = self.literal_for(lit, kind, &c.name)?;
                Ok(Node::Compare {
                    op: op.mirror(),
                    column,
                    operand: Operand::Literal(literal),
                })
            }
            (lit, _) => Err(self.mismatch(
                lit.at(),
                format!(
                    "`{}` needs a column reference on at least one side",
                    op.symbol()
                ),
            )),
        }
    }

    /// Convert a literal operand compared against a column of `kind`.
    fn literal_for(
        &self,
        operand: &SyntaxOperand,
        kind: ValueKind,
        column: &str,
    ) -> Result<Literal, RuleError> {
        match operand {
            SyntaxOperand::Number { at, .. } if !kind.is_numeric() => Err(self.mismatch(
                *at,
                format!("number compared with {kind} column `{column}`"),
            )),
            SyntaxOperand::Number {
                text,
                fractional,
                at,
            } => self.number(text, *fractional, *at),
            SyntaxOperand::Str { at, .. } if kind != ValueKind::String => Err(self.mismatch(
                *at,
                format!("string compared with {kind} column `{column}`"),
            )),
            SyntaxOperand::Str { value, .. } => Ok(Literal::String(value.clone())),
            other => Err(self.mismatch(other.at(), "expected a literal value".to_string())),
        }
    }

    fn number(&self, text: &str, fractional: bool, at: Mark) -> Result<Literal, RuleError> {
        if fractional {
            match text.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Literal::Float(v)),
                _ => Err(RuleError::Syntax {
                    offset: at.offset_in(self.text),
                    message: format!("number `{text}` is out of range"),
                }),
            }
        } else {
            text.parse::<i64>()
                .map(Literal::Integer)
                .map_err(|_| RuleError::Syntax {
                    offset: at.offset_in(self.text),
                    message: format!("integer `{text}` does not fit in 64 bits"),
                })
        }
    }

    // -----------------------------------------------------------------------
    // LIKE / IN
    // -----------------------------------------------------------------------

    fn like(
        &self,
        left: &SyntaxOperand,
        right: &SyntaxOperand,
        at: Mark,
    ) -> Result<Node, RuleError> {
        self.reject_list(left)?;
        self.reject_list(right)?;
        for side in [left, right] {
            if let SyntaxOperand::Number { at, .. } = side {
                return Err(self.mismatch(*at, "LIKE takes string literals".to_string()));
            }
        }
        let form = match (left, right) {
            (SyntaxOperand::Column(c), SyntaxOperand::Str { value, .. }) => {
                LikeForm::FixedPattern {
                    column: self.column(c)?,
                    pattern: value.clone(),
                }
            }
            (SyntaxOperand::Str { value, .. }, SyntaxOperand::Column(c)) => LikeForm::FixedValue {
                value: value.clone(),
                column: self.column(c)?,
            },
            (SyntaxOperand::Column(a), SyntaxOperand::Column(b)) => LikeForm::Columns {
                subject: self.column(a)?,
                pattern: self.column(b)?,
            },
            _ => {
                return Err(self.mismatch(
                    at,
                    "LIKE needs a column reference on at least one side".to_string(),
                ));
            }
        };
        Ok(Node::Like(form))
    }

    fn membership(&self, left: &SyntaxOperand, right: &SyntaxOperand) -> Result<Node, RuleError> {
        let SyntaxOperand::Column(c) = left else {
            return Err(self.mismatch(
                left.at(),
                "IN needs a column reference on the left".to_string(),
            ));
        };
        let SyntaxOperand::List { values, .. } = right else {
            return Err(self.mismatch(
                right.at(),
                "IN needs a list of strings on the right, e.g. [\"a\", \"b\"]".to_string(),
            ));
        };
        Ok(Node::In {
            column: self.column(c)?,
            values: values.clone(),
        })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn column(&self, col: &ColumnName) -> Result<usize, RuleError> {
        let offset = col.at.offset_in(self.text);
        self.schema
            .resolve(&col.name)
            .map_err(|unresolved| match unresolved {
                Unresolved::Unknown => RuleError::UnknownColumn {
                    offset,
                    name: col.name.clone(),
                },
                Unresolved::Ambiguous { named, position } => RuleError::AmbiguousColumn {
                    offset,
                    name: col.name.clone(),
                    named,
                    position,
                },
            })
    }

    fn typed_column(&self, col: &ColumnName) -> Result<(usize, ValueKind), RuleError> {
        let index = self.column(col)?;
        let kind = self
            .schema
            .column(index)
            .map(|c| c.kind)
            .ok_or_else(|| RuleError::UnknownColumn {
                offset: col.at.offset_in(self.text),
                name: col.name.clone(),
            })?;
        Ok((index, kind))
    }

    fn reject_list(&self, operand: &SyntaxOperand) -> Result<(), RuleError> {
        match operand {
            SyntaxOperand::List { at, .. } => Err(self.mismatch(
                *at,
                "a value list is only allowed on the right of IN".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn mismatch(&self, at: Mark, message: String) -> RuleError {
        RuleError::TypeMismatch {
            offset: at.offset_in(self.text),
            message,
        }
    }
}
