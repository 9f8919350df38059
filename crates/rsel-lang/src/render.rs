//! Canonical rule text.
//!
//! `Display` on [`Node`] renders columns by position (`$0$`); [`render_named`]
//! renders them by schema name. Both forms parse back to the same tree.

use std::fmt::{self, Write as _};

use crate::ast::{LikeForm, Literal, Node, Operand};
use crate::operators::{AND, IN, LIKE, MISSING, NOT, OR, XOR};
use crate::parse_utils::quote;
use crate::schema::Schema;

/// Render `node` with columns referenced by their names in `schema`.
///
/// Indices the schema does not cover fall back to positional form.
pub fn render_named(node: &Node, schema: &Schema) -> String {
    let mut out = String::new();
    let _ = Renderer {
        schema: Some(schema),
    }
    .node(node, &mut out);
    out
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Renderer { schema: None }.node(self, f)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(v) => write!(f, "{v}"),
            Literal::Float(v) => f.write_str(&format_float(*v)),
            Literal::String(s) => f.write_str(&quote(s)),
        }
    }
}

/// Shortest round-trip form, always with a decimal point so the literal is
/// read back as fractional.
pub fn format_float(v: f64) -> String {
    let s = v.to_string();
    if s.contains(['.', 'e', 'E']) || !v.is_finite() {
        s
    } else {
        format!("{s}.0")
    }
}

struct Renderer<'a> {
    schema: Option<&'a Schema>,
}

impl Renderer<'_> {
    fn node(&self, node: &Node, out: &mut impl fmt::Write) -> fmt::Result {
        match node {
            Node::And(l, r) => self.binary(AND, l, r, out),
            Node::Or(l, r) => self.binary(OR, l, r, out),
            Node::Xor(l, r) => self.binary(XOR, l, r, out),
            Node::Not(inner) => {
                write!(out, "{NOT} ")?;
                self.node(inner, out)
            }
            Node::Compare {
                op,
                column,
                operand,
            } => {
                self.column(*column, out)?;
                write!(out, " {} ", op.symbol())?;
                match operand {
                    Operand::Column(other) => self.column(*other, out),
                    Operand::Literal(lit) => write!(out, "{lit}"),
                }
            }
            Node::Like(LikeForm::FixedPattern { column, pattern }) => {
                self.column(*column, out)?;
                write!(out, " {LIKE} {}", quote(pattern))
            }
            Node::Like(LikeForm::FixedValue { value, column }) => {
                write!(out, "{} {LIKE} ", quote(value))?;
                self.column(*column, out)
            }
            Node::Like(LikeForm::Columns { subject, pattern }) => {
                self.column(*subject, out)?;
                write!(out, " {LIKE} ")?;
                self.column(*pattern, out)
            }
            Node::In { column, values } => {
                self.column(*column, out)?;
                let items = values.iter().map(|v| quote(v)).collect::<Vec<_>>();
                write!(out, " {IN} [{}]", items.join(", "))
            }
            Node::Missing(column) => {
                write!(out, "{MISSING} ")?;
                self.column(*column, out)
            }
        }
    }

    fn binary(&self, kw: &str, l: &Node, r: &Node, out: &mut impl fmt::Write) -> fmt::Result {
        out.write_char('(')?;
        self.node(l, out)?;
        write!(out, " {kw} ")?;
        self.node(r, out)?;
        out.write_char(')')
    }

    fn column(&self, index: usize, out: &mut impl fmt::Write) -> fmt::Result {
        match self.schema.and_then(|s| s.column(index)) {
            Some(spec) => write!(out, "${}$", spec.name),
            None => write!(out, "${index}$"),
        }
    }
}
