use std::collections::HashSet;

use regex::Regex;
use rsel_lang::ast::{CmpOp, LikeForm, Literal, Node, Operand};
use rsel_lang::{Comparator, Schema};

use crate::compare::{compare_cells, compare_literal};
use crate::rule::CompileError;
use crate::value::Row;
use crate::wildcard::{compile_wildcard, wildcard_matches};

#[cfg(test)]
mod tests;

// ---------------------------------------------------------------------------
// Compiled predicate tree
// ---------------------------------------------------------------------------

/// Executable form of a bound rule, one variant per node kind.
///
/// Everything that does not depend on row data is resolved here: column
/// comparators, fixed LIKE patterns and `IN` sets.
#[derive(Debug, Clone)]
pub enum Predicate {
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Xor(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
    CompareColumns {
        op: CmpOp,
        left: usize,
        right: usize,
        comparator: Comparator,
    },
    CompareLiteral {
        op: CmpOp,
        column: usize,
        literal: Literal,
    },
    /// `$c$ LIKE "pattern"`
    LikeFixed { column: usize, regex: Regex },
    /// `"value" LIKE $c$`: the cell holds the pattern.
    LikeValue { value: String, column: usize },
    /// `$subject$ LIKE $pattern$`
    LikeColumns { subject: usize, pattern: usize },
    In { column: usize, values: HashSet<String> },
    Missing(usize),
}

impl Predicate {
    /// Compile a bound node for rows of `schema`.
    pub fn compile(node: &Node, schema: &Schema) -> Result<Self, CompileError> {
        if let Some(&index) = node.columns().iter().find(|&&i| i >= schema.len()) {
            return Err(CompileError::ColumnOutOfRange { index });
        }
        Self::build(node, schema)
    }

    fn build(node: &Node, schema: &Schema) -> Result<Self, CompileError> {
        let pair = |l: &Node, r: &Node| -> Result<_, CompileError> {
            Ok((
                Box::new(Self::build(l, schema)?),
                Box::new(Self::build(r, schema)?),
            ))
        };
        Ok(match node {
            Node::And(l, r) => {
                let (l, r) = pair(l, r)?;
                Predicate::And(l, r)
            }
            Node::Or(l, r) => {
                let (l, r) = pair(l, r)?;
                Predicate::Or(l, r)
            }
            Node::Xor(l, r) => {
                let (l, r) = pair(l, r)?;
                Predicate::Xor(l, r)
            }
            Node::Not(inner) => Predicate::Not(Box::new(Self::build(inner, schema)?)),
            Node::Compare {
                op,
                column,
                operand: Operand::Column(other),
            } => Predicate::CompareColumns {
                op: *op,
                left: *column,
                right: *other,
                comparator: comparator_of(schema, *column),
            },
            Node::Compare {
                op,
                column,
                operand: Operand::Literal(literal),
            } => Predicate::CompareLiteral {
                op: *op,
                column: *column,
                literal: literal.clone(),
            },
            Node::Like(LikeForm::FixedPattern { column, pattern }) => Predicate::LikeFixed {
                column: *column,
                regex: compile_wildcard(pattern).map_err(|source| CompileError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?,
            },
            Node::Like(LikeForm::FixedValue { value, column }) => Predicate::LikeValue {
                value: value.clone(),
                column: *column,
            },
            Node::Like(LikeForm::Columns { subject, pattern }) => Predicate::LikeColumns {
                subject: *subject,
                pattern: *pattern,
            },
            Node::In { column, values } => Predicate::In {
                column: *column,
                values: values.iter().cloned().collect(),
            },
            Node::Missing(column) => Predicate::Missing(*column),
        })
    }

    // -----------------------------------------------------------------------
    // Evaluation
    // -----------------------------------------------------------------------

    /// Evaluate against one row. Total: data never makes this fail, and a
    /// Missing cell makes every test other than `MISSING` and column-pair
    /// comparison false.
    pub fn evaluate(&self, row: &Row) -> bool {
        match self {
            Predicate::And(l, r) => l.evaluate(row) && r.evaluate(row),
            Predicate::Or(l, r) => l.evaluate(row) || r.evaluate(row),
            Predicate::Xor(l, r) => l.evaluate(row) ^ r.evaluate(row),
            Predicate::Not(inner) => !inner.evaluate(row),
            Predicate::CompareColumns {
                op,
                left,
                right,
                comparator,
            } => op.holds(compare_cells(*comparator, row.cell(*left), row.cell(*right))),
            Predicate::CompareLiteral {
                op,
                column,
                literal,
            } => compare_literal(row.cell(*column), literal).is_some_and(|ord| op.holds(ord)),
            Predicate::LikeFixed { column, regex } => row
                .cell(*column)
                .text()
                .is_some_and(|subject| regex.is_match(&subject)),
            Predicate::LikeValue { value, column } => row
                .cell(*column)
                .text()
                .is_some_and(|pattern| wildcard_matches(&pattern, value)),
            Predicate::LikeColumns { subject, pattern } => {
                match (row.cell(*subject).text(), row.cell(*pattern).text()) {
                    (Some(s), Some(p)) => wildcard_matches(&p, &s),
                    _ => false,
                }
            }
            Predicate::In { column, values } => row
                .cell(*column)
                .text()
                .is_some_and(|t| values.contains(t.as_ref())),
            Predicate::Missing(column) => row.cell(*column).is_missing(),
        }
    }
}

fn comparator_of(schema: &Schema, index: usize) -> Comparator {
    schema
        .column(index)
        .map(|c| c.kind.comparator())
        .unwrap_or(Comparator::Lexical)
}
