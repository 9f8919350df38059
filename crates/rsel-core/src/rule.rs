use rsel_lang::ast::Node;
use rsel_lang::{RuleError, Schema, parse_rule, render_named};

use crate::predicate::Predicate;
use crate::value::Row;

/// Why a single rule could not be compiled.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error("invalid LIKE pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("column index {index} is outside the schema")]
    ColumnOutOfRange { index: usize },
}

impl CompileError {
    /// Character offset into the rule text, when the failure has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            CompileError::Rule(e) => e.offset(),
            _ => None,
        }
    }
}

/// A parsed, bound and compiled rule together with the text it came from.
#[derive(Debug, Clone)]
pub struct Rule {
    source: String,
    node: Node,
    predicate: Predicate,
}

impl Rule {
    pub fn compile(text: &str, schema: &Schema) -> Result<Self, CompileError> {
        let node = parse_rule(text, schema)?;
        let predicate = Predicate::compile(&node, schema)?;
        Ok(Self {
            source: text.to_string(),
            node,
            predicate,
        })
    }

    /// Rule text as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Canonical text with positional column references.
    pub fn canonical(&self) -> String {
        self.node.to_string()
    }

    /// Canonical text with column names from `schema`.
    pub fn canonical_named(&self, schema: &Schema) -> String {
        render_named(&self.node, schema)
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.predicate.evaluate(row)
    }
}
