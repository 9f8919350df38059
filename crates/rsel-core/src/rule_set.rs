use orion_error::StructError;
use orion_error::prelude::*;
use rsel_lang::Schema;

use crate::error::{CoreError, CoreReason, CoreResult};
use crate::rule::{CompileError, Rule};
use crate::value::Row;

/// A rule that failed to compile, with its place in the configured list.
#[derive(Debug)]
pub struct RuleFailure {
    /// Position of the rule in the configured list.
    pub index: usize,
    pub text: String,
    pub error: CompileError,
}

impl RuleFailure {
    /// `rule #<index>`, plus `offset <n>` when the error points into the text.
    pub fn location(&self) -> String {
        match self.error.offset() {
            Some(offset) => format!("rule #{}, offset {offset}", self.index),
            None => format!("rule #{}", self.index),
        }
    }

    /// `RuleCompile` error with the rule text in the detail and
    /// [`location`](Self::location) as the position.
    pub fn into_result<T>(self) -> CoreResult<T> {
        let location = self.location();
        let error: CoreError = StructError::from(CoreReason::RuleCompile)
            .with_detail(format!("rule #{} `{}`: {}", self.index, self.text, self.error));
        Err(error).position(location)
    }
}

/// Fails with `SchemaUnavailable` when there are no columns to bind against.
pub fn ensure_schema(schema: &Schema) -> CoreResult<()> {
    if schema.is_empty() {
        return Err(StructError::from(CoreReason::SchemaUnavailable)
            .with_detail("no input columns to bind rules against"));
    }
    Ok(())
}

/// Ordered rules admitted with OR semantics.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    width: usize,
}

impl RuleSet {
    /// Compile every rule; the first failure aborts.
    ///
    /// Used before filtering rows, where a partially compiled rule set would
    /// silently change which rows are kept.
    pub fn compile_for_execution<S: AsRef<str>>(texts: &[S], schema: &Schema) -> CoreResult<Self> {
        ensure_schema(schema)?;
        match Self::try_compile(texts, schema) {
            Ok(set) => Ok(set),
            Err(failure) => failure.into_result(),
        }
    }

    /// Like [`compile_for_execution`](Self::compile_for_execution) without the
    /// schema check, returning the failing rule as data.
    pub fn try_compile<S: AsRef<str>>(texts: &[S], schema: &Schema) -> Result<Self, RuleFailure> {
        let mut rules = Vec::with_capacity(texts.len());
        for (index, text) in texts.iter().enumerate() {
            let text = text.as_ref();
            match Rule::compile(text, schema) {
                Ok(rule) => rules.push(rule),
                Err(error) => {
                    return Err(RuleFailure {
                        index,
                        text: text.to_string(),
                        error,
                    });
                }
            }
        }
        if rules.is_empty() {
            log::warn!("rule set is empty; no row will be kept");
        }
        log::debug!("compiled {} rule(s) over {} column(s)", rules.len(), schema.len());
        Ok(Self {
            rules,
            width: schema.len(),
        })
    }

    /// Compile each rule independently, keeping the ones that compile and
    /// reporting the rest.
    pub fn compile_for_editing<S: AsRef<str>>(
        texts: &[S],
        schema: &Schema,
    ) -> (Self, Vec<RuleFailure>) {
        let mut rules = Vec::new();
        let mut failures = Vec::new();
        for (index, text) in texts.iter().enumerate() {
            let text = text.as_ref();
            match Rule::compile(text, schema) {
                Ok(rule) => rules.push(rule),
                Err(error) => {
                    log::warn!("rule #{index} skipped: {error}");
                    failures.push(RuleFailure {
                        index,
                        text: text.to_string(),
                        error,
                    });
                }
            }
        }
        let set = Self {
            rules,
            width: schema.len(),
        };
        (set, failures)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of cells every row must carry.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Index of the first rule matching `row`. Later rules are not evaluated.
    pub fn first_match(&self, row: &Row) -> Option<usize> {
        self.rules.iter().position(|r| r.matches(row))
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.first_match(row).is_some()
    }
}
