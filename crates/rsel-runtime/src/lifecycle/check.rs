use orion_error::prelude::*;
use orion_error::ErrorOwe;
use rsel_config::SelectConfig;
use rsel_core::RuleSet;
use serde::Serialize;

use crate::error::RuntimeResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RuleOutcome {
    Ok {
        /// Canonical text with `$NAME$` references.
        named: String,
        /// Canonical text with `$i$` references.
        indexed: String,
    },
    Failed {
        /// Character offset into the rule text.
        offset: Option<usize>,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCheck {
    pub index: usize,
    pub text: String,
    pub outcome: RuleOutcome,
}

/// Per-rule compilation results, in configured order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub entries: Vec<RuleCheck>,
}

impl CheckReport {
    pub fn failures(&self) -> impl Iterator<Item = &RuleCheck> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, RuleOutcome::Failed { .. }))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Compile every configured rule on its own and report each result.
///
/// An absent rule list reads as empty. A rule that fails does not stop the
/// others from being checked.
pub fn check_rules(config: &SelectConfig) -> RuntimeResult<CheckReport> {
    let texts = config.rules_for_editing().owe_conf()?;
    let (set, failures) = RuleSet::compile_for_editing(&texts, &config.schema);

    let mut compiled = set.rules().iter();
    let mut failures = failures.into_iter().peekable();
    let mut entries = Vec::with_capacity(texts.len());
    for (index, text) in texts.into_iter().enumerate() {
        let outcome = match failures.next_if(|f| f.index == index) {
            Some(failure) => RuleOutcome::Failed {
                offset: failure.error.offset(),
                message: failure.error.to_string(),
            },
            None => match compiled.next() {
                Some(rule) => RuleOutcome::Ok {
                    named: rule.canonical_named(&config.schema),
                    indexed: rule.canonical(),
                },
                None => continue,
            },
        };
        entries.push(RuleCheck {
            index,
            text,
            outcome,
        });
    }

    let report = CheckReport { entries };
    rs_info!(
        conf,
        rules = report.entries.len(),
        failed = report.failure_count(),
        "rules checked"
    );
    Ok(report)
}
