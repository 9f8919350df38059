use std::fmt::Write as _;

use rsel_lang::OPERATORS;
use rsel_runtime::lifecycle::{CheckReport, RuleCheck, RuleOutcome, RunSummary};

pub fn summary(s: &RunSummary) -> String {
    let mut out = String::new();
    let target = match &s.output {
        Some(path) => path.display().to_string(),
        None => "stdout".to_string(),
    };
    let _ = writeln!(
        out,
        "read {} rows, kept {}, dropped {} -> {target} ({} ms)",
        s.read,
        s.kept,
        s.dropped,
        s.elapsed.as_millis()
    );
    for (i, count) in s.per_rule.iter().enumerate() {
        let _ = writeln!(out, "  #{i} {:>8}  {}", count.kept, count.rule);
    }
    out
}

/// One block per rule; failures show the rule text with a caret under the
/// offending character.
pub fn check(report: &CheckReport) -> String {
    let mut out = String::new();
    for entry in &report.entries {
        match &entry.outcome {
            RuleOutcome::Ok { named, .. } => {
                let _ = writeln!(out, "ok    #{} {named}", entry.index);
            }
            RuleOutcome::Failed { offset, message } => {
                let _ = writeln!(out, "error #{} {message}", entry.index);
                out.push_str(&caret(entry, *offset));
            }
        }
    }
    let _ = writeln!(
        out,
        "{} rule(s), {} failed",
        report.entries.len(),
        report.failure_count()
    );
    out
}

fn caret(entry: &RuleCheck, offset: Option<usize>) -> String {
    let mut out = format!("    {}\n", entry.text);
    if let Some(offset) = offset {
        let pad: String = entry
            .text
            .chars()
            .take(offset)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        let _ = writeln!(out, "    {pad}^");
    }
    out
}

/// Canonical text per rule, failures as `#`-comments so the output can be
/// pasted back into a rule list.
pub fn canonical(report: &CheckReport, indexed: bool) -> String {
    let mut out = String::new();
    for entry in &report.entries {
        match &entry.outcome {
            RuleOutcome::Ok { named, indexed: idx } => {
                out.push_str(if indexed { idx } else { named });
                out.push('\n');
            }
            RuleOutcome::Failed { message, .. } => {
                let _ = writeln!(out, "# #{}: {message}", entry.index);
            }
        }
    }
    out
}

pub fn operators() -> String {
    let mut out = String::new();
    for op in OPERATORS {
        let _ = writeln!(
            out,
            "{:<8} {:<6} {:<12} {}",
            op.symbol,
            op.arity,
            format!("{:?}", op.kind),
            op.description
        );
    }
    out
}
