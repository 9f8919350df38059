use std::fs;
use std::path::Path;

use rsel_config::SelectConfig;
use rsel_runtime::lifecycle::{RuleOutcome, check_rules, run_select};
use tokio_util::sync::CancellationToken;

const ROWS: &str = r#"{"key": "r0", "cells": [1, "Apple", 91.5]}
{"key": "r1", "cells": [2, "Banana", null]}
{"key": "r2", "cells": [150, "Avocado", 40]}

{"key": "r3", "cells": [7, null, 12.0]}
"#;

fn write_config(dir: &Path, rules: &str) -> SelectConfig {
    fs::write(dir.join("rows.jsonl"), ROWS).unwrap();
    let toml = format!(
        r#"
[[schema.columns]]
name = "ID"
kind = "int"

[[schema.columns]]
name = "NAME"
kind = "string"

[[schema.columns]]
name = "SCORE"
kind = "float"

[settings]
{rules}

[io]
input = "rows.jsonl"
output = "out/kept.jsonl"

[runtime]
progress_interval = "10ms"
"#
    );
    let path = dir.join("rule-select.toml");
    fs::write(&path, toml).unwrap();
    SelectConfig::load(&path).unwrap()
}

fn kept_keys(dir: &Path) -> Vec<String> {
    let text = fs::read_to_string(dir.join("out/kept.jsonl")).unwrap();
    text.lines()
        .map(|line| {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            v["key"].as_str().unwrap().to_string()
        })
        .collect()
}

#[test]
fn run_keeps_rows_matching_any_rule_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"rules = ['$NAME$ LIKE "A*"', '$ID$ > 100', 'MISSING $NAME$']"#,
    );

    let summary = run_select(&config, CancellationToken::new()).unwrap();
    assert_eq!(summary.read, 4);
    assert_eq!(summary.kept, 3);
    assert_eq!(summary.dropped, 1);
    // r2 matches both of the first two rules and is credited to the first.
    let counts: Vec<u64> = summary.per_rule.iter().map(|c| c.kept).collect();
    assert_eq!(counts, [2, 0, 1]);
    assert_eq!(summary.per_rule[0].rule, r#"$NAME$ LIKE "A*""#);
    assert_eq!(kept_keys(dir.path()), ["r0", "r2", "r3"]);
}

#[test]
fn run_preserves_cells_of_kept_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "rules = ['$SCORE$ >= 90']");

    run_select(&config, CancellationToken::new()).unwrap();
    let text = fs::read_to_string(dir.path().join("out/kept.jsonl")).unwrap();
    assert_eq!(text, "{\"key\":\"r0\",\"cells\":[1,\"Apple\",91.5]}\n");
}

#[test]
fn run_fails_closed_on_bad_rule() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "rules = ['$ID$ > 1', '$FOO$ = 2']");

    assert!(run_select(&config, CancellationToken::new()).is_err());
    assert!(!dir.path().join("out/kept.jsonl").exists());
}

#[test]
fn run_requires_saved_rules() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");
    assert!(run_select(&config, CancellationToken::new()).is_err());
}

#[test]
fn cancelled_run_writes_nothing_further() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "rules = ['$ID$ > 0']");

    let token = CancellationToken::new();
    token.cancel();
    let err = run_select(&config, token).unwrap_err();
    assert!(err.to_string().contains("cancel"), "{err}");
    assert!(kept_keys(dir.path()).is_empty());
}

#[test]
fn check_reports_each_rule() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"rules = ['$ID$>5 and $NAME$ like "A*"', '$A$ > 1 OR $FOO$ = 2', 'MISSING $SCORE$']"#,
    );

    let report = check_rules(&config).unwrap();
    assert_eq!(report.entries.len(), 3);
    assert_eq!(report.failure_count(), 1);
    assert!(!report.is_clean());

    assert_eq!(
        report.entries[0].outcome,
        RuleOutcome::Ok {
            named: r#"($ID$ > 5 AND $NAME$ LIKE "A*")"#.to_string(),
            indexed: r#"($0$ > 5 AND $1$ LIKE "A*")"#.to_string(),
        }
    );
    match &report.entries[1].outcome {
        RuleOutcome::Failed { offset, .. } => assert_eq!(*offset, Some(1)),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(report.entries[2].index, 2);
    assert!(matches!(report.entries[2].outcome, RuleOutcome::Ok { .. }));
}

#[test]
fn check_accepts_absent_rule_list() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");
    let report = check_rules(&config).unwrap();
    assert!(report.entries.is_empty());
    assert!(report.is_clean());
}
