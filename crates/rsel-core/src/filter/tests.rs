use std::cell::{Cell as StdCell, RefCell};

use orion_error::StructError;
use rsel_lang::{ColumnSpec, Schema, ValueKind};

use super::*;
use crate::error::CoreReason;
use crate::value::Cell;

fn schema() -> Schema {
    Schema::new(vec![ColumnSpec::new("A", ValueKind::Int)])
}

fn rows(values: &[i64]) -> Vec<CoreResult<Row>> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Ok(Row::new(format!("Row{i}"), vec![Cell::Int(*v)])))
        .collect()
}

fn keys(out: &[Row]) -> Vec<&str> {
    out.iter().map(|r| r.key.as_str()).collect()
}

/// Cancels once `after` rows have been reported; records progress calls.
struct CountingMonitor {
    after: u64,
    seen: StdCell<u64>,
    reports: RefCell<Vec<(u64, Option<u64>)>>,
}

impl CountingMonitor {
    fn cancel_after(after: u64) -> Self {
        Self {
            after,
            seen: StdCell::new(0),
            reports: RefCell::new(Vec::new()),
        }
    }
}

impl ExecMonitor for CountingMonitor {
    fn is_cancelled(&self) -> bool {
        self.seen.get() >= self.after
    }

    fn progress(&self, done: u64, total: Option<u64>) {
        self.seen.set(done);
        self.reports.borrow_mut().push((done, total));
    }
}

#[test]
fn keeps_matching_rows_in_order() {
    let rules = RuleSet::compile_for_execution(&["$A$ > 5", "$A$ < 2"], &schema()).unwrap();
    let mut out = Vec::new();
    let stats = filter_rows(&rules, rows(&[10, 3, 1, 7]), Some(4), &NoopMonitor, |r| {
        out.push(r);
        Ok(())
    })
    .unwrap();
    assert_eq!(keys(&out), vec!["Row0", "Row2", "Row3"]);
    assert_eq!(stats.read, 4);
    assert_eq!(stats.kept, 3);
    assert_eq!(stats.dropped(), 1);
    assert_eq!(stats.per_rule, vec![2, 1]);
}

#[test]
fn row_matched_by_several_rules_is_emitted_once() {
    let rules = RuleSet::compile_for_execution(&["$A$ > 5", "$A$ > 1", "$A$ = 10"], &schema())
        .unwrap();
    let mut out = Vec::new();
    let stats = filter_rows(&rules, rows(&[10]), None, &NoopMonitor, |r| {
        out.push(r);
        Ok(())
    })
    .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(stats.per_rule, vec![1, 0, 0]);
}

#[test]
fn empty_rule_set_keeps_nothing() {
    let texts: [&str; 0] = [];
    let rules = RuleSet::compile_for_execution(&texts, &schema()).unwrap();
    let stats = filter_rows(&rules, rows(&[1, 2]), None, &NoopMonitor, |_| Ok(())).unwrap();
    assert_eq!(stats.kept, 0);
    assert_eq!(stats.read, 2);
}

#[test]
fn cancellation_keeps_emitted_rows() {
    let rules = RuleSet::compile_for_execution(&["$A$ >= 0"], &schema()).unwrap();
    let monitor = CountingMonitor::cancel_after(3);
    let mut out = Vec::new();
    let err = filter_rows(&rules, rows(&[1, 2, 3, 4, 5]), Some(5), &monitor, |r| {
        out.push(r);
        Ok(())
    })
    .unwrap_err();
    assert!(err.to_string().contains("cancelled"), "{err}");
    assert_eq!(keys(&out), vec!["Row0", "Row1", "Row2"]);
    assert_eq!(
        *monitor.reports.borrow(),
        vec![(1, Some(5)), (2, Some(5)), (3, Some(5))]
    );
}

#[test]
fn width_mismatch_is_data_format_error() {
    let rules = RuleSet::compile_for_execution(&["$A$ > 0"], &schema()).unwrap();
    let input = vec![Ok(Row::new("wide", vec![Cell::Int(1), Cell::Int(2)]))];
    assert!(filter_rows(&rules, input, None, &NoopMonitor, |_| Ok(())).is_err());
}

#[test]
fn source_and_sink_errors_propagate() {
    let rules = RuleSet::compile_for_execution(&["$A$ > 0"], &schema()).unwrap();
    let input = vec![
        Ok(Row::new("ok", vec![Cell::Int(1)])),
        Err(StructError::from(CoreReason::DataFormat).with_detail("bad line")),
    ];
    let mut count = 0;
    let result = filter_rows(&rules, input, None, &NoopMonitor, |_| {
        count += 1;
        Ok(())
    });
    assert!(result.is_err());
    assert_eq!(count, 1);

    let result = filter_rows(&rules, rows(&[1]), None, &NoopMonitor, |_| {
        Err(StructError::from(CoreReason::DataFormat).with_detail("sink full"))
    });
    assert!(result.is_err());
}

#[test]
fn progress_fraction() {
    assert_eq!(fraction(1, Some(4)), Some(0.25));
    assert_eq!(fraction(0, Some(0)), Some(1.0));
    assert_eq!(fraction(3, None), None);
}
