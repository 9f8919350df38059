use orion_error::StructError;

use crate::error::{CoreReason, CoreResult};
use crate::rule_set::RuleSet;
use crate::value::Row;

#[cfg(test)]
mod tests;

/// Host side of a filter run: cancellation polling and progress reporting.
///
/// Both are called once per row, so implementations should be cheap.
pub trait ExecMonitor {
    fn is_cancelled(&self) -> bool;

    /// `done` rows processed out of `total`, when the total is known.
    fn progress(&self, done: u64, total: Option<u64>) {
        let _ = (done, total);
    }
}

/// Never cancels, ignores progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMonitor;

impl ExecMonitor for NoopMonitor {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Fraction of the input processed, in `0.0..=1.0`.
pub fn fraction(done: u64, total: Option<u64>) -> Option<f64> {
    match total {
        Some(0) => Some(1.0),
        Some(t) => Some((done as f64 / t as f64).min(1.0)),
        None => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub read: u64,
    pub kept: u64,
    /// Rows admitted by each rule, counting only the first rule that matched.
    pub per_rule: Vec<u64>,
}

impl FilterStats {
    pub fn dropped(&self) -> u64 {
        self.read - self.kept
    }
}

/// Stream `rows` through `rules`, handing each admitted row to `emit` in
/// input order.
///
/// Cancellation is polled before every row; rows already emitted stay
/// emitted and the run returns [`CoreReason::Cancelled`]. A row whose width
/// differs from the rule set's schema is a [`CoreReason::DataFormat`] error.
pub fn filter_rows<I, F>(
    rules: &RuleSet,
    rows: I,
    total: Option<u64>,
    monitor: &dyn ExecMonitor,
    mut emit: F,
) -> CoreResult<FilterStats>
where
    I: IntoIterator<Item = CoreResult<Row>>,
    F: FnMut(Row) -> CoreResult<()>,
{
    let mut stats = FilterStats {
        per_rule: vec![0; rules.len()],
        ..FilterStats::default()
    };
    for row in rows {
        if monitor.is_cancelled() {
            log::info!("filter cancelled after {} row(s)", stats.read);
            return Err(StructError::from(CoreReason::Cancelled)
                .with_detail(format!("cancelled after {} rows", stats.read)));
        }
        let row = row?;
        if row.width() != rules.width() {
            return Err(StructError::from(CoreReason::DataFormat).with_detail(format!(
                "row `{}` has {} cells, expected {}",
                row.key,
                row.width(),
                rules.width()
            )));
        }
        stats.read += 1;
        if let Some(hit) = rules.first_match(&row) {
            stats.per_rule[hit] += 1;
            stats.kept += 1;
            emit(row)?;
        }
        monitor.progress(stats.read, total);
    }
    log::debug!(
        "filter done: read={} kept={} dropped={}",
        stats.read,
        stats.kept,
        stats.dropped()
    );
    Ok(stats)
}
