use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use orion_error::StructError;
use orion_error::op_context;
use orion_error::prelude::*;
use orion_error::{ErrorOwe, ErrorOweBase};
use rsel_config::SelectConfig;
use rsel_core::{CoreResult, ExecMonitor, FilterStats, RuleSet, ensure_schema, filter_rows};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::{RuntimeReason, RuntimeResult};
use crate::io::{JsonlSink, JsonlSource, count_rows};
use crate::monitor::TokenMonitor;

/// Rows admitted by one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCount {
    /// Canonical rule text with column names.
    pub rule: String,
    pub kept: u64,
}

/// Outcome of a completed filter run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub read: u64,
    pub kept: u64,
    pub dropped: u64,
    pub per_rule: Vec<RuleCount>,
    /// `None` when rows went to stdout.
    pub output: Option<PathBuf>,
    #[serde(serialize_with = "as_millis")]
    pub elapsed: Duration,
}

impl RunSummary {
    fn new(rules: &RuleSet, config: &SelectConfig, stats: FilterStats, elapsed: Duration) -> Self {
        let per_rule = rules
            .rules()
            .iter()
            .zip(&stats.per_rule)
            .map(|(rule, kept)| RuleCount {
                rule: rule.canonical_named(&config.schema),
                kept: *kept,
            })
            .collect();
        Self {
            read: stats.read,
            kept: stats.kept,
            dropped: stats.dropped(),
            per_rule,
            output: config.output_path(),
            elapsed,
        }
    }
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Filter the configured input into the configured output.
///
/// The rule list is loaded strictly and every rule must compile before the
/// first row is read. Rows are written as they are admitted, so on
/// cancellation the output holds exactly the rows kept so far and the run
/// returns a `Cancelled` error.
///
/// Blocking: run it on a blocking thread when called from async code.
pub fn run_select(config: &SelectConfig, cancel: CancellationToken) -> RuntimeResult<RunSummary> {
    let mut op = op_context!("rule-select-run").with_auto_log();
    let started = Instant::now();

    let texts = config.rules_for_execution().owe_conf()?;
    ensure_schema(&config.schema).err_conv()?;
    let rules = match RuleSet::try_compile(&texts, &config.schema) {
        Ok(rules) => rules,
        Err(failure) => {
            op.record("rule_index", failure.index.to_string().as_str());
            if let Some(offset) = failure.error.offset() {
                op.record("rule_offset", offset.to_string().as_str());
            }
            return failure.into_result().err_conv();
        }
    };
    rs_info!(
        conf,
        rules = rules.len(),
        columns = config.schema.len(),
        "rule set compiled"
    );

    let input = config.input_path().ok_or_else(|| {
        StructError::from(RuntimeReason::Bootstrap).with_detail("io.input is not configured")
    })?;
    op.record("input", input.display().to_string().as_str());
    let total = count_rows(&input)
        .owe(RuntimeReason::Io)
        .position(input.display().to_string())?;
    let source = JsonlSource::open(&input, &config.schema)
        .owe(RuntimeReason::Io)
        .position(input.display().to_string())?;

    let output = config.output_path();
    if let Some(path) = &output {
        op.record("output", path.display().to_string().as_str());
    }
    let mut sink = JsonlSink::open(output.as_deref()).owe(RuntimeReason::Io)?;
    rs_debug!(data, input = %input.display(), rows = total, "input opened");

    let monitor = TokenMonitor::new(cancel, config.runtime.progress_interval.as_duration());
    let result = filter_rows(&rules, source, Some(total), &monitor, |row| {
        sink.write(&row).owe_sys()
    });
    let stats = finish(&mut sink, result, monitor.is_cancelled())?;

    let summary = RunSummary::new(&rules, config, stats, started.elapsed());
    rs_info!(
        pipe,
        read = summary.read,
        kept = summary.kept,
        dropped = summary.dropped,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "run complete"
    );
    op.mark_suc();
    Ok(summary)
}

/// Flush the sink whatever the filter outcome. When the filter already
/// failed, a flush failure is logged and the filter error is returned.
fn finish<W: Write>(
    sink: &mut JsonlSink<W>,
    result: CoreResult<FilterStats>,
    cancelled: bool,
) -> RuntimeResult<FilterStats> {
    let flushed = sink.flush();
    match result {
        Ok(stats) => {
            flushed.owe(RuntimeReason::Io)?;
            Ok(stats)
        }
        Err(e) => {
            if cancelled {
                rs_warn!(pipe, written = sink.written(), "run cancelled");
            }
            if let Err(flush_err) = flushed {
                rs_warn!(
                    data,
                    written = sink.written(),
                    error = %flush_err,
                    "output flush failed, written rows may be incomplete"
                );
            }
            Err(e).err_conv()
        }
    }
}
