//! Entry points tying configuration, rule compilation and the filter loop
//! together.
//!
//! - [`run_select`]: execution context. Strict rule load, fail-closed
//!   compilation, rows streamed from input to output.
//! - [`check_rules`]: editing context. Lenient rule load, every rule compiled
//!   on its own and reported with its canonical forms or its error.
//! - [`wait_for_signal`]: cancels a run on Ctrl-C or SIGTERM.

mod check;
mod run;
mod signal;

pub use check::{CheckReport, RuleCheck, RuleOutcome, check_rules};
pub use run::{RuleCount, RunSummary, run_select};
pub use signal::wait_for_signal;
