pub mod compare;
pub mod error;
pub mod filter;
pub mod predicate;
pub mod rule;
pub mod rule_set;
pub mod value;
pub mod wildcard;

pub use error::{CoreError, CoreReason, CoreResult};
pub use filter::{ExecMonitor, FilterStats, NoopMonitor, filter_rows};
pub use predicate::Predicate;
pub use rule::{CompileError, Rule};
pub use rule_set::{RuleFailure, RuleSet, ensure_schema};
pub use value::{Cell, Row};
