pub mod ast;
mod binder;
mod error;
pub mod operators;
pub mod parse_utils;
pub mod render;
mod rule_parser;
mod schema;

pub use binder::bind;
pub use error::RuleError;
pub use operators::{OPERATORS, Operator, OperatorKind};
pub use render::render_named;
pub use rule_parser::{parse_rule, parse_syntax};
pub use schema::{ColumnSpec, Comparator, Schema, Unresolved, ValueKind};
