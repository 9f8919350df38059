pub mod io;
pub mod logging;
pub mod runtime;
pub mod schema;
pub mod select;
pub mod settings;
pub mod types;
mod validate;

pub use io::IoConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use runtime::RuntimeConfig;
pub use schema::{ColumnConfig, SchemaConfig};
pub use select::SelectConfig;
pub use settings::{RULES_KEY, RuleSettings};
pub use types::HumanDuration;
