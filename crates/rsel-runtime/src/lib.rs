#[macro_use]
mod log_macros;

pub mod error;
pub mod io;
pub mod lifecycle;
pub mod monitor;
pub mod tracing_init;
