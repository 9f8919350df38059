//! Logging macros that tag every event with a `domain` field.
//!
//! Domains: `sys` (process lifecycle), `conf` (configuration and rule
//! compilation), `pipe` (the row filter loop), `data` (row sources and
//! sinks).
//!
//! ```ignore
//! rs_info!(sys, rules = 2, "rule set compiled");
//! rs_warn!(data, line = 7, error = %e, "bad row");
//! ```
//!
//! The domain is a bare identifier, turned into a string by the macro.

#[doc(hidden)]
macro_rules! rs_log {
    ($level:ident, $domain:ident, $($field:tt)*) => {
        tracing::$level!(domain = stringify!($domain), $($field)*)
    };
}

#[allow(unused_macros)]
macro_rules! rs_error {
    ($domain:ident, $($rest:tt)*) => {
        rs_log!(error, $domain, $($rest)*)
    };
}

macro_rules! rs_warn {
    ($domain:ident, $($rest:tt)*) => {
        rs_log!(warn, $domain, $($rest)*)
    };
}

macro_rules! rs_info {
    ($domain:ident, $($rest:tt)*) => {
        rs_log!(info, $domain, $($rest)*)
    };
}

macro_rules! rs_debug {
    ($domain:ident, $($rest:tt)*) => {
        rs_log!(debug, $domain, $($rest)*)
    };
}
