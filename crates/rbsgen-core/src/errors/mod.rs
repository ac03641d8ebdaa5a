//! Error types for every fallible entry point of the analyzer.
//!
//! Pipeline internals absorb these (see the include expander); they only reach
//! callers through explicit file and config operations.

pub mod config_error;
pub mod error_code;
pub mod parse_error;

pub use config_error::ConfigError;
pub use parse_error::ParseError;
