//! # rbsgen-core
//!
//! Foundation crate for the rbsgen declaration analyzer.
//! Defines errors, error codes, configuration, tracing setup, and shared
//! collection aliases. Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::RbsgenConfig;
pub use errors::error_code::RbsgenErrorCode;
pub use types::collections::{FxHashMap, FxHashSet};
