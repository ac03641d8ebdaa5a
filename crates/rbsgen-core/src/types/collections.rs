//! Hash collections used across the workspace.
//!
//! Keys are short identifiers and namespace paths, so FxHash beats SipHash here.

pub use rustc_hash::{FxHashMap, FxHashSet};
