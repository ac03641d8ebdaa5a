//! Include expansion: splice concern `included` bodies in place of `include`.

pub mod include_expander;
pub mod module;

pub use include_expander::{ExpansionStats, IncludeExpander};
pub use module::MixinModule;
