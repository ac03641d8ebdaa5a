//! A resolved mixin and the declarations its `included` hook contributes.

use std::path::PathBuf;

use crate::engine::declarations::{Declaration, DeclarationTable};

/// A module consulted during include expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixinModule {
    /// Fully qualified name.
    pub name: String,
    pub concern: bool,
    pub source_path: Option<PathBuf>,
    /// Call statements of every `included do ... end` block, in order.
    pub included_bodies: Vec<Declaration>,
}

impl MixinModule {
    /// A module that contributes nothing (not a concern, or its source is unusable).
    pub fn inert(name: impl Into<String>, concern: bool, source_path: Option<PathBuf>) -> Self {
        Self {
            name: name.into(),
            concern,
            source_path,
            included_bodies: Vec::new(),
        }
    }

    /// Build from the declaration table of the module's defining file.
    pub fn from_table(
        name: impl Into<String>,
        source_path: Option<PathBuf>,
        table: &DeclarationTable,
    ) -> Self {
        let name = name.into();
        let included_bodies = included_bodies(table, &name);
        Self {
            name,
            concern: true,
            source_path,
            included_bodies,
        }
    }
}

/// Unwrap the blocks of `included` calls in `namespace`.
///
/// Calls without a block are skipped; non-call statements inside a block are
/// dropped.
pub fn included_bodies(table: &DeclarationTable, namespace: &str) -> Vec<Declaration> {
    table
        .named(namespace, "included")
        .filter_map(|decl| decl.block.as_ref())
        .flat_map(|block| block.call_statements().cloned())
        .collect()
}
