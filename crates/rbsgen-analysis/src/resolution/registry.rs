//! Constant registry: "is this name defined, where, and is it a concern?"

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use rbsgen_core::types::collections::FxHashMap;
use serde::Serialize;

use crate::parsers::ast::NamespaceKind;

/// Lookup capability over defined constants.
///
/// Names are fully qualified without a leading `::` (`Shop::Order`).
pub trait ConstantRegistry {
    type Handle: Clone + Debug;

    /// Handle for a defined constant.
    fn lookup(&self, qualified_name: &str) -> Option<Self::Handle>;

    /// File that defines the constant, if known.
    fn source_location(&self, qualified_name: &str) -> Option<PathBuf>;

    /// Whether the constant is a composable concern module.
    fn is_concern(&self, handle: &Self::Handle) -> bool;
}

/// One entry of a [`StaticRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantEntry {
    pub name: String,
    pub kind: NamespaceKind,
    pub source: Option<PathBuf>,
    pub concern: bool,
}

/// In-memory registry keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    entries: FxHashMap<String, ConstantEntry>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn define(&mut self, entry: ConstantEntry) {
        let name = entry.name.trim_start_matches("::").to_string();
        self.entries.insert(name.clone(), ConstantEntry { name, ..entry });
    }

    pub fn define_module(&mut self, name: &str, source: Option<&Path>, concern: bool) {
        self.define(ConstantEntry {
            name: name.to_string(),
            kind: NamespaceKind::Module,
            source: source.map(Path::to_path_buf),
            concern,
        });
    }

    pub fn define_class(&mut self, name: &str, source: Option<&Path>) {
        self.define(ConstantEntry {
            name: name.to_string(),
            kind: NamespaceKind::Class,
            source: source.map(Path::to_path_buf),
            concern: false,
        });
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.entries.contains_key(qualified_name)
    }

    pub fn get(&self, qualified_name: &str) -> Option<&ConstantEntry> {
        self.entries.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> Vec<&ConstantEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

impl ConstantRegistry for StaticRegistry {
    type Handle = ConstantEntry;

    fn lookup(&self, qualified_name: &str) -> Option<ConstantEntry> {
        self.entries.get(qualified_name).cloned()
    }

    fn source_location(&self, qualified_name: &str) -> Option<PathBuf> {
        self.entries.get(qualified_name)?.source.clone()
    }

    fn is_concern(&self, handle: &ConstantEntry) -> bool {
        handle.kind == NamespaceKind::Module && handle.concern
    }
}

impl<R: ConstantRegistry + ?Sized> ConstantRegistry for &R {
    type Handle = R::Handle;

    fn lookup(&self, qualified_name: &str) -> Option<Self::Handle> {
        (**self).lookup(qualified_name)
    }

    fn source_location(&self, qualified_name: &str) -> Option<PathBuf> {
        (**self).source_location(qualified_name)
    }

    fn is_concern(&self, handle: &Self::Handle) -> bool {
        (**self).is_concern(handle)
    }
}
