//! Declaration table: namespace key to ordered declarations.

use rbsgen_core::types::collections::FxHashMap;

use crate::parsers::ast::CallNode;

/// A class/module-body-level macro call, kept verbatim.
pub type Declaration = CallNode;

/// Namespace separator used in table keys.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Join namespace segments into a table key. Top level is `""`.
pub fn namespace_key<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(NAMESPACE_SEPARATOR)
}

/// Per-namespace declarations in source order.
///
/// Order matters: later `scope`/`enum` calls override earlier ones, and an
/// `include` marks where expanded declarations are spliced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationTable {
    buckets: FxHashMap<String, Vec<Declaration>>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, namespace: &str) -> Option<&[Declaration]> {
        self.buckets.get(namespace).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, namespace: &str) -> Option<&mut Vec<Declaration>> {
        self.buckets.get_mut(namespace)
    }

    pub fn push(&mut self, namespace: &str, declaration: Declaration) {
        self.buckets
            .entry(namespace.to_string())
            .or_default()
            .push(declaration);
    }

    /// Namespace keys, sorted.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.buckets.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Declaration])> {
        self.buckets
            .iter()
            .map(|(ns, decls)| (ns.as_str(), decls.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<Declaration>)> {
        self.buckets.iter_mut().map(|(ns, decls)| (ns.as_str(), decls))
    }

    /// Number of namespaces.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Declarations in `namespace` with call name `name`, in order.
    pub fn named<'a>(
        &'a self,
        namespace: &str,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Declaration> + 'a {
        self.get(namespace)
            .unwrap_or_default()
            .iter()
            .filter(move |d| d.is_named(name))
    }
}
