//! Lexical constant lookup against a [`ConstantRegistry`].

use std::path::PathBuf;

use crate::engine::declarations::NAMESPACE_SEPARATOR;

use super::registry::ConstantRegistry;

/// A resolved module or class constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReference<H> {
    /// Fully qualified name that matched.
    pub name: String,
    pub handle: H,
    pub source_path: Option<PathBuf>,
}

pub struct ModuleResolver<R> {
    registry: R,
}

impl<R: ConstantRegistry> ModuleResolver<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Resolve `name` as seen from inside `context`.
    ///
    /// Tries `context[..n]::name` for `n = len..=0`; the nearest enclosing scope
    /// wins. `::Name` is looked up at top level only.
    pub fn resolve<S: AsRef<str>>(
        &self,
        name: &str,
        context: &[S],
    ) -> Option<ModuleReference<R::Handle>> {
        candidates(name, context).into_iter().find_map(|candidate| {
            let handle = self.registry.lookup(&candidate)?;
            let source_path = self.registry.source_location(&candidate);
            Some(ModuleReference {
                name: candidate,
                handle,
                source_path,
            })
        })
    }

    pub fn is_concern(&self, reference: &ModuleReference<R::Handle>) -> bool {
        self.registry.is_concern(&reference.handle)
    }
}

/// Qualified candidates for `name` from `context`, longest prefix first.
pub fn candidates<S: AsRef<str>>(name: &str, context: &[S]) -> Vec<String> {
    if let Some(rooted) = name.strip_prefix(NAMESPACE_SEPARATOR) {
        return vec![rooted.to_string()];
    }
    (0..=context.len())
        .rev()
        .map(|n| {
            context[..n]
                .iter()
                .map(AsRef::as_ref)
                .chain(std::iter::once(name))
                .collect::<Vec<_>>()
                .join(NAMESPACE_SEPARATOR)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::registry::StaticRegistry;

    #[test]
    fn candidate_order() {
        assert_eq!(
            candidates("Included", &["Shop", "Order"]),
            vec!["Shop::Order::Included", "Shop::Included", "Included"]
        );
        assert_eq!(candidates("::Included", &["Shop"]), vec!["Included"]);
        assert_eq!(candidates::<&str>("A::B", &[]), vec!["A::B"]);
    }

    #[test]
    fn nearest_scope_wins() {
        let mut registry = StaticRegistry::new();
        registry.define_module("Included", None, true);
        registry.define_module("Shop::Included", None, true);
        let resolver = ModuleResolver::new(registry);

        let found = resolver.resolve("Included", &["Shop", "Order"]).unwrap();
        assert_eq!(found.name, "Shop::Included");

        let top = resolver.resolve("::Included", &["Shop", "Order"]).unwrap();
        assert_eq!(top.name, "Included");

        assert!(resolver.resolve("Missing", &["Shop"]).is_none());
    }
}
