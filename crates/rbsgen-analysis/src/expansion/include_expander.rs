//! Static simulation of mixin composition.
//!
//! Every `include` declaration is replaced, in place, by the call statements of
//! the `included do ... end` blocks of the concerns it names. Spliced bodies may
//! include further concerns; the loop keeps going until none remain. Lookup and
//! parse failures are absorbed: the `include` is dropped with no replacement.

use std::path::{Path, PathBuf};

use rbsgen_core::config::{ExpansionConfig, ParserConfig};
use rbsgen_core::types::collections::{FxHashMap, FxHashSet};

use crate::engine::declarations::{Declaration, DeclarationTable, NAMESPACE_SEPARATOR};
use crate::engine::evaluator::evaluate;
use crate::engine::value::Value;
use crate::parsers::RubyParser;
use crate::resolution::registry::ConstantRegistry;
use crate::resolution::resolver::{ModuleReference, ModuleResolver};

use super::module::MixinModule;

/// Counters for one [`IncludeExpander::expand`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    /// `include` declarations replaced.
    pub includes: usize,
    /// Declarations spliced in their place.
    pub spliced: usize,
}

/// Expands `include` declarations. Caches live for the expander's lifetime,
/// so one expander per run.
pub struct IncludeExpander<R: ConstantRegistry> {
    resolver: ModuleResolver<R>,
    parser: RubyParser,
    enabled: bool,
    resolutions: FxHashMap<(String, String), Option<ModuleReference<R::Handle>>>,
    modules: FxHashMap<String, MixinModule>,
    files: FxHashMap<PathBuf, Option<DeclarationTable>>,
}

impl<R: ConstantRegistry> IncludeExpander<R> {
    pub fn new(registry: R) -> Self {
        Self::with_config(registry, &ExpansionConfig::default(), &ParserConfig::default())
    }

    pub fn with_config(
        registry: R,
        expansion: &ExpansionConfig,
        parser: &ParserConfig,
    ) -> Self {
        Self {
            resolver: ModuleResolver::new(registry),
            parser: RubyParser::with_config(parser),
            enabled: expansion.effective_enabled(),
            resolutions: FxHashMap::default(),
            modules: FxHashMap::default(),
            files: FxHashMap::default(),
        }
    }

    /// Expand every bucket of `table` in place.
    pub fn expand(&mut self, table: &mut DeclarationTable) -> ExpansionStats {
        let mut stats = ExpansionStats::default();
        if !self.enabled {
            tracing::debug!("include expansion disabled");
            return stats;
        }
        for (namespace, declarations) in table.iter_mut() {
            let bucket = self.expand_bucket(namespace, declarations);
            stats.includes += bucket.includes;
            stats.spliced += bucket.spliced;
        }
        stats
    }

    /// Expand one namespace bucket in place.
    pub fn expand_bucket(
        &mut self,
        namespace: &str,
        declarations: &mut Vec<Declaration>,
    ) -> ExpansionStats {
        let context: Vec<String> = namespace
            .split(NAMESPACE_SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        // Re-including a module already spliced here does not re-run its hook.
        let mut visited: FxHashSet<String> = FxHashSet::default();
        let mut stats = ExpansionStats::default();

        while let Some(index) = declarations.iter().position(|d| d.is_named("include")) {
            let include = declarations.remove(index);
            let mut replacement = Vec::new();

            for argument in &include.arguments {
                let Some(Value::String(name)) = evaluate(argument) else {
                    tracing::debug!(
                        namespace,
                        line = include.line,
                        "skipping non-constant include argument"
                    );
                    continue;
                };
                let Some(reference) = self.resolve(&name, &context, namespace) else {
                    continue;
                };
                if !visited.insert(reference.name.clone()) {
                    tracing::debug!(namespace, module = %reference.name, "module already included");
                    continue;
                }
                replacement.extend(self.mixin(&reference).included_bodies.iter().cloned());
            }

            tracing::trace!(
                namespace,
                index,
                count = replacement.len(),
                "splicing included declarations"
            );
            stats.includes += 1;
            stats.spliced += replacement.len();
            declarations.splice(index..index, replacement);
        }
        stats
    }

    fn resolve(
        &mut self,
        name: &str,
        context: &[String],
        namespace: &str,
    ) -> Option<ModuleReference<R::Handle>> {
        let key = (namespace.to_string(), name.to_string());
        if let Some(cached) = self.resolutions.get(&key) {
            return cached.clone();
        }
        let resolved = self.resolver.resolve(name, context);
        if resolved.is_none() {
            tracing::debug!(namespace, module = name, "include target not found");
        }
        self.resolutions.insert(key, resolved.clone());
        resolved
    }

    /// The mixin for `reference`, loading its `included` bodies on first use.
    fn mixin(&mut self, reference: &ModuleReference<R::Handle>) -> &MixinModule {
        if !self.modules.contains_key(&reference.name) {
            let module = self.load_mixin(reference);
            self.modules.insert(reference.name.clone(), module);
        }
        // Inserted above.
        &self.modules[&reference.name]
    }

    fn load_mixin(&mut self, reference: &ModuleReference<R::Handle>) -> MixinModule {
        let name = reference.name.as_str();
        let source_path = reference.source_path.clone();

        if !self.resolver.is_concern(reference) {
            tracing::debug!(module = name, "not a concern; contributes nothing");
            return MixinModule::inert(name, false, source_path);
        }
        let Some(path) = source_path else {
            tracing::debug!(module = name, "concern has no known source file");
            return MixinModule::inert(name, true, None);
        };
        match self.parsed_file(&path) {
            Some(table) => MixinModule::from_table(name, Some(path.clone()), table),
            None => MixinModule::inert(name, true, Some(path)),
        }
    }

    /// Declarations of `path`, parsed at most once per run.
    fn parsed_file(&mut self, path: &Path) -> Option<&DeclarationTable> {
        if !self.files.contains_key(path) {
            let parsed = match self.parser.parse_file(path) {
                Ok(table) => Some(table),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "cannot read concern source");
                    None
                }
            };
            self.files.insert(path.to_path_buf(), parsed);
        }
        self.files.get(path)?.as_ref()
    }

    /// Modules consulted so far, by qualified name.
    pub fn modules(&self) -> impl Iterator<Item = &MixinModule> {
        self.modules.values()
    }
}
