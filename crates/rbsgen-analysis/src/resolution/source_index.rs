//! Builds a [`StaticRegistry`] by scanning Ruby sources on disk.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rbsgen_core::config::{ExpansionConfig, ParserConfig, RegistryConfig};

use crate::engine::declarations::DeclarationTable;
use crate::engine::evaluator::evaluate;
use crate::engine::visitor::{DeclarationVisitor, NamespaceDefinition};
use crate::parsers::ast::NamespaceKind;
use crate::parsers::RubyParser;

use super::registry::{ConstantEntry, StaticRegistry};

/// Static module-source lookup table for a project tree.
pub struct SourceIndex;

/// Definitions found in one file.
struct FileDefinitions {
    path: PathBuf,
    entries: Vec<ConstantEntry>,
}

impl SourceIndex {
    /// Walk the configured roots under `root` and register every class and
    /// module definition. The first definition in path order wins.
    pub fn scan(
        root: &Path,
        registry_config: &RegistryConfig,
        expansion_config: &ExpansionConfig,
    ) -> StaticRegistry {
        Self::scan_with_parser(root, registry_config, expansion_config, &ParserConfig::default())
    }

    pub fn scan_with_parser(
        root: &Path,
        registry_config: &RegistryConfig,
        expansion_config: &ExpansionConfig,
        parser_config: &ParserConfig,
    ) -> StaticRegistry {
        let files = discover_ruby_files(root, registry_config);
        let markers = expansion_config.effective_concern_markers();
        let parser = RubyParser::with_config(parser_config);

        let indexed: Vec<FileDefinitions> = files
            .par_iter()
            .filter_map(|path| match parser.parse_program_file(path) {
                Ok(program) => {
                    let mut visitor = DeclarationVisitor::new();
                    visitor.visit_all(program.statements);
                    let (table, definitions) = visitor.into_parts();
                    Some(FileDefinitions {
                        path: path.clone(),
                        entries: entries_for(path, &table, &definitions, &markers),
                    })
                }
                Err(e) => {
                    // Non-fatal: the file's constants stay unknown.
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable ruby source");
                    None
                }
            })
            .collect();

        let mut registry = StaticRegistry::new();
        for file in indexed {
            for entry in file.entries {
                if registry.contains(&entry.name) {
                    tracing::trace!(name = %entry.name, path = %file.path.display(), "constant reopened");
                    continue;
                }
                registry.define(entry);
            }
        }
        tracing::debug!(root = %root.display(), constants = registry.len(), "source index built");
        registry
    }
}

fn entries_for(
    path: &Path,
    table: &DeclarationTable,
    definitions: &[NamespaceDefinition],
    markers: &[String],
) -> Vec<ConstantEntry> {
    definitions
        .iter()
        .map(|def| ConstantEntry {
            name: def.name.clone(),
            kind: def.kind,
            source: Some(path.to_path_buf()),
            concern: def.kind == NamespaceKind::Module && extends_marker(table, &def.name, markers),
        })
        .collect()
}

/// `extend ActiveSupport::Concern` (or `::ActiveSupport::Concern`) in the module body.
fn extends_marker(table: &DeclarationTable, namespace: &str, markers: &[String]) -> bool {
    table
        .named(namespace, "extend")
        .filter(|call| call.receiver.is_none())
        .flat_map(|call| call.arguments.iter())
        .filter_map(evaluate)
        .filter_map(|value| value.as_name().map(|n| n.trim_start_matches("::").to_string()))
        .any(|name| markers.iter().any(|m| *m == name))
}

/// `.rb` files under the configured roots, sorted by path.
fn discover_ruby_files(root: &Path, config: &RegistryConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in config.effective_roots() {
        let dir = root.join(dir);
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "registry root missing");
            continue;
        }

        let mut builder = ignore::WalkBuilder::new(&dir);
        builder
            .hidden(false)
            .git_ignore(true)
            .git_exclude(true)
            .follow_links(config.effective_follow_symlinks());

        let mut overrides = ignore::overrides::OverrideBuilder::new(&dir);
        for pattern in &config.extra_ignore {
            let _ = overrides.add(&format!("!{}", pattern));
        }
        if let Ok(built) = overrides.build() {
            builder.overrides(built);
        }

        for entry in builder.build() {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("rb") {
                files.push(path.to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    files
}
