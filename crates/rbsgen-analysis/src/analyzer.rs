//! End-to-end analysis of one model: parse, collect, expand, extract.

use std::path::{Path, PathBuf};

use rbsgen_core::errors::ParseError;
use rbsgen_core::RbsgenConfig;

use crate::engine::declarations::DeclarationTable;
use crate::expansion::{ExpansionStats, IncludeExpander};
use crate::facts::ModelFacts;
use crate::inflect::underscore;
use crate::parsers::RubyParser;
use crate::resolution::{ConstantRegistry, SourceIndex, StaticRegistry};

/// Result of analysing one model class.
#[derive(Debug, Clone)]
pub struct ModelAnalysis {
    pub class_name: String,
    /// Every bucket of the model's file, after include expansion.
    pub declarations: DeclarationTable,
    pub facts: ModelFacts,
    pub expansion: ExpansionStats,
}

pub struct ModelAnalyzer<R: ConstantRegistry> {
    registry: R,
    parser: RubyParser,
    config: RbsgenConfig,
}

impl ModelAnalyzer<StaticRegistry> {
    /// Analyzer backed by a [`SourceIndex`] scan of `root`.
    pub fn for_project(root: &Path, config: RbsgenConfig) -> Self {
        let registry = SourceIndex::scan_with_parser(
            root,
            &config.registry,
            &config.expansion,
            &config.parser,
        );
        Self::new(registry, config)
    }
}

impl<R: ConstantRegistry> ModelAnalyzer<R> {
    pub fn new(registry: R, config: RbsgenConfig) -> Self {
        let parser = RubyParser::with_config(&config.parser);
        Self {
            registry,
            parser,
            config,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Analyse `class_name` as declared in `source`.
    pub fn analyze_source(&self, class_name: &str, source: &str) -> Result<ModelAnalysis, ParseError> {
        let declarations = self.parser.parse_declarations(source)?;
        Ok(self.finish(class_name, declarations))
    }

    /// Analyse `class_name` as declared in the file at `path`.
    pub fn analyze_file(&self, class_name: &str, path: &Path) -> Result<ModelAnalysis, ParseError> {
        let declarations = self.parser.parse_file(path)?;
        Ok(self.finish(class_name, declarations))
    }

    /// Analyse `class_name` from its conventional file under `root`.
    pub fn analyze_model(&self, root: &Path, class_name: &str) -> Result<ModelAnalysis, ParseError> {
        self.analyze_file(class_name, &model_source_path(root, class_name))
    }

    fn finish(&self, class_name: &str, mut declarations: DeclarationTable) -> ModelAnalysis {
        let class_name = class_name.trim_start_matches("::");
        let mut expander =
            IncludeExpander::with_config(&self.registry, &self.config.expansion, &self.config.parser);
        let expansion = expander.expand(&mut declarations);

        let facts = ModelFacts::from_declarations(
            class_name,
            declarations.get(class_name).unwrap_or_default(),
        );
        tracing::debug!(
            class = class_name,
            includes = expansion.includes,
            spliced = expansion.spliced,
            enums = facts.enums.len(),
            scopes = facts.scopes.len(),
            "model analysed"
        );

        ModelAnalysis {
            class_name: class_name.to_string(),
            declarations,
            facts,
            expansion,
        }
    }
}

/// `Shop::Order` → `<root>/app/models/shop/order.rb`.
pub fn model_source_path(root: &Path, class_name: &str) -> PathBuf {
    root.join("app")
        .join("models")
        .join(format!("{}.rb", underscore(class_name)))
}
