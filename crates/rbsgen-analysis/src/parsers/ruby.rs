//! Ruby parser front end: tree-sitter-ruby plus lowering to the owned AST.

use std::path::Path;

use rbsgen_core::config::ParserConfig;
use rbsgen_core::errors::ParseError;
use tree_sitter::{Node as TsNode, Parser};

use super::ast::Program;
use super::normalizer::RubyNormalizer;
use crate::engine::declarations::DeclarationTable;
use crate::engine::visitor::DeclarationVisitor;

/// Parses Ruby source text into a [`Program`].
///
/// A fresh tree-sitter `Parser` is created per call, so one `RubyParser`
/// can be shared across rayon workers.
#[derive(Debug, Clone)]
pub struct RubyParser {
    max_file_size: u64,
}

impl Default for RubyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RubyParser {
    pub fn new() -> Self {
        Self::with_config(&ParserConfig::default())
    }

    pub fn with_config(config: &ParserConfig) -> Self {
        Self {
            max_file_size: config.effective_max_file_size(),
        }
    }

    /// Parse `source`. Syntax errors are recovered from, not reported as `Err`.
    pub fn parse(&self, source: &str) -> Result<Program, ParseError> {
        self.parse_named(source, Path::new("<source>"))
    }

    /// Parse `source` and collect its declarations.
    pub fn parse_declarations(&self, source: &str) -> Result<DeclarationTable, ParseError> {
        let program = self.parse(source)?;
        Ok(DeclarationVisitor::collect(program.statements))
    }

    /// Read a file and collect its declarations.
    pub fn parse_file(&self, path: &Path) -> Result<DeclarationTable, ParseError> {
        let program = self.parse_program_file(path)?;
        Ok(DeclarationVisitor::collect(program.statements))
    }

    /// Read and parse a file, enforcing the configured size limit.
    pub fn parse_program_file(&self, path: &Path) -> Result<Program, ParseError> {
        let source = self.read_source(path)?;
        self.parse_named(&source, path)
    }

    /// Read a source file, enforcing the configured size limit.
    pub fn read_source(&self, path: &Path) -> Result<String, ParseError> {
        let io_error = |source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        };
        let size = std::fs::metadata(path).map_err(io_error)?.len();
        if size > self.max_file_size {
            return Err(ParseError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                limit: self.max_file_size,
            });
        }
        std::fs::read_to_string(path).map_err(io_error)
    }

    fn parse_named(&self, source: &str, path: &Path) -> Result<Program, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_ruby::LANGUAGE.into())
            .map_err(|_e| ParseError::GrammarNotFound {
                language: "ruby".to_string(),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::TreeSitterError {
                path: path.to_path_buf(),
                message: "tree-sitter returned None".to_string(),
            })?;

        let root = tree.root_node();
        let error_count = count_errors(root);
        if error_count > 0 {
            tracing::warn!(
                path = %path.display(),
                errors = error_count,
                "ruby source has syntax errors; using recovered tree"
            );
        }

        let statements = RubyNormalizer::new(source.as_bytes()).normalize_program(&tree);
        Ok(Program {
            statements,
            error_count,
        })
    }
}

/// Count ERROR and MISSING nodes under `root`.
fn count_errors(root: TsNode) -> usize {
    if !root.has_error() {
        return 0;
    }
    let mut count = 0;
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            count += 1;
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return count;
            }
        }
    }
}
