//! Errors raised while reading or parsing Ruby sources.

use std::path::PathBuf;

use super::error_code::{self, RbsgenErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Grammar not found for language: {language}")]
    GrammarNotFound { language: String },

    #[error("tree-sitter failed on {}: {message}", path.display())]
    TreeSitterError { path: PathBuf, message: String },

    #[error("{} is {size} bytes, over the {limit} byte limit", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RbsgenErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::GrammarNotFound { .. } => error_code::GRAMMAR_NOT_FOUND,
            Self::TreeSitterError { .. } => error_code::TREE_SITTER_ERROR,
            Self::FileTooLarge { .. } => error_code::FILE_TOO_LARGE,
            Self::Io { .. } => error_code::IO_ERROR,
        }
    }
}
