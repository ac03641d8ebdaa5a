//! Stable error codes shared by all error enums.

/// Maps an error variant to a stable, machine-readable code.
pub trait RbsgenErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const GRAMMAR_NOT_FOUND: &str = "GRAMMAR_NOT_FOUND";
pub const TREE_SITTER_ERROR: &str = "TREE_SITTER_ERROR";
pub const FILE_TOO_LARGE: &str = "FILE_TOO_LARGE";
pub const IO_ERROR: &str = "IO_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";
