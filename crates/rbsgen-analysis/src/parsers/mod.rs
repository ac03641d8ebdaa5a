//! Ruby parsing: tree-sitter-ruby front end and the owned AST it lowers into.

pub mod ast;
pub mod normalizer;
pub mod ruby;

pub use ast::{BlockNode, CallNode, HashElement, NamespaceKind, NamespaceNode, Node, Program};
pub use ruby::RubyParser;
