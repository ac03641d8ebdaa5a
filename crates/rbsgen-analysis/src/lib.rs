//! # rbsgen-analysis
//!
//! Static analysis of ActiveRecord model sources.
//!
//! Pipeline: Ruby source → tree-sitter → owned AST → declaration visitor →
//! per-namespace declaration table → include expansion → fact extraction.
//! Nothing is executed; constants are resolved against a [`ConstantRegistry`].

pub mod analyzer;
pub mod engine;
pub mod expansion;
pub mod facts;
pub mod inflect;
pub mod parsers;
pub mod resolution;

pub use analyzer::{model_source_path, ModelAnalysis, ModelAnalyzer};
pub use engine::{evaluate, Declaration, DeclarationTable, DeclarationVisitor, Value};
pub use expansion::IncludeExpander;
pub use facts::ModelFacts;
pub use parsers::RubyParser;
pub use resolution::{ConstantRegistry, ModuleResolver, SourceIndex, StaticRegistry};
