//! Literal evaluation and declaration collection.

pub mod declarations;
pub mod evaluator;
pub mod value;
pub mod visitor;

pub use declarations::{Declaration, DeclarationTable};
pub use evaluator::evaluate;
pub use value::Value;
pub use visitor::{DeclarationVisitor, NamespaceDefinition};
