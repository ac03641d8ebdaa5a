//! Constant lookup: the registry capability, lexical resolution, and the
//! on-disk source index.

pub mod registry;
pub mod resolver;
pub mod source_index;

pub use registry::{ConstantEntry, ConstantRegistry, StaticRegistry};
pub use resolver::{ModuleReference, ModuleResolver};
pub use source_index::SourceIndex;
