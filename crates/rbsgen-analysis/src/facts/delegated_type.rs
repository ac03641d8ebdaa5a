//! `delegated_type` declarations.

use serde::Serialize;

use crate::engine::declarations::Declaration;
use crate::engine::evaluator::evaluate_arguments;
use crate::engine::value::Value;
use crate::inflect::underscore;

/// `delegated_type :entryable, types: %w[Message Comment]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelegatedTypeFact {
    pub role: String,
    /// Class names from `types:`, in order.
    pub types: Vec<String>,
    pub options: Value,
    pub line: usize,
}

impl DelegatedTypeFact {
    pub fn extract(declaration: &Declaration) -> Option<Self> {
        if !declaration.is_named("delegated_type") {
            return None;
        }
        let mut args = evaluate_arguments(&declaration.arguments).into_iter();
        let role = args.next()?.as_name()?.to_string();
        let options = match args.next() {
            Some(hash @ Value::Hash(_)) => hash,
            _ => Value::Hash(Vec::new()),
        };
        let types = options
            .get("types")
            .and_then(Value::as_array)
            .unwrap_or_default()
            .iter()
            .filter_map(|t| t.as_name().map(str::to_string))
            .collect();

        Some(Self {
            role,
            types,
            options,
            line: declaration.line,
        })
    }

    /// Accessor base names per type: `Message` → `message`, `Admin::Note` → `admin_note`.
    pub fn type_accessors(&self) -> Vec<String> {
        self.types
            .iter()
            .map(|t| underscore(t).replace('/', "_"))
            .collect()
    }
}
