//! `has_secure_password` declarations.

use serde::Serialize;

use crate::engine::declarations::Declaration;
use crate::engine::evaluator::evaluate_arguments;
use crate::engine::value::Value;

pub const DEFAULT_PASSWORD_ATTRIBUTE: &str = "password";

/// `has_secure_password :recovery_password, validations: false`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurePasswordFact {
    pub attribute: String,
    pub validations: bool,
    pub line: usize,
}

impl SecurePasswordFact {
    pub fn extract(declaration: &Declaration) -> Option<Self> {
        if !declaration.is_named("has_secure_password") {
            return None;
        }
        let args = evaluate_arguments(&declaration.arguments);

        let attribute = match args.first() {
            Some(Value::Hash(_)) | None => DEFAULT_PASSWORD_ATTRIBUTE.to_string(),
            Some(value) => value.as_name()?.to_string(),
        };
        let validations = args
            .iter()
            .find_map(|a| a.get("validations"))
            .map_or(true, Value::is_truthy);

        Some(Self {
            attribute,
            validations,
            line: declaration.line,
        })
    }

    /// `authenticate_password`, `authenticate_recovery_password`, ...
    pub fn authenticate_method(&self) -> String {
        format!("authenticate_{}", self.attribute)
    }
}
