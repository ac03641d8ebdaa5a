//! Fact extractors: structured data from recognised declarations.
//!
//! Extractors never fail. A malformed declaration yields `None` and is left
//! out of [`ModelFacts`].

pub mod delegated_type;
pub mod enums;
pub mod scopes;
pub mod secure_password;

use serde::Serialize;

use crate::engine::declarations::Declaration;

pub use delegated_type::DelegatedTypeFact;
pub use enums::EnumFact;
pub use scopes::{ScopeFact, ScopeParameter};
pub use secure_password::SecurePasswordFact;

/// Every fact extracted from one namespace bucket, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelFacts {
    pub namespace: String,
    pub enums: Vec<EnumFact>,
    pub scopes: Vec<ScopeFact>,
    pub delegated_types: Vec<DelegatedTypeFact>,
    pub secure_passwords: Vec<SecurePasswordFact>,
}

impl ModelFacts {
    pub fn from_declarations(namespace: &str, declarations: &[Declaration]) -> Self {
        let mut facts = Self {
            namespace: namespace.to_string(),
            ..Default::default()
        };
        for declaration in declarations {
            match declaration.name.as_str() {
                "enum" => facts.enums.extend(EnumFact::extract(declaration)),
                "scope" => facts.scopes.extend(ScopeFact::extract(declaration)),
                "delegated_type" => facts
                    .delegated_types
                    .extend(DelegatedTypeFact::extract(declaration)),
                "has_secure_password" => facts
                    .secure_passwords
                    .extend(SecurePasswordFact::extract(declaration)),
                _ => {}
            }
        }
        facts
    }

    /// The effective `scope` named `name`; later declarations override earlier ones.
    pub fn scope(&self, name: &str) -> Option<&ScopeFact> {
        self.scopes.iter().rev().find(|s| s.name == name)
    }

    /// The effective `enum` named `name`.
    pub fn enum_named(&self, name: &str) -> Option<&EnumFact> {
        self.enums.iter().rev().find(|e| e.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
            && self.scopes.is_empty()
            && self.delegated_types.is_empty()
            && self.secure_passwords.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
