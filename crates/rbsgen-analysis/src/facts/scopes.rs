//! `scope` declarations and their lambda parameter lists.

use std::fmt;

use serde::Serialize;

use crate::engine::declarations::Declaration;
use crate::engine::evaluator::evaluate;
use crate::parsers::ast::{
    BlockNode, KeywordRestParameter, Node, Parameters, RequiredParameter,
};

/// One parameter of a scope body, rendered as a signature fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ScopeParameter {
    /// `x`; `None` for a destructured `(a, b)`.
    Required(Option<String>),
    Optional(String),
    /// `*args`; `None` for an anonymous `*`.
    Rest(Option<String>),
    RequiredKeyword(String),
    OptionalKeyword(String),
    /// `**opts`; `None` for an anonymous `**` or `**nil`.
    KeywordRest(Option<String>),
}

impl fmt::Display for ScopeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(Some(name)) => write!(f, "untyped {name}"),
            Self::Required(None) => f.write_str("untyped"),
            Self::Optional(name) => write!(f, "?untyped {name}"),
            Self::Rest(Some(name)) => write!(f, "*untyped {name}"),
            Self::Rest(None) => f.write_str("*untyped"),
            Self::RequiredKeyword(name) => write!(f, "{name}: untyped"),
            Self::OptionalKeyword(name) => write!(f, "?{name}: untyped"),
            Self::KeywordRest(Some(name)) => write!(f, "**untyped {name}"),
            Self::KeywordRest(None) => f.write_str("**untyped"),
        }
    }
}

/// `scope :recent, ->(limit = 10) { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeFact {
    pub name: String,
    /// `None` when the body is not a lambda (permissive signature).
    pub parameters: Option<Vec<ScopeParameter>>,
    pub line: usize,
}

impl ScopeFact {
    pub fn extract(declaration: &Declaration) -> Option<Self> {
        if !declaration.is_named("scope") {
            return None;
        }
        let name = evaluate(declaration.arguments.first()?)?
            .as_name()?
            .to_string();
        let parameters = declaration
            .arguments
            .get(1)
            .and_then(lambda_body)
            .map(|block| block.parameters.as_ref().map(scope_parameters).unwrap_or_default());

        Some(Self {
            name,
            parameters,
            line: declaration.line,
        })
    }

    /// `(untyped user, ?untyped limit)`, or `(?)` for a non-lambda body.
    pub fn parameter_signature(&self) -> String {
        match &self.parameters {
            Some(params) => {
                let rendered: Vec<String> = params.iter().map(ToString::to_string).collect();
                format!("({})", rendered.join(", "))
            }
            None => "(?)".to_string(),
        }
    }
}

/// `-> { }`, or `lambda { }` / `proc { }` with a block.
fn lambda_body(node: &Node) -> Option<&BlockNode> {
    match node {
        Node::Lambda(block) => Some(&**block),
        Node::Call(call) if call.receiver.is_none() && matches!(call.name.as_str(), "lambda" | "proc") => {
            call.block.as_ref()
        }
        _ => None,
    }
}

fn scope_parameters(params: &Parameters) -> Vec<ScopeParameter> {
    let required = |p: &RequiredParameter| match p {
        RequiredParameter::Named { name } => ScopeParameter::Required(Some(name.clone())),
        RequiredParameter::Destructured => ScopeParameter::Required(None),
    };

    let mut out: Vec<ScopeParameter> = params.requireds.iter().map(required).collect();
    out.extend(params.optionals.iter().cloned().map(ScopeParameter::Optional));
    if let Some(rest) = &params.rest {
        out.push(ScopeParameter::Rest(rest.name.clone()));
    }
    out.extend(params.posts.iter().map(required));
    for keyword in &params.keywords {
        out.push(if keyword.required {
            ScopeParameter::RequiredKeyword(keyword.name.clone())
        } else {
            ScopeParameter::OptionalKeyword(keyword.name.clone())
        });
    }
    match &params.keyword_rest {
        Some(KeywordRestParameter::Named { name }) => {
            out.push(ScopeParameter::KeywordRest(name.clone()))
        }
        Some(KeywordRestParameter::NoKeywords) => out.push(ScopeParameter::KeywordRest(None)),
        None => {}
    }
    out
}
