//! Owned Ruby AST.
//!
//! A closed set of node shapes lowered from the tree-sitter concrete tree by
//! [`RubyNormalizer`](super::normalizer::RubyNormalizer). Only the shapes the
//! evaluator and the declaration visitor pattern-match on get a dedicated
//! variant; everything else is kept as [`Node::Other`] with its lowered children.

use serde::Serialize;

/// A lowered Ruby AST node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Nil,
    True,
    False,
    Integer { value: i64 },
    /// String literal with escapes resolved and no interpolation.
    String { value: String },
    Symbol { name: String },
    Array { elements: Vec<Node> },
    /// `{ a: 1 }` literal.
    Hash { elements: Vec<HashElement> },
    /// Trailing `a: 1, b: 2` keywords of an argument list.
    KeywordHash { elements: Vec<HashElement> },
    /// Bare constant reference, e.g. `Comment`.
    Constant { name: String },
    /// `A::B`; `parent` is `None` for a root path such as `::A`.
    ConstantPath {
        parent: Option<Box<Node>>,
        name: String,
    },
    Call(Box<CallNode>),
    /// Stabby lambda `->(x) { ... }`.
    Lambda(Box<BlockNode>),
    Class(Box<NamespaceNode>),
    Module(Box<NamespaceNode>),
    /// Method definition. Bodies are never lowered.
    Def { name: String },
    Other { kind: String, children: Vec<Node> },
}

impl Node {
    pub fn other(kind: impl Into<String>) -> Self {
        Node::Other {
            kind: kind.into(),
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Node::Nil => "nil",
            Node::True => "true",
            Node::False => "false",
            Node::Integer { .. } => "integer",
            Node::String { .. } => "string",
            Node::Symbol { .. } => "symbol",
            Node::Array { .. } => "array",
            Node::Hash { .. } => "hash",
            Node::KeywordHash { .. } => "keyword_hash",
            Node::Constant { .. } => "constant",
            Node::ConstantPath { .. } => "constant_path",
            Node::Call(_) => "call",
            Node::Lambda(_) => "lambda",
            Node::Class(_) => "class",
            Node::Module(_) => "module",
            Node::Def { .. } => "def",
            Node::Other { kind, .. } => kind,
        }
    }

    pub fn as_call(&self) -> Option<&CallNode> {
        match self {
            Node::Call(call) => Some(call),
            _ => None,
        }
    }
}

/// One entry of a hash literal or keyword hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HashElement {
    Assoc { key: Node, value: Node },
    /// `**opts`
    Splat { value: Node },
}

/// A method call expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallNode {
    pub receiver: Option<Node>,
    pub name: String,
    /// Positional arguments first, then at most one [`Node::KeywordHash`].
    pub arguments: Vec<Node>,
    pub block: Option<BlockNode>,
    /// 1-based source line of the call.
    pub line: usize,
}

impl CallNode {
    /// A receiver-less call with no arguments or block, as written `has_secure_password`.
    pub fn bare(name: impl Into<String>, line: usize) -> Self {
        Self {
            receiver: None,
            name: name.into(),
            arguments: Vec::new(),
            block: None,
            line,
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}

/// A `{ |params| ... }` / `do |params| ... end` block or a lambda body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BlockNode {
    pub parameters: Option<Parameters>,
    pub body: Vec<Node>,
}

impl BlockNode {
    /// Statements of the body that are call expressions, in order.
    pub fn call_statements(&self) -> impl Iterator<Item = &CallNode> {
        self.body.iter().filter_map(Node::as_call)
    }
}

/// Whether a namespace body came from `class` or `module`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamespaceKind {
    Class,
    Module,
}

/// A `class`/`module` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceNode {
    pub kind: NamespaceKind,
    /// The constant (or constant path) naming the namespace.
    pub name: Node,
    pub superclass: Option<Node>,
    pub body: Vec<Node>,
    pub line: usize,
}

/// Parameter list of a block or lambda.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Parameters {
    pub requireds: Vec<RequiredParameter>,
    pub optionals: Vec<String>,
    pub rest: Option<RestParameter>,
    /// Required parameters after the rest parameter.
    pub posts: Vec<RequiredParameter>,
    pub keywords: Vec<KeywordParameter>,
    pub keyword_rest: Option<KeywordRestParameter>,
    pub block: Option<String>,
    /// `...`
    pub forwarding: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequiredParameter {
    Named { name: String },
    /// `(a, b)` destructuring.
    Destructured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestParameter {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordParameter {
    pub name: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KeywordRestParameter {
    Named { name: Option<String> },
    /// `**nil`
    NoKeywords,
}

/// The lowered top level of one source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<Node>,
    /// Number of ERROR/MISSING nodes tree-sitter recovered from.
    pub error_count: usize,
}

impl Program {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}
