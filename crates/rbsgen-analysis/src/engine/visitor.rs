//! Single-pass declaration visitor.
//!
//! Walks lowered statements with a stack of namespace segments. Every call
//! expression reached outside a method body is recorded under the current
//! namespace key; calls are leaves (their arguments and blocks are kept on the
//! declaration, not visited). Method bodies are never entered.

use serde::Serialize;
use smallvec::SmallVec;

use crate::parsers::ast::{HashElement, NamespaceKind, NamespaceNode, Node};

use super::declarations::{namespace_key, DeclarationTable, NAMESPACE_SEPARATOR};
use super::evaluator::evaluate;

/// A class or module body seen during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceDefinition {
    /// Fully qualified name, e.g. `Shop::Order`.
    pub name: String,
    pub kind: NamespaceKind,
    pub line: usize,
}

#[derive(Debug, Default)]
pub struct DeclarationVisitor {
    context: SmallVec<[String; 4]>,
    table: DeclarationTable,
    definitions: Vec<NamespaceDefinition>,
}

impl DeclarationVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit `statements` and return the finished table.
    pub fn collect(statements: Vec<Node>) -> DeclarationTable {
        let mut visitor = Self::new();
        visitor.visit_all(statements);
        visitor.into_table()
    }

    pub fn visit_all(&mut self, statements: Vec<Node>) {
        for node in statements {
            self.visit(node);
        }
    }

    pub fn visit(&mut self, node: Node) {
        match node {
            Node::Call(call) => {
                let key = namespace_key(self.context.as_slice());
                self.table.push(&key, *call);
            }
            Node::Class(namespace) | Node::Module(namespace) => self.visit_namespace(*namespace),
            Node::Def { .. } => {}
            Node::Lambda(block) => self.visit_all(block.body),
            Node::Array { elements } | Node::Other { children: elements, .. } => {
                self.visit_all(elements)
            }
            Node::Hash { elements } | Node::KeywordHash { elements } => {
                for element in elements {
                    match element {
                        HashElement::Assoc { key, value } => {
                            self.visit(key);
                            self.visit(value);
                        }
                        HashElement::Splat { value } => self.visit(value),
                    }
                }
            }
            Node::ConstantPath { parent, .. } => {
                if let Some(parent) = parent {
                    self.visit(*parent);
                }
            }
            Node::Nil
            | Node::True
            | Node::False
            | Node::Integer { .. }
            | Node::String { .. }
            | Node::Symbol { .. }
            | Node::Constant { .. } => {}
        }
    }

    fn visit_namespace(&mut self, namespace: NamespaceNode) {
        // `class Shop::Order` pushes two segments; `class ::Order` one.
        let segments: Vec<String> = evaluate(&namespace.name)
            .and_then(|v| v.as_name().map(str::to_string))
            .map(|name| {
                name.split(NAMESPACE_SEPARATOR)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let depth = self.context.len();
        self.context.extend(segments);
        self.definitions.push(NamespaceDefinition {
            name: namespace_key(self.context.as_slice()),
            kind: namespace.kind,
            line: namespace.line,
        });

        // `class Foo < Struct.new(:a)` records `new` under `Foo`.
        if let Some(superclass) = namespace.superclass {
            self.visit(superclass);
        }
        self.visit_all(namespace.body);
        self.context.truncate(depth);
    }

    pub fn into_table(self) -> DeclarationTable {
        self.table
    }

    /// The table plus every class/module definition, in encounter order.
    pub fn into_parts(self) -> (DeclarationTable, Vec<NamespaceDefinition>) {
        (self.table, self.definitions)
    }
}
