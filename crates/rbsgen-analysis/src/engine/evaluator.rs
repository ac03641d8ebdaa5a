//! Literal evaluator: a restricted subset of AST shapes to [`Value`]s.
//!
//! Never executes anything. Calls, interpolation, variables and control flow
//! are unrepresentable and evaluate to `None`.

use crate::parsers::ast::{HashElement, Node};

use super::value::Value;

/// Evaluate a literal node. `None` means unrepresentable.
pub fn evaluate(node: &Node) -> Option<Value> {
    match node {
        Node::Nil => Some(Value::Nil),
        Node::True => Some(Value::Bool(true)),
        Node::False => Some(Value::Bool(false)),
        Node::Integer { value } => Some(Value::Integer(*value)),
        Node::String { value } => Some(Value::String(value.clone())),
        Node::Symbol { name } => Some(Value::Symbol(name.clone())),
        // Unrepresentable elements keep their slot as nil.
        Node::Array { elements } => Some(Value::Array(
            elements
                .iter()
                .map(|e| evaluate(e).unwrap_or(Value::Nil))
                .collect(),
        )),
        Node::Hash { elements } | Node::KeywordHash { elements } => {
            Some(Value::Hash(evaluate_hash(elements)))
        }
        Node::Constant { name } => Some(Value::String(name.clone())),
        Node::ConstantPath { .. } => constant_path(node).map(Value::String),
        _ => None,
    }
}

/// Evaluate every argument of a call; unrepresentable ones become nil.
pub fn evaluate_arguments(arguments: &[Node]) -> Vec<Value> {
    arguments
        .iter()
        .map(|a| evaluate(a).unwrap_or(Value::Nil))
        .collect()
}

/// Entries whose key is unrepresentable are dropped; splats are skipped.
fn evaluate_hash(elements: &[HashElement]) -> Vec<(Value, Value)> {
    let mut pairs = Vec::with_capacity(elements.len());
    for element in elements {
        let HashElement::Assoc { key, value } = element else {
            continue;
        };
        let Some(key) = evaluate(key) else {
            continue;
        };
        Value::insert(&mut pairs, key, evaluate(value).unwrap_or(Value::Nil));
    }
    pairs
}

/// `A::B::C` → `"A::B::C"`, `::A` → `"::A"`. Fails when a parent segment is
/// not itself a constant.
fn constant_path(node: &Node) -> Option<String> {
    match node {
        Node::Constant { name } => Some(name.clone()),
        Node::ConstantPath { parent, name } => {
            let parent = match parent {
                Some(parent) => constant_path(parent)?,
                None => String::new(),
            };
            Some(format!("{parent}::{name}"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(name: &str) -> Node {
        Node::Constant { name: name.into() }
    }

    fn path(parent: Option<Node>, name: &str) -> Node {
        Node::ConstantPath {
            parent: parent.map(Box::new),
            name: name.into(),
        }
    }

    #[test]
    fn scalars() {
        assert_eq!(evaluate(&Node::Nil), Some(Value::Nil));
        assert_eq!(evaluate(&Node::True), Some(Value::Bool(true)));
        assert_eq!(evaluate(&Node::Integer { value: -7 }), Some(Value::Integer(-7)));
        assert_eq!(
            evaluate(&Node::Symbol { name: "a".into() }),
            Some(Value::Symbol("a".into()))
        );
    }

    #[test]
    fn constant_paths_keep_the_root_marker() {
        let abc = path(Some(path(Some(constant("A")), "B")), "C");
        assert_eq!(evaluate(&abc), Some(Value::String("A::B::C".into())));

        let rooted = path(Some(path(None, "A")), "B");
        assert_eq!(evaluate(&rooted), Some(Value::String("::A::B".into())));
    }

    #[test]
    fn dynamic_parent_makes_path_unrepresentable() {
        let dynamic = path(Some(Node::other("call")), "B");
        assert_eq!(evaluate(&dynamic), None);
    }

    #[test]
    fn arrays_keep_length() {
        let node = Node::Array {
            elements: vec![Node::Integer { value: 1 }, Node::other("identifier")],
        };
        assert_eq!(
            evaluate(&node),
            Some(Value::Array(vec![Value::Integer(1), Value::Nil]))
        );
    }

    #[test]
    fn hashes_drop_unrepresentable_keys() {
        let node = Node::Hash {
            elements: vec![
                HashElement::Assoc {
                    key: Node::other("call"),
                    value: Node::Integer { value: 1 },
                },
                HashElement::Assoc {
                    key: Node::Symbol { name: "a".into() },
                    value: Node::other("interpolation"),
                },
                HashElement::Splat {
                    value: Node::other("identifier"),
                },
            ],
        };
        assert_eq!(
            evaluate(&node),
            Some(Value::Hash(vec![(Value::Symbol("a".into()), Value::Nil)]))
        );
    }

    #[test]
    fn calls_are_unrepresentable() {
        let call = Node::Call(Box::new(crate::parsers::ast::CallNode::bare("now", 1)));
        assert_eq!(evaluate(&call), None);
        assert_eq!(evaluate(&Node::Def { name: "x".into() }), None);
    }
}
