//! Lowers a tree-sitter-ruby concrete tree into the owned [`Node`] AST.

use tree_sitter::Node as TsNode;

use super::ast::{
    BlockNode, CallNode, HashElement, KeywordParameter, KeywordRestParameter, NamespaceKind,
    NamespaceNode, Node, Parameters, RequiredParameter, RestParameter,
};

/// Converts tree-sitter-ruby nodes into [`Node`] values.
pub struct RubyNormalizer<'s> {
    source: &'s [u8],
}

impl<'s> RubyNormalizer<'s> {
    pub fn new(source: &'s [u8]) -> Self {
        Self { source }
    }

    /// Lower the statements of the `program` root.
    pub fn normalize_program(&self, tree: &tree_sitter::Tree) -> Vec<Node> {
        self.normalize_statements(tree.root_node())
    }

    /// Lower a statement container (`program`, `body_statement`, `block_body`, ...).
    ///
    /// A bare identifier in statement position is a receiver-less call.
    fn normalize_statements(&self, node: TsNode) -> Vec<Node> {
        let mut statements = Vec::new();
        for child in named_children(node) {
            match child.kind() {
                "body_statement" | "block_body" => {
                    statements.extend(self.normalize_statements(child));
                }
                "identifier" => {
                    statements.push(Node::Call(Box::new(CallNode::bare(
                        self.text(child),
                        line_of(child),
                    ))));
                }
                _ => statements.push(self.normalize_node(child)),
            }
        }
        statements
    }

    /// Lower a single expression node.
    pub fn normalize_node(&self, node: TsNode) -> Node {
        let kind = node.kind();
        match kind {
            "nil" => Node::Nil,
            "true" => Node::True,
            "false" => Node::False,
            "integer" => parse_integer(self.text(node))
                .map(|value| Node::Integer { value })
                .unwrap_or_else(|| Node::other(kind)),
            "unary" => self.normalize_unary(node),

            "string" | "bare_string" => match self.string_value(node) {
                Some(value) => Node::String { value },
                None => self.normalize_other(node),
            },
            "chained_string" => self.normalize_chained_string(node),

            "simple_symbol" => {
                let text = self.text(node);
                Node::Symbol {
                    name: text.strip_prefix(':').unwrap_or(text).to_string(),
                }
            }
            "hash_key_symbol" => Node::Symbol {
                name: self.text(node).to_string(),
            },
            "delimited_symbol" | "bare_symbol" => match self.string_value(node) {
                Some(name) => Node::Symbol { name },
                None => self.normalize_other(node),
            },

            "array" | "string_array" | "symbol_array" => Node::Array {
                elements: named_children(node)
                    .map(|child| self.normalize_node(child))
                    .collect(),
            },
            "hash" => Node::Hash {
                elements: named_children(node)
                    .filter_map(|child| self.normalize_hash_element(child))
                    .collect(),
            },

            "constant" => Node::Constant {
                name: self.text(node).to_string(),
            },
            "scope_resolution" => self.normalize_scope_resolution(node),

            "call" | "method_call" => Node::Call(Box::new(self.normalize_call(node))),
            "assignment" => self.normalize_assignment(node),
            "lambda" => Node::Lambda(Box::new(self.normalize_block(node))),

            "class" => self.normalize_namespace(node, NamespaceKind::Class),
            "module" => self.normalize_namespace(node, NamespaceKind::Module),
            "method" | "singleton_method" => Node::Def {
                name: node
                    .child_by_field_name("name")
                    .map(|n| self.text(n).to_string())
                    .unwrap_or_default(),
            },

            // Statement containers keep bare identifiers as calls.
            "then" | "else" | "do" | "begin" | "ensure" | "rescue"
            | "parenthesized_statements" | "singleton_class" => Node::Other {
                kind: kind.to_string(),
                children: self.normalize_statements(node),
            },

            _ => self.normalize_other(node),
        }
    }

    fn normalize_other(&self, node: TsNode) -> Node {
        Node::Other {
            kind: node.kind().to_string(),
            children: named_children(node)
                .map(|child| self.normalize_node(child))
                .collect(),
        }
    }

    fn normalize_unary(&self, node: TsNode) -> Node {
        let operator = node.child_by_field_name("operator").map(|n| self.text(n));
        let operand = node.child_by_field_name("operand");
        match (operator, operand) {
            (Some("-"), Some(operand)) if operand.kind() == "integer" => {
                match parse_integer(self.text(operand)).and_then(i64::checked_neg) {
                    Some(value) => Node::Integer { value },
                    None => self.normalize_other(node),
                }
            }
            _ => self.normalize_other(node),
        }
    }

    fn normalize_chained_string(&self, node: TsNode) -> Node {
        let mut value = String::new();
        for part in named_children(node) {
            match self.string_value(part) {
                Some(piece) => value.push_str(&piece),
                None => return self.normalize_other(node),
            }
        }
        Node::String { value }
    }

    /// Content of a string-like node, or `None` when it interpolates.
    fn string_value(&self, node: TsNode) -> Option<String> {
        let raw = self.text(node);
        let single_quoted = raw.starts_with('\'') || raw.starts_with("%q") || raw.starts_with(":'");
        // `%w`/`%i` words are their own content.
        if matches!(node.kind(), "bare_string" | "bare_symbol") && node.named_child_count() == 0 {
            return Some(raw.to_string());
        }
        let mut value = String::new();
        for child in named_children(node) {
            match child.kind() {
                "string_content" => {
                    let text = self.text(child);
                    if single_quoted {
                        value.push_str(&unescape_single_quoted(text));
                    } else {
                        value.push_str(text);
                    }
                }
                "escape_sequence" => value.push_str(&unescape_sequence(self.text(child))),
                _ => return None,
            }
        }
        Some(value)
    }

    fn normalize_hash_element(&self, node: TsNode) -> Option<HashElement> {
        match node.kind() {
            "pair" => {
                let key = node.child_by_field_name("key")?;
                // `{ x: }` shorthand has no value node.
                let value = node
                    .child_by_field_name("value")
                    .map(|v| self.normalize_node(v))
                    .unwrap_or_else(|| Node::other("implicit"));
                let key = match self.normalize_node(key) {
                    // `"k": v` labels a symbol key.
                    Node::String { value: name }
                        if key.next_sibling().is_some_and(|s| s.kind() == ":") =>
                    {
                        Node::Symbol { name }
                    }
                    other => other,
                };
                Some(HashElement::Assoc { key, value })
            }
            "hash_splat_argument" => Some(HashElement::Splat {
                value: self.normalize_other(node),
            }),
            _ => None,
        }
    }

    fn normalize_scope_resolution(&self, node: TsNode) -> Node {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string())
            .unwrap_or_default();
        let parent = node
            .child_by_field_name("scope")
            .map(|scope| Box::new(self.normalize_node(scope)));
        Node::ConstantPath { parent, name }
    }

    fn normalize_call(&self, node: TsNode) -> CallNode {
        let receiver = node
            .child_by_field_name("receiver")
            .map(|r| self.normalize_node(r));
        // `foo.()` has no method node.
        let name = node
            .child_by_field_name("method")
            .map(|m| self.text(m).to_string())
            .unwrap_or_else(|| "call".to_string());
        let arguments = node
            .child_by_field_name("arguments")
            .map(|args| self.normalize_arguments(args))
            .unwrap_or_default();
        let block = node
            .child_by_field_name("block")
            .map(|b| self.normalize_block(b));

        CallNode {
            receiver,
            name,
            arguments,
            block,
            line: line_of(node),
        }
    }

    /// `recv.attr = value` is a call to the `attr=` writer. Local variable and
    /// constant assignments stay opaque.
    fn normalize_assignment(&self, node: TsNode) -> Node {
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return self.normalize_other(node);
        };
        let writer = (left.kind() == "call")
            .then(|| {
                left.child_by_field_name("receiver")
                    .zip(left.child_by_field_name("method"))
            })
            .flatten();
        let Some((receiver, method)) = writer else {
            return self.normalize_other(node);
        };

        Node::Call(Box::new(CallNode {
            receiver: Some(self.normalize_node(receiver)),
            name: format!("{}=", self.text(method)),
            arguments: vec![self.normalize_node(right)],
            block: None,
            line: line_of(node),
        }))
    }

    /// Positional arguments in order; keyword pairs are gathered into one
    /// [`Node::KeywordHash`] at the position of the first pair.
    fn normalize_arguments(&self, node: TsNode) -> Vec<Node> {
        let mut arguments = Vec::new();
        let mut keywords: Option<(usize, Vec<HashElement>)> = None;

        for child in named_children(node) {
            match child.kind() {
                "pair" | "hash_splat_argument" => {
                    if let Some(element) = self.normalize_hash_element(child) {
                        keywords
                            .get_or_insert_with(|| (arguments.len(), Vec::new()))
                            .1
                            .push(element);
                    }
                }
                _ => arguments.push(self.normalize_node(child)),
            }
        }

        if let Some((position, elements)) = keywords {
            arguments.insert(position, Node::KeywordHash { elements });
        }
        arguments
    }

    /// Lower a `block`, `do_block`, or `lambda` node.
    fn normalize_block(&self, node: TsNode) -> BlockNode {
        let mut block = BlockNode::default();
        for child in named_children(node) {
            match child.kind() {
                "block_parameters" | "lambda_parameters" => {
                    block.parameters = Some(self.normalize_parameters(child));
                }
                "body_statement" | "block_body" => {
                    block.body.extend(self.normalize_statements(child));
                }
                // Lambda bodies are nested blocks.
                "block" | "do_block" => {
                    let inner = self.normalize_block(child);
                    if block.parameters.is_none() {
                        block.parameters = inner.parameters;
                    }
                    block.body.extend(inner.body);
                }
                "identifier" => block
                    .body
                    .push(Node::Call(Box::new(CallNode::bare(self.text(child), line_of(child))))),
                _ => block.body.push(self.normalize_node(child)),
            }
        }
        block
    }

    fn normalize_parameters(&self, node: TsNode) -> Parameters {
        let mut params = Parameters::default();
        let mut cursor = node.walk();
        if !cursor.goto_first_child() {
            return params;
        }
        loop {
            let child = cursor.node();
            let is_local = cursor.field_name() == Some("locals");
            if child.is_named() && !child.is_extra() && !is_local {
                self.push_parameter(&mut params, child);
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        params
    }

    fn push_parameter(&self, params: &mut Parameters, child: TsNode) {
        let field_text = |field: &str| {
            child
                .child_by_field_name(field)
                .map(|n| self.text(n).to_string())
        };

        match child.kind() {
            "identifier" => {
                let required = RequiredParameter::Named {
                    name: self.text(child).to_string(),
                };
                if params.rest.is_some() {
                    params.posts.push(required);
                } else {
                    params.requireds.push(required);
                }
            }
            "destructured_parameter" => {
                if params.rest.is_some() {
                    params.posts.push(RequiredParameter::Destructured);
                } else {
                    params.requireds.push(RequiredParameter::Destructured);
                }
            }
            "optional_parameter" => {
                if let Some(name) = field_text("name") {
                    params.optionals.push(name);
                }
            }
            "splat_parameter" => {
                params.rest = Some(RestParameter {
                    name: field_text("name"),
                });
            }
            "keyword_parameter" => {
                if let Some(name) = field_text("name") {
                    params.keywords.push(KeywordParameter {
                        name,
                        required: child.child_by_field_name("value").is_none(),
                    });
                }
            }
            "hash_splat_parameter" => {
                params.keyword_rest = Some(KeywordRestParameter::Named {
                    name: field_text("name"),
                });
            }
            "hash_splat_nil" => {
                params.keyword_rest = Some(KeywordRestParameter::NoKeywords);
            }
            "block_parameter" => params.block = field_text("name"),
            "forward_parameter" => params.forwarding = true,
            _ => {}
        }
    }

    fn normalize_namespace(&self, node: TsNode, kind: NamespaceKind) -> Node {
        let mut name = Node::other("missing_name");
        let mut superclass = None;
        let mut body = Vec::new();

        let mut cursor = node.walk();
        if cursor.goto_first_child() {
            loop {
                let child = cursor.node();
                match cursor.field_name() {
                    Some("name") => name = self.normalize_node(child),
                    Some("superclass") => {
                        superclass = named_children(child)
                            .next()
                            .map(|expr| self.normalize_node(expr));
                    }
                    _ if !child.is_named() || child.is_extra() => {}
                    _ => match child.kind() {
                        "body_statement" => body.extend(self.normalize_statements(child)),
                        "identifier" => body.push(Node::Call(Box::new(CallNode::bare(
                            self.text(child),
                            line_of(child),
                        )))),
                        _ => body.push(self.normalize_node(child)),
                    },
                }
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }

        let namespace = Box::new(NamespaceNode {
            kind,
            name,
            superclass,
            body,
            line: line_of(node),
        });
        match kind {
            NamespaceKind::Class => Node::Class(namespace),
            NamespaceKind::Module => Node::Module(namespace),
        }
    }

    fn text(&self, node: TsNode) -> &'s str {
        node.utf8_text(self.source).unwrap_or("")
    }
}

/// Named, non-extra children (comments and heredoc bodies are extras).
fn named_children(node: TsNode<'_>) -> impl Iterator<Item = TsNode<'_>> {
    (0..node.child_count())
        .filter_map(move |i| node.child(i))
        .filter(|child| child.is_named() && !child.is_extra())
}

fn line_of(node: TsNode) -> usize {
    node.start_position().row + 1
}

/// Parse a Ruby integer literal: `_` separators, `0x`/`0b`/`0o`/`0d` prefixes,
/// and C-style leading-zero octal.
pub fn parse_integer(text: &str) -> Option<i64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };

    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = lower.strip_prefix("0d") {
        (10, rest)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };

    if body.is_empty() {
        return None;
    }
    let value = i64::from_str_radix(body, radix).ok()?;
    if negative {
        value.checked_neg()
    } else {
        Some(value)
    }
}

/// Resolve one double-quoted escape sequence such as `\n` or `é`.
fn unescape_sequence(seq: &str) -> String {
    let Some(body) = seq.strip_prefix('\\') else {
        return seq.to_string();
    };
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str();

    match first {
        'n' => "\n".into(),
        't' => "\t".into(),
        'r' => "\r".into(),
        's' => " ".into(),
        '0' if rest.is_empty() => "\0".into(),
        'e' => "\x1b".into(),
        'a' => "\x07".into(),
        'b' => "\x08".into(),
        'f' => "\x0c".into(),
        'v' => "\x0b".into(),
        '\n' => String::new(),
        'u' => {
            let hex = rest.trim_start_matches('{').trim_end_matches('}');
            hex.split_whitespace()
                .filter_map(|cp| u32::from_str_radix(cp, 16).ok().and_then(char::from_u32))
                .collect()
        }
        'x' => u32::from_str_radix(rest, 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default(),
        c if c.is_digit(8) => u32::from_str_radix(body, 8)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Single-quoted strings only recognise `\\` and `\'`.
fn unescape_single_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '\\' || next == '\'' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_literals() {
        assert_eq!(parse_integer("12345"), Some(12_345));
        assert_eq!(parse_integer("1_000"), Some(1000));
        assert_eq!(parse_integer("0x1F"), Some(31));
        assert_eq!(parse_integer("0b101"), Some(5));
        assert_eq!(parse_integer("0o17"), Some(15));
        assert_eq!(parse_integer("017"), Some(15));
        assert_eq!(parse_integer("0"), Some(0));
        assert_eq!(parse_integer("-42"), Some(-42));
        assert_eq!(parse_integer("99999999999999999999"), None);
    }

    #[test]
    fn escape_sequences() {
        assert_eq!(unescape_sequence("\\n"), "\n");
        assert_eq!(unescape_sequence("\\\""), "\"");
        assert_eq!(unescape_sequence("\\u00e9"), "é");
        assert_eq!(unescape_sequence("\\u{1F600}"), "😀");
        assert_eq!(unescape_sequence("\\x41"), "A");
        assert_eq!(unescape_single_quoted(r"it\'s a \\ path \n"), r"it's a \ path \n");
    }
}
