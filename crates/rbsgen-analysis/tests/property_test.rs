//! Property-based tests for the evaluator, visitor and enum naming.

use proptest::prelude::*;

use rbsgen_analysis::engine::evaluate;
use rbsgen_analysis::facts::EnumFact;
use rbsgen_analysis::parsers::{Node, RubyParser};
use rbsgen_analysis::Value;

// ---- Strategies ----

fn constant_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,6}"
}

fn literal() -> impl Strategy<Value = Node> {
    prop_oneof![
        Just(Node::Nil),
        Just(Node::True),
        any::<i64>().prop_map(|value| Node::Integer { value }),
        "[a-z]{1,8}".prop_map(|name| Node::Symbol { name }),
        "[ -~]{0,12}".prop_map(|value| Node::String { value }),
        Just(Node::other("identifier")),
    ]
}

// ---- Evaluator ----

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn array_evaluation_preserves_length_and_elements(elements in prop::collection::vec(literal(), 0..12)) {
        let array = Node::Array { elements: elements.clone() };
        let Some(Value::Array(values)) = evaluate(&array) else {
            panic!("array literal must evaluate");
        };
        prop_assert_eq!(values.len(), elements.len());
        for (value, element) in values.iter().zip(&elements) {
            prop_assert_eq!(value.clone(), evaluate(element).unwrap_or(Value::Nil));
        }
    }

    #[test]
    fn constant_paths_join_segments(segments in prop::collection::vec(constant_name(), 1..5), rooted in any::<bool>()) {
        let mut node = if rooted {
            Node::ConstantPath { parent: None, name: segments[0].clone() }
        } else {
            Node::Constant { name: segments[0].clone() }
        };
        for segment in &segments[1..] {
            node = Node::ConstantPath { parent: Some(Box::new(node)), name: segment.clone() };
        }

        let expected = format!("{}{}", if rooted { "::" } else { "" }, segments.join("::"));
        prop_assert_eq!(evaluate(&node), Some(Value::String(expected)));
    }
}

// ---- Visitor ----

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn calls_inside_methods_are_never_recorded(
        visible in prop::collection::vec("[a-z]{3,8}", 0..6),
        hidden in prop::collection::vec("[a-z]{3,8}", 1..6),
        depth in 0usize..3,
    ) {
        let mut source = String::from("class Model\n");
        for (i, name) in visible.iter().enumerate() {
            source.push_str(&format!("  visible_{name} :v{i}\n"));
        }
        source.push_str("  def helper\n");
        for _ in 0..depth {
            source.push_str("    [1].each do |x|\n");
        }
        for (i, name) in hidden.iter().enumerate() {
            source.push_str(&format!("    hidden_{name} :h{i}\n"));
        }
        for _ in 0..depth {
            source.push_str("    end\n");
        }
        source.push_str("  end\nend\n");

        let table = RubyParser::new().parse_declarations(&source).unwrap();
        let recorded: Vec<&str> = table
            .iter()
            .flat_map(|(_, decls)| decls.iter().map(|d| d.name.as_str()))
            .collect();

        prop_assert!(recorded.iter().all(|n| !n.starts_with("hidden_")));
        prop_assert_eq!(recorded.len(), visible.len());
    }
}

// ---- Enum naming ----

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn enum_method_names_are_identifier_safe(value in "[ -~]{1,16}") {
        let fact = EnumFact {
            name: "status".into(),
            values: vec![Value::String(value.clone())],
            options: Value::Hash(vec![(Value::Symbol("prefix".into()), Value::Bool(true))]),
            line: 1,
        };
        let name = fact.method_name(&fact.values[0]);

        prop_assert!(name.starts_with("status_"));
        prop_assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
}
