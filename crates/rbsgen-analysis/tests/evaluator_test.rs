//! Literal evaluation of real Ruby argument lists.

use rbsgen_analysis::engine::evaluator::evaluate_arguments;
use rbsgen_analysis::{RubyParser, Value};

/// Evaluate the arguments of the single top-level call in `source`.
fn args(source: &str) -> Vec<Value> {
    let table = RubyParser::new().parse_declarations(source).unwrap();
    let call = &table.get("").unwrap()[0];
    evaluate_arguments(&call.arguments)
}

fn sym(name: &str) -> Value {
    Value::Symbol(name.to_string())
}

fn string(s: &str) -> Value {
    Value::String(s.to_string())
}

#[test]
fn scalars() {
    assert_eq!(
        args("m nil, true, false, 42, -7, 0x1f, 1_000\n"),
        vec![
            Value::Nil,
            Value::Bool(true),
            Value::Bool(false),
            Value::Integer(42),
            Value::Integer(-7),
            Value::Integer(31),
            Value::Integer(1000),
        ]
    );
}

#[test]
fn strings_and_symbols() {
    assert_eq!(
        args(r#"m "a\tb", 'it' 's', 'c\'d', :sym, :"quoted sym""#),
        vec![string("a\tb"), string("its"), string("c'd"), sym("sym"), sym("quoted sym")]
    );
}

#[test]
fn interpolation_is_unrepresentable() {
    assert_eq!(args("m \"hi #{name}\", name\n"), vec![Value::Nil, Value::Nil]);
}

#[test]
fn percent_literals() {
    assert_eq!(
        args("m %w[Message Comment], %i[active archived]\n"),
        vec![
            Value::Array(vec![string("Message"), string("Comment")]),
            Value::Array(vec![sym("active"), sym("archived")]),
        ]
    );
}

#[test]
fn constants_and_paths() {
    assert_eq!(
        args("m Comment, Shop::Order, ::Top::Level\n"),
        vec![string("Comment"), string("Shop::Order"), string("::Top::Level")]
    );
}

#[test]
fn hashes_and_keywords() {
    let values = args("m({ \"a\" => 1, b: [2, :c], d: foo }, prefix: true, to: Target)\n");
    assert_eq!(
        values,
        vec![
            Value::Hash(vec![
                (string("a"), Value::Integer(1)),
                (sym("b"), Value::Array(vec![Value::Integer(2), sym("c")])),
                (sym("d"), Value::Nil),
            ]),
            Value::Hash(vec![
                (sym("prefix"), Value::Bool(true)),
                (sym("to"), string("Target")),
            ]),
        ]
    );
}

#[test]
fn duplicate_keys_keep_first_position_last_value() {
    assert_eq!(
        args("m a: 1, b: 2, a: 3\n"),
        vec![Value::Hash(vec![(sym("a"), Value::Integer(3)), (sym("b"), Value::Integer(2))])]
    );
}
