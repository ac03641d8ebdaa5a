//! Values produced by the literal evaluator.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A statically evaluated Ruby literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Nil,
    Bool(bool),
    Integer(i64),
    /// String literals and constant names (`"Shop::Order"`).
    String(String),
    Symbol(String),
    Array(Vec<Value>),
    /// Insertion-ordered pairs; keys are unique.
    Hash(Vec<(Value, Value)>),
}

impl Value {
    /// Symbols and strings are interchangeable as names.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Hash(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Ruby truthiness: everything but `nil` and `false`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Look up a hash entry by name, matching symbol and string keys alike.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_hash()?
            .iter()
            .find(|(k, _)| k.as_name() == Some(key))
            .map(|(_, v)| v)
    }

    /// Insert into a hash, overwriting an equal key in place.
    pub fn insert(pairs: &mut Vec<(Value, Value)>, key: Value, value: Value) {
        match pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => pairs.push((key, value)),
        }
    }

    /// The host language's `to_s` for scalars.
    pub fn to_ruby_s(&self) -> String {
        match self {
            Value::Nil => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::String(s) | Value::Symbol(s) => s.clone(),
            Value::Array(_) | Value::Hash(_) => self.to_string(),
        }
    }
}

/// Renders values as Ruby source.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Symbol(s) => write!(f, ":{s}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Hash(pairs) => {
                if pairs.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match k {
                        Value::Symbol(name) => write!(f, "{name}: {v}")?,
                        _ => write!(f, "{k} => {v}")?,
                    }
                }
                f.write_str(" }")
            }
        }
    }
}

/// Hashes serialize as JSON objects keyed by `to_ruby_s()`.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::String(s) | Value::Symbol(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Hash(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (k, v) in pairs {
                    map.serialize_entry(&k.to_ruby_s(), v)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Value {
        Value::Symbol(s.to_string())
    }

    #[test]
    fn names_accept_symbols_and_strings() {
        assert_eq!(sym("status").as_name(), Some("status"));
        assert_eq!(Value::String("status".into()).as_name(), Some("status"));
        assert_eq!(Value::Integer(1).as_name(), None);
    }

    #[test]
    fn hash_insert_overwrites_in_place() {
        let mut pairs = Vec::new();
        Value::insert(&mut pairs, sym("a"), Value::Integer(1));
        Value::insert(&mut pairs, sym("b"), Value::Integer(2));
        Value::insert(&mut pairs, sym("a"), Value::Integer(3));
        assert_eq!(
            pairs,
            vec![(sym("a"), Value::Integer(3)), (sym("b"), Value::Integer(2))]
        );
    }

    #[test]
    fn get_matches_symbol_or_string_keys() {
        let hash = Value::Hash(vec![
            (sym("prefix"), Value::Bool(true)),
            (Value::String("suffix".into()), sym("state")),
        ]);
        assert_eq!(hash.get("prefix"), Some(&Value::Bool(true)));
        assert_eq!(hash.get("suffix"), Some(&sym("state")));
        assert_eq!(hash.get("scopes"), None);
    }

    #[test]
    fn display_and_to_s() {
        let hash = Value::Hash(vec![(sym("types"), Value::Array(vec![Value::String("Message".into())]))]);
        assert_eq!(hash.to_string(), r#"{ types: ["Message"] }"#);
        assert_eq!(Value::Nil.to_ruby_s(), "");
        assert_eq!(sym("active").to_ruby_s(), "active");
        assert_eq!(Value::Bool(true).to_ruby_s(), "true");
    }

    #[test]
    fn serializes_to_json() {
        let hash = Value::Hash(vec![
            (sym("prefix"), Value::Bool(true)),
            (sym("values"), Value::Array(vec![sym("a"), Value::Nil])),
        ]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, r#"{"prefix":true,"values":["a",null]}"#);
    }
}
