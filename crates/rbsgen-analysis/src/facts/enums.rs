//! `enum` declarations.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::engine::declarations::Declaration;
use crate::engine::evaluator::evaluate_arguments;
use crate::engine::value::Value;

/// Runs of ASCII non-word characters; non-ASCII letters survive.
static NON_IDENTIFIER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[\W&&[:ascii:]]+").ok());

/// `enum :status, %i[active archived], prefix: true`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumFact {
    pub name: String,
    /// Listed values, or the keys of a mapping, in order.
    pub values: Vec<Value>,
    /// Option mapping; `Value::Hash(vec![])` when absent.
    pub options: Value,
    pub line: usize,
}

impl EnumFact {
    /// `None` unless the declaration is an `enum` whose first argument is a name.
    pub fn extract(declaration: &Declaration) -> Option<Self> {
        if !declaration.is_named("enum") {
            return None;
        }
        let mut args = evaluate_arguments(&declaration.arguments).into_iter();
        let name = args.next()?.as_name()?.to_string();

        let (values, options) = match args.next() {
            Some(Value::Array(values)) => (values, args.next()),
            Some(Value::Hash(pairs)) => (pairs.into_iter().map(|(k, _)| k).collect(), args.next()),
            _ => (Vec::new(), None),
        };
        let options = match options {
            Some(hash @ Value::Hash(_)) => hash,
            _ => Value::Hash(Vec::new()),
        };

        Some(Self {
            name,
            values,
            options,
            line: declaration.line,
        })
    }

    /// Method-name fragment for one value, with `prefix`/`suffix` applied.
    pub fn method_name(&self, value: &Value) -> String {
        let mut components = Vec::with_capacity(3);
        if let Some(prefix) = self.affix("prefix") {
            components.push(prefix);
        }
        components.push(value.to_ruby_s());
        if let Some(suffix) = self.affix("suffix") {
            components.push(suffix);
        }
        let joined = components.join("_");
        match NON_IDENTIFIER.as_ref() {
            Some(re) => re.replace_all(&joined, "_").into_owned(),
            None => joined,
        }
    }

    /// Method-name fragments for every value, in order.
    pub fn method_names(&self) -> Vec<String> {
        self.values.iter().map(|v| self.method_name(v)).collect()
    }

    /// Whether predicate/bang instance methods are generated.
    pub fn instance_methods(&self) -> bool {
        self.flag("instance_methods")
    }

    /// Whether per-value scopes are generated.
    pub fn scopes(&self) -> bool {
        self.flag("scopes")
    }

    /// `true` → the enum name; a name → itself; anything else → none.
    fn affix(&self, key: &str) -> Option<String> {
        match self.options.get(key)? {
            Value::Bool(true) => Some(self.name.clone()),
            other => other.as_name().map(str::to_string),
        }
    }

    fn flag(&self, key: &str) -> bool {
        self.options.get(key).map_or(true, Value::is_truthy)
    }
}
