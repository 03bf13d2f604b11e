use std::collections::BTreeMap;

use crate::value::Value;

/// How the raw arguments of a continuation invocation become the value
/// injected into the computation at its suspend point.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// The first argument is the step error; the tail collapses to `Null`
    /// (empty), the single value, or a list.
    Default,
    /// Arguments map onto named fields, in order. Extra arguments are
    /// dropped, missing fields are absent.
    Named(Vec<String>),
    /// The raw argument list verbatim, first argument included.
    List,
}

impl Shape {
    /// Build a named-field shape from a space-separated name list,
    /// e.g. `Shape::named("err fd")`.
    pub fn named(names: &str) -> Shape {
        Shape::Named(names.split_whitespace().map(str::to_owned).collect())
    }

    /// Apply this shape to the raw argument list of one invocation.
    pub fn apply(&self, mut args: Vec<Value>) -> Value {
        match self {
            Shape::Named(names) => {
                let map: BTreeMap<String, Value> =
                    names.iter().cloned().zip(args).collect();
                Value::Map(map)
            }
            Shape::List => Value::List(args),
            Shape::Default => {
                if args.is_empty() {
                    return Value::Null;
                }
                let mut rest = args.split_off(1);
                match rest.len() {
                    0 => Value::Null,
                    1 => rest.remove(0),
                    _ => Value::List(rest),
                }
            }
        }
    }
}
