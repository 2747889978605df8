//! Parse results
//!
//! A [`Namespace`] is the immutable snapshot produced by one call to
//! [`ArgumentParser::parse_args`](crate::argument::ArgumentParser::parse_args).

use indexmap::IndexMap;
use std::fmt;

/// The resolved value of a single argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A `Store` argument that was not given a value
    None,

    /// A `StoreTrue` argument
    Bool(bool),

    /// A `Store` argument (or the positional command)
    Str(String),

    /// An `Append` argument, in input order
    List(Vec<String>),
}

impl Value {
    /// Whether the value counts as "set"
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> &[String] {
        match self {
            Value::List(items) => items,
            _ => &[],
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(items) => write!(f, "{:?}", items),
        }
    }
}

/// Immutable mapping of every registered argument name to its value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Namespace {
    values: IndexMap<String, Value>,
    positional: String,
}

impl Namespace {
    pub(crate) fn new(values: IndexMap<String, Value>, positional: impl Into<String>) -> Self {
        Namespace {
            values,
            positional: positional.into(),
        }
    }

    /// Get the value stored under `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get a scalar string value, if one was supplied
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Get a boolean flag; unknown names read as `false`
    pub fn get_flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Value::Bool(true)))
    }

    /// Get an accumulated list; unknown names read as empty
    pub fn get_list(&self, name: &str) -> &[String] {
        self.get(name).map(Value::as_list).unwrap_or(&[])
    }

    /// Whether `name` holds a truthy value
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).map(Value::is_truthy).unwrap_or(false)
    }

    /// The positional command
    pub fn cmd(&self) -> Option<&str> {
        self.get_str(&self.positional)
    }

    /// True when strictly more than one field is truthy.
    ///
    /// The positional command is always present, so this reads as "the
    /// command was given at least one option".
    pub fn has_args(&self) -> bool {
        self.values.values().filter(|v| v.is_truthy()).count() > 1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace(")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, ")")
    }
}
