//! Variable values and named segment converters.
//!
//! A converter turns the raw text of a path segment into a typed [`Value`],
//! or returns `None` when the segment does not match the type. Converters are
//! looked up by name when a pattern such as `$id:int` is registered.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Name of the converter that is always available.
pub const INT: &str = "int";

/// Name of the optional floating point converter.
pub const FLOAT: &str = "float";

/// A bound variable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

/// Variables bound while walking a path, keyed by variable name.
pub type Variables = BTreeMap<String, Value>;

/// A segment converter.
pub type Converter = Rc<dyn Fn(&str) -> Option<Value>>;

/// Parse a base-10 integer segment.
pub fn int(segment: &str) -> Option<Value> {
    segment.parse::<i64>().ok().map(Value::Int)
}

/// Parse a floating point segment.
pub fn float(segment: &str) -> Option<Value> {
    segment.parse::<f64>().ok().map(Value::Float)
}

/// Look up a converter that ships with the crate by name.
///
/// `int` is always registered; this also exposes the optional ones so
/// configuration can enable them by name.
pub fn builtin(name: &str) -> Option<Converter> {
    match name {
        INT => Some(Rc::new(int)),
        FLOAT => Some(Rc::new(float)),
        _ => None,
    }
}

/// Named converter table.
#[derive(Clone)]
pub struct Converters {
    by_name: FxHashMap<String, Converter>,
}

impl Converters {
    /// Create a table holding the `int` converter.
    pub fn new() -> Self {
        let mut by_name: FxHashMap<String, Converter> = FxHashMap::default();
        by_name.insert(INT.to_string(), Rc::new(int));
        Self { by_name }
    }

    /// Add or replace a converter.
    pub fn register(&mut self, name: impl Into<String>, converter: Converter) {
        self.by_name.insert(name.into(), converter);
    }

    pub fn get(&self, name: &str) -> Option<&Converter> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Convert `segment` with the optional converter.
    ///
    /// Without a converter the segment is bound as a string. Returns `None`
    /// when the converter is unknown or rejects the segment.
    pub fn apply(&self, converter: Option<&str>, segment: &str) -> Option<Value> {
        match converter {
            None => Some(Value::Str(segment.to_string())),
            Some(name) => self.get(name).and_then(|f| f(segment)),
        }
    }

    /// Registered converter names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Converters {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Converters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converters")
            .field("names", &self.names())
            .finish()
    }
}
