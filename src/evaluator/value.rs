//! Document values produced by the parser
//!
//! Values are what scalars, arrays, dictionaries and evaluation expressions
//! parse to. They can be serialized to YAML or JSON.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// A document value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Integer (64-bit signed)
    Int(i64),
    /// Text
    String(String),
    /// Boolean
    Bool(bool),
    /// Ordered sequence of values
    Array(Vec<Value>),
    /// Mapping from name to value, in insertion order
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Build a single-entry mapping `{name: value}`
    pub fn entry(name: impl Into<String>, value: Value) -> Value {
        let mut map = IndexMap::with_capacity(1);
        map.insert(name.into(), value);
        Value::Object(map)
    }

    /// The integer held by an `Int`, if this is one
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    /// The text held by a `String`, borrowed
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The flag held by a `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get as array
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as object
    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a value by key path; array segments are indices (e.g. `["ports", "0"]`)
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let mut current = self;
        for key in path {
            match current {
                Value::Object(obj) => {
                    current = obj.get(*key)?;
                }
                Value::Array(arr) => {
                    let idx: usize = key.parse().ok()?;
                    current = arr.get(idx)?;
                }
                _ => return None,
            }
        }
        Some(current)
    }
}

// Hand-written so object keys keep their insertion order in every format.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Array(arr) => {
                write!(f, "(")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, ")")
            }
            Value::Object(obj) => {
                write!(f, "@{{")?;
                for (i, (k, v)) in obj.iter().enumerate() {
                    if i > 0 {
                        write!(f, ";")?;
                    }
                    write!(f, " {} = {}", k, v)?;
                }
                write!(f, " }}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(m: IndexMap<String, Value>) -> Self {
        Value::Object(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Int(42).type_name(), "int");
        assert_eq!(Value::Bool(true).type_name(), "bool");
        assert_eq!(Value::String("hello".into()).type_name(), "string");
        assert_eq!(Value::Array(vec![]).type_name(), "array");
        assert_eq!(Value::Object(IndexMap::new()).type_name(), "object");
    }

    #[test]
    fn test_entry() {
        let value = Value::entry("port", Value::Int(8080));
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("port"), Some(&Value::Int(8080)));
    }

    #[test]
    fn test_get_path() {
        let server = Value::entry("ports", vec![80i64, 443].into());
        let value = Value::entry("server", server);

        assert_eq!(
            value.get_path(&["server", "ports", "1"]),
            Some(&Value::Int(443))
        );
        assert_eq!(value.get_path(&["server", "missing"]), None);
        assert_eq!(value.get_path(&["server", "ports", "x"]), None);
    }

    #[test]
    fn test_display_uses_source_syntax() {
        let mut map = IndexMap::new();
        map.insert("a".to_string(), Value::from(vec![1i64, 2]));
        map.insert("b".to_string(), Value::Bool(true));
        assert_eq!(Value::Object(map).to_string(), "@{ a = (1, 2); b = true }");
        assert_eq!(Value::from("text").to_string(), "text");
    }

    #[test]
    fn test_serialize_keeps_key_order() {
        let mut map = IndexMap::new();
        map.insert("zeta".to_string(), Value::Int(1));
        map.insert("alpha".to_string(), Value::Int(2));
        let json = serde_json::to_string(&Value::Object(map)).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":2}"#);
    }
}
