//! Symbol table for `var` declarations
//!
//! One table lives inside each parser for the duration of a single parse.
//! There is no nesting: every declaration is global to its document.

use std::collections::HashMap;

use super::value::Value;

/// Variable bindings made by `var` statements
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    bindings: HashMap<String, Value>,
}

impl SymbolTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name, replacing any earlier binding
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        tracing::trace!(name = %name, kind = value.type_name(), "define variable");
        self.bindings.insert(name, value);
    }

    /// Look up a variable by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// All declared names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let mut table = SymbolTable::new();
        assert!(table.is_empty());

        table.define("port", Value::Int(8080));
        assert_eq!(table.get("port"), Some(&Value::Int(8080)));
        assert_eq!(table.get("host"), None);
    }

    #[test]
    fn test_redefine_overwrites() {
        let mut table = SymbolTable::new();
        table.define("x", Value::Int(1));
        table.define("x", Value::String("two".into()));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("x"), Some(&Value::String("two".into())));
    }

    #[test]
    fn test_names_sorted() {
        let mut table = SymbolTable::new();
        table.define("b", Value::Int(1));
        table.define("a", Value::Int(2));
        assert_eq!(table.names(), vec!["a", "b"]);
    }
}
