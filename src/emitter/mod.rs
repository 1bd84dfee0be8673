//! Emitters for varconf documents
//!
//! Converts parsed Value trees to YAML or JSON. Both keep mapping keys in
//! insertion order and sequence elements in source order.

mod json;
mod yaml;

pub use json::JsonEmitter;
pub use yaml::YamlEmitter;

use crate::errors::ConfResult;
use crate::evaluator::Value;

/// Output format for emission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    JsonPretty,
}

impl OutputFormat {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            _ => None,
        }
    }

    /// Pick a format from an output file extension; unknown extensions mean YAML
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext.map(str::to_lowercase).as_deref() {
            Some("json") => OutputFormat::JsonPretty,
            _ => OutputFormat::Yaml,
        }
    }
}

/// Trait for output emitters
pub trait Emitter {
    /// Emit a value to string
    fn emit(&self, value: &Value) -> ConfResult<String>;
}

/// Emitter settings beyond the output format
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Spaces per JSON indentation level; implies pretty JSON
    pub indent: Option<usize>,
    /// Start YAML output with a `---` marker
    pub document_start: bool,
}

/// Emit a value to a string in the specified format
pub fn emit(value: &Value, format: OutputFormat) -> ConfResult<String> {
    emit_with(value, format, &EmitOptions::default())
}

/// Emit a value with explicit emitter settings
pub fn emit_with(
    value: &Value,
    format: OutputFormat,
    options: &EmitOptions,
) -> ConfResult<String> {
    match (format, options.indent) {
        (OutputFormat::Yaml, _) => {
            YamlEmitter::with_document_start(options.document_start).emit(value)
        }
        (OutputFormat::Json | OutputFormat::JsonPretty, Some(width)) => {
            JsonEmitter::with_indent(" ".repeat(width)).emit(value)
        }
        (OutputFormat::Json, None) => JsonEmitter::new(false).emit(value),
        (OutputFormat::JsonPretty, None) => JsonEmitter::new(true).emit(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn obj(pairs: &[(&str, Value)]) -> Value {
        let mut map = IndexMap::new();
        for (k, v) in pairs {
            map.insert(k.to_string(), v.clone());
        }
        Value::Object(map)
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::parse("yaml"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::parse("YML"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(
            OutputFormat::parse("json-pretty"),
            Some(OutputFormat::JsonPretty)
        );
        assert_eq!(OutputFormat::parse("toml"), None);
        assert_eq!(OutputFormat::default(), OutputFormat::Yaml);
    }

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(OutputFormat::from_extension(Some("json")), OutputFormat::JsonPretty);
        assert_eq!(OutputFormat::from_extension(Some("JSON")), OutputFormat::JsonPretty);
        assert_eq!(OutputFormat::from_extension(Some("yaml")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_extension(Some("txt")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_extension(None), OutputFormat::Yaml);
    }

    #[test]
    fn test_emit_json() {
        let value = obj(&[("name", Value::String("test".into()))]);
        assert_eq!(emit(&value, OutputFormat::Json).unwrap(), r#"{"name":"test"}"#);
    }

    #[test]
    fn test_emit_yaml() {
        let value = obj(&[("name", Value::String("test".into()))]);
        let yaml = emit(&value, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("name: test"));
    }

    #[test]
    fn test_emit_with_indent() {
        let value = obj(&[("a", Value::from(vec![1i64]))]);
        let options = EmitOptions {
            indent: Some(4),
            ..Default::default()
        };
        assert_eq!(
            emit_with(&value, OutputFormat::Json, &options).unwrap(),
            "{\n    \"a\": [\n        1\n    ]\n}"
        );
        // Indentation does not apply to YAML
        assert_eq!(emit_with(&value, OutputFormat::Yaml, &options).unwrap(), "a:\n- 1\n");
    }

    #[test]
    fn test_emit_with_document_start() {
        let value = obj(&[("x", Value::Int(1))]);
        let options = EmitOptions {
            document_start: true,
            ..Default::default()
        };
        assert_eq!(emit_with(&value, OutputFormat::Yaml, &options).unwrap(), "---\nx: 1\n");
        assert_eq!(emit_with(&value, OutputFormat::Json, &options).unwrap(), r#"{"x":1}"#);
    }
}
