//! JSON emitter for varconf values

use serde::Serialize;

use super::Emitter;
use crate::errors::{ConfError, ConfResult};
use crate::evaluator::Value;

/// JSON output emitter
#[derive(Debug, Clone)]
pub struct JsonEmitter {
    /// Whether to pretty-print with indentation
    pretty: bool,
    /// Indentation string (spaces or tabs)
    indent: String,
}

impl JsonEmitter {
    /// Create a new JSON emitter
    pub fn new(pretty: bool) -> Self {
        Self {
            pretty,
            indent: "  ".to_string(),
        }
    }

    /// Create a pretty JSON emitter with custom indentation
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            pretty: true,
            indent: indent.into(),
        }
    }
}

impl Emitter for JsonEmitter {
    fn emit(&self, value: &Value) -> ConfResult<String> {
        let mut out = Vec::new();
        let result = if self.pretty {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(self.indent.as_bytes());
            let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
            value.serialize(&mut ser)
        } else {
            let mut ser = serde_json::Serializer::new(&mut out);
            value.serialize(&mut ser)
        };
        result.map_err(|e| ConfError::io_error(format!("failed to serialize JSON: {}", e)))?;

        String::from_utf8(out)
            .map_err(|e| ConfError::io_error(format!("failed to serialize JSON: {}", e)))
    }
}
