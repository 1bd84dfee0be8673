//! YAML emitter for varconf values

use super::Emitter;
use crate::errors::{ConfError, ConfResult};
use crate::evaluator::Value;

/// YAML output emitter (block style)
#[derive(Debug, Clone, Default)]
pub struct YamlEmitter {
    /// Prefix the output with an explicit `---` document marker
    document_start: bool,
}

impl YamlEmitter {
    /// Create a new YAML emitter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a YAML emitter that starts its output with `---`
    pub fn with_document_start(document_start: bool) -> Self {
        Self { document_start }
    }
}

impl Emitter for YamlEmitter {
    fn emit(&self, value: &Value) -> ConfResult<String> {
        let body = serde_yaml::to_string(value)
            .map_err(|e| ConfError::io_error(format!("failed to serialize YAML: {}", e)))?;
        if self.document_start {
            Ok(format!("---\n{}", body))
        } else {
            Ok(body)
        }
    }
}
