//! Compiler for the varconf configuration language
//!
//! The compiler wires the pipeline together:
//! 1. Read the source text (file or stdin)
//! 2. Tokenize it
//! 3. Parse it into a document, resolving `^name` expressions on the way
//! 4. Emit the document in the requested output format

use std::io::Read;
use std::path::Path;

use crate::emitter::{emit, OutputFormat};
use crate::errors::{ConfError, ConfResult};
use crate::evaluator::Value;
use crate::lexer::Lexer;
use crate::parser::Parser;

/// Parse source text into a document
pub fn compile_source(source: &str) -> ConfResult<Value> {
    let cursor = Lexer::new(source).into_cursor()?;
    let mut parser = Parser::new(cursor, source);
    parser.parse()
}

/// Parse source text and emit it in `format`
pub fn compile_to_string(source: &str, format: OutputFormat) -> ConfResult<String> {
    let value = compile_source(source)?;
    emit(&value, format)
}

/// Read a file and parse it into a document
pub fn compile_file(path: impl AsRef<Path>) -> ConfResult<Value> {
    let source = read_source(path)?;
    compile_source(&source)
}

/// Read source text from a path; `-` reads standard input
pub fn read_source(path: impl AsRef<Path>) -> ConfResult<String> {
    let path = path.as_ref();

    if is_stdin(path) {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| ConfError::io_error(format!("failed to read stdin: {}", e)))?;
        return Ok(source);
    }

    std::fs::read_to_string(path)
        .map_err(|e| ConfError::io_error(format!("failed to read {}: {}", path.display(), e)))
}

/// Check if a path names standard input
pub fn is_stdin(path: &Path) -> bool {
    matches!(path.to_str(), Some("-") | Some("/dev/stdin"))
}
