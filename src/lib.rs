// Rust 1.93+ triggers false positives on thiserror/miette derive macro fields
#![allow(unused_assignments)]

//! varconf Configuration Language
//!
//! A small declarative configuration language that compiles to YAML or JSON.
//! Variables are declared with `var`, dictionaries are written `@{ ... }`,
//! arrays `( ... )`, and `^name` reads a variable back, optionally combined
//! with one arithmetic operator.
//!
//! # Example
//!
//! ```text
//! var replicas = 3
//!
//! @{
//!     name = "api";
//!     ports = (80, 443);
//!     workers = ^replicas * 4
//! }
//! ```
//!
//! ```
//! let yaml = varconf::compile_to_string(
//!     "var base = 8000\n@{ port = ^base + 80 }",
//!     varconf::OutputFormat::Yaml,
//! )
//! .unwrap();
//! assert!(yaml.contains("port: 8080"));
//! ```

pub mod compiler;
pub mod emitter;
pub mod errors;
pub mod evaluator;
pub mod lexer;
pub mod parser;

pub use compiler::{compile_file, compile_source, compile_to_string, read_source};
pub use emitter::{emit, emit_with, EmitOptions, Emitter, JsonEmitter, OutputFormat, YamlEmitter};
pub use errors::{ConfError, ConfResult, ErrorKind};
pub use evaluator::{BinaryOp, SymbolTable, Value};
pub use lexer::token::{Token, TokenKind};
pub use lexer::{Lexer, TokenCursor};
pub use parser::Parser;
