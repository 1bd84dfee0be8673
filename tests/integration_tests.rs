//! Integration tests for the varconf compiler
//!
//! These tests verify the complete pipeline from source to output.

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use varconf::{emit, ConfError, ErrorKind, Lexer, OutputFormat, Parser, Value};

/// Helper to lex and parse source into a document
fn compile(source: &str) -> Result<Value, ConfError> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize()?;

    let mut parser = Parser::new(tokens, source);
    parser.parse()
}

/// Helper to compile source to YAML
fn compile_to_yaml(source: &str) -> Result<String, ConfError> {
    emit(&compile(source)?, OutputFormat::Yaml)
}

/// Helper to compile source to compact JSON
fn compile_to_json(source: &str) -> Result<String, ConfError> {
    emit(&compile(source)?, OutputFormat::Json)
}

fn obj(pairs: &[(&str, Value)]) -> Value {
    let mut map = IndexMap::new();
    for (k, v) in pairs {
        map.insert(k.to_string(), v.clone());
    }
    Value::Object(map)
}

#[test]
fn test_single_dictionary() {
    let source = r#"
@{
    name = "my-app";
    port = 8080;
    debug = false
}
"#;
    let json = compile_to_json(source).unwrap();
    assert_eq!(json, r#"{"name":"my-app","port":8080,"debug":false}"#);
}

#[test]
fn test_nested_round_trip() {
    let value = compile("@{ a = (1, 2, 3); b = @{ c = true } }").unwrap();
    assert_eq!(
        value,
        obj(&[
            ("a", Value::from(vec![1i64, 2, 3])),
            ("b", obj(&[("c", Value::Bool(true))])),
        ])
    );

    let yaml = compile_to_yaml("@{ a = (1, 2, 3); b = @{ c = true } }").unwrap();
    assert_eq!(yaml, "a:\n- 1\n- 2\n- 3\nb:\n  c: true\n");
}

#[test]
fn test_declaration_then_lookup() {
    for literal in ["42", "\"text\"", "true", "(1, 2)", "@{ k = 1 }"] {
        let source = format!("var x = {}\nvar y = ^x", literal);
        let value = compile(&source).unwrap();
        let statements = value.as_array().unwrap();

        let declared = statements[0].get_path(&["x"]).unwrap();
        assert_eq!(statements[1].get_path(&["y"]), Some(declared));
    }
}

#[test]
fn test_division_quotients() {
    for (a, b) in [(10i64, 2i64), (7, 2), (1, 3), (100, 7), (9, 9)] {
        let source = format!("var x = {}\n@{{ q = ^x / {} }}", a, b);
        let value = compile(&source).unwrap();
        assert_eq!(value.get_path(&["1", "q"]), Some(&Value::Int(a / b)));
    }
}

#[test]
fn test_division_by_zero_is_semantic() {
    let err = compile("var x = 5\n@{ q = ^x / 0 }").unwrap_err();
    assert!(matches!(err, ConfError::DivisionByZero { .. }));
    assert_eq!(err.kind(), ErrorKind::Semantic);
}

#[test]
fn test_undeclared_variable() {
    let err = compile("@{ a = ^y }").unwrap_err();
    assert!(matches!(err, ConfError::UndefinedVariable { ref name, .. } if name == "y"));
    assert_eq!(err.kind(), ErrorKind::Semantic);
}

#[test]
fn test_missing_closing_brace() {
    let err = compile("@{ a = 1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(
        err.message(),
        "unexpected token: expected DICT_END, found end of input"
    );
}

#[test]
fn test_unrecognized_character() {
    let err = compile("@{ a = $ }").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lexical);
    assert_eq!(err.message(), "unexpected character '$' at offset 7");
}

#[test]
fn test_two_statements_are_not_merged() {
    let value = compile("var a = 1\nvar b = 2").unwrap();
    assert_eq!(
        value,
        Value::Array(vec![
            obj(&[("a", Value::Int(1))]),
            obj(&[("b", Value::Int(2))]),
        ])
    );
    assert_eq!(compile_to_yaml("var a = 1; var b = 2").unwrap(), "- a: 1\n- b: 2\n");
}

#[test]
fn test_full_config() {
    let source = r#"
var env = "prod"
var base_port = 8000
var replicas = 3

@{
    service = @{
        name = ^env + "-api";
        port = ^base_port + 80;
        workers = ^replicas * 4;
        hosts = ("a.example.com", "b.example.com")
    };
    flags = (true, false);
    limits = @{ memory = 512; cpu = 2 }
}
"#;
    let value = compile(source).unwrap();
    let config = &value.as_array().unwrap()[3];
    let service = |key: &str| config.get_path(&["service", key]).unwrap();

    assert_eq!(service("name").as_str(), Some("prod-api"));
    assert_eq!(service("port").as_int(), Some(8080));
    assert_eq!(service("workers").as_int(), Some(12));
    assert_eq!(
        config.get_path(&["service", "hosts", "1"]).and_then(Value::as_str),
        Some("b.example.com")
    );
    assert_eq!(
        config.get_path(&["flags", "0"]).and_then(Value::as_bool),
        Some(true)
    );
    assert_eq!(service("port").as_str(), None);
    assert_eq!(service("name").as_bool(), None);

    let json = compile_to_json(source).unwrap();
    assert!(json.starts_with(r#"[{"env":"prod"},{"base_port":8000},{"replicas":3},"#));
    assert!(json.contains(r#""limits":{"memory":512,"cpu":2}"#));
}

#[test]
fn test_array_concatenation() {
    let value = compile("var xs = (1, 2)\nvar ys = ^xs + (3)").unwrap();
    assert_eq!(
        value.get_path(&["1", "ys"]),
        Some(&Value::from(vec![1i64, 2, 3]))
    );
}

#[test]
fn test_mismatched_operands() {
    for source in [
        "var a = 1\nvar b = ^a + \"x\"",
        "var a = true\nvar b = ^a * 2",
        "var a = (1)\nvar b = ^a - (1)",
        "var a = @{ k = 1 }\nvar b = ^a + @{ j = 2 }",
    ] {
        let err = compile(source).unwrap_err();
        assert!(
            matches!(err, ConfError::TypeMismatch { .. }),
            "{}: {:?}",
            source,
            err
        );
    }
}

#[test]
fn test_overflow_is_reported() {
    let err = compile("var a = 9223372036854775807\nvar b = ^a + 1").unwrap_err();
    assert!(matches!(err, ConfError::ArithmeticOverflow { .. }));
}

#[test]
fn test_parser_keeps_declared_symbols() {
    let source = "var host = \"db\"\nvar port = 5432\n@{ url = ^host }";
    let tokens = Lexer::new(source).tokenize().unwrap();
    let mut parser = Parser::new(tokens, source);
    assert!(parser.symbols().is_empty());

    parser.parse().unwrap();
    let symbols = parser.symbols();
    assert_eq!(symbols.len(), 2);
    assert_eq!(symbols.names(), vec!["host", "port"]);
    assert_eq!(symbols.get("port").and_then(Value::as_int), Some(5432));
    assert_eq!(symbols.get("url"), None);
}

#[test]
fn test_independent_parses_do_not_share_symbols() {
    compile("var shared = 1").unwrap();
    let err = compile("var other = ^shared").unwrap_err();
    assert!(matches!(err, ConfError::UndefinedVariable { .. }));
}

#[test]
fn test_parses_on_separate_threads() {
    let handles: Vec<_> = (0..4i64)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("var n = {}\nvar m = ^n * 10", i);
                compile(&source).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let value = handle.join().unwrap();
        assert_eq!(value.get_path(&["1", "m"]), Some(&Value::Int(i as i64 * 10)));
    }
}

#[test]
fn test_error_renders_with_miette() {
    let err = compile("@{ a = 1").unwrap_err();
    let report = format!("{:?}", miette::Report::new(err));
    assert!(report.contains("E0101"), "report: {}", report);
    assert!(report.contains("DICT_END"), "report: {}", report);
}
