//! Integration tests for end-to-end compilation.
//!
//! These tests drive the whole pipeline from Cylli source through
//! tokenization, parsing, LLVM IR generation and emission.

use std::{fs, path::PathBuf, rc::Rc};

use cylli::{
    ast::ast::Expr,
    compiler::compiler::compile,
    errors::errors::{CompileError, EmissionError, ExecError, GenerationError},
    exec_to,
    lexer::lexer::tokenize,
    parser::parser::parse,
    DEMO_PROGRAM,
};
use inkwell::context::Context;
use pretty_assertions::assert_eq;

fn output_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("cylli_tests");
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn compile_source(source: &str, name: &str) -> Result<(String, String), ExecError> {
    let output = output_path(name);
    let mut stream = Vec::new();

    exec_to(source, "test.cyl", &mut stream, &output)?;

    let printed = String::from_utf8(stream).unwrap();
    let saved = fs::read_to_string(&output).unwrap();
    Ok((printed, saved))
}

#[test]
fn test_compile_printf_program() {
    let (printed, _) =
        compile_source("(printf \"I like number %d!! \\n\" 7)", "printf.ll").unwrap();

    assert!(printed.contains("declare i32 @printf(i8*, ...)"));
    assert!(printed.contains("c\"I like number %d!! \\0A\\00\""));
    assert!(printed.contains("define i32 @main()"));

    let body: Vec<&str> = printed
        .lines()
        .skip_while(|line| !line.starts_with("entry:"))
        .skip(1)
        .take_while(|line| !line.starts_with('}'))
        .map(str::trim)
        .collect();

    assert_eq!(body.len(), 2);
    assert!(body[0].contains("call i32 (i8*, ...) @printf("));
    assert!(body[0].ends_with("@0, i32 0, i32 0), i32 7)"));
    assert_eq!(body[1], "ret i32 0");
}

#[test]
fn test_printed_and_saved_text_match() {
    let (printed, saved) = compile_source(DEMO_PROGRAM, "demo.ll").unwrap();

    assert_eq!(printed, format!("{}\n", saved));
}

#[test]
fn test_compilation_is_deterministic() {
    let source = "(printf \"%s and %s\\n\" \"one\" \"two\")";

    let (first, _) = compile_source(source, "first.ll").unwrap();
    let (second, _) = compile_source(source, "second.ll").unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_save_overwrites_existing_file() {
    let output = output_path("overwrite.ll");
    fs::write(&output, "stale contents that are much longer than nothing at all").unwrap();

    let (_, saved) = compile_source("(printf \"x\")", "overwrite.ll").unwrap();

    assert!(!saved.contains("stale"));
    assert!(saved.starts_with("; ModuleID = 'CylliLLVM'"));
}

#[test]
fn test_save_failure_is_reported_after_printing() {
    let output = output_path("missing_dir").join("nested").join("out.ll");
    let mut stream = Vec::new();

    let result = exec_to("(printf \"x\")", "test.cyl", &mut stream, &output);

    assert!(matches!(
        result,
        Err(ExecError::Compile(CompileError::Emission(EmissionError::Io { .. })))
    ));
    let (_, saved) = compile_source("(printf \"x\")", "before_failure.ll").unwrap();
    assert_eq!(String::from_utf8(stream).unwrap(), format!("{}\n", saved));
}

#[test]
fn test_printf_format_must_be_a_string() {
    let result = compile_source("(printf 7)", "number_format.ll");

    match result {
        Err(ExecError::Compile(CompileError::Generation(
            GenerationError::ArgumentTypeMismatch { index, node, .. },
        ))) => {
            assert_eq!(index, 0);
            assert_eq!(node, "7");
        }
        other => panic!("Expected argument type mismatch, got {:?}", other),
    }
    assert!(!output_path("number_format.ll").exists());
}

#[test]
fn test_module_has_no_function_attributes() {
    let (printed, _) = compile_source(DEMO_PROGRAM, "attributes.ll").unwrap();

    assert!(!printed.contains("uwtable"));
    assert!(!printed.contains("nounwind"));
}

#[test]
fn test_syntax_error_is_reported() {
    let result = compile_source("(printf \"%d\" 7", "unclosed.ll");

    match result {
        Err(ExecError::Syntax(error)) => assert_eq!(error.get_error_name(), "UnexpectedEof"),
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_unknown_operator_is_reported() {
    let result = compile_source("(unknown-op)", "unknown.ll");

    match result {
        Err(ExecError::Compile(CompileError::Generation(GenerationError::UnknownOperator {
            name,
            ..
        }))) => assert_eq!(name, "unknown-op"),
        other => panic!("Expected unknown operator, got {:?}", other),
    }
}

#[test]
fn test_empty_list_is_reported() {
    let result = compile_source("()", "empty.ll");

    assert!(matches!(
        result,
        Err(ExecError::Compile(CompileError::Generation(
            GenerationError::EmptyList
        )))
    ));
}

#[test]
fn test_symbol_is_reported() {
    let result = compile_source("(printf \"%d\" x)", "symbol.ll");

    assert!(matches!(
        result,
        Err(ExecError::Compile(CompileError::Generation(
            GenerationError::UnresolvedSymbol { .. }
        )))
    ));
}

#[test]
fn test_parse_then_compile_matches_direct_tree() {
    let source = "(printf \"%d\\n\" -5)";
    let tokens = tokenize(source.to_string(), Some("test.cyl".to_string())).unwrap();
    let parsed = parse(tokens, Rc::new("test.cyl".to_string())).unwrap();

    let direct = Expr::List(vec![
        Expr::Symbol("printf".to_string()),
        Expr::String("%d\\n".to_string()),
        Expr::Number(-5),
    ]);
    assert_eq!(parsed, direct);

    let context = Context::create();
    let from_source = compile(&parsed, &context).unwrap();
    let other_context = Context::create();
    let from_tree = compile(&direct, &other_context).unwrap();

    assert_eq!(
        from_source.module.print_to_string().to_string(),
        from_tree.module.print_to_string().to_string()
    );
    assert!(from_source.module.verify().is_ok());
    assert!(from_source
        .module
        .print_to_string()
        .to_string()
        .contains("i32 -5)"));
}
