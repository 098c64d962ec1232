#![allow(clippy::module_inception)]

use std::{
    io::{self, Write},
    path::Path,
    rc::Rc,
};

use inkwell::context::Context;
use tracing::info;

use crate::{
    compiler::compiler::compile,
    errors::errors::{CompileError, EmissionError, Error, ErrorTip, ExecError},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Where `exec` writes the IR unless told otherwise.
pub const DEFAULT_OUTPUT_PATH: &str = "./output.ll";

/// Program compiled by the driver when no source file is given.
pub const DEMO_PROGRAM: &str = r#"(printf "I like number %d!! siu \n" 7)"#;

/// A byte offset into a named source.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Compiles `source`, prints the IR to stdout, then saves it to `output`.
pub fn exec(source: &str, file_name: &str, output: &Path) -> Result<(), ExecError> {
    let mut stream = io::stdout().lock();

    exec_to(source, file_name, &mut stream, output)
}

/// Compiles `source`, prints the IR and a blank line to `stream`, then
/// saves the IR to `output`.
///
/// Printing happens first and is not undone if saving fails.
pub fn exec_to<W: Write>(
    source: &str,
    file_name: &str,
    stream: &mut W,
    output: &Path,
) -> Result<(), ExecError> {
    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;
    let ast = parse(tokens, Rc::new(file_name.to_string()))?;

    let context = Context::create();
    let unit = compile(&ast, &context)?;

    unit.print(stream).map_err(CompileError::from)?;
    writeln!(stream).map_err(|error| CompileError::from(EmissionError::Stream(error)))?;
    unit.save(output).map_err(CompileError::from)?;

    info!(output = %output.display(), "compiled {}", file_name);
    Ok(())
}

/// Finds the line containing byte offset `position` in `content`.
///
/// Returns the 1-based line number, the line text and the offset within
/// the line. An offset at the very end of the content points just past the
/// last line.
pub fn get_line_at_position(content: &str, position: u32) -> (usize, String, usize) {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;
    let mut last = (1, String::new(), 0);

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        last = (line_number, line.to_string(), line.trim_end_matches('\n').len());
        start = end;
        line_number += 1;
    }

    last
}

pub fn display_error(error: &Error, source: &str) {
    /*
        Error: message
        -> program.cyl
           |
         1 | (printf "%d" 99999999999)
           | -------------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", position.1);
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\n\n\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(content, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(content, 24);
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_input() {
        let (line_number, line, line_pos) = super::get_line_at_position("(printf \"%d\"", 12);
        assert_eq!(line_number, 1);
        assert_eq!(line, "(printf \"%d\"");
        assert_eq!(line_pos, 12);
    }

    #[test]
    fn test_remove_starting_whitespace() {
        assert_eq!(
            super::remove_starting_whitespace("   (x)"),
            (String::from("(x)"), 3)
        );
    }
}
