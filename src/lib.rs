#![allow(clippy::module_inception)]

use std::sync::Arc;

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
};

pub mod ast;
pub mod compiler;
pub mod driver;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod symbol_table;
pub mod type_checker;

extern crate regex;

pub use compiler::backend::{CompileOptions, Target};

/// Source line an error originated on, plus the file it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Arc<str>);

impl Position {
    /// For nodes built through the API, which carry no file.
    pub fn line_only(line: u32) -> Self {
        Position(line, Arc::from("<ast>"))
    }
}

/// Lexes and parses `source`.
pub fn parse_source(source: &str, file_name: Option<&str>) -> Result<Program, Error> {
    let program = parser::parser::parse(source, file_name)?;
    debug!(statements = program.body.len(), "parsed");
    Ok(program)
}

/// Parses and type checks `source`, returning the rewritten tree.
pub fn check_source(source: &str, file_name: Option<&str>) -> Result<Program, Error> {
    let mut program = parse_source(source, file_name)?;
    let conversions = type_checker::type_checker::type_check(&mut program, file_name)?;
    debug!(conversions, "type checked");
    Ok(program)
}

/// Runs the whole pipeline and returns the generated instruction text.
/// Stops at the first error of any stage.
pub fn compile(
    source: &str,
    file_name: Option<&str>,
    options: &CompileOptions,
) -> Result<String, Error> {
    let program = check_source(source, file_name)?;
    let output = compiler::compiler::compile(&program, file_name, options)?;
    debug!(backend = ?options.target, bytes = output.len(), "generated");
    Ok(output)
}

/// Returns the 1-based `line` of `source`, without its line terminator.
pub fn get_source_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }
    source
        .split('\n')
        .nth(line as usize - 1)
        .map(|text| text.trim_end_matches('\r'))
}

/// Renders a diagnostic for `error` against the source it came from.
pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: NarrowingConversion (`a` is `int` and a `float` ...)
        -> prog.dc
           |
         2 | int a = 2.5;
           |
        semantic error at line 2: cannot convert float to int for "a"
    */

    let position = error.get_position();
    let line_string = position.0.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = String::new();

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    rendered.push_str(&format!("-> {}\n", position.1));

    if let Some(line_text) = get_source_line(source, position.0) {
        rendered.push_str(&format!("{:>padding$}\n", "|"));
        rendered.push_str(&format!("{} | {}\n", line_string, line_text.trim()));
        rendered.push_str(&format!("{:>padding$}\n", "|"));
    }

    rendered.push_str(&error.to_string());
    rendered
}
