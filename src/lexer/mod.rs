//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer that converts source text into tokens
//! for the parser. It handles:
//!
//! - Whitespace skipping and line tracking
//! - Integer and float literals (floats carry 1 to 5 fractional digits)
//! - Identifiers and the reserved words `int`, `float` and `print`
//! - Single-character operators and delimiters

pub mod lexer;
pub mod tokens;
