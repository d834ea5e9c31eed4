//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that pulls tokens
//! from the lexer and builds the AST. It handles:
//!
//! - Statement parsing (declarations, assignments, print)
//! - Expression parsing with `*` `/` binding tighter than `+` `-`,
//!   all left-associative, and parentheses
//! - Reporting the first lexical or syntax error; there is no recovery
//!
//! Statement rules are registered in a lookup table keyed by the token
//! that starts them.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
