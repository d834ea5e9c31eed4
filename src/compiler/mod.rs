//! Code generation module for the compiler.
//!
//! A single post-order walk over the type-checked tree (`Compiler`) that
//! binds a slot to every declaration and drives a `Backend`:
//!
//! - `dc`: text for the `dc` stack calculator, one register per variable
//! - `bytecode`: typed instructions for the built-in stack machine
//! - `vm`: the interpreter that runs bytecode programs

pub mod backend;
pub mod bytecode;
pub mod compiler;
pub mod dc;
pub mod expr;
pub mod stmt;
pub mod vm;

#[cfg(test)]
mod tests;
