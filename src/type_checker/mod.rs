//! Type checking and semantic analysis module.
//!
//! This module walks the parsed AST once, bottom-up, and:
//!
//! - Rejects redeclarations in the same scope and uses of undeclared names
//! - Computes the type of every expression
//! - Inserts `Convert` nodes where an Int value meets a Float context
//! - Rejects every Float to Int narrowing
//!
//! The tree is rewritten in place; the first error aborts the pass.

pub mod type_checker;

#[cfg(test)]
mod tests;
