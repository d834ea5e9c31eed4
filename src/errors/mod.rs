//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source position information
//! - The stage each error belongs to (lexical, syntax, semantic, internal)
//! - Helpful tips shown next to rendered diagnostics

pub mod errors;
