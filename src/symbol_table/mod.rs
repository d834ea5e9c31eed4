//! Scoped symbol tables.
//!
//! Both the type checker and the code generator keep one of these. The
//! type checker only fills in types; slots are bound during code
//! generation, so the two passes never share a table.

pub mod symbol_table;

#[cfg(test)]
mod tests;
