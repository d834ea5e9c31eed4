/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program root and the closed `Stmt` / `Expr` sums
/// - expressions: Expression node structs
/// - statements: Statement node structs and the declaration-site `Identifier`
/// - types: `LangType` and `Operator`
/// - display: Source-like rendering
pub mod ast;
pub mod display;
pub mod expressions;
pub mod statements;
pub mod types;
