use serde::Serialize;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    expressions::{BinaryExpr, ConvertExpr, NumberExpr, SymbolExpr},
    statements::{AssignmentStmt, PrintStmt, VarDeclStmt},
    types::LangType,
};

pub(crate) fn missing(node: &str, field: &str, line: u32) -> Error {
    Error::new(
        ErrorImpl::MissingNode {
            node: node.to_string(),
            field: field.to_string(),
        },
        Position::line_only(line),
    )
}

/// Root of the tree. Owns its statements in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub line: u32,
}

impl Program {
    pub fn new(line: u32) -> Self {
        Program { body: vec![], line }
    }

    pub fn push(&mut self, stmt: Stmt) {
        self.body.push(stmt);
    }

    /// Number of `Convert` nodes anywhere in the tree.
    pub fn count_conversions(&self) -> usize {
        self.body
            .iter()
            .map(|stmt| match stmt {
                Stmt::VarDecl(decl) => decl
                    .assigned_value
                    .as_ref()
                    .map_or(0, Expr::count_conversions),
                Stmt::Assignment(assign) => assign.value.count_conversions(),
                Stmt::Print(_) => 0,
            })
            .sum()
    }
}

/// Statement kinds. Closed, so every pass matches exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Assignment(AssignmentStmt),
    Print(PrintStmt),
}

impl Stmt {
    pub fn line(&self) -> u32 {
        match self {
            Stmt::VarDecl(stmt) => stmt.line,
            Stmt::Assignment(stmt) => stmt.line,
            Stmt::Print(stmt) => stmt.line,
        }
    }
}

/// Expression kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Number(NumberExpr),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Convert(ConvertExpr),
}

impl Expr {
    pub fn line(&self) -> u32 {
        match self {
            Expr::Number(expr) => expr.line,
            Expr::Symbol(expr) => expr.line,
            Expr::Binary(expr) => expr.line,
            Expr::Convert(expr) => expr.line,
        }
    }

    pub fn count_conversions(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Symbol(_) => 0,
            Expr::Binary(binary) => {
                binary.left.count_conversions() + binary.right.count_conversions()
            }
            Expr::Convert(convert) => 1 + convert.inner.count_conversions(),
        }
    }

    /// Replaces the expression held in `slot` with a `Convert` wrapping it.
    /// The old subtree is moved, not copied.
    pub fn wrap_in_convert(slot: &mut Expr, target: LangType) {
        let line = slot.line();
        let placeholder = Expr::Symbol(SymbolExpr {
            value: String::new(),
            line,
        });
        let inner = std::mem::replace(slot, placeholder);
        *slot = Expr::Convert(ConvertExpr {
            inner: Box::new(inner),
            target,
            line,
        });
    }
}
