use serde::Serialize;

use crate::errors::errors::Error;

use super::{
    ast::{missing, Expr},
    types::LangType,
};

/// A name at a declaration, assignment or print site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub name: String,
    pub line: u32,
}

impl Identifier {
    pub fn new(name: impl Into<String>, line: u32) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(missing("Identifier", "name", line));
        }
        Ok(Identifier { name, line })
    }
}

/// Variable Declaration Statement
/// `int a;` or `float b = expr;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDeclStmt {
    pub identifier: Identifier,
    pub var_type: LangType,
    pub assigned_value: Option<Expr>,
    pub line: u32,
}

impl VarDeclStmt {
    pub fn new(
        identifier: Identifier,
        var_type: LangType,
        assigned_value: Option<Expr>,
        line: u32,
    ) -> Self {
        VarDeclStmt {
            identifier,
            var_type,
            assigned_value,
            line,
        }
    }
}

/// Assignment Statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentStmt {
    pub assignee: Identifier,
    pub value: Expr,
    pub line: u32,
}

impl AssignmentStmt {
    pub fn new(assignee: Identifier, value: Expr, line: u32) -> Self {
        AssignmentStmt {
            assignee,
            value,
            line,
        }
    }
}

/// Print Statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintStmt {
    pub identifier: Identifier,
    pub line: u32,
}

impl PrintStmt {
    pub fn new(identifier: Identifier, line: u32) -> Self {
        PrintStmt { identifier, line }
    }
}
