//! Source-like rendering of the tree. Binary operations are fully
//! parenthesised and conversions show as casts, so a type-checked tree
//! makes every inserted widening visible.

use std::fmt::{Display, Formatter, Result};

use super::{
    ast::{Expr, Program, Stmt},
    statements::Identifier,
};

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for stmt in &self.body {
            writeln!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.name)
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Stmt::VarDecl(decl) => {
                write!(f, "{} {}", decl.var_type, decl.identifier)?;
                if let Some(value) = &decl.assigned_value {
                    write!(f, " = {}", value)?;
                }
                write!(f, ";")
            }
            Stmt::Assignment(assign) => write!(f, "{} = {};", assign.assignee, assign.value),
            Stmt::Print(print) => write!(f, "print {};", print.identifier),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expr::Number(number) => write!(f, "{}", number.value),
            Expr::Symbol(symbol) => write!(f, "{}", symbol.value),
            Expr::Binary(binary) => {
                write!(f, "({} {} {})", binary.left, binary.operator, binary.right)
            }
            Expr::Convert(convert) => write!(f, "({}) {}", convert.target, convert.inner),
        }
    }
}
