use serde::Serialize;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    ast::{missing, Expr},
    types::{LangType, Operator},
};

// LITERALS

/// Number Expression
/// A numeric literal, kept as its raw lexeme so codegen can re-encode it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberExpr {
    pub value: String,
    pub ty: LangType,
    pub line: u32,
}

impl NumberExpr {
    pub fn new(value: impl Into<String>, ty: LangType, line: u32) -> Result<Self, Error> {
        let value = value.into();
        if value.is_empty() || value == "-" {
            return Err(missing("NumberExpr", "value", line));
        }
        if !ty.parses(&value) {
            return Err(Error::new(
                ErrorImpl::InvalidLiteral {
                    literal: value,
                    ty: ty.to_string(),
                },
                Position::line_only(line),
            ));
        }
        Ok(NumberExpr { value, ty, line })
    }

    pub fn is_negative(&self) -> bool {
        self.value.starts_with('-')
    }
}

/// Symbol Expression
/// A variable read. Distinct from the `Identifier` naming a declaration
/// or assignment target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolExpr {
    pub value: String,
    pub line: u32,
}

impl SymbolExpr {
    pub fn new(value: impl Into<String>, line: u32) -> Result<Self, Error> {
        let value = value.into();
        if value.is_empty() {
            return Err(missing("SymbolExpr", "name", line));
        }
        Ok(SymbolExpr { value, line })
    }
}

// COMPOUND

/// Binary Expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Operator,
    pub right: Box<Expr>,
    pub line: u32,
}

impl BinaryExpr {
    pub fn new(operator: Operator, left: Expr, right: Expr, line: u32) -> Self {
        BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            line,
        }
    }
}

/// Convert Expression
/// Implicit widening inserted by the type checker. The parser never
/// produces one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertExpr {
    pub inner: Box<Expr>,
    pub target: LangType,
    pub line: u32,
}
