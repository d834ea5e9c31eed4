use std::fmt::Display;

use serde::Serialize;

use crate::lexer::tokens::TokenKind;

/// The two primitive types of the language.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum LangType {
    Int,
    Float,
}

impl LangType {
    /// Whether a value of type `from` may be stored where `self` is expected.
    /// Only identity and Int to Float widening are allowed.
    pub fn accepts(&self, from: LangType) -> bool {
        *self == from || (*self == LangType::Float && from == LangType::Int)
    }

    /// Whether `text` is a literal of this type both targets can hold:
    /// a 64-bit integer, or a finite double.
    pub fn parses(&self, text: &str) -> bool {
        match self {
            LangType::Int => text.parse::<i64>().is_ok(),
            LangType::Float => text.parse::<f64>().is_ok_and(f64::is_finite),
        }
    }
}

impl Display for LangType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LangType::Int => write!(f, "int"),
            LangType::Float => write!(f, "float"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_token(kind: TokenKind) -> Option<Operator> {
        match kind {
            TokenKind::Plus => Some(Operator::Add),
            TokenKind::Dash => Some(Operator::Sub),
            TokenKind::Star => Some(Operator::Mul),
            TokenKind::Slash => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
