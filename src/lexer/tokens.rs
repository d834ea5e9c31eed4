use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("int", TokenKind::TyInt);
        map.insert("float", TokenKind::TyFloat);
        map.insert("print", TokenKind::Print);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Int,
    Float,
    Identifier,

    OpenParen,
    CloseParen,
    Semicolon,

    Assignment, // =

    Plus,
    Dash,
    Star,
    Slash,

    // Reserved
    TyInt,
    TyFloat,
    Print,
}

/// Broad grouping of token kinds.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenCategory {
    Literal,
    Identifier,
    Keyword,
    Operator,
    Delimiter,
    EndOfInput,
}

impl TokenKind {
    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Int | TokenKind::Float => TokenCategory::Literal,
            TokenKind::Identifier => TokenCategory::Identifier,
            TokenKind::TyInt | TokenKind::TyFloat | TokenKind::Print => TokenCategory::Keyword,
            TokenKind::Assignment
            | TokenKind::Plus
            | TokenKind::Dash
            | TokenKind::Star
            | TokenKind::Slash => TokenCategory::Operator,
            TokenKind::OpenParen | TokenKind::CloseParen | TokenKind::Semicolon => {
                TokenCategory::Delimiter
            }
            TokenKind::EOF => TokenCategory::EndOfInput,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single lexeme. `value` is set for literals and identifiers only.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub value: Option<String>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "<{},r:{},{}>", self.kind, self.line, value),
            None => write!(f, "<{},r:{}>", self.kind, self.line),
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Lexeme text, empty for tokens that carry none.
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}
