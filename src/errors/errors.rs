use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// The compilation stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    Lexical,
    Syntactic,
    Semantic,
    /// Broken invariants: malformed nodes built through the API, or codegen
    /// finding something the type checker should have rejected.
    Internal,
}

impl Display for ErrorStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorStage::Lexical => write!(f, "lexical"),
            ErrorStage::Syntactic => write!(f, "syntax"),
            ErrorStage::Semantic => write!(f, "semantic"),
            ErrorStage::Internal => write!(f, "internal"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_line(&self) -> u32 {
        self.position.0
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_stage(&self) -> ErrorStage {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } | ErrorImpl::MalformedNumber { .. } => {
                ErrorStage::Lexical
            }
            ErrorImpl::UnexpectedToken { .. } | ErrorImpl::UnexpectedTokenDetailed { .. } => {
                ErrorStage::Syntactic
            }
            ErrorImpl::VariableAlreadyDeclared { .. }
            | ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::NarrowingConversion { .. } => ErrorStage::Semantic,
            ErrorImpl::MissingNode { .. }
            | ErrorImpl::InvalidLiteral { .. }
            | ErrorImpl::UnboundSymbol { .. }
            | ErrorImpl::UncheckedTypeMismatch { .. } => ErrorStage::Internal,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::NarrowingConversion { .. } => "NarrowingConversion",
            ErrorImpl::MissingNode { .. } => "MissingNode",
            ErrorImpl::InvalidLiteral { .. } => "InvalidLiteral",
            ErrorImpl::UnboundSymbol { .. } => "UnboundSymbol",
            ErrorImpl::UncheckedTypeMismatch { .. } => "UncheckedTypeMismatch",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => ErrorTip::None,
            ErrorImpl::MalformedNumber { .. } => ErrorTip::Suggestion(String::from(
                "Integers must fit in 64 bits and floats need 1 to 5 digits after the point",
            )),
            ErrorImpl::UnexpectedToken { expected, found } => {
                if *expected == TokenKind::Semicolon {
                    ErrorTip::Suggestion(format!(
                        "Expected `{}`, found `{}`, did you miss a semicolon?",
                        expected, found
                    ))
                } else {
                    ErrorTip::Suggestion(format!("Expected `{}`, found `{}`", expected, found))
                }
            }
            ErrorImpl::UnexpectedTokenDetailed { found, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", found, message))
            }
            ErrorImpl::VariableAlreadyDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` already declared in this scope",
                variable
            )),
            ErrorImpl::VariableNotDeclared { variable } => ErrorTip::Suggestion(format!(
                "Declare `{}` with `int` or `float` before using it",
                variable
            )),
            ErrorImpl::NarrowingConversion {
                variable,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` is `{}` and a `{}` value cannot be narrowed into it",
                variable, expected, received
            )),
            ErrorImpl::UncheckedTypeMismatch { .. } => {
                ErrorTip::Suggestion(String::from("Run the type checker before generating code"))
            }
            ErrorImpl::MissingNode { .. }
            | ErrorImpl::InvalidLiteral { .. }
            | ErrorImpl::UnboundSymbol { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} error at line {}: {}",
            self.get_stage(),
            self.position.0,
            self.internal_error
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised character {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("malformed number {token:?}: {message}")]
    MalformedNumber { token: String, message: String },
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    #[error("unexpected {found} ({message})")]
    UnexpectedTokenDetailed { found: TokenKind, message: String },
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("cannot convert {received} to {expected} for {variable:?}")]
    NarrowingConversion {
        variable: String,
        expected: String,
        received: String,
    },
    #[error("{node} node is missing its {field}")]
    MissingNode { node: String, field: String },
    #[error("{literal:?} is not a valid {ty} literal")]
    InvalidLiteral { literal: String, ty: String },
    #[error("no storage slot bound for {variable:?}")]
    UnboundSymbol { variable: String },
    #[error("{context}: {left} does not match {right}")]
    UncheckedTypeMismatch {
        context: String,
        left: String,
        right: String,
    },
}
