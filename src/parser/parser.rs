//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser is recursive descent with one token of lookahead pulled from
//! the lexer on demand. Statements are dispatched through a lookup table
//! keyed by the leading token; expressions use one function per grammar
//! level (expression, term, factor).

use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{create_token_lookups, StmtHandler, StmtLookup},
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// It owns the lexer and the current lookahead token. `expect` is the only
/// method that consumes input; there is no backtracking and no recovery,
/// the first error aborts the parse.
pub struct Parser<'a> {
    /// Token source
    lexer: Lexer<'a>,
    /// One-token lookahead
    current: Token,
    /// The name of the source file being parsed
    file: Arc<str>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser instance and reads the first lookahead token.
    ///
    /// # Arguments
    ///
    /// * `lexer` - The token source
    ///
    /// # Returns
    ///
    /// The parser, or the lexical error raised by the first token.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, Error> {
        let current = lexer.next_token()?;
        let file = lexer.file();

        let mut parser = Parser {
            lexer,
            current,
            file,
            stmt_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        Ok(parser)
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Consumes the current token if it is of the expected kind.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    ///
    /// # Returns
    ///
    /// The consumed token, or an `UnexpectedToken` error carrying both the
    /// expected and the found kind. A lexical error while fetching the
    /// next lookahead is propagated as is.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: self.current.kind,
                },
                self.get_position(),
            ));
        }

        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a statement handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind that starts the statement
    /// * `stmt_fn` - The handler function for this statement type
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        Position(self.current.line, Arc::clone(&self.file))
    }

    /// Error for a token that no rule at this point can start with.
    pub fn unexpected(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                found: self.current.kind,
                message: message.to_string(),
            },
            self.get_position(),
        )
    }

    /// Parses `Program -> (Decl | Assign | Print)* EOF`.
    pub fn parse_program(&mut self) -> Result<Program, Error> {
        let mut program = Program::new(self.current.line);

        while self.has_tokens() {
            program.push(parse_stmt(self)?);
        }
        self.expect(TokenKind::EOF)?;

        debug!(statements = program.body.len(), file = %self.file, "parsed program");
        Ok(program)
    }
}

/// Parses source text into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a lexer and a
/// parser over the source and parses statements until EOF.
///
/// # Arguments
///
/// * `source` - The program text
/// * `file` - Optional file name used in error positions
///
/// # Returns
///
/// The root `Program`, or the first lexical or syntax error.
pub fn parse(source: &str, file: Option<&str>) -> Result<Program, Error> {
    let mut parser = Parser::new(Lexer::new(source, file))?;
    parser.parse_program()
}
