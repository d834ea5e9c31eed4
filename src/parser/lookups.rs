use std::collections::HashMap;

use crate::{ast::ast::Stmt, errors::errors::Error, lexer::tokens::TokenKind};

use super::{parser::Parser, stmt::*};

pub type StmtHandler = fn(&mut Parser<'_>) -> Result<Stmt, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Statements
    parser.stmt(TokenKind::TyInt, parse_var_decl_stmt);
    parser.stmt(TokenKind::TyFloat, parse_var_decl_stmt);
    parser.stmt(TokenKind::Print, parse_print_stmt);
    parser.stmt(TokenKind::Identifier, parse_assignment_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
