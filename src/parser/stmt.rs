use crate::{
    ast::{
        ast::Stmt,
        statements::{AssignmentStmt, Identifier, PrintStmt, VarDeclStmt},
        types::LangType,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, parser::Parser};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    match handler {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected("expected a declaration, assignment or print statement")),
    }
}

fn parse_type(parser: &mut Parser) -> Result<LangType, Error> {
    match parser.current_token_kind() {
        TokenKind::TyInt => {
            parser.expect(TokenKind::TyInt)?;
            Ok(LangType::Int)
        }
        TokenKind::TyFloat => {
            parser.expect(TokenKind::TyFloat)?;
            Ok(LangType::Float)
        }
        _ => Err(parser.unexpected("expected `int` or `float`")),
    }
}

fn parse_identifier(parser: &mut Parser) -> Result<Identifier, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Identifier::new(token.text(), token.line)
}

// Decl -> ('int' | 'float') ID ('=' Expr)? ';'
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let var_type = parse_type(parser)?;
    let identifier = parse_identifier(parser)?;

    let assigned_value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.expect(TokenKind::Assignment)?;
        Some(parse_expr(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    let line = identifier.line;
    Ok(Stmt::VarDecl(VarDeclStmt::new(
        identifier,
        var_type,
        assigned_value,
        line,
    )))
}

// Print -> 'print' ID ';'
pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Print)?;
    let identifier = parse_identifier(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    let line = identifier.line;
    Ok(Stmt::Print(PrintStmt::new(identifier, line)))
}

// Assign -> ID '=' Expr ';'
pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let assignee = parse_identifier(parser)?;
    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    let line = assignee.line;
    Ok(Stmt::Assignment(AssignmentStmt::new(assignee, value, line)))
}
