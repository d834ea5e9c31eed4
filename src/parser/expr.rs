use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, NumberExpr, SymbolExpr},
        types::{LangType, Operator},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Folds `next (op next)*` into a left-leaning chain of binary nodes.
fn parse_left_assoc(
    parser: &mut Parser,
    operators: &[TokenKind],
    next: fn(&mut Parser) -> Result<Expr, Error>,
) -> Result<Expr, Error> {
    let mut left = next(parser)?;

    while parser.current_token().is_one_of_many(operators) {
        let kind = parser.current_token_kind();
        let operator_token = parser.expect(kind)?;
        let operator = match Operator::from_token(kind) {
            Some(operator) => operator,
            None => return Err(parser.unexpected("expected an operator")),
        };
        let right = next(parser)?;

        left = Expr::Binary(BinaryExpr::new(operator, left, right, operator_token.line));
    }

    Ok(left)
}

// Expr -> Term (('+' | '-') Term)*
pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_left_assoc(parser, &[TokenKind::Plus, TokenKind::Dash], parse_term)
}

// Term -> Factor (('*' | '/') Factor)*
pub fn parse_term(parser: &mut Parser) -> Result<Expr, Error> {
    parse_left_assoc(parser, &[TokenKind::Star, TokenKind::Slash], parse_factor)
}

// Factor -> INT | FLOAT | ID | '(' Expr ')'
pub fn parse_factor(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Int => {
            let token = parser.expect(TokenKind::Int)?;
            Ok(Expr::Number(NumberExpr::new(token.text(), LangType::Int, token.line)?))
        }
        TokenKind::Float => {
            let token = parser.expect(TokenKind::Float)?;
            Ok(Expr::Number(NumberExpr::new(token.text(), LangType::Float, token.line)?))
        }
        TokenKind::Identifier => {
            let token = parser.expect(TokenKind::Identifier)?;
            Ok(Expr::Symbol(SymbolExpr::new(token.text(), token.line)?))
        }
        TokenKind::OpenParen => {
            parser.expect(TokenKind::OpenParen)?;
            let expr = parse_expr(parser)?;
            parser.expect(TokenKind::CloseParen)?;
            Ok(expr)
        }
        _ => Err(parser.unexpected("expected a number, variable or `(`")),
    }
}
