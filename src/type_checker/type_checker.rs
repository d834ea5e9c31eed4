use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        statements::Identifier,
        types::LangType,
    },
    errors::errors::{Error, ErrorImpl},
    symbol_table::symbol_table::{Symbol, SymbolTable},
    Position,
};

/// Semantic pass. Validates declarations and uses, computes expression
/// types bottom-up and rewrites the tree in place, wrapping every Int
/// subtree that meets a Float context in a `Convert`.
#[derive(Debug)]
pub struct TypeChecker {
    pub scopes: SymbolTable,
    file: Arc<str>,
    conversions: usize,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TypeChecker {
    pub fn new(file: Option<&str>) -> Self {
        TypeChecker {
            scopes: SymbolTable::new(),
            file: Arc::from(file.unwrap_or("shell")),
            conversions: 0,
        }
    }

    /// Number of `Convert` nodes this checker has inserted so far.
    pub fn conversions_inserted(&self) -> usize {
        self.conversions
    }

    fn position(&self, line: u32) -> Position {
        Position(line, Arc::clone(&self.file))
    }

    fn widen(&mut self, slot: &mut Expr, target: LangType) {
        trace!(line = slot.line(), to = %target, "inserting conversion");
        Expr::wrap_in_convert(slot, target);
        self.conversions += 1;
    }

    /// Checks a value of type `received` flowing into `target` of type
    /// `expected`. Widens Int into Float, rejects everything else that
    /// differs.
    fn coerce(
        &mut self,
        value: &mut Expr,
        received: LangType,
        expected: LangType,
        target: &Identifier,
    ) -> Result<(), Error> {
        if received == expected {
            Ok(())
        } else if expected.accepts(received) {
            self.widen(value, expected);
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::NarrowingConversion {
                    variable: target.name.clone(),
                    expected: expected.to_string(),
                    received: received.to_string(),
                },
                self.position(target.line),
            ))
        }
    }

    pub fn check_program(&mut self, program: &mut Program) -> Result<(), Error> {
        for stmt in program.body.iter_mut() {
            self.check_stmt(stmt)?;
        }

        debug!(
            statements = program.body.len(),
            conversions = self.conversions,
            "type checked program"
        );
        Ok(())
    }

    pub fn check_stmt(&mut self, stmt: &mut Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::VarDecl(decl) => {
                let position = self.position(decl.identifier.line);
                self.scopes
                    .declare(&decl.identifier.name, Symbol::new(decl.var_type), position)?;

                if let Some(value) = decl.assigned_value.as_mut() {
                    let received = self.check_expr(value)?;
                    self.coerce(value, received, decl.var_type, &decl.identifier)?;
                }
                Ok(())
            }
            Stmt::Assignment(assign) => {
                let expected = self
                    .scopes
                    .fetch(&assign.assignee.name, self.position(assign.assignee.line))?
                    .ty;

                let received = self.check_expr(&mut assign.value)?;
                self.coerce(&mut assign.value, received, expected, &assign.assignee)
            }
            Stmt::Print(print) => {
                self.scopes
                    .fetch(&print.identifier.name, self.position(print.identifier.line))?;
                Ok(())
            }
        }
    }

    /// Returns the type of `expr`, rewriting its children where needed.
    pub fn check_expr(&mut self, expr: &mut Expr) -> Result<LangType, Error> {
        match expr {
            Expr::Number(number) => Ok(number.ty),
            Expr::Symbol(symbol) => Ok(self
                .scopes
                .fetch(&symbol.value, self.position(symbol.line))?
                .ty),
            Expr::Binary(binary) => {
                let left = self.check_expr(&mut binary.left)?;
                let right = self.check_expr(&mut binary.right)?;

                if left == LangType::Int && right == LangType::Int {
                    return Ok(LangType::Int);
                }

                if left == LangType::Int {
                    self.widen(&mut binary.left, LangType::Float);
                }
                if right == LangType::Int {
                    self.widen(&mut binary.right, LangType::Float);
                }
                Ok(LangType::Float)
            }
            // Already rewritten: names inside still have to resolve, but
            // the inner type is not re-validated.
            Expr::Convert(convert) => {
                self.check_expr(&mut convert.inner)?;
                Ok(convert.target)
            }
        }
    }
}

/// Type checks `program` in place with a fresh checker.
///
/// # Returns
///
/// The number of conversions inserted, or the first semantic error.
pub fn type_check(program: &mut Program, file: Option<&str>) -> Result<usize, Error> {
    let mut type_checker = TypeChecker::new(file);
    type_checker.check_program(program)?;
    Ok(type_checker.conversions_inserted())
}
