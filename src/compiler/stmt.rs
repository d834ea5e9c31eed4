use crate::{
    ast::{ast::Stmt, types::LangType},
    errors::errors::{Error, ErrorImpl},
};

use super::{backend::Backend, compiler::Compiler, expr::gen_expression};

/// Emits one statement.
///
/// A declaration binds its slot before the initializer is generated,
/// matching the type checker, which resolves the name inside its own
/// initializer.
pub fn gen_statement<B: Backend>(compiler: &mut Compiler<B>, statement: &Stmt) -> Result<(), Error> {
    match statement {
        Stmt::VarDecl(var_decl) => {
            let slot = compiler.allocate(&var_decl.identifier, var_decl.var_type)?;

            if let Some(value) = &var_decl.assigned_value {
                let ty = gen_expression(compiler, value)?;
                expect_same(compiler, "declaration", var_decl.var_type, ty, var_decl.line)?;
                compiler.backend.store(slot, var_decl.var_type);
            }
            Ok(())
        }
        Stmt::Assignment(assignment) => {
            let (slot, var_type) =
                compiler.resolve(&assignment.assignee.name, assignment.assignee.line)?;

            let ty = gen_expression(compiler, &assignment.value)?;
            expect_same(compiler, "assignment", var_type, ty, assignment.line)?;
            compiler.backend.store(slot, var_type);
            Ok(())
        }
        Stmt::Print(print) => {
            let (slot, ty) = compiler.resolve(&print.identifier.name, print.identifier.line)?;
            compiler.backend.print(slot, ty);
            Ok(())
        }
    }
}

pub(super) fn expect_same<B: Backend>(
    compiler: &Compiler<B>,
    context: &str,
    left: LangType,
    right: LangType,
    line: u32,
) -> Result<(), Error> {
    if left == right {
        Ok(())
    } else {
        Err(Error::new(
            ErrorImpl::UncheckedTypeMismatch {
                context: context.to_string(),
                left: left.to_string(),
                right: right.to_string(),
            },
            compiler.get_position(line),
        ))
    }
}
