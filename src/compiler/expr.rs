use crate::{
    ast::{ast::Expr, types::LangType},
    errors::errors::Error,
};

use super::{backend::Backend, compiler::Compiler, stmt::expect_same};

/// Emits `expression` in post-order and returns its type.
pub fn gen_expression<B: Backend>(
    compiler: &mut Compiler<B>,
    expression: &Expr,
) -> Result<LangType, Error> {
    match expression {
        Expr::Number(number) => {
            compiler
                .backend
                .push_literal(number)
                .map_err(|error| Error::new(error, compiler.get_position(number.line)))?;
            Ok(number.ty)
        }
        Expr::Symbol(symbol) => {
            let (slot, ty) = compiler.resolve(&symbol.value, symbol.line)?;
            compiler.backend.load(slot, ty);
            Ok(ty)
        }
        Expr::Binary(binary) => {
            let left = gen_expression(compiler, &binary.left)?;
            let right = gen_expression(compiler, &binary.right)?;
            expect_same(
                compiler,
                &format!("operands of `{}`", binary.operator),
                left,
                right,
                binary.line,
            )?;

            compiler.backend.binary(binary.operator, left);
            Ok(left)
        }
        Expr::Convert(convert) => {
            let from = gen_expression(compiler, &convert.inner)?;
            compiler.backend.convert(from, convert.target);
            Ok(convert.target)
        }
    }
}
