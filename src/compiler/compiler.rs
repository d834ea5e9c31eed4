//! Main compiler module.
//!
//! Holds the code generation state: its own symbol table with a slot bound
//! to every declared variable, the monotonic slot counter, and the backend
//! that spells instructions for the selected target.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    ast::{ast::Program, statements::Identifier, types::LangType},
    errors::errors::{Error, ErrorImpl},
    symbol_table::symbol_table::{Slot, Symbol, SymbolTable},
    Position,
};

use super::{
    backend::{Backend, CompileOptions, Target},
    bytecode::BytecodeBackend,
    dc::DcBackend,
    stmt::gen_statement,
};

/// Code generator for a type-checked program.
///
/// # Type Parameters
///
/// * `B` - The backend instructions are emitted through
pub struct Compiler<B: Backend> {
    pub backend: B,
    /// Separate from the type checker's table; entries here carry slots.
    pub scopes: SymbolTable,
    next_slot: u32,
    file: Arc<str>,
}

impl<B: Backend> Compiler<B> {
    pub fn new(backend: B, file: Option<&str>) -> Self {
        Compiler {
            backend,
            scopes: SymbolTable::new(),
            next_slot: 0,
            file: Arc::from(file.unwrap_or("shell")),
        }
    }

    pub fn get_position(&self, line: u32) -> Position {
        Position(line, Arc::clone(&self.file))
    }

    pub fn slots_used(&self) -> u32 {
        self.next_slot
    }

    /// Binds the next free slot to `identifier` in the innermost scope.
    /// Slots are never reused, so every declaration gets its own.
    pub fn allocate(&mut self, identifier: &Identifier, ty: LangType) -> Result<Slot, Error> {
        let slot = Slot(self.next_slot);
        self.scopes.declare(
            &identifier.name,
            Symbol::with_slot(ty, slot),
            self.get_position(identifier.line),
        )?;
        self.next_slot += 1;

        trace!(name = %identifier.name, %slot, %ty, "allocated slot");
        Ok(slot)
    }

    /// Slot and type bound to `name`. A miss means the tree never went
    /// through the type checker.
    pub fn resolve(&self, name: &str, line: u32) -> Result<(Slot, LangType), Error> {
        match self.scopes.lookup(name) {
            Some(Symbol {
                ty,
                slot: Some(slot),
            }) => Ok((*slot, *ty)),
            _ => Err(Error::new(
                ErrorImpl::UnboundSymbol {
                    variable: name.to_string(),
                },
                self.get_position(line),
            )),
        }
    }

    /// Emits the whole program and hands back the backend's output.
    pub fn gen(mut self, program: &Program) -> Result<B::Output, Error> {
        self.backend.preamble();

        for statement in program.body.iter() {
            gen_statement(&mut self, statement)?;
        }

        let slots = self.next_slot;
        debug!(statements = program.body.len(), slots, "generated code");
        Ok(self.backend.finish(slots))
    }
}

/// Generates target text for a type-checked program.
///
/// # Arguments
///
/// * `program` - The rewritten tree produced by the type checker
/// * `file` - File name carried into error positions
/// * `options` - Target selection and dc precision
pub fn compile(
    program: &Program,
    file: Option<&str>,
    options: &CompileOptions,
) -> Result<String, Error> {
    match options.target {
        Target::Dc => Compiler::new(DcBackend::new(options.precision), file).gen(program),
        Target::Bytecode => Ok(Compiler::new(BytecodeBackend::new(), file)
            .gen(program)?
            .to_string()),
    }
}
