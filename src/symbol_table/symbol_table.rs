use std::{collections::HashMap, fmt::Display};

use crate::{
    ast::types::LangType,
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Compile-time storage location of a variable. Allocated in declaration
/// order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(pub u32);

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Symbol {
    pub ty: LangType,
    /// `None` until code generation binds one.
    pub slot: Option<Slot>,
}

impl Symbol {
    pub fn new(ty: LangType) -> Self {
        Symbol { ty, slot: None }
    }

    pub fn with_slot(ty: LangType, slot: Slot) -> Self {
        Symbol {
            ty,
            slot: Some(slot),
        }
    }
}

/// A single scope.
#[derive(Debug, Default)]
pub struct Environment {
    pub variable_lookup: HashMap<String, Symbol>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            variable_lookup: HashMap::new(),
        }
    }

    pub fn declare_variable(
        &mut self,
        variable_name: &str,
        symbol: Symbol,
        current_position: Position,
    ) -> Result<(), Error> {
        if self.variable_lookup.contains_key(variable_name) {
            Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: variable_name.to_string(),
                },
                current_position,
            ))
        } else {
            self.variable_lookup.insert(variable_name.to_string(), symbol);
            Ok(())
        }
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<&Symbol> {
        self.variable_lookup.get(variable_name)
    }
}

/// Stack of environments, innermost last. The global environment is
/// created with the table and is never popped.
#[derive(Debug)]
pub struct SymbolTable {
    environments: Vec<Environment>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            environments: vec![Environment::new()],
        }
    }

    pub fn enter_scope(&mut self) {
        self.environments.push(Environment::new());
    }

    /// Pops the innermost scope. Returns false, leaving the table intact,
    /// when only the global scope is left.
    pub fn exit_scope(&mut self) -> bool {
        if self.environments.len() > 1 {
            self.environments.pop();
            true
        } else {
            false
        }
    }

    pub fn depth(&self) -> usize {
        self.environments.len()
    }

    /// Inserts into the innermost scope. Fails if the name already exists
    /// in that exact scope; outer bindings may be shadowed.
    pub fn declare(&mut self, name: &str, symbol: Symbol, position: Position) -> Result<(), Error> {
        let environments = self.environments.len();
        self.environments[environments - 1].declare_variable(name, symbol, position)
    }

    /// Resolves innermost-first.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_variable(name))
    }

    /// Like `lookup`, but turns a miss into `VariableNotDeclared`.
    pub fn fetch(&self, name: &str, position: Position) -> Result<&Symbol, Error> {
        self.lookup(name).ok_or_else(|| {
            Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: name.to_string(),
                },
                position,
            )
        })
    }
}
