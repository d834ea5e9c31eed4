use serde::Serialize;

use crate::{
    ast::{
        expressions::NumberExpr,
        types::{LangType, Operator},
    },
    errors::errors::ErrorImpl,
    symbol_table::symbol_table::Slot,
};

/// Default number of fractional digits the dc target computes with.
pub const DEFAULT_PRECISION: u32 = 20;

/// Output format of the code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
pub enum Target {
    /// Text for the `dc` stack calculator.
    #[default]
    Dc,
    /// Listing for the built-in typed stack machine.
    Bytecode,
}

impl Target {
    /// Conventional file extension for output of this target.
    pub fn extension(&self) -> &'static str {
        match self {
            Target::Dc => "dc",
            Target::Bytecode => "bc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub target: Target,
    /// Fractional digits dc keeps for float arithmetic. Ignored by the
    /// bytecode target.
    pub precision: u32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            target: Target::default(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl CompileOptions {
    pub fn with_target(target: Target) -> Self {
        CompileOptions {
            target,
            ..Self::default()
        }
    }
}

/// Instruction emitter driven by the code generation walk.
///
/// The walk resolves names to slots and computes every expression type;
/// a backend only decides how each step is spelled for its target. Calls
/// arrive in post-order, so operands are always emitted before the
/// operation consuming them. Slots are unbounded, and literals reaching a
/// backend have already been range checked, so emission cannot fail on a
/// type-checked tree.
pub trait Backend {
    type Output;

    fn preamble(&mut self);

    fn push_literal(&mut self, literal: &NumberExpr) -> Result<(), ErrorImpl>;

    fn load(&mut self, slot: Slot, ty: LangType);

    fn store(&mut self, slot: Slot, ty: LangType);

    /// `ty` is the type of both operands.
    fn binary(&mut self, operator: Operator, ty: LangType);

    fn convert(&mut self, from: LangType, to: LangType);

    fn print(&mut self, slot: Slot, ty: LangType);

    fn finish(self, slots_used: u32) -> Self::Output;
}
