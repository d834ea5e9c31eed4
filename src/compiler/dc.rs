//! Backend for the `dc` reverse-polish calculator.
//!
//! dc is untyped and arbitrary precision, so conversions emit nothing and
//! only integer division needs special handling.

use crate::{
    ast::{
        expressions::NumberExpr,
        types::{LangType, Operator},
    },
    errors::errors::ErrorImpl,
    symbol_table::symbol_table::Slot,
};

use super::backend::Backend;

/// Register `print` pops the printed value into. Its array holds the
/// variables that do not fit in a named register.
pub const SCRATCH_REGISTER: char = 'i';

/// Registers given to variables, in allocation order.
pub const REGISTERS: &str = "abcdefghjklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Where a slot lives in dc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Register(char),
    /// Index into the scratch register's array.
    Spilled(usize),
}

pub fn storage_for(slot: Slot) -> Storage {
    let index = slot.0 as usize;
    match REGISTERS.chars().nth(index) {
        Some(register) => Storage::Register(register),
        None => Storage::Spilled(index - REGISTERS.len()),
    }
}

#[derive(Debug)]
pub struct DcBackend {
    code: String,
    precision: u32,
}

impl DcBackend {
    pub fn new(precision: u32) -> Self {
        DcBackend {
            code: String::new(),
            precision,
        }
    }

    fn emit(&mut self, text: &str) {
        self.code.push_str(text);
    }

    fn line(&mut self, text: &str) {
        self.code.push_str(text);
        self.code.push('\n');
    }

    fn load_text(slot: Slot) -> String {
        match storage_for(slot) {
            Storage::Register(register) => format!("l{}", register),
            Storage::Spilled(index) => format!("{} ;{}", index, SCRATCH_REGISTER),
        }
    }
}

impl Backend for DcBackend {
    type Output = String;

    fn preamble(&mut self) {
        let precision = format!("{} k", self.precision);
        self.line(&precision);
    }

    fn push_literal(&mut self, literal: &NumberExpr) -> Result<(), ErrorImpl> {
        // dc reads `-` as subtraction; negative numbers are written `_5`
        let text = match literal.value.strip_prefix('-') {
            Some(magnitude) => format!("_{} ", magnitude),
            None => format!("{} ", literal.value),
        };
        self.emit(&text);
        Ok(())
    }

    fn load(&mut self, slot: Slot, _ty: LangType) {
        let text = format!("{} ", Self::load_text(slot));
        self.emit(&text);
    }

    fn store(&mut self, slot: Slot, _ty: LangType) {
        let text = match storage_for(slot) {
            Storage::Register(register) => format!("s{}", register),
            Storage::Spilled(index) => format!("{} :{}", index, SCRATCH_REGISTER),
        };
        self.line(&text);
    }

    fn binary(&mut self, operator: Operator, ty: LangType) {
        // Plain `/` would keep the global precision and give 3.5 for 7 / 2.
        // Dropping to zero digits truncates like the bytecode `idiv`.
        if operator == Operator::Div && ty == LangType::Int {
            let restore = format!("{} k", self.precision);
            self.line("0 k");
            self.line("/");
            self.line(&restore);
        } else {
            self.line(operator.symbol());
        }
    }

    fn convert(&mut self, _from: LangType, _to: LangType) {}

    fn print(&mut self, slot: Slot, _ty: LangType) {
        let load = Self::load_text(slot);
        self.line(&load);
        self.line("p");
        self.line(&format!("s{}", SCRATCH_REGISTER));
    }

    fn finish(self, _slots_used: u32) -> String {
        self.code
    }
}
