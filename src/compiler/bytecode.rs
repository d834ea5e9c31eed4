//! Backend for the built-in typed stack machine.

use std::fmt::Display;

use serde::Serialize;

use crate::{
    ast::{
        expressions::NumberExpr,
        types::{LangType, Operator},
    },
    errors::errors::ErrorImpl,
    symbol_table::symbol_table::Slot,
};

use super::backend::Backend;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Instruction {
    IPush(i64),
    FPush(f64),
    ILoad(u32),
    FLoad(u32),
    IStore(u32),
    FStore(u32),
    IAdd,
    FAdd,
    ISub,
    FSub,
    IMul,
    FMul,
    IDiv,
    FDiv,
    /// Widens the Int on top of the stack to a Float.
    I2F,
    /// Prints the value on top of the stack without popping it.
    IPrint,
    FPrint,
    /// Discards the value on top of the stack.
    Pop,
}

impl Instruction {
    pub fn arithmetic(operator: Operator, ty: LangType) -> Instruction {
        match (operator, ty) {
            (Operator::Add, LangType::Int) => Instruction::IAdd,
            (Operator::Add, LangType::Float) => Instruction::FAdd,
            (Operator::Sub, LangType::Int) => Instruction::ISub,
            (Operator::Sub, LangType::Float) => Instruction::FSub,
            (Operator::Mul, LangType::Int) => Instruction::IMul,
            (Operator::Mul, LangType::Float) => Instruction::FMul,
            (Operator::Div, LangType::Int) => Instruction::IDiv,
            (Operator::Div, LangType::Float) => Instruction::FDiv,
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::IPush(value) => write!(f, "ipush {}", value),
            Instruction::FPush(value) => write!(f, "fpush {:?}", value),
            Instruction::ILoad(slot) => write!(f, "iload {}", slot),
            Instruction::FLoad(slot) => write!(f, "fload {}", slot),
            Instruction::IStore(slot) => write!(f, "istore {}", slot),
            Instruction::FStore(slot) => write!(f, "fstore {}", slot),
            Instruction::IAdd => write!(f, "iadd"),
            Instruction::FAdd => write!(f, "fadd"),
            Instruction::ISub => write!(f, "isub"),
            Instruction::FSub => write!(f, "fsub"),
            Instruction::IMul => write!(f, "imul"),
            Instruction::FMul => write!(f, "fmul"),
            Instruction::IDiv => write!(f, "idiv"),
            Instruction::FDiv => write!(f, "fdiv"),
            Instruction::I2F => write!(f, "i2f"),
            Instruction::IPrint => write!(f, "iprint"),
            Instruction::FPrint => write!(f, "fprint"),
            Instruction::Pop => write!(f, "pop"),
        }
    }
}

/// A finished instruction list plus the number of slots it addresses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BytecodeProgram {
    pub slots: u32,
    pub instructions: Vec<Instruction>,
}

impl Display for BytecodeProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, ".slots {}", self.slots)?;
        for instruction in self.instructions.iter() {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct BytecodeBackend {
    instructions: Vec<Instruction>,
}

impl BytecodeBackend {
    pub fn new() -> Self {
        BytecodeBackend {
            instructions: vec![],
        }
    }

    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }
}

impl Backend for BytecodeBackend {
    type Output = BytecodeProgram;

    fn preamble(&mut self) {}

    fn push_literal(&mut self, literal: &NumberExpr) -> Result<(), ErrorImpl> {
        // The lexer and `NumberExpr::new` only admit text that parses;
        // this fires only for a literal edited after construction.
        let invalid = || ErrorImpl::InvalidLiteral {
            literal: literal.value.clone(),
            ty: literal.ty.to_string(),
        };

        let instruction = match literal.ty {
            LangType::Int => Instruction::IPush(literal.value.parse().map_err(|_| invalid())?),
            LangType::Float => {
                let value: f64 = literal.value.parse().map_err(|_| invalid())?;
                if !value.is_finite() {
                    return Err(invalid());
                }
                Instruction::FPush(value)
            }
        };
        self.emit(instruction);
        Ok(())
    }

    fn load(&mut self, slot: Slot, ty: LangType) {
        self.emit(match ty {
            LangType::Int => Instruction::ILoad(slot.0),
            LangType::Float => Instruction::FLoad(slot.0),
        });
    }

    fn store(&mut self, slot: Slot, ty: LangType) {
        self.emit(match ty {
            LangType::Int => Instruction::IStore(slot.0),
            LangType::Float => Instruction::FStore(slot.0),
        });
    }

    fn binary(&mut self, operator: Operator, ty: LangType) {
        self.emit(Instruction::arithmetic(operator, ty));
    }

    fn convert(&mut self, from: LangType, to: LangType) {
        if from == LangType::Int && to == LangType::Float {
            self.emit(Instruction::I2F);
        }
    }

    fn print(&mut self, slot: Slot, ty: LangType) {
        self.load(slot, ty);
        self.emit(match ty {
            LangType::Int => Instruction::IPrint,
            LangType::Float => Instruction::FPrint,
        });
        self.emit(Instruction::Pop);
    }

    fn finish(self, slots_used: u32) -> BytecodeProgram {
        BytecodeProgram {
            slots: slots_used,
            instructions: self.instructions,
        }
    }
}
