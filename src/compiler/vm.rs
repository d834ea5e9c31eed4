//! Interpreter for `BytecodeProgram`s.

use std::fmt::Display;

use thiserror::Error;
use tracing::trace;

use crate::ast::types::LangType;

use super::bytecode::{BytecodeProgram, Instruction};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn get_type(&self) -> LangType {
        match self {
            Value::Int(_) => LangType::Int,
            Value::Float(_) => LangType::Float,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{:?}", value),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VmError {
    #[error("stack underflow at instruction {pc}")]
    StackUnderflow { pc: usize },
    #[error("expected {expected} on the stack at instruction {pc}, found {found}")]
    TypeMismatch {
        pc: usize,
        expected: LangType,
        found: LangType,
    },
    #[error("slot {slot} out of range at instruction {pc}")]
    SlotOutOfRange { pc: usize, slot: u32 },
    #[error("division by zero at instruction {pc}")]
    DivisionByZero { pc: usize },
    #[error("integer overflow at instruction {pc}")]
    Overflow { pc: usize },
}

/// Stack machine state. Slots start out as `None` and read as zero of the
/// requested type, like dc's empty registers.
#[derive(Debug, Default)]
pub struct Machine {
    stack: Vec<Value>,
    slots: Vec<Option<Value>>,
    output: Vec<Value>,
    pc: usize,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values left on the evaluation stack by the last run.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Runs `program` from a clean state and returns every printed value.
    pub fn run(&mut self, program: &BytecodeProgram) -> Result<Vec<Value>, VmError> {
        self.stack.clear();
        self.output.clear();
        self.slots = vec![None; program.slots as usize];

        for (pc, instruction) in program.instructions.iter().enumerate() {
            self.pc = pc;
            trace!(pc, %instruction, depth = self.stack.len(), "step");
            self.step(*instruction)?;
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn step(&mut self, instruction: Instruction) -> Result<(), VmError> {
        match instruction {
            Instruction::IPush(value) => self.stack.push(Value::Int(value)),
            Instruction::FPush(value) => self.stack.push(Value::Float(value)),
            Instruction::ILoad(slot) => {
                let value = self.slot(slot)?.unwrap_or(Value::Int(0));
                let value = self.as_int(value)?;
                self.stack.push(Value::Int(value));
            }
            Instruction::FLoad(slot) => {
                let value = self.slot(slot)?.unwrap_or(Value::Float(0.0));
                let value = self.as_float(value)?;
                self.stack.push(Value::Float(value));
            }
            Instruction::IStore(slot) => {
                let value = self.pop_int()?;
                *self.slot_mut(slot)? = Some(Value::Int(value));
            }
            Instruction::FStore(slot) => {
                let value = self.pop_float()?;
                *self.slot_mut(slot)? = Some(Value::Float(value));
            }
            Instruction::IAdd => self.int_op(i64::checked_add)?,
            Instruction::ISub => self.int_op(i64::checked_sub)?,
            Instruction::IMul => self.int_op(i64::checked_mul)?,
            Instruction::IDiv => {
                if self.stack.last() == Some(&Value::Int(0)) {
                    return Err(VmError::DivisionByZero { pc: self.pc });
                }
                // checked_div truncates toward zero
                self.int_op(i64::checked_div)?
            }
            Instruction::FAdd => self.float_op(|l, r| l + r)?,
            Instruction::FSub => self.float_op(|l, r| l - r)?,
            Instruction::FMul => self.float_op(|l, r| l * r)?,
            Instruction::FDiv => {
                if self.stack.last() == Some(&Value::Float(0.0)) {
                    return Err(VmError::DivisionByZero { pc: self.pc });
                }
                self.float_op(|l, r| l / r)?
            }
            Instruction::I2F => {
                let value = self.pop_int()?;
                self.stack.push(Value::Float(value as f64));
            }
            Instruction::IPrint => {
                let value = self.peek()?;
                let value = self.as_int(value)?;
                self.output.push(Value::Int(value));
            }
            Instruction::FPrint => {
                let value = self.peek()?;
                let value = self.as_float(value)?;
                self.output.push(Value::Float(value));
            }
            Instruction::Pop => {
                self.pop()?;
            }
        }
        Ok(())
    }

    fn slot(&self, slot: u32) -> Result<Option<Value>, VmError> {
        self.slots
            .get(slot as usize)
            .copied()
            .ok_or(VmError::SlotOutOfRange { pc: self.pc, slot })
    }

    fn slot_mut(&mut self, slot: u32) -> Result<&mut Option<Value>, VmError> {
        let pc = self.pc;
        self.slots
            .get_mut(slot as usize)
            .ok_or(VmError::SlotOutOfRange { pc, slot })
    }

    fn as_int(&self, value: Value) -> Result<i64, VmError> {
        match value {
            Value::Int(value) => Ok(value),
            other => Err(VmError::TypeMismatch {
                pc: self.pc,
                expected: LangType::Int,
                found: other.get_type(),
            }),
        }
    }

    fn as_float(&self, value: Value) -> Result<f64, VmError> {
        match value {
            Value::Float(value) => Ok(value),
            other => Err(VmError::TypeMismatch {
                pc: self.pc,
                expected: LangType::Float,
                found: other.get_type(),
            }),
        }
    }

    fn peek(&self) -> Result<Value, VmError> {
        self.stack
            .last()
            .copied()
            .ok_or(VmError::StackUnderflow { pc: self.pc })
    }

    fn pop(&mut self) -> Result<Value, VmError> {
        self.stack
            .pop()
            .ok_or(VmError::StackUnderflow { pc: self.pc })
    }

    fn pop_int(&mut self) -> Result<i64, VmError> {
        let value = self.pop()?;
        self.as_int(value)
    }

    fn pop_float(&mut self) -> Result<f64, VmError> {
        let value = self.pop()?;
        self.as_float(value)
    }

    fn int_op(&mut self, op: fn(i64, i64) -> Option<i64>) -> Result<(), VmError> {
        let right = self.pop_int()?;
        let left = self.pop_int()?;
        let result = op(left, right).ok_or(VmError::Overflow { pc: self.pc })?;
        self.stack.push(Value::Int(result));
        Ok(())
    }

    fn float_op(&mut self, op: fn(f64, f64) -> f64) -> Result<(), VmError> {
        let right = self.pop_float()?;
        let left = self.pop_float()?;
        self.stack.push(Value::Float(op(left, right)));
        Ok(())
    }
}
