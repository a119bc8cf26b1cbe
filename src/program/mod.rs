/*!
 * Program Module
 * Simulated instruction streams and the code source keyed by file name
 */

mod parser;
mod store;

pub use parser::parse_program;
pub use store::ProgramStore;

use crate::process::AddressSpace;
use std::fmt;

/// Instruction operand
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(f64),
    Variable(String),
}

impl Operand {
    /// Resolve against a process address space
    pub fn eval(&self, space: &AddressSpace) -> Result<f64, String> {
        match self {
            Self::Literal(value) => Ok(*value),
            Self::Variable(name) => space
                .get(name)
                .ok_or_else(|| format!("variable '{}' is not set", name)),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{}", value),
            Self::Variable(name) => write!(f, "{}", name),
        }
    }
}

/// Arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            _ => None,
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, String> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Sub => Ok(lhs - rhs),
            Self::Mul => Ok(lhs * rhs),
            Self::Div if rhs == 0.0 => Err("division by zero".to_string()),
            Self::Div => Ok(lhs / rhs),
        }
    }
}

/// One simulated instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `target = value`
    Assign { target: String, value: Operand },
    /// `target = lhs op rhs`
    Compute {
        target: String,
        lhs: Operand,
        op: BinOp,
        rhs: Operand,
    },
    /// `print value`
    Print(Operand),
    /// `read file token target` (blocking)
    Read {
        file: String,
        token: usize,
        target: String,
    },
    /// Give the CPU back to the scheduler
    Idle,
}

/// Instruction stream of one program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    name: String,
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(name: impl Into<String>, instructions: Vec<Instruction>) -> Self {
        Self {
            name: name.into(),
            instructions,
        }
    }

    /// Program run by the idle process: a single yielding instruction
    pub fn idle() -> Self {
        Self::new("idle", vec![Instruction::Idle])
    }

    /// Parse program text; `name` is used in error messages
    pub fn parse(name: &str, source: &str) -> Result<Self, crate::core::errors::ProgramError> {
        parse_program(name, source)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn fetch(&self, pc: usize) -> Option<&Instruction> {
        self.instructions.get(pc)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}
