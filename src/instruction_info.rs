use crate::error::{Error, Result};
use crate::memory::MemoryRW;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Add,
    Multiply,
    Input,
    Output,
    JumpIfTrue,
    JumpIfFalse,
    LessThan,
    Equals,
    AdjustBase,
    Halt,
}

/// How a raw parameter maps to its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Position,
    Immediate,
    Relative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub address: i64,
    pub word: i64,
    pub opcode: Opcode,
    pub parameters: Vec<i64>,
    pub modes: Vec<Mode>,
}

impl Opcode {
    /// Operation is the low two decimal digits of the opcode word.
    pub fn from_word(word: i64) -> Option<Opcode> {
        use self::Opcode::*;
        if word < 0 {
            return None;
        }
        let op = match word % 100 {
            1 => Add,
            2 => Multiply,
            3 => Input,
            4 => Output,
            5 => JumpIfTrue,
            6 => JumpIfFalse,
            7 => LessThan,
            8 => Equals,
            9 => AdjustBase,
            99 => Halt,
            _ => return None,
        };
        Some(op)
    }

    pub fn parameter_count(self) -> usize {
        use self::Opcode::*;
        match self {
            Add | Multiply | LessThan | Equals => 3,
            Input | Output | AdjustBase => 1,
            JumpIfTrue | JumpIfFalse => 2,
            Halt => 0,
        }
    }

    /// Index of the parameter this operation writes through, if any.
    pub fn destination(self) -> Option<usize> {
        use self::Opcode::*;
        match self {
            Add | Multiply | LessThan | Equals => Some(2),
            Input => Some(0),
            _ => None,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        use self::Opcode::*;
        match self {
            Add => "ADD",
            Multiply => "MUL",
            Input => "IN",
            Output => "OUT",
            JumpIfTrue => "JNZ",
            JumpIfFalse => "JZ",
            LessThan => "LT",
            Equals => "EQ",
            AdjustBase => "ARB",
            Halt => "HLT",
        }
    }
}

impl Mode {
    pub fn from_digit(digit: i64) -> Option<Mode> {
        match digit {
            0 => Some(Mode::Position),
            1 => Some(Mode::Immediate),
            2 => Some(Mode::Relative),
            _ => None,
        }
    }
}

/// Mode digit for parameter `index`: `(word / 10^(index + 2)) mod 10`.
fn mode_digit(word: i64, index: usize) -> i64 {
    (word / 10i64.pow(index as u32 + 2)) % 10
}

impl Instruction {
    /// Decodes the instruction at `address` from live memory.
    pub fn decode<M: MemoryRW + ?Sized>(memory: &M, address: i64) -> Result<Instruction> {
        let word = memory.read(address)?;
        let opcode = Opcode::from_word(word).ok_or(Error::UnknownOpcode { word, address })?;
        let count = opcode.parameter_count();

        let mut parameters = Vec::with_capacity(count);
        let mut modes = Vec::with_capacity(count);
        for i in 0..count {
            let digit = mode_digit(word, i);
            let mode = Mode::from_digit(digit).ok_or(Error::InvalidMode {
                mode: digit,
                word,
                address,
            })?;
            modes.push(mode);
            parameters.push(memory.read(address.wrapping_add(1 + i as i64))?);
        }

        Ok(Instruction {
            address,
            word,
            opcode,
            parameters,
            modes,
        })
    }

    pub fn len(&self) -> i64 {
        1 + self.parameters.len() as i64
    }

    pub fn is_halt(&self) -> bool {
        self.opcode == Opcode::Halt
    }
}
