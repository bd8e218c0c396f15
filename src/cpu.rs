use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::instruction_info::{Instruction, Mode, Opcode};
use crate::memory::{Memory, MemoryRW};

pub struct Cpu {
    pub reg: Registers,
    pub memory: Memory,
    pub state: State,
    pub instruction: Option<Instruction>,
    pub cycles: usize, // Instructions executed
    pub debug: bool,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub ip: i64,
    pub prev_ip: i64,
    pub relative_base: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
    Fatal,
}

/// Outcome of a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Output(i64),
    Halt,
    /// An input instruction found no value. Nothing was consumed; the same
    /// instruction runs again on the next step.
    Blocked,
}

/// Supplies values to input instructions.
pub trait InputSource {
    fn next_input(&mut self) -> Option<i64>;
}

impl MemoryRW for Cpu {
    fn read(&self, addr: i64) -> Result<i64> {
        self.memory.read(addr)
    }

    fn write(&mut self, addr: i64, value: i64) -> Result<()> {
        self.memory.write(addr, value)
    }
}

impl Cpu {
    pub fn new(memory: Memory) -> Cpu {
        Cpu {
            reg: Registers::default(),
            memory,
            state: State::Running,
            instruction: None,
            cycles: 0,
            debug: false,
        }
    }

    fn adv_ip(&mut self, t: i64) {
        self.reg.prev_ip = self.reg.ip;
        self.reg.ip = self.reg.ip.wrapping_add(t);
    }

    fn jump(&mut self, target: i64) {
        self.reg.prev_ip = self.reg.ip;
        self.reg.ip = target;
    }

    /// Resolves parameter `index` as a read operand.
    fn operand(&self, instruction: &Instruction, index: usize) -> Result<i64> {
        let p = instruction.parameters[index];
        match instruction.modes[index] {
            Mode::Position => self.read(p),
            Mode::Immediate => Ok(p),
            Mode::Relative => self.read(self.reg.relative_base.wrapping_add(p)),
        }
    }

    /// Resolves parameter `index` as a write address.
    fn destination(&self, instruction: &Instruction, index: usize) -> Result<i64> {
        let p = instruction.parameters[index];
        match instruction.modes[index] {
            Mode::Position => Ok(p),
            Mode::Relative => Ok(self.reg.relative_base.wrapping_add(p)),
            Mode::Immediate => Err(Error::ImmediateWrite {
                address: instruction.address,
            }),
        }
    }

    fn store(&mut self, instruction: &Instruction, value: i64) -> Result<()> {
        match instruction.opcode.destination() {
            Some(index) => {
                let addr = self.destination(instruction, index)?;
                self.write(addr, value)
            }
            None => Ok(()),
        }
    }

    pub(crate) fn fetch(&mut self) -> Result<Instruction> {
        let instruction = Instruction::decode(&self.memory, self.reg.ip)?;
        self.instruction = Some(instruction.clone());
        if self.debug {
            trace!("{:?}", self);
        }
        Ok(instruction)
    }

    fn execute<I: InputSource + ?Sized>(
        &mut self,
        instruction: &Instruction,
        input: &mut I,
    ) -> Result<Step> {
        use self::Opcode::*;
        let mut step = Step::Continue;

        match instruction.opcode {
            Add => {
                let a = self.operand(instruction, 0)?;
                let b = self.operand(instruction, 1)?;
                self.store(instruction, a.wrapping_add(b))?;
            }
            Multiply => {
                let a = self.operand(instruction, 0)?;
                let b = self.operand(instruction, 1)?;
                self.store(instruction, a.wrapping_mul(b))?;
            }
            Input => match input.next_input() {
                Some(value) => self.store(instruction, value)?,
                None => return Ok(Step::Blocked),
            },
            Output => step = Step::Output(self.operand(instruction, 0)?),
            JumpIfTrue | JumpIfFalse => {
                let a = self.operand(instruction, 0)?;
                let taken = if instruction.opcode == JumpIfTrue {
                    a != 0
                } else {
                    a == 0
                };
                if taken {
                    let target = self.operand(instruction, 1)?;
                    self.jump(target);
                    self.cycles += 1;
                    return Ok(step);
                }
            }
            LessThan => {
                let a = self.operand(instruction, 0)?;
                let b = self.operand(instruction, 1)?;
                self.store(instruction, (a < b) as i64)?;
            }
            Equals => {
                let a = self.operand(instruction, 0)?;
                let b = self.operand(instruction, 1)?;
                self.store(instruction, (a == b) as i64)?;
            }
            AdjustBase => {
                let a = self.operand(instruction, 0)?;
                self.reg.relative_base = self.reg.relative_base.wrapping_add(a);
            }
            Halt => {
                self.state = State::Halted;
                self.cycles += 1;
                debug!("Halted at {} after {} instructions", self.reg.ip, self.cycles);
                return Ok(Step::Halt);
            }
        }

        self.adv_ip(instruction.len());
        self.cycles += 1;
        Ok(step)
    }

    /// Decodes the instruction at the instruction pointer from live memory and
    /// executes it. Any error leaves the machine in [`State::Fatal`].
    pub fn step<I: InputSource + ?Sized>(&mut self, input: &mut I) -> Result<Step> {
        match self.state {
            State::Halted => return Ok(Step::Halt),
            State::Fatal => return Err(Error::Faulted),
            State::Running => {}
        }

        let result = self
            .fetch()
            .and_then(|instruction| self.execute(&instruction, input));
        if let Err(e) = &result {
            warn!("Fatal: {} {}", e, self.reg);
            self.state = State::Fatal;
        }
        result
    }
}
