use std::collections::VecDeque;
use std::mem;

use tracing::debug;

use super::cpu::{Cpu, InputSource, Step};
use crate::error::{Error, Result};
use crate::memory::Memory;

/// Where input instructions take their values from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Every input instruction observes the same value.
    Fixed(i64),
    /// One value per input instruction, in order.
    Queue(VecDeque<i64>),
}

impl InputSource for Input {
    fn next_input(&mut self) -> Option<i64> {
        match self {
            Input::Fixed(value) => Some(*value),
            Input::Queue(queue) => queue.pop_front(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Halted,
    AwaitingInput,
}

pub struct Interconnect {
    pub cpu: Cpu,
    pub input: Input,
    outputs: Vec<i64>,
}

impl Interconnect {
    pub fn new(memory: Memory, input: Input) -> Self {
        Self {
            cpu: Cpu::new(memory),
            input,
            outputs: Vec::new(),
        }
    }

    /// Appends a value to the input queue. A fixed input is replaced by a queue.
    pub fn push_input(&mut self, value: i64) {
        match &mut self.input {
            Input::Queue(queue) => queue.push_back(value),
            Input::Fixed(_) => self.input = Input::Queue(VecDeque::from(vec![value])),
        }
    }

    /// Runs until the machine halts or an input instruction finds the queue empty.
    pub fn resume(&mut self) -> Result<Status> {
        loop {
            match self.cpu.step(&mut self.input)? {
                Step::Continue => {}
                Step::Output(value) => self.outputs.push(value),
                Step::Halt => return Ok(Status::Halted),
                Step::Blocked => return Ok(Status::AwaitingInput),
            }
        }
    }

    /// Runs to completion. Running out of input is fatal here.
    pub fn run_to_halt(&mut self) -> Result<Vec<i64>> {
        match self.resume()? {
            Status::Halted => {
                debug!(
                    "Instructions executed: {} Outputs: {}",
                    self.cpu.cycles,
                    self.outputs.len()
                );
                Ok(self.take_outputs())
            }
            Status::AwaitingInput => Err(Error::InputExhausted {
                address: self.cpu.reg.ip,
            }),
        }
    }

    pub fn outputs(&self) -> &[i64] {
        &self.outputs
    }

    pub fn take_outputs(&mut self) -> Vec<i64> {
        mem::take(&mut self.outputs)
    }
}

/// Runs a fresh copy of `memory` with `input` given to every input instruction
/// and returns the last value output, or 0 when nothing was output.
pub fn run(memory: &Memory, input: i64) -> Result<i64> {
    let outputs = outputs(memory, input)?;
    Ok(outputs.last().copied().unwrap_or(0))
}

/// Like [`run`], but returns every value output, in order.
pub fn outputs(memory: &Memory, input: i64) -> Result<Vec<i64>> {
    Interconnect::new(memory.clone(), Input::Fixed(input)).run_to_halt()
}

/// Runs a fresh copy of `memory`, feeding `inputs` one per input instruction.
pub fn run_with_inputs(memory: &Memory, inputs: &[i64]) -> Result<Vec<i64>> {
    let queue = inputs.iter().copied().collect();
    Interconnect::new(memory.clone(), Input::Queue(queue)).run_to_halt()
}
