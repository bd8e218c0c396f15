pub mod cpu;
pub mod error;
pub mod formatter;
pub mod instruction_info;
pub mod interconnect;
pub mod memory;
mod tests;

pub use crate::error::{Error, Result};
pub use crate::interconnect::{outputs, run, run_with_inputs, Input, Interconnect, Status};
pub use crate::memory::Memory;
