use crate::cpu::{Cpu, Registers};
use crate::instruction_info::{Instruction, Mode};
use crate::memory::{Memory, MemoryRW};
use std::fmt;
use std::fmt::{Debug, Display, Formatter, Result};

impl Display for Registers {
    fn fmt(&self, fmt: &mut Formatter) -> Result {
        fmt.debug_struct("Registers")
            .field("IP", &format_args!("{:04}", self.ip))
            .field("PREV", &format_args!("{:04}", self.prev_ip))
            .field("RB", &format_args!("{}", self.relative_base))
            .finish()
    }
}

// [p] position, p immediate, [rb+p] relative
impl Display for Instruction {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}", self.opcode.mnemonic())?;
        for (i, (p, mode)) in self.parameters.iter().zip(&self.modes).enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            match mode {
                Mode::Position => write!(fmt, "{}[{}]", sep, p)?,
                Mode::Immediate => write!(fmt, "{}{}", sep, p)?,
                Mode::Relative => write!(fmt, "{}[rb{:+}]", sep, p)?,
            }
        }
        Ok(())
    }
}

impl Debug for Cpu {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        let ip = self.reg.ip;
        write!(fmt, "IP: {:04}, ", ip)?;
        write!(fmt, "RB: {}, ", self.reg.relative_base)?;
        write!(
            fmt,
            "({} {} {} {}), ",
            self.read(ip).unwrap_or(0),
            self.read(ip.wrapping_add(1)).unwrap_or(0),
            self.read(ip.wrapping_add(2)).unwrap_or(0),
            self.read(ip.wrapping_add(3)).unwrap_or(0)
        )?;
        if let Some(instruction) = &self.instruction {
            write!(fmt, "{:w$}", instruction.to_string(), w = 28)?;
        }
        write!(fmt, "cyc: {}", self.cycles)
    }
}

/// Linear sweep over the loaded program. Words that do not decode are shown as data.
pub fn disassemble(memory: &Memory) -> Vec<(usize, String)> {
    let mut listing = Vec::new();
    let mut addr = 0;

    while addr < memory.len() {
        match Instruction::decode(memory, addr as i64) {
            Ok(instruction) => {
                listing.push((addr, instruction.to_string()));
                addr += instruction.len() as usize;
            }
            Err(_) => {
                listing.push((addr, format!("DATA {}", memory.peek(addr))));
                addr += 1;
            }
        }
    }
    listing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_modes() {
        let memory = Memory::new(vec![21201, -3, 7, 4]);
        let i = Instruction::decode(&memory, 0).unwrap();
        assert_eq!(i.to_string(), "ADD [rb-3], 7, [rb+4]");
    }

    #[test]
    fn renders_halt() {
        let memory = Memory::new(vec![99]);
        let i = Instruction::decode(&memory, 0).unwrap();
        assert_eq!(i.to_string(), "HLT");
    }

    #[test]
    fn disassembles_with_data() {
        let memory = Memory::parse("1102,34,34,7,4,7,99,0").unwrap();
        let listing = disassemble(&memory);
        assert_eq!(
            listing,
            vec![
                (0, "MUL 34, 34, [7]".to_string()),
                (4, "OUT [7]".to_string()),
                (6, "HLT".to_string()),
                (7, "DATA 0".to_string()),
            ]
        );
    }

    #[test]
    fn registers() {
        let reg = Registers {
            ip: 12,
            prev_ip: 8,
            relative_base: -3,
        };
        assert_eq!(reg.to_string(), "Registers { IP: 0012, PREV: 0008, RB: -3 }");
    }

    #[test]
    fn trace_line() {
        let mut cpu = Cpu::new(Memory::new(vec![104, 5, 99]));
        cpu.fetch().unwrap();
        let line = format!("{:?}", cpu);
        assert!(line.starts_with("IP: 0000, RB: 0, (104 5 99 0), OUT 5"));
        assert!(line.ends_with("cyc: 0"));
    }
}
