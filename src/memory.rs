use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

// Words per page beyond the loaded image.
const PAGE_SIZE: usize = 1024;

type Page = Box<[i64; PAGE_SIZE]>;

/// Intcode address space.
///
/// Every non-negative address is readable; cells never written hold zero.
/// The loaded image keeps its own vector. Everything past it lives in pages
/// allocated on first write, so memory use follows the pages touched rather
/// than the highest address.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    cells: Vec<i64>,
    pages: HashMap<usize, Page>,
}

pub trait MemoryRW {
    fn read(&self, addr: i64) -> Result<i64>;
    fn write(&mut self, addr: i64, value: i64) -> Result<()>;
}

fn index(addr: i64) -> Result<usize> {
    usize::try_from(addr).map_err(|_| Error::NegativeAddress(addr))
}

impl Memory {
    pub fn new(program: Vec<i64>) -> Memory {
        Memory {
            cells: program,
            pages: HashMap::new(),
        }
    }

    /// Parses comma separated decimal integers into memory starting at address 0.
    pub fn parse(text: &str) -> Result<Memory> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyProgram);
        }

        let program = text
            .split(',')
            .enumerate()
            .map(|(position, token)| {
                let token = token.trim();
                token.parse::<i64>().map_err(|_| Error::InvalidToken {
                    position,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<i64>>>()?;

        Ok(Memory::new(program))
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Memory> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let memory = Memory::parse(&text)?;
        info!("Loaded: {:?} Ints: {}", path, memory.len());
        Ok(memory)
    }

    /// Number of words in the originally loaded program.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn peek(&self, addr: usize) -> i64 {
        match self.cells.get(addr) {
            Some(value) => *value,
            None => self
                .pages
                .get(&(addr / PAGE_SIZE))
                .map_or(0, |page| page[addr % PAGE_SIZE]),
        }
    }

    fn poke(&mut self, addr: usize, value: i64) {
        if let Some(cell) = self.cells.get_mut(addr) {
            *cell = value;
            return;
        }
        let page = self
            .pages
            .entry(addr / PAGE_SIZE)
            .or_insert_with(|| Box::new([0; PAGE_SIZE]));
        page[addr % PAGE_SIZE] = value;
    }

    // Page slots shadowed by the loaded image are never written, so they stay zero.
    fn nonzero(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        let image = self.cells.iter().copied().enumerate();
        let paged = self.pages.iter().flat_map(|(number, page)| {
            let base = number * PAGE_SIZE;
            page.iter()
                .copied()
                .enumerate()
                .map(move |(offset, value)| (base + offset, value))
        });
        image.chain(paged).filter(|(_, value)| *value != 0)
    }
}

/// Two memories are equal when every address reads the same value.
impl PartialEq for Memory {
    fn eq(&self, other: &Memory) -> bool {
        self.nonzero().all(|(addr, value)| other.peek(addr) == value)
            && other.nonzero().all(|(addr, value)| self.peek(addr) == value)
    }
}

impl Eq for Memory {}

impl MemoryRW for Memory {
    fn read(&self, addr: i64) -> Result<i64> {
        Ok(self.peek(index(addr)?))
    }

    fn write(&mut self, addr: i64, value: i64) -> Result<()> {
        self.poke(index(addr)?, value);
        Ok(())
    }
}
