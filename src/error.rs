use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    // Load time
    #[error("token {position} is not an integer: {token:?}")]
    InvalidToken { position: usize, token: String },
    #[error("program text contains no integers")]
    EmptyProgram,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // Run time
    #[error("unknown opcode {word} at {address}")]
    UnknownOpcode { word: i64, address: i64 },
    #[error("invalid addressing mode {mode} in opcode {word} at {address}")]
    InvalidMode { mode: i64, word: i64, address: i64 },
    #[error("negative address {0}")]
    NegativeAddress(i64),
    #[error("immediate mode used as write destination at {address}")]
    ImmediateWrite { address: i64 },
    #[error("input exhausted at {address}")]
    InputExhausted { address: i64 },
    #[error("machine is in a fatal state")]
    Faulted,
}
