//! Thin wiring between [`nibasm`] and [`nibvm`]: read source, assemble it,
//! run it, hand back the executor so a caller can inspect final register
//! state.

use std::fmt;
use std::fs;
use std::path::Path;

use nibvm::{Executor, ExitReason};

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Assemble(nibasm::Error),
    Fault(nibvm::Fault),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "{}", err),
            Error::Assemble(err) => write!(f, "assembling input failed: {}", err),
            Error::Fault(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<nibasm::Error> for Error {
    fn from(err: nibasm::Error) -> Error {
        Error::Assemble(err)
    }
}

impl From<nibvm::Fault> for Error {
    fn from(err: nibvm::Fault) -> Error {
        Error::Fault(err)
    }
}

pub fn run_source(source: &str, stack_bytes: usize) -> Result<(Executor, ExitReason), Error> {
    let assembled = nibasm::assemble(source)?;
    let mut executor = Executor::new(assembled.text, assembled.symbols, stack_bytes)?;
    let exit = executor.run()?;
    Ok((executor, exit))
}

pub fn run_file<P: AsRef<Path>>(path: P, stack_bytes: usize) -> Result<(Executor, ExitReason), Error> {
    let source = fs::read_to_string(path)?;
    run_source(&source, stack_bytes)
}
