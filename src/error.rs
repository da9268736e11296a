use std::error::Error as StdError;
use std::fmt;

use crate::Word;

/// A fatal condition raised while executing the bytecode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fault {
    /// The function symbol table has no entry for `__start`.
    MissingEntry,
    /// A fetched word did not decode to any reachable opcode path.
    UnknownOpcode(Word),
    /// `DIV` with a zero divisor.
    DivisionByZero,
    /// `BR`, `LOAD` or `SAVE` were executed; their semantics are reserved.
    Unimplemented(&'static str),
    /// A register write or frame push would exceed the stack's capacity.
    StackOverflow,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Fault::MissingEntry => write!(f, "no \"__start\" function defined"),
            Fault::UnknownOpcode(word) => write!(f, "word 0x{:04x} does not decode to a known opcode", word),
            Fault::DivisionByZero => write!(f, "division by zero"),
            Fault::Unimplemented(mnemonic) => write!(f, "{} has reserved, unimplemented semantics", mnemonic),
            Fault::StackOverflow => write!(f, "stack overflow"),
        }
    }
}

impl StdError for Fault {}

/// Why a run stopped, successful or not.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExitReason {
    /// `RET` executed at the bottom frame (`RP == 0`). Clean termination.
    Halted,
    Fault(Fault),
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExitReason::Halted => write!(f, "halted"),
            ExitReason::Fault(fault) => write!(f, "{}", fault),
        }
    }
}

impl From<Fault> for ExitReason {
    fn from(fault: Fault) -> ExitReason {
        ExitReason::Fault(fault)
    }
}
