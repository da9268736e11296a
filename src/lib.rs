extern crate num;
#[macro_use]
extern crate num_derive;

pub mod constants;
pub mod error;
pub mod executor;
pub mod opcode;
pub mod register;
pub mod stack;

/// A single bytecode word. Instructions are always exactly one word wide.
pub type Word = u16;

/// A register value. All sixteen registers hold signed 64-bit integers.
pub type RegisterValue = i64;

/// Byte order used for every multi-byte value in the text segment and stack.
pub type Endian = byteorder::LittleEndian;

pub use error::{ExitReason, Fault};
pub use executor::Executor;
pub use opcode::{decode, Decoded};
pub use register::RegisterId;
pub use stack::Stack;
