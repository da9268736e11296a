//! Intermediate code generation: lowers command records into instruction
//! words, maintaining the function symbol table and expanding the `SET`
//! and `ADDRESS` pseudo-ops via `macro_set`.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;

use nibvm::opcode::{encode, Op0, Op1};
use nibvm::register::RegisterId;
use nibvm::{constants, Word};

use crate::int_util::{self, LiteralError};
use crate::parser::Command;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CodegenError {
    UnknownRegister(String),
    FunctionExists(String),
    UnknownSymbol(String),
    Unsupported(&'static str),
    InvalidLiteral(LiteralError),
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodegenError::UnknownRegister(name) => write!(f, "unknown register \"{}\"", name),
            CodegenError::FunctionExists(name) => write!(f, "function \"{}\" is already defined", name),
            CodegenError::UnknownSymbol(name) => write!(f, "reference to undefined symbol \"{}\"", name),
            CodegenError::Unsupported(what) => write!(f, "{} is not supported", what),
            CodegenError::InvalidLiteral(err) => write!(f, "{}", err),
        }
    }
}

impl StdError for CodegenError {}

impl From<LiteralError> for CodegenError {
    fn from(err: LiteralError) -> CodegenError {
        CodegenError::InvalidLiteral(err)
    }
}

#[derive(Debug)]
pub struct Generated {
    pub words: Vec<Word>,
    pub symbols: HashMap<String, u32>,
}

/// Expands a wide immediate load into `SET Rd,0` followed by one
/// shift-and-or quartet per remaining big-endian byte of `value`.
fn macro_set(words: &mut Vec<Word>, rd: RegisterId, value: i64) {
    let bytes = (value as u64).to_be_bytes();
    let remaining = bytes.iter().copied().skip_while(|&b| b == 0);

    words.push(encode::set(rd, 0));

    for byte in remaining {
        words.push(encode::set(RegisterId::RT, 8));
        words.push(encode::alu(Op0::Lsh, rd, rd, RegisterId::RT));
        words.push(encode::set(RegisterId::RT, byte));
        words.push(encode::alu(Op0::Or, rd, rd, RegisterId::RT));
    }
}

fn register(name: &str) -> Result<RegisterId, CodegenError> {
    RegisterId::from_name(name).ok_or_else(|| CodegenError::UnknownRegister(name.to_owned()))
}

pub fn generate(commands: &[Command]) -> Result<Generated, CodegenError> {
    let mut words: Vec<Word> = Vec::new();
    let mut symbols: HashMap<String, u32> = HashMap::new();

    for command in commands {
        match command.mnemonic.as_str() {
            "FUNCTION" => {
                let name = &command.operands[0];
                let offset = words.len() as u32 * constants::WORD_BYTES;
                if symbols.insert(name.clone(), offset).is_some() {
                    return Err(CodegenError::FunctionExists(name.clone()));
                }
            }

            "LABEL" => return Err(CodegenError::Unsupported("LABEL")),

            "ADDRESS" => {
                let rd = register(&command.operands[0])?;
                let name = &command.operands[1];
                let offset = *symbols
                    .get(name)
                    .ok_or_else(|| CodegenError::UnknownSymbol(name.clone()))?;
                macro_set(&mut words, rd, offset as i64);
            }

            "SET" => {
                let rd = register(&command.operands[0])?;
                let value = int_util::parse_i64(&command.operands[1])?;
                macro_set(&mut words, rd, value);
            }

            "CALL" => {
                let rs = register(&command.operands[0])?;
                words.push(encode::call(rs));
            }

            "RET" => {
                words.push(encode::ret());
            }

            mnemonic if Op0::from_name(mnemonic).is_some() => {
                let op = Op0::from_name(mnemonic).unwrap();
                let rd = register(&command.operands[0])?;
                let rs1 = register(&command.operands[1])?;
                let rs2 = register(&command.operands[2])?;
                words.push(encode::alu(op, rd, rs1, rs2));
            }

            mnemonic if Op1::from_name(mnemonic).is_some() => {
                let op = Op1::from_name(mnemonic).unwrap();
                let rd = register(&command.operands[0])?;
                let rs = register(&command.operands[1])?;
                words.push(encode::dyadic(op, rd, rs));
            }

            other => unreachable!("parser already rejects unknown mnemonic \"{}\"", other),
        }
    }

    Ok(Generated { words, symbols })
}
