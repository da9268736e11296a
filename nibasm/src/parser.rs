//! Groups the lexeme stream into fixed-arity command records.

use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    UnknownMnemonic(String),
    TruncatedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::UnknownMnemonic(m) => write!(f, "unknown mnemonic \"{}\"", m),
            ParseError::TruncatedCommand(m) => write!(f, "\"{}\" is missing operands", m),
        }
    }
}

impl StdError for ParseError {}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Command {
    pub mnemonic: String,
    pub operands: Vec<String>,
}

/// The fixed mnemonic → operand-count mapping. `None` means unknown.
pub fn arity(mnemonic: &str) -> Option<usize> {
    Some(match mnemonic {
        "SET" => 2,
        "AND" | "OR" | "XOR" | "ADD" | "SUB" | "MULT" | "DIV" | "LSH" | "RSH" => 3,
        "BR" | "NOT" | "LOAD" | "SAVE" | "MOV" => 2,
        "CALL" => 1,
        "RET" => 0,
        "FUNCTION" => 1,
        "LABEL" => 1,
        "ADDRESS" => 2,
        _ => return None,
    })
}

pub fn parse(lexemes: &[String]) -> Result<Vec<Command>, ParseError> {
    let mut commands = Vec::new();
    let mut i = 0;

    while i < lexemes.len() {
        let mnemonic = lexemes[i].clone();
        let n = arity(&mnemonic).ok_or_else(|| ParseError::UnknownMnemonic(mnemonic.clone()))?;
        i += 1;

        if i + n > lexemes.len() {
            return Err(ParseError::TruncatedCommand(mnemonic));
        }

        let operands = lexemes[i..i + n].to_vec();
        i += n;
        commands.push(Command { mnemonic, operands });
    }

    Ok(commands)
}
