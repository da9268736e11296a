//! Assembler for the [nibvm](../nibvm/index.html) virtual machine.
//!
//! [`assemble`] accepts source text in the mnemonic assembly language
//! described by the nibvm ISA and produces the flat, headerless byte
//! sequence nibvm's executor runs directly, along with the function symbol
//! table built along the way.

pub mod codegen;
pub mod emit;
pub mod error;
pub mod int_util;
pub mod lexer;
pub mod parser;

use std::collections::HashMap;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Assembled {
    pub text: Vec<u8>,
    pub symbols: HashMap<String, u32>,
}

pub fn assemble(source: &str) -> Result<Assembled> {
    let lexemes = lexer::lex(source)?;
    let commands = parser::parse(&lexemes)?;
    let generated = codegen::generate(&commands)?;
    let text = emit::emit(&generated.words);

    Ok(Assembled { text, symbols: generated.symbols })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_and_resolves_entry_symbol() {
        let assembled = assemble("FUNCTION __start\nSET R1 5\nRET\n").unwrap();
        assert_eq!(assembled.symbols["__start"], 0);
        assert_eq!(assembled.text.len() % 2, 0);
    }

    #[test]
    fn unknown_mnemonic_propagates_as_parse_error() {
        let err = assemble("BOGUS R1\n").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn undefined_symbol_propagates_as_codegen_error() {
        let err = assemble("FUNCTION __start\nADDRESS RA nope\nRET\n").unwrap_err();
        assert!(matches!(err, Error::Codegen(_)));
    }
}
