use std::error::Error as StdError;
use std::fmt;

use crate::codegen::CodegenError;
use crate::lexer::LexError;
use crate::parser::ParseError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    Lex(LexError),
    Parse(ParseError),
    Codegen(CodegenError),
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Error {
        Error::Lex(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<CodegenError> for Error {
    fn from(err: CodegenError) -> Error {
        Error::Codegen(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Lex(err) => write!(f, "{}", err),
            Error::Parse(err) => write!(f, "{}", err),
            Error::Codegen(err) => write!(f, "{}", err),
        }
    }
}

impl StdError for Error {}
