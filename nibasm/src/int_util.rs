//! Base-autodetected signed 64-bit integer literal parsing.
//!
//! Reduced from the general per-width machinery a larger assembler would
//! need (see the grounding note in DESIGN.md) since this grammar has
//! exactly one literal width: a signed 64-bit immediate.

use std::error::Error as StdError;
use std::fmt;
use std::num::ParseIntError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiteralError {
    pub literal: String,
    pub source: ParseIntError,
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cannot parse \"{}\" as an integer: {}", self.literal, self.source)
    }
}

impl StdError for LiteralError {}

pub fn parse_i64(literal: &str) -> Result<i64, LiteralError> {
    let (negate, rest) = match literal.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, literal),
    };

    let parsed = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).map(|v| v as i64)
    } else if rest.len() > 1 && rest.starts_with('0') {
        u64::from_str_radix(&rest[1..], 8).map(|v| v as i64)
    } else {
        rest.parse::<i64>()
    };

    parsed
        .map(|value| if negate { value.wrapping_neg() } else { value })
        .map_err(|source| LiteralError { literal: literal.to_owned(), source })
}
