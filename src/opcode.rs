//! The four-level nibble-prefix opcode cascade.
//!
//! Every instruction is one 16-bit word split into four nibbles. The first
//! nibble selects one of the level-0 operations; the reserved value 15
//! (`Oth0`) means "this word continues at level 1", and so on down to level
//! 3. Register operands always occupy whichever nibbles a given level
//! leaves unclaimed.

use num::traits::FromPrimitive;

use crate::constants::OTH;
use crate::error::Fault;
use crate::register::RegisterId;
use crate::Word;

#[derive(FromPrimitive, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Op0 {
    Set = 0,
    And = 1,
    Or = 2,
    Xor = 3,
    Add = 4,
    Sub = 5,
    Mult = 6,
    Div = 7,
    Lsh = 8,
    Rsh = 9,
    Oth0 = 15,
}

#[derive(FromPrimitive, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Op1 {
    Br = 0,
    Not = 1,
    Load = 2,
    Save = 3,
    Mov = 4,
    Oth1 = 15,
}

#[derive(FromPrimitive, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Op2 {
    Call = 0,
    Oth2 = 15,
}

#[derive(FromPrimitive, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Op3 {
    Ret = 0,
}

impl Op0 {
    pub fn name(self) -> &'static str {
        match self {
            Op0::Set => "SET",
            Op0::And => "AND",
            Op0::Or => "OR",
            Op0::Xor => "XOR",
            Op0::Add => "ADD",
            Op0::Sub => "SUB",
            Op0::Mult => "MULT",
            Op0::Div => "DIV",
            Op0::Lsh => "LSH",
            Op0::Rsh => "RSH",
            Op0::Oth0 => "OTH0",
        }
    }

    pub fn from_name(name: &str) -> Option<Op0> {
        Some(match name {
            "SET" => Op0::Set,
            "AND" => Op0::And,
            "OR" => Op0::Or,
            "XOR" => Op0::Xor,
            "ADD" => Op0::Add,
            "SUB" => Op0::Sub,
            "MULT" => Op0::Mult,
            "DIV" => Op0::Div,
            "LSH" => Op0::Lsh,
            "RSH" => Op0::Rsh,
            _ => return None,
        })
    }
}

impl Op1 {
    pub fn name(self) -> &'static str {
        match self {
            Op1::Br => "BR",
            Op1::Not => "NOT",
            Op1::Load => "LOAD",
            Op1::Save => "SAVE",
            Op1::Mov => "MOV",
            Op1::Oth1 => "OTH1",
        }
    }

    pub fn from_name(name: &str) -> Option<Op1> {
        Some(match name {
            "BR" => Op1::Br,
            "NOT" => Op1::Not,
            "LOAD" => Op1::Load,
            "SAVE" => Op1::Save,
            "MOV" => Op1::Mov,
            _ => return None,
        })
    }
}

impl Op2 {
    pub fn name(self) -> &'static str {
        match self {
            Op2::Call => "CALL",
            Op2::Oth2 => "OTH2",
        }
    }

    pub fn from_name(name: &str) -> Option<Op2> {
        match name {
            "CALL" => Some(Op2::Call),
            _ => None,
        }
    }
}

impl Op3 {
    pub fn name(self) -> &'static str {
        match self {
            Op3::Ret => "RET",
        }
    }

    pub fn from_name(name: &str) -> Option<Op3> {
        match name {
            "RET" => Some(Op3::Ret),
            _ => None,
        }
    }
}

/// A fully decoded instruction, ready for dispatch.
#[derive(Clone, Copy, Debug)]
pub enum Decoded {
    Set { rd: RegisterId, val: u8 },
    Alu { op: Op0, rd: RegisterId, rs1: RegisterId, rs2: RegisterId },
    Dyadic { op: Op1, rd: RegisterId, rs: RegisterId },
    Call { rs: RegisterId },
    Ret,
}

fn nibble(word: Word, level: u32) -> u8 {
    ((word >> (level * 4)) & 0xF) as u8
}

fn reg(nibble: u8) -> RegisterId {
    // Every nibble value 0..=15 names one of the sixteen registers.
    RegisterId::from_index(nibble).expect("register index out of range")
}

pub fn decode(word: Word) -> Result<Decoded, Fault> {
    let n0 = nibble(word, 0);
    let n1 = nibble(word, 1);
    let n2 = nibble(word, 2);
    let n3 = nibble(word, 3);

    let op0 = Op0::from_u8(n0).ok_or(Fault::UnknownOpcode(word))?;

    match op0 {
        Op0::Set => Ok(Decoded::Set { rd: reg(n1), val: n2 | (n3 << 4) }),
        Op0::Oth0 => {
            let op1 = Op1::from_u8(n1).ok_or(Fault::UnknownOpcode(word))?;
            match op1 {
                Op1::Oth1 => {
                    let op2 = Op2::from_u8(n2).ok_or(Fault::UnknownOpcode(word))?;
                    match op2 {
                        Op2::Call => Ok(Decoded::Call { rs: reg(n3) }),
                        Op2::Oth2 => {
                            let op3 = Op3::from_u8(n3).ok_or(Fault::UnknownOpcode(word))?;
                            match op3 {
                                Op3::Ret => Ok(Decoded::Ret),
                            }
                        }
                    }
                }
                other => Ok(Decoded::Dyadic { op: other, rd: reg(n2), rs: reg(n3) }),
            }
        }
        other => Ok(Decoded::Alu { op: other, rd: reg(n1), rs1: reg(n2), rs2: reg(n3) }),
    }
}

/// Encoders mirroring `decode` one-for-one. Kept separate from the ICG so
/// the bit layout has exactly one place it is assembled and one place it is
/// disassembled.
pub mod encode {
    use super::*;
    use crate::register::register_index;

    fn triadic(op: u8, rd: u8, rs1: u8, rs2: u8) -> Word {
        debug_assert!(op <= OTH && rd <= OTH && rs1 <= OTH && rs2 <= OTH);
        (op as Word) | ((rd as Word) << 4) | ((rs1 as Word) << 8) | ((rs2 as Word) << 12)
    }

    pub fn set(rd: RegisterId, val: u8) -> Word {
        triadic(Op0::Set as u8, register_index(rd) as u8, val & 0xF, (val >> 4) & 0xF)
    }

    pub fn alu(op: Op0, rd: RegisterId, rs1: RegisterId, rs2: RegisterId) -> Word {
        triadic(
            op as u8,
            register_index(rd) as u8,
            register_index(rs1) as u8,
            register_index(rs2) as u8,
        )
    }

    pub fn dyadic(op: Op1, rd: RegisterId, rs: RegisterId) -> Word {
        triadic(Op0::Oth0 as u8, op as u8, register_index(rd) as u8, register_index(rs) as u8)
    }

    pub fn call(rs: RegisterId) -> Word {
        triadic(Op0::Oth0 as u8, Op1::Oth1 as u8, Op2::Call as u8, register_index(rs) as u8)
    }

    pub fn ret() -> Word {
        triadic(Op0::Oth0 as u8, Op1::Oth1 as u8, Op2::Oth2 as u8, Op3::Ret as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_name_round_trip() {
        for name in ["SET", "AND", "OR", "XOR", "ADD", "SUB", "MULT", "DIV", "LSH", "RSH"] {
            let op = Op0::from_name(name).unwrap();
            assert_eq!(op.name(), name);
        }
        for name in ["BR", "NOT", "LOAD", "SAVE", "MOV"] {
            let op = Op1::from_name(name).unwrap();
            assert_eq!(op.name(), name);
        }
        assert_eq!(Op2::from_name("CALL").unwrap().name(), "CALL");
        assert_eq!(Op3::from_name("RET").unwrap().name(), "RET");
    }

    #[test]
    fn decode_cascade_round_trip() {
        use RegisterId::*;

        let w = encode::set(R1, 0xAB);
        match decode(w).unwrap() {
            Decoded::Set { rd, val } => {
                assert_eq!(rd, R1);
                assert_eq!(val, 0xAB);
            }
            other => panic!("unexpected decode: {:?}", other),
        }

        let w = encode::alu(Op0::Mult, R3, R1, R2);
        match decode(w).unwrap() {
            Decoded::Alu { op, rd, rs1, rs2 } => {
                assert_eq!(op, Op0::Mult);
                assert_eq!(rd, R3);
                assert_eq!(rs1, R1);
                assert_eq!(rs2, R2);
            }
            other => panic!("unexpected decode: {:?}", other),
        }

        let w = encode::dyadic(Op1::Not, R2, R1);
        match decode(w).unwrap() {
            Decoded::Dyadic { op, rd, rs } => {
                assert_eq!(op, Op1::Not);
                assert_eq!(rd, R2);
                assert_eq!(rs, R1);
            }
            other => panic!("unexpected decode: {:?}", other),
        }

        let w = encode::call(RA);
        match decode(w).unwrap() {
            Decoded::Call { rs } => assert_eq!(rs, RA),
            other => panic!("unexpected decode: {:?}", other),
        }

        assert!(matches!(decode(encode::ret()).unwrap(), Decoded::Ret));
    }

    #[test]
    fn unknown_opcode_is_rejected() {
        // op=10 is inside the 10..=14 gap that no level-0 variant claims.
        let w: Word = 10;
        assert!(matches!(decode(w), Err(Fault::UnknownOpcode(_))));
    }
}
