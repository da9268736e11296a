//! The fetch-decode-dispatch loop.

use std::collections::HashMap;

use byteorder::ByteOrder;

use crate::constants::{self, FRAME_BYTES};
use crate::error::{ExitReason, Fault};
use crate::opcode::{decode, Decoded, Op0, Op1};
use crate::register::RegisterId;
use crate::stack::Stack;
use crate::{Endian, RegisterValue};

/// What a single [`Executor::tick`] accomplished, and whether the main loop
/// still needs to advance `RI` itself.
#[derive(Debug, Eq, PartialEq)]
pub enum Step {
    /// A plain instruction ran; `RI` has not moved yet.
    Continue,
    /// `CALL` pushed a frame; the callee's `RI` is already positioned.
    Called,
    /// `RET` restored the caller's frame and advanced its `RI` itself.
    Returned,
    /// `RET` ran at the bottom frame. The run is over.
    Halted,
}

#[derive(Debug)]
pub struct Executor {
    text: Vec<u8>,
    stack: Stack,
    symbols: HashMap<String, u32>,
}

impl Executor {
    pub fn new(
        text: Vec<u8>,
        symbols: HashMap<String, u32>,
        stack_capacity: usize,
    ) -> Result<Executor, Fault> {
        let entry = *symbols.get(constants::ENTRY_SYMBOL).ok_or(Fault::MissingEntry)?;

        let mut stack = Stack::new(stack_capacity);
        stack.set(RegisterId::RI, entry as RegisterValue)?;
        stack.set(RegisterId::RB, FRAME_BYTES as RegisterValue)?;
        stack.set(RegisterId::RS, FRAME_BYTES as RegisterValue)?;
        stack.set(RegisterId::RP, 0)?;

        Ok(Executor { text, stack, symbols })
    }

    pub fn symbols(&self) -> &HashMap<String, u32> {
        &self.symbols
    }

    pub fn register(&self, id: RegisterId) -> RegisterValue {
        self.stack.get(id)
    }

    pub fn run(&mut self) -> Result<ExitReason, Fault> {
        loop {
            match self.tick()? {
                Step::Continue => {
                    let ri = self.stack.get(RegisterId::RI);
                    self.stack.set(RegisterId::RI, ri + constants::WORD_BYTES as RegisterValue)?;
                }
                Step::Called | Step::Returned => {}
                Step::Halted => return Ok(ExitReason::Halted),
            }
        }
    }

    /// Executes exactly one instruction.
    pub fn tick(&mut self) -> Result<Step, Fault> {
        let ri = self.stack.get(RegisterId::RI) as usize;
        let word_bytes = constants::WORD_BYTES as usize;
        let word = Endian::read_u16(&self.text[ri..ri + word_bytes]);

        match decode(word)? {
            Decoded::Set { rd, val } => {
                self.stack.set(rd, val as RegisterValue)?;
                Ok(Step::Continue)
            }

            Decoded::Alu { op, rd, rs1, rs2 } => {
                let a = self.stack.get(rs1);
                let b = self.stack.get(rs2);
                let result = match op {
                    Op0::And => a & b,
                    Op0::Or => a | b,
                    Op0::Xor => a ^ b,
                    Op0::Add => a.wrapping_add(b),
                    Op0::Sub => a.wrapping_sub(b),
                    Op0::Mult => a.wrapping_mul(b),
                    Op0::Div => {
                        if b == 0 {
                            return Err(Fault::DivisionByZero);
                        }
                        a.wrapping_div(b)
                    }
                    Op0::Lsh => a.wrapping_shl((b & 63) as u32),
                    Op0::Rsh => a.wrapping_shr((b & 63) as u32),
                    Op0::Set | Op0::Oth0 => {
                        unreachable!("decode never produces Decoded::Alu for {:?}", op)
                    }
                };
                self.stack.set(rd, result)?;
                Ok(Step::Continue)
            }

            Decoded::Dyadic { op, rd, rs } => {
                match op {
                    Op1::Not => {
                        let v = self.stack.get(rs);
                        self.stack.set(rd, !v)?;
                    }
                    Op1::Mov => {
                        let v = self.stack.get(rs);
                        self.stack.set(rd, v)?;
                    }
                    Op1::Br => return Err(Fault::Unimplemented("BR")),
                    Op1::Load => return Err(Fault::Unimplemented("LOAD")),
                    Op1::Save => return Err(Fault::Unimplemented("SAVE")),
                    Op1::Oth1 => unreachable!("decode never produces Decoded::Dyadic for Oth1"),
                }
                Ok(Step::Continue)
            }

            Decoded::Call { rs } => {
                let target = self.stack.get(rs);
                let new_offset = self.stack.get(RegisterId::RS) as usize;
                let caller_rb = self.stack.get(RegisterId::RB);

                self.stack.push_frame(new_offset)?;
                self.stack.set(RegisterId::RI, target)?;
                self.stack.set(RegisterId::RP, caller_rb)?;
                let new_rb = (new_offset + FRAME_BYTES) as RegisterValue;
                self.stack.set(RegisterId::RB, new_rb)?;
                self.stack.set(RegisterId::RS, new_rb)?;

                Ok(Step::Called)
            }

            Decoded::Ret => {
                let rp = self.stack.get(RegisterId::RP);
                if rp == 0 {
                    return Ok(Step::Halted);
                }

                let restored_offset = (rp as usize) - FRAME_BYTES;
                self.stack.pop_frame(restored_offset);
                let ri = self.stack.get(RegisterId::RI);
                self.stack.set(RegisterId::RI, ri + constants::WORD_BYTES as RegisterValue)?;

                Ok(Step::Returned)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::encode;
    use RegisterId::*;

    fn assemble(words: &[crate::Word]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn missing_entry_is_rejected() {
        let text = assemble(&[encode::ret()]);
        let symbols = HashMap::new();
        let err = Executor::new(text, symbols, constants::DEFAULT_STACK_BYTES).unwrap_err();
        assert_eq!(err, Fault::MissingEntry);
    }

    #[test]
    fn division_by_zero_faults() {
        let text = assemble(&[
            encode::set(R1, 10),
            encode::set(R2, 0),
            encode::alu(Op0::Div, R3, R1, R2),
            encode::ret(),
        ]);
        let mut symbols = HashMap::new();
        symbols.insert(constants::ENTRY_SYMBOL.to_owned(), 0);
        let mut executor = Executor::new(text, symbols, constants::DEFAULT_STACK_BYTES).unwrap();
        assert_eq!(executor.run(), Err(Fault::DivisionByZero));
    }

    #[test]
    fn call_isolates_callee_frame_and_restores_caller() {
        // FUNCTION inner: SET R1,7 ; RET
        // FUNCTION __start: SET R1,42 ; SET RA,<inner offset> ; CALL RA ; RET
        let inner = vec![encode::set(R1, 7), encode::ret()];
        let inner_offset: u32 = 0;
        let start_offset = (inner.len() * 2) as u32;

        let start = vec![
            encode::set(R1, 42),
            encode::set(RA, inner_offset as u8),
            encode::call(RA),
            encode::ret(),
        ];

        let mut words = inner;
        words.extend(start);
        let text = assemble(&words);

        let mut symbols = HashMap::new();
        symbols.insert("inner".to_owned(), inner_offset);
        symbols.insert(constants::ENTRY_SYMBOL.to_owned(), start_offset);

        let mut executor = Executor::new(text, symbols, constants::DEFAULT_STACK_BYTES).unwrap();
        assert_eq!(executor.run(), Ok(ExitReason::Halted));
        assert_eq!(executor.register(R1), 42);
    }

    #[test]
    fn unimplemented_br_faults() {
        let text = assemble(&[encode::dyadic(Op1::Br, R1, R2), encode::ret()]);
        let mut symbols = HashMap::new();
        symbols.insert(constants::ENTRY_SYMBOL.to_owned(), 0);
        let mut executor = Executor::new(text, symbols, constants::DEFAULT_STACK_BYTES).unwrap();
        assert_eq!(executor.run(), Err(Fault::Unimplemented("BR")));
    }
}
