use thiserror::Error;

use crate::cpu::Instruction;

#[derive(Debug, Error, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DecodeError {
    #[error("unsupported opcode 0b{0:08b}")]
    UnsupportedOpcode(u8),
    #[error("unsupported ALU operation 0b{0:08b}")]
    UnsupportedAluOp(u8),
}

pub type Result<T> = std::result::Result<T, DecodeError>;

pub trait DecodeOne {
    type Instruction: Instruction;

    fn decode_one(&self, bytes: &[u8]) -> Result<Self::Instruction>;
}
